//! Clausewise assistant
//!
//! LLM-backed helpers around the clause analysis core:
//! - Map-reduce summarization of long contracts
//! - Question answering with a semantic clause retrieval fallback
//! - An OpenAI-compatible HTTP client for chat completions and embeddings
//!
//! Every remote capability sits behind a trait ([`LlmClient`], [`Embedder`])
//! so callers can inject their own backend or a mock.

pub mod chunk;
pub mod client;
pub mod config;
pub mod error;
pub mod prompt;
pub mod qa;
pub mod search;
pub mod summarize;

pub use chunk::chunk_text;
#[cfg(any(test, feature = "test-utils"))]
pub use client::test_support::{MockEmbedder, MockLlmClient};
pub use client::{Embedder, LlmClient, LlmRequest, LlmResponse, Message, OpenAiClient, Role};
pub use config::AssistantConfig;
pub use error::{AssistantError, Result};
pub use qa::{Answer, QaEngine};
pub use search::{cosine_similarity, ScoredClause, SemanticIndex};
pub use summarize::Summarizer;
