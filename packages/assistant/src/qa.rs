use std::fmt;

use serde::Serialize;
use tracing::{debug, warn};

use crate::client::{Embedder, LlmClient, LlmRequest, Message};
use crate::config::AssistantConfig;
use crate::error::{AssistantError, Result};
use crate::prompt;
use crate::search::{ScoredClause, SemanticIndex};

/// Message shown when neither the LLM nor retrieval produced an answer.
pub const ANSWER_UNAVAILABLE: &str = "Sorry, cannot answer right now.";

/// Clauses returned by the retrieval fallback.
pub const RELATED_CLAUSES: usize = 3;

/// Outcome of a question about a document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Answer {
    /// Answer written by the LLM.
    Generated { text: String },
    /// Most related clauses, best first.
    Related { clauses: Vec<ScoredClause> },
    Unavailable,
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generated { text } => f.write_str(text),
            Self::Related { clauses } => {
                for (i, hit) in clauses.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "[{:.3}] {}", hit.score, hit.clause)?;
                }
                Ok(())
            }
            Self::Unavailable => f.write_str(ANSWER_UNAVAILABLE),
        }
    }
}

/// Answers questions about a document.
///
/// Asks the LLM first. When that is not configured or fails, falls back to
/// the clauses most similar to the question.
pub struct QaEngine<'a> {
    llm: Option<&'a dyn LlmClient>,
    embedder: Option<&'a dyn Embedder>,
    config: &'a AssistantConfig,
}

impl<'a> QaEngine<'a> {
    pub fn new(
        llm: Option<&'a dyn LlmClient>,
        embedder: Option<&'a dyn Embedder>,
        config: &'a AssistantConfig,
    ) -> Self {
        Self { llm, embedder, config }
    }

    /// Answer `question` about the document `context`, split into `clauses`.
    pub async fn answer(&self, question: &str, context: &str, clauses: &[String]) -> Answer {
        if let Some(llm) = self.llm {
            match self.ask_llm(llm, question, context).await {
                Ok(text) => return Answer::Generated { text },
                Err(e) => warn!(error = %e, "LLM question answering failed, trying retrieval"),
            }
        }

        if let Some(embedder) = self.embedder {
            if !clauses.is_empty() {
                match retrieve(embedder, question, clauses).await {
                    Ok(hits) if !hits.is_empty() => return Answer::Related { clauses: hits },
                    Ok(_) => debug!("retrieval returned no clauses"),
                    Err(e) => warn!(error = %e, "clause retrieval failed"),
                }
            }
        }

        Answer::Unavailable
    }

    async fn ask_llm(&self, llm: &dyn LlmClient, question: &str, context: &str) -> Result<String> {
        let request = LlmRequest {
            messages: vec![Message::user(prompt::build_question_prompt(context, question))],
            max_tokens: self.config.max_tokens,
            temperature: 0.0,
        };
        let response = llm.complete(&request).await?;
        Ok(response.content.trim().to_string())
    }
}

async fn retrieve(embedder: &dyn Embedder, question: &str, clauses: &[String]) -> Result<Vec<ScoredClause>> {
    let index = SemanticIndex::build(clauses.to_vec(), embedder).await?;
    let query = embedder
        .embed(&[question.to_string()])
        .await?
        .pop()
        .ok_or(AssistantError::EmbeddingCount { expected: 1, actual: 0 })?;
    Ok(index.query(&query, RELATED_CLAUSES))
}
