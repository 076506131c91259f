use tracing::{debug, warn};

use crate::chunk::chunk_text;
use crate::client::{LlmClient, LlmRequest, Message};
use crate::config::AssistantConfig;
use crate::error::Result;
use crate::prompt;

/// Returned when a short document cannot be summarized.
pub const SUMMARY_UNAVAILABLE: &str = "Summary unavailable.";

/// Characters kept from a chunk whose summary failed.
const CHUNK_FALLBACK_CHARS: usize = 500;

const SUMMARY_TEMPERATURE: f64 = 0.1;

/// Summarizes documents of any length with map-reduce over chunks.
pub struct Summarizer<'a, C: LlmClient> {
    client: &'a C,
    config: &'a AssistantConfig,
}

impl<'a, C: LlmClient> Summarizer<'a, C> {
    pub fn new(client: &'a C, config: &'a AssistantConfig) -> Self {
        Self { client, config }
    }

    /// Summarize a single piece of text.
    pub async fn summarize(&self, text: &str) -> Result<String> {
        let request = LlmRequest {
            messages: vec![Message::user(prompt::build_summary_prompt(text))],
            max_tokens: self.config.max_tokens,
            temperature: SUMMARY_TEMPERATURE,
        };
        let response = self.client.complete(&request).await?;
        Ok(response.content.trim().to_string())
    }

    /// Summarize a whole document.
    ///
    /// Never fails: a short document whose summary fails yields
    /// [`SUMMARY_UNAVAILABLE`]; in a long document each failed chunk is
    /// replaced by its opening characters, and if the final pass fails the
    /// joined chunk summaries are returned as they are.
    pub async fn summarize_document(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        if text.chars().count() <= self.config.chunk_size {
            return match self.summarize(text).await {
                Ok(summary) => summary,
                Err(e) => {
                    warn!(error = %e, "summarization failed on short text");
                    SUMMARY_UNAVAILABLE.to_string()
                }
            };
        }

        let chunks = chunk_text(text, self.config.chunk_size, self.config.chunk_overlap);
        debug!(chunks = chunks.len(), "summarizing document in chunks");

        let mut summaries = Vec::with_capacity(chunks.len());
        for (i, chunk) in chunks.iter().enumerate() {
            match self.summarize(chunk).await {
                Ok(summary) => summaries.push(summary),
                Err(e) => {
                    warn!(chunk = i, error = %e, "chunk summarization failed");
                    let head: String = chunk.chars().take(CHUNK_FALLBACK_CHARS).collect();
                    summaries.push(format!("{head}..."));
                }
            }
        }

        let combined = summaries.join("\n\n");
        match self.summarize(&combined).await {
            Ok(summary) => summary,
            Err(e) => {
                warn!(error = %e, "final summarization failed, returning chunk summaries");
                combined
            }
        }
    }
}
