use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("LLM API request failed: {0}")]
    LlmApiRequest(#[from] reqwest::Error),

    #[error("LLM API error (status {status}): {message}")]
    LlmApiError { status: u16, message: String },

    #[error("LLM rate limited, retry after {retry_after_secs}s")]
    LlmRateLimited { retry_after_secs: u64 },

    #[error("failed to parse LLM response: {0}")]
    LlmResponseParse(String),

    #[error("LLM returned empty response")]
    LlmEmptyResponse,

    #[error("got {actual} embeddings for {expected} texts")]
    EmbeddingCount { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, AssistantError>;
