use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::AssistantConfig;
use crate::error::{AssistantError, Result};

/// Role of a message in the conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single message in the conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Request to the LLM.
#[derive(Debug, Clone)]
pub struct LlmRequest {
    pub messages: Vec<Message>,
    pub max_tokens: u32,
    pub temperature: f64,
}

/// Response from the LLM.
#[derive(Debug, Clone)]
pub struct LlmResponse {
    pub content: String,
    pub input_tokens: u64,
    pub output_tokens: u64,
}

/// Trait for LLM clients, enabling mocking in tests.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse>;
}

/// Trait for text embedding backends.
///
/// Returns one vector per input text, in input order.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
}

/// Client for OpenAI-compatible chat completion and embedding endpoints.
///
/// NOTE: Do NOT derive `Debug` on this struct: `api_key` would be exposed.
pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    api_base_url: String,
    model: String,
    embedding_model: String,
    retry_delays: Vec<Duration>,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f64,
    messages: &'a [Message],
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct Usage {
    prompt_tokens: u64,
    completion_tokens: u64,
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    index: usize,
    embedding: Vec<f32>,
}

#[derive(Deserialize)]
struct ApiErrorResponse {
    error: Option<ApiErrorDetail>,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

impl OpenAiClient {
    pub fn new(config: &AssistantConfig) -> Result<Self> {
        let api_key = config.require_api_key()?.to_string();

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(AssistantError::LlmApiRequest)?;

        Ok(Self {
            http,
            api_key,
            api_base_url: config.api_base_url.clone(),
            model: config.model.clone(),
            embedding_model: config.embedding_model.clone(),
            retry_delays: vec![
                Duration::from_secs(1),
                Duration::from_secs(2),
                Duration::from_secs(4),
            ],
        })
    }

    /// Replace the backoff schedule. One retry is made per delay.
    pub fn with_retry_delays(mut self, delays: Vec<Duration>) -> Self {
        self.retry_delays = delays;
        self
    }

    /// POST `body` to `endpoint` and decode a 200 response, retrying transport
    /// errors, rate limits and server errors.
    async fn post_json<B, T>(&self, endpoint: &str, body: &B) -> Result<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned + Send,
    {
        let url = format!("{}{}", self.api_base_url, endpoint);
        let max_attempts = self.retry_delays.len() + 1;

        let mut last_error: Option<AssistantError> = None;
        let mut next_delay = Duration::ZERO;

        for attempt in 0..max_attempts {
            if attempt > 0 {
                debug!(attempt, endpoint, "retrying LLM request after {:?}", next_delay);
                tokio::time::sleep(next_delay).await;
            }

            // Reset to the base exponential delay for the next potential retry
            next_delay = self
                .retry_delays
                .get(attempt)
                .or_else(|| self.retry_delays.last())
                .copied()
                .unwrap_or(Duration::ZERO);

            let resp = self
                .http
                .post(&url)
                .bearer_auth(&self.api_key)
                .json(body)
                .send()
                .await;

            let resp = match resp {
                Ok(r) => r,
                Err(e) => {
                    warn!(attempt, endpoint, error = %e, "LLM request failed");
                    last_error = Some(AssistantError::LlmApiRequest(e));
                    continue;
                }
            };

            let status = resp.status().as_u16();

            if status == 429 {
                let retry_after = resp
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok());
                warn!(attempt, endpoint, ?retry_after, "LLM rate limited");
                // Use the server-provided retry-after, at least as long as the base delay
                if let Some(secs) = retry_after {
                    next_delay = Duration::from_secs(secs).max(next_delay);
                }
                last_error = Some(AssistantError::LlmRateLimited {
                    retry_after_secs: retry_after.unwrap_or(next_delay.as_secs()),
                });
                continue;
            }

            if status >= 500 {
                let body_text = resp.text().await.unwrap_or_default();
                warn!(attempt, endpoint, status, body = %body_text, "LLM server error");
                last_error = Some(AssistantError::LlmApiError {
                    status,
                    message: body_text,
                });
                continue;
            }

            if status != 200 {
                let body_text = resp.text().await.unwrap_or_default();
                let message = serde_json::from_str::<ApiErrorResponse>(&body_text)
                    .ok()
                    .and_then(|r| r.error)
                    .map(|e| e.message)
                    .unwrap_or(body_text);
                return Err(AssistantError::LlmApiError { status, message });
            }

            return resp
                .json::<T>()
                .await
                .map_err(|e| AssistantError::LlmResponseParse(e.to_string()));
        }

        Err(last_error.unwrap_or(AssistantError::LlmEmptyResponse))
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse> {
        let body = ChatRequest {
            model: &self.model,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            messages: &request.messages,
        };

        let response: ChatResponse = self.post_json("/v1/chat/completions", &body).await?;

        let content = response
            .choices
            .into_iter()
            .filter_map(|choice| choice.message.content)
            .collect::<Vec<_>>()
            .join("");

        if content.trim().is_empty() {
            return Err(AssistantError::LlmEmptyResponse);
        }

        let (input_tokens, output_tokens) = response
            .usage
            .map(|u| (u.prompt_tokens, u.completion_tokens))
            .unwrap_or_default();

        Ok(LlmResponse {
            content,
            input_tokens,
            output_tokens,
        })
    }
}

#[async_trait]
impl Embedder for OpenAiClient {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let body = EmbeddingRequest {
            model: &self.embedding_model,
            input: texts,
        };

        let mut response: EmbeddingResponse = self.post_json("/v1/embeddings", &body).await?;

        if response.data.len() != texts.len() {
            return Err(AssistantError::EmbeddingCount {
                expected: texts.len(),
                actual: response.data.len(),
            });
        }

        response.data.sort_by_key(|d| d.index);
        Ok(response.data.into_iter().map(|d| d.embedding).collect())
    }
}

/// Test utilities for the LLM client.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_support {
    use super::*;
    use std::sync::Mutex;

    /// Mock LLM client for testing. Returns pre-configured responses in order.
    pub struct MockLlmClient {
        responses: Mutex<Vec<Result<LlmResponse>>>,
        prompts: Mutex<Vec<String>>,
    }

    impl MockLlmClient {
        pub fn new(responses: Vec<Result<LlmResponse>>) -> Self {
            // Reverse so we can pop from the end
            let mut responses = responses;
            responses.reverse();
            Self {
                responses: Mutex::new(responses),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub fn with_response(content: &str) -> Self {
            Self::with_responses(vec![content])
        }

        pub fn with_responses(contents: Vec<&str>) -> Self {
            Self::new(contents.into_iter().map(|c| Ok(response(c))).collect())
        }

        /// A client whose every call fails.
        pub fn failing() -> Self {
            Self::new(Vec::new())
        }

        /// Prompts received so far, in call order.
        pub fn prompts(&self) -> Vec<String> {
            self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
        }
    }

    pub fn response(content: &str) -> LlmResponse {
        LlmResponse {
            content: content.to_string(),
            input_tokens: 100,
            output_tokens: 200,
        }
    }

    #[async_trait]
    impl LlmClient for MockLlmClient {
        async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse> {
            if let Ok(mut prompts) = self.prompts.lock() {
                prompts.extend(request.messages.iter().map(|m| m.content.clone()));
            }
            let mut responses = self
                .responses
                .lock()
                .map_err(|e| AssistantError::LlmResponseParse(format!("mock lock poisoned: {e}")))?;
            responses.pop().unwrap_or(Err(AssistantError::LlmEmptyResponse))
        }
    }

    /// Mock embedder that maps each text to keyword counts.
    ///
    /// Dimension `i` counts the occurrences of `vocabulary[i]` in the
    /// lower-cased text.
    pub struct MockEmbedder {
        vocabulary: Vec<String>,
        fail: bool,
    }

    impl MockEmbedder {
        pub fn new(vocabulary: &[&str]) -> Self {
            Self {
                vocabulary: vocabulary.iter().map(|w| w.to_lowercase()).collect(),
                fail: false,
            }
        }

        pub fn failing() -> Self {
            Self {
                vocabulary: Vec::new(),
                fail: true,
            }
        }
    }

    #[async_trait]
    impl Embedder for MockEmbedder {
        async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            if self.fail {
                return Err(AssistantError::LlmEmptyResponse);
            }
            Ok(texts
                .iter()
                .map(|text| {
                    let lowered = text.to_lowercase();
                    self.vocabulary
                        .iter()
                        .map(|word| lowered.matches(word.as_str()).count() as f32)
                        .collect()
                })
                .collect())
        }
    }
}
