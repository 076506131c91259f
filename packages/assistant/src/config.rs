use crate::error::{AssistantError, Result};

const DEFAULT_API_BASE_URL: &str = "https://api.openai.com";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";
const DEFAULT_MAX_TOKENS: u32 = 256;
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Characters per summarization chunk.
pub const DEFAULT_CHUNK_SIZE: usize = 3000;

/// Characters shared between neighbouring chunks.
pub const DEFAULT_CHUNK_OVERLAP: usize = 200;

/// Configuration for the LLM-backed assistant.
///
/// The API key is optional: without one the assistant runs without an LLM and
/// every operation takes its fallback path.
#[derive(Clone)]
pub struct AssistantConfig {
    pub api_key: Option<String>,
    pub api_base_url: String,
    pub model: String,
    pub embedding_model: String,
    pub max_tokens: u32,
    pub timeout_secs: u64,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
}

impl std::fmt::Debug for AssistantConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssistantConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_base_url", &self.api_base_url)
            .field("model", &self.model)
            .field("embedding_model", &self.embedding_model)
            .field("max_tokens", &self.max_tokens)
            .field("timeout_secs", &self.timeout_secs)
            .field("chunk_size", &self.chunk_size)
            .field("chunk_overlap", &self.chunk_overlap)
            .finish()
    }
}

impl AssistantConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = non_empty("OPENAI_API_KEY");

        let api_base_url = non_empty("OPENAI_API_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.into());

        let model = non_empty("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.into());

        let embedding_model =
            non_empty("OPENAI_EMBEDDING_MODEL").unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.into());

        let max_tokens = non_empty("LLM_MAX_TOKENS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_MAX_TOKENS);

        let timeout_secs = non_empty("LLM_TIMEOUT_SECS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            api_key,
            api_base_url,
            model,
            embedding_model,
            max_tokens,
            timeout_secs,
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
        }
    }

    /// Whether an LLM can be called at all.
    pub fn llm_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    /// The API key, or a configuration error naming the missing variable.
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| AssistantError::Config("OPENAI_API_KEY not set".into()))
    }

    /// Create a config builder for testing.
    pub fn builder() -> AssistantConfigBuilder {
        AssistantConfigBuilder {
            api_key: None,
            api_base_url: DEFAULT_API_BASE_URL.into(),
            model: DEFAULT_MODEL.into(),
            embedding_model: DEFAULT_EMBEDDING_MODEL.into(),
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
        }
    }
}

/// Builder for constructing `AssistantConfig` in tests.
pub struct AssistantConfigBuilder {
    api_key: Option<String>,
    api_base_url: String,
    model: String,
    embedding_model: String,
    max_tokens: u32,
    timeout_secs: u64,
    chunk_size: usize,
    chunk_overlap: usize,
}

impl AssistantConfigBuilder {
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn api_base_url(mut self, api_base_url: impl Into<String>) -> Self {
        self.api_base_url = api_base_url.into();
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn embedding_model(mut self, embedding_model: impl Into<String>) -> Self {
        self.embedding_model = embedding_model.into();
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn chunk_overlap(mut self, chunk_overlap: usize) -> Self {
        self.chunk_overlap = chunk_overlap;
        self
    }

    pub fn build(self) -> AssistantConfig {
        AssistantConfig {
            api_key: self.api_key,
            api_base_url: self.api_base_url,
            model: self.model,
            embedding_model: self.embedding_model,
            max_tokens: self.max_tokens,
            timeout_secs: self.timeout_secs,
            chunk_size: self.chunk_size,
            chunk_overlap: self.chunk_overlap,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_variables() {
        let config = AssistantConfig::from_lookup(lookup(&[]));
        assert!(!config.llm_enabled());
        assert_eq!(config.api_base_url, "https://api.openai.com");
        assert_eq!(config.max_tokens, 256);
        assert_eq!(config.chunk_size, 3000);
        assert_eq!(config.chunk_overlap, 200);
        assert!(config.require_api_key().is_err());
    }

    #[test]
    fn test_reads_variables() {
        let config = AssistantConfig::from_lookup(lookup(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENAI_API_BASE_URL", "http://localhost:8080/"),
            ("OPENAI_MODEL", "local-model"),
            ("LLM_MAX_TOKENS", "512"),
            ("LLM_TIMEOUT_SECS", "not-a-number"),
        ]));
        assert_eq!(config.require_api_key().ok(), Some("sk-test"));
        assert_eq!(config.api_base_url, "http://localhost:8080");
        assert_eq!(config.model, "local-model");
        assert_eq!(config.max_tokens, 512);
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn test_blank_key_means_disabled() {
        let config = AssistantConfig::from_lookup(lookup(&[("OPENAI_API_KEY", "  ")]));
        assert!(!config.llm_enabled());
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = AssistantConfig::builder().api_key("sk-secret").build();
        let debug = format!("{config:?}");
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
