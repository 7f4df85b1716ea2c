use crate::llm::config::LlmConfig;
use crate::llm::core::{LLM, LLMError};
use rig::{client::CompletionClient, providers::gemini};

/// Factory for creating LLM instances from an [`LlmConfig`].
///
/// The summarizer and the chat engine each get their own client; both are
/// built here so model name and temperature come from one place.
pub struct LLMFactory;

impl LLMFactory {
    /// Create a Gemini-backed LLM.
    ///
    /// # Arguments
    ///
    /// * `config` - Model, temperature and API key.
    ///
    /// # Errors
    ///
    /// Returns `LLMError::ConfigError` when no API key is configured.
    pub fn gemini(config: &LlmConfig) -> Result<Box<dyn LLM>, LLMError> {
        let api_key = config.api_key.as_deref().ok_or_else(|| {
            LLMError::ConfigError("GEMINI_API_KEY is not set".to_string())
        })?;

        tracing::debug!(
            model = %config.model,
            temperature = config.temperature,
            "Building Gemini client"
        );

        let client = gemini::Client::new(api_key);
        let agent = client
            .agent(&config.model)
            .temperature(config.temperature)
            .build();
        Ok(Box::new(agent))
    }
}
