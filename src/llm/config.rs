/// Model used when `MODEL_NAME` is not set.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
/// Sampling temperature used when `TEMPERATURE` is not set.
pub const DEFAULT_TEMPERATURE: f64 = 0.2;

/// Configuration for the hosted language model.
///
/// A value of this type is handed to [`crate::llm::LLMFactory`] every time a
/// model client is built; nothing is stored globally.
#[derive(Debug, Clone, PartialEq)]
pub struct LlmConfig {
    /// Provider model identifier, e.g. `gemini-2.0-flash`.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f64,
    /// API key for the provider. `None` means the factory cannot build a client.
    pub api_key: Option<String>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            api_key: None,
        }
    }
}

impl LlmConfig {
    /// Create a configuration for the given model and temperature.
    pub fn new(model: &str, temperature: f64) -> Self {
        Self {
            model: model.to_string(),
            temperature,
            api_key: None,
        }
    }

    /// Set the provider API key.
    pub fn with_api_key(mut self, api_key: &str) -> Self {
        self.api_key = Some(api_key.to_string());
        self
    }
}
