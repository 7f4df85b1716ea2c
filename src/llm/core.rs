use async_trait::async_trait;
use thiserror::Error;

/// A custom error type for LLM operations.
///
/// Every failure talking to the hosted model ends up here, whichever
/// provider sits behind the [`LLM`] trait.
#[derive(Error, Debug)]
pub enum LLMError {
    /// An error occurred while prompting the model.
    #[error("Failed to prompt the model: {0}")]
    PromptError(String),

    /// The model client could not be created from the given configuration.
    #[error("LLM configuration error: {0}")]
    ConfigError(String),
}

/// A trait that defines the contract for any model the summarizer or the chat engine can use.
///
/// The contract is a single text-in, text-out call. Prompt assembly, memory
/// and retrieval all happen before the text reaches the model.
///
/// # Examples
///
/// ```rust
/// use inbox_chat::llm::{LLM, LLMError};
/// use async_trait::async_trait;
///
/// struct EchoLLM;
///
/// #[async_trait]
/// impl LLM for EchoLLM {
///     async fn prompt(&mut self, text: String) -> Result<String, LLMError> {
///         Ok(format!("echo: {}", text))
///     }
/// }
/// ```
#[async_trait]
pub trait LLM: Send + Sync {
    /// Sends a text prompt to the language model and gets a response.
    ///
    /// # Errors
    ///
    /// Returns `LLMError::PromptError` for network, quota or provider failures.
    /// Callers decide whether that skips a message or becomes an apology.
    async fn prompt(&mut self, text: String) -> Result<String, LLMError>;
}
