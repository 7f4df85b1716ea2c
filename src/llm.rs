// The `llm` module provides the language-model seam used by the summarizer and the chat engine.

pub mod adapters;
pub mod config;
pub mod core;
pub mod factory;

pub use self::config::LlmConfig;
pub use self::core::{LLM, LLMError};
pub use self::factory::LLMFactory;
