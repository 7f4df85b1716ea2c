// The `config` module reads the application configuration from the environment.

use crate::llm::LlmConfig;
use crate::llm::config::{DEFAULT_MODEL, DEFAULT_TEMPERATURE};
use std::env;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

/// Default chat memory budget in tokens.
pub const DEFAULT_MEMORY_TOKEN_LIMIT: usize = 3000;

/// The `ConfigError` enum defines the possible errors while reading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A variable was present but could not be parsed.
    #[error("Invalid value for {name}: {value:?}")]
    InvalidValue { name: String, value: String },
}

/// Everything the assistant needs to talk to Gmail and the model.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Model settings handed to every LLM client.
    pub llm: LlmConfig,
    /// Path to the OAuth client secret downloaded from the Google console.
    pub credentials_path: PathBuf,
    /// Path where the OAuth token is persisted.
    pub token_path: PathBuf,
    /// Token budget of the conversational memory.
    pub memory_token_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            llm: LlmConfig::default(),
            credentials_path: PathBuf::from("credentials.json"),
            token_path: PathBuf::from("token.json"),
            memory_token_limit: DEFAULT_MEMORY_TOKEN_LIMIT,
        }
    }
}

impl AppConfig {
    /// Loads `.env` (if present) and reads the configuration from the process environment.
    ///
    /// | Variable                  | Default            |
    /// |---------------------------|--------------------|
    /// | `MODEL_NAME`              | `gemini-2.0-flash` |
    /// | `TEMPERATURE`             | `0.2`              |
    /// | `GEMINI_API_KEY`          | none               |
    /// | `GMAIL_CREDENTIALS_PATH`  | `credentials.json` |
    /// | `GMAIL_TOKEN_PATH`        | `token.json`       |
    /// | `CHAT_MEMORY_TOKEN_LIMIT` | `3000`             |
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let temperature = match get("TEMPERATURE") {
            Some(value) => parse_value("TEMPERATURE", &value)?,
            None => DEFAULT_TEMPERATURE,
        };
        let memory_token_limit = match get("CHAT_MEMORY_TOKEN_LIMIT") {
            Some(value) => parse_value("CHAT_MEMORY_TOKEN_LIMIT", &value)?,
            None => DEFAULT_MEMORY_TOKEN_LIMIT,
        };

        let llm = LlmConfig {
            model: get("MODEL_NAME").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            temperature,
            api_key: get("GEMINI_API_KEY"),
        };

        let config = Self {
            llm,
            credentials_path: get("GMAIL_CREDENTIALS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("credentials.json")),
            token_path: get("GMAIL_TOKEN_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("token.json")),
            memory_token_limit,
        };
        debug!(
            model = %config.llm.model,
            temperature = config.llm.temperature,
            memory_token_limit = config.memory_token_limit,
            "Configuration loaded"
        );
        Ok(config)
    }
}

fn parse_value<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue {
            name: name.to_string(),
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lazy_static::lazy_static;
    use std::collections::HashMap;
    use std::sync::Mutex;

    lazy_static! {
        static ref ENV_LOCK: Mutex<()> = Mutex::new(());
    }

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_absent() {
        let config = AppConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.llm.model, "gemini-2.0-flash");
        assert_eq!(config.llm.temperature, 0.2);
        assert!(config.llm.api_key.is_none());
        assert_eq!(config.credentials_path, PathBuf::from("credentials.json"));
        assert_eq!(config.token_path, PathBuf::from("token.json"));
        assert_eq!(config.memory_token_limit, 3000);
    }

    #[test]
    fn test_values_are_read() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("MODEL_NAME", "gemini-1.5-flash"),
            ("TEMPERATURE", "0.7"),
            ("GEMINI_API_KEY", "key"),
            ("GMAIL_TOKEN_PATH", "/tmp/token.json"),
            ("CHAT_MEMORY_TOKEN_LIMIT", "1200"),
        ]))
        .unwrap();
        assert_eq!(config.llm.model, "gemini-1.5-flash");
        assert_eq!(config.llm.temperature, 0.7);
        assert_eq!(config.llm.api_key.as_deref(), Some("key"));
        assert_eq!(config.token_path, PathBuf::from("/tmp/token.json"));
        assert_eq!(config.memory_token_limit, 1200);
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[("MODEL_NAME", "  ")])).unwrap();
        assert_eq!(config.llm.model, "gemini-2.0-flash");
    }

    #[test]
    fn test_invalid_temperature() {
        let result = AppConfig::from_lookup(lookup_from(&[("TEMPERATURE", "warm")]));
        match result {
            Err(ConfigError::InvalidValue { name, .. }) => assert_eq!(name, "TEMPERATURE"),
            _ => panic!("Expected InvalidValue"),
        }
    }

    #[test]
    fn test_from_env_reads_process_environment() {
        let _lock = ENV_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MODEL_NAME", "gemini-env-model");
        }
        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.llm.model, "gemini-env-model");
        unsafe {
            std::env::remove_var("MODEL_NAME");
        }
    }
}
