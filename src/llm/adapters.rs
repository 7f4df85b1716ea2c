use crate::llm::core::{LLM, LLMError};
use async_trait::async_trait;
use rig::{agent::Agent as RigAgent, completion::CompletionModel};
use tracing::debug;

/// Implementation of the `LLM` trait for `rig::Agent`.
///
/// Any agent built from a `rig` provider client (Gemini by default, see
/// [`crate::llm::LLMFactory`]) can be boxed as a `dyn LLM`.
///
/// ```rust,ignore
/// use inbox_chat::llm::LLM;
/// use rig::{client::CompletionClient, providers::gemini};
///
/// let agent = gemini::Client::new("api-key")
///     .agent("gemini-2.0-flash")
///     .temperature(0.2)
///     .build();
/// let llm: Box<dyn LLM> = Box::new(agent);
/// ```
#[async_trait]
impl<M> LLM for RigAgent<M>
where
    M: CompletionModel,
{
    async fn prompt(&mut self, text: String) -> Result<String, LLMError> {
        rig::completion::Prompt::prompt(self, text)
            .await
            .map(|response| response.to_string())
            .map_err(|e| {
                debug!(error = %e, "Rig agent error");
                LLMError::PromptError(e.to_string())
            })
    }
}
