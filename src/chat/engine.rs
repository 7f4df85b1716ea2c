// The `engine` module answers a chat message from retrieved documents and the conversation history.

use super::memory::ChatTurn;
use crate::index::DocumentIndex;
use crate::llm::{LLM, LLMError};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

/// Character budget of the document context sent in a single model call.
pub const DEFAULT_CONTEXT_CHARS: usize = 24_000;

/// How retrieved documents are turned into an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseMode {
    /// Everything in one call, regardless of size.
    Compact,
    /// Answer per chunk of documents, then synthesize the partial answers.
    /// A single chunk is answered directly.
    TreeSummarize,
}

/// One request to the engine.
#[derive(Debug, Clone, Copy)]
pub struct EngineRequest<'a> {
    pub system_prompt: &'a str,
    /// The augmented user message.
    pub message: &'a str,
    pub history: &'a [ChatTurn],
    /// Retrieval breadth.
    pub similarity_top_k: usize,
    pub response_mode: ResponseMode,
}

/// A retrieval-augmented chat backend.
#[async_trait]
pub trait ChatEngine: Send + Sync {
    async fn chat(&mut self, request: EngineRequest<'_>) -> Result<String, LLMError>;
}

/// [`ChatEngine`] that retrieves from a [`DocumentIndex`] and answers with an [`LLM`].
pub struct ContextChatEngine {
    llm: Box<dyn LLM>,
    index: Arc<DocumentIndex>,
    context_chars: usize,
}

impl ContextChatEngine {
    pub fn new(llm: Box<dyn LLM>, index: Arc<DocumentIndex>) -> Self {
        Self {
            llm,
            index,
            context_chars: DEFAULT_CONTEXT_CHARS,
        }
    }

    /// Overrides the per-call context budget.
    pub fn with_context_chars(mut self, context_chars: usize) -> Self {
        self.context_chars = context_chars.max(1);
        self
    }
}

/// Groups document texts into chunks of at most `budget` characters.
/// A document larger than the budget gets a chunk of its own.
pub fn pack_chunks<'a>(texts: impl IntoIterator<Item = &'a str>, budget: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    for text in texts {
        let text = text.trim();
        if !current.is_empty() && current.len() + text.len() + 2 > budget {
            chunks.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push_str("\n\n");
        }
        current.push_str(text);
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

fn transcript(history: &[ChatTurn]) -> String {
    history
        .iter()
        .map(|t| format!("{}: {}", t.role, t.content))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The final prompt: system prompt, conversation, context, then the user message.
pub fn render_prompt(
    system_prompt: &str,
    history: &[ChatTurn],
    context: &str,
    message: &str,
) -> String {
    let mut prompt = String::new();
    prompt.push_str(system_prompt.trim());
    prompt.push_str("\n\n");
    if !history.is_empty() {
        prompt.push_str("Conversation so far:\n");
        prompt.push_str(&transcript(history));
        prompt.push_str("\n\n");
    }
    prompt.push_str("Context information from the user's emails is below.\n---------------------\n");
    prompt.push_str(context);
    prompt.push_str("\n---------------------\n");
    prompt.push_str("Using the context and the conversation, answer the user.\n\nUser: ");
    prompt.push_str(message);
    prompt.push_str("\nAssistant:");
    prompt
}

fn partial_prompt(message: &str, chunk: &str) -> String {
    format!(
        "Context information from part of the user's emails is below.\n---------------------\n{chunk}\n---------------------\n\
Extract everything in this context that helps answer the request, keeping email numbers and subjects.\n\
Request: {message}\nNotes:"
    )
}

#[async_trait]
impl ChatEngine for ContextChatEngine {
    async fn chat(&mut self, request: EngineRequest<'_>) -> Result<String, LLMError> {
        let hits = self.index.retrieve(request.message, request.similarity_top_k);
        info!(retrieved = hits.len(), mode = ?request.response_mode, "Answering chat message");

        let texts = hits.iter().map(|d| d.text.as_str());
        let context = match request.response_mode {
            ResponseMode::Compact => pack_chunks(texts, usize::MAX).join("\n\n"),
            ResponseMode::TreeSummarize => {
                let chunks = pack_chunks(texts, self.context_chars);
                if chunks.len() <= 1 {
                    chunks.join("")
                } else {
                    let mut partials = Vec::with_capacity(chunks.len());
                    for (i, chunk) in chunks.iter().enumerate() {
                        debug!(chunk = i + 1, of = chunks.len(), "Summarizing chunk");
                        let notes = self.llm.prompt(partial_prompt(request.message, chunk)).await?;
                        partials.push(format!("Notes {}:\n{}", i + 1, notes.trim()));
                    }
                    partials.join("\n\n")
                }
            }
        };

        let prompt = render_prompt(request.system_prompt, request.history, &context, request.message);
        debug!(prompt_len = prompt.len(), "Sending chat prompt");
        let response = self.llm.prompt(prompt).await?;
        Ok(response.trim().to_string())
    }
}
