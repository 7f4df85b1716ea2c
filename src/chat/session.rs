use super::engine::{ChatEngine, EngineRequest, ResponseMode};
use super::intent::{Intent, classify};
use super::memory::ChatMemory;
use super::prompt::{compose_query, system_prompt};
use crate::document::Document;
use tracing::{info, warn};

pub const NO_EMAILS_PROCESSED: &str = "No emails have been processed yet.";

/// Lists every processed email, newest first, without calling the model.
pub fn all_emails_summary(documents: &[Document]) -> String {
    if documents.is_empty() {
        return NO_EMAILS_PROCESSED.to_string();
    }

    let mut parts = vec![format!(
        "📧 **Total Emails Processed: {}**\n",
        documents.len()
    )];
    for (i, doc) in documents.iter().enumerate() {
        parts.push(format!("{}. **{}**", i + 1, doc.metadata.subject));
        if let Some(headline) = doc.analysis_headline() {
            parts.push(format!("   {headline}"));
        }
        parts.push(format!("   Email ID: {}\n", doc.metadata.email_id));
    }
    parts.join("\n")
}

fn apology(reason: &impl std::fmt::Display) -> String {
    format!(
        "I'm sorry, I encountered an issue while processing your request: {reason}. \
Please try asking in a different way, and I'll do my best to help!"
    )
}

/// One conversation over a fixed set of documents.
pub struct ChatSession {
    documents: Vec<Document>,
    engine: Box<dyn ChatEngine>,
    memory: ChatMemory,
    system_prompt: String,
}

impl ChatSession {
    pub fn new(documents: Vec<Document>, engine: Box<dyn ChatEngine>, memory_token_limit: usize) -> Self {
        let system_prompt = system_prompt(documents.len());
        Self {
            documents,
            engine,
            memory: ChatMemory::new(memory_token_limit),
            system_prompt,
        }
    }

    /// Answers one user query. Never fails: engine errors become an apology.
    ///
    /// Summary requests are answered locally and leave the memory untouched.
    /// Every other query is augmented with the recency convention and sent to
    /// the engine with retrieval breadth equal to the document count.
    pub async fn chat(&mut self, query: &str) -> String {
        let intent = classify(query);
        info!(?intent, "Chat query received");

        if intent == Intent::SummarizeAll {
            return all_emails_summary(&self.documents);
        }

        let total = self.documents.len();
        let message = compose_query(query, intent, total);
        let request = EngineRequest {
            system_prompt: &self.system_prompt,
            message: &message,
            history: self.memory.turns(),
            similarity_top_k: total,
            response_mode: ResponseMode::TreeSummarize,
        };

        match self.engine.chat(request).await {
            Ok(response) => {
                self.memory.record(query, &response);
                response
            }
            Err(e) => {
                warn!(error = %e, "Chat engine failed");
                apology(&e)
            }
        }
    }

    pub fn clear_memory(&mut self) {
        self.memory.clear();
        info!("Chat memory cleared");
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn memory(&self) -> &ChatMemory {
        &self.memory
    }
}
