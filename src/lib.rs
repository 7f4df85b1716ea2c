//! # inbox-chat: chat with your Gmail inbox.
//!
//! Recent messages are fetched read-only from Gmail, summarized and
//! classified one by one by a hosted model, rendered into documents that
//! carry their position in the listing (1 = most recent), and served to a
//! chat session that answers questions about them.

/// The `assistant` module wires ingestion, indexing and the chat session together.
pub mod assistant;
/// The `chat` module provides the conversational layer over processed emails.
pub mod chat;
/// The `config` module reads the application configuration.
pub mod config;
pub mod document;
pub mod index;
/// The `ingest` module turns mailbox messages into documents.
pub mod ingest;
/// The `llm` module provides a trait for interacting with language models.
pub mod llm;
/// The `mail` module reads and parses messages from the mailbox.
pub mod mail;
pub mod reply;
/// The `shutdown` module provides a trait for graceful shutdown of the interfaces.
pub mod shutdown;
pub mod stats;
/// The `summarizer` module asks the model to summarize and classify emails.
pub mod summarizer;
/// The `utils` module provides authentication, hub caching and templating helpers.
pub mod utils;

pub use assistant::{InboxAssistant, SetupOutcome};
pub use chat::ChatSession;
pub use config::AppConfig;
pub use reply::draft_reply;
pub use utils::context_hub::ContextHub;
