// The `mail` module fetches messages from the mailbox and turns raw MIME into subject and body text.

pub mod message;
pub mod source;
pub mod subject;

use crate::utils::google_auth::AuthError;
use thiserror::Error;

pub use message::Message;
pub use source::{GmailSource, MailSource};
pub use subject::{NO_SUBJECT, normalize_subject};

/// The `MailError` enum defines the possible errors while reading the mailbox.
#[derive(Debug, Error)]
pub enum MailError {
    /// The mailbox could not be opened.
    #[error("Mailbox authentication failed: {0}")]
    Auth(#[from] AuthError),

    /// Listing recent messages failed. This aborts an ingestion run.
    #[error("Failed to list messages: {0}")]
    List(String),

    /// A single message could not be retrieved.
    #[error("Failed to fetch message {id}: {reason}")]
    Fetch { id: String, reason: String },

    /// The provider returned a message without its raw payload.
    #[error("Message {id} has no raw payload")]
    EmptyPayload { id: String },

    /// The raw payload is not parsable MIME.
    #[error("Failed to parse message {id}: {reason}")]
    Parse { id: String, reason: String },
}
