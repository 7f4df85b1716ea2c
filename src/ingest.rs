// The `ingest` module runs one fetch → parse → analyze → document pass over the mailbox.

use crate::config::ConfigError;
use crate::document::{Document, DocumentBuilder};
use crate::index::IndexError;
use crate::llm::LLMError;
use crate::mail::{MailError, MailSource, Message};
use crate::summarizer::{Analysis, Summarizer};
use crate::utils::TEngineError;
use crate::utils::google_auth::AuthError;
use chrono::Local;
use thiserror::Error;
use tracing::{info, warn};

/// The `IngestError` enum collects every failure that stops the setup pipeline.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Authentication failed: {0}")]
    Auth(#[from] AuthError),

    #[error("Mailbox error: {0}")]
    Mail(#[from] MailError),

    #[error("Model error: {0}")]
    Llm(#[from] LLMError),

    #[error(transparent)]
    Index(#[from] IndexError),

    #[error("Template error: {0}")]
    Template(#[from] TEngineError),

    /// A step was called before the one it depends on.
    #[error("{0}")]
    NotReady(&'static str),
}

async fn process_one(
    source: &dyn MailSource,
    summarizer: &mut Summarizer,
    id: &str,
) -> Result<(Message, Analysis), IngestError> {
    let raw = source.fetch_raw(id).await?;
    let message = Message::parse(id, raw)?;
    let analysis = summarizer.analyze(&message.subject, &message.body).await?;
    Ok((message, analysis))
}

/// Fetches up to `max_emails` recent messages and turns them into documents.
///
/// Messages are handled strictly one after another. A listing failure aborts
/// the run; a message whose fetch, parse or analysis fails is logged and
/// skipped, and the remaining ones still get dense positions.
pub async fn ingest(
    source: &dyn MailSource,
    summarizer: &mut Summarizer,
    builder: &DocumentBuilder,
    max_emails: usize,
) -> Result<Vec<Document>, IngestError> {
    let ids = source.list_recent(max_emails).await?;
    let listed = ids.len();
    info!(listed, "Processing emails");

    let mut processed = Vec::with_capacity(listed);
    for (i, id) in ids.iter().enumerate() {
        match process_one(source, summarizer, id).await {
            Ok((message, analysis)) => {
                let preview: String = message.subject.chars().take(50).collect();
                info!(index = i + 1, of = listed, subject = %preview, "Processed email");
                processed.push((message, analysis));
            }
            Err(e) => {
                warn!(index = i + 1, id = %id, error = %e, "Skipping email");
            }
        }
    }

    let documents = builder.build(processed, Local::now())?;
    info!(processed = documents.len(), listed, "Ingestion finished");
    Ok(documents)
}
