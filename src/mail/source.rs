// The `source` module lists and fetches raw messages from the mailbox.

use super::MailError;
use crate::utils::google_auth::{GmailHubType, READONLY_SCOPE};
use async_trait::async_trait;
use tracing::debug;

/// A read-only mailbox.
///
/// `list_recent` is expected to return ids newest first; positions assigned
/// during ingestion follow this order and are never re-sorted.
#[async_trait]
pub trait MailSource: Send + Sync {
    /// Lists up to `max` of the most recent message ids.
    async fn list_recent(&self, max: usize) -> Result<Vec<String>, MailError>;

    /// Fetches the raw RFC 822 bytes of one message.
    async fn fetch_raw(&self, id: &str) -> Result<Vec<u8>, MailError>;
}

/// A [`MailSource`] backed by the Gmail API.
#[derive(Clone)]
pub struct GmailSource {
    hub: GmailHubType,
}

impl GmailSource {
    /// Creates a new `GmailSource` over an authenticated hub.
    pub fn new(hub: GmailHubType) -> Self {
        Self { hub }
    }
}

#[async_trait]
impl MailSource for GmailSource {
    async fn list_recent(&self, max: usize) -> Result<Vec<String>, MailError> {
        let max_results = u32::try_from(max).unwrap_or(u32::MAX);
        let (_response, list) = self
            .hub
            .users()
            .messages_list("me")
            .max_results(max_results)
            .add_scope(READONLY_SCOPE)
            .doit()
            .await
            .map_err(|e| MailError::List(e.to_string()))?;

        let ids: Vec<String> = list
            .messages
            .unwrap_or_default()
            .into_iter()
            .filter_map(|m| m.id)
            .take(max)
            .collect();
        debug!(requested = max, listed = ids.len(), "Listed recent messages");
        Ok(ids)
    }

    async fn fetch_raw(&self, id: &str) -> Result<Vec<u8>, MailError> {
        let (_response, message) = self
            .hub
            .users()
            .messages_get("me", id)
            .format("raw")
            .add_scope(READONLY_SCOPE)
            .doit()
            .await
            .map_err(|e| MailError::Fetch {
                id: id.to_string(),
                reason: e.to_string(),
            })?;

        message.raw.ok_or_else(|| MailError::EmptyPayload { id: id.to_string() })
    }
}
