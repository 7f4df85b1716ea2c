// The `context_hub` module caches the authenticated Gmail hub for the lifetime of the process.

use super::google_auth::{AuthError, GConf, GmailHubType, READONLY_SCOPE, gmail_auth};
use tokio::sync::Mutex as TokioMutex;
use tracing::debug;

/// A lazily authenticated, cached Gmail hub.
///
/// The first call to [`ContextHub::get_hub`] runs the OAuth flow with the
/// read-only scope; later calls (for example a dashboard reload with a
/// different batch size) reuse the same hub and token.
pub struct ContextHub {
    gconf: GConf,
    hub: TokioMutex<Option<GmailHubType>>,
}

impl ContextHub {
    /// Creates a new `ContextHub`. No network traffic happens until `get_hub`.
    pub fn new(gconf: GConf) -> Self {
        Self {
            gconf,
            hub: TokioMutex::new(None),
        }
    }

    /// Returns the authenticated hub, authenticating on first use.
    ///
    /// A failed authentication is not cached, so the next call tries again.
    pub async fn get_hub(&self) -> Result<GmailHubType, AuthError> {
        let mut hub_guard = self.hub.lock().await;
        if let Some(hub) = hub_guard.as_ref() {
            debug!("Reusing cached Gmail hub");
            return Ok(hub.clone());
        }

        let hub = gmail_auth(self.gconf.clone(), &[READONLY_SCOPE]).await?;
        *hub_guard = Some(hub.clone());
        Ok(hub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[tokio::test]
    async fn failed_auth_is_not_cached() {
        let hub = ContextHub::new(GConf::new(
            PathBuf::from("./missing/credentials.json"),
            PathBuf::from("./missing/token.json"),
        ));
        assert!(hub.get_hub().await.is_err());
        assert!(hub.hub.lock().await.is_none());
        assert!(hub.get_hub().await.is_err());
    }
}
