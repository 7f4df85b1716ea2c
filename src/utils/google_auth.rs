// The `google_auth` module authenticates with the Gmail API using the installed-app OAuth flow.

use crate::config::AppConfig;
use google_gmail1::{
    Gmail,
    api::Scope,
    yup_oauth2::{
        InstalledFlowAuthenticator, InstalledFlowReturnMethod,
        authenticator_delegate::InstalledFlowDelegate,
    },
};
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::{
    client::legacy::Client, client::legacy::connect::HttpConnector, rt::TokioExecutor,
};
use rustls::crypto::{CryptoProvider, ring::default_provider};
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// A type alias for the HTTPS connector.
pub type HttpsConnectorType = HttpsConnector<HttpConnector>;
/// A type alias for the Gmail hub.
pub type GmailHubType = Gmail<HttpsConnectorType>;

/// The scope requested for mailbox access. The assistant never modifies mail.
pub const READONLY_SCOPE: Scope = Scope::Readonly;

/// The `AuthError` enum defines the possible errors that can occur during authentication.
#[derive(Error, Debug)]
pub enum AuthError {
    /// The OAuth client secret could not be read.
    #[error("Cannot read credential file {path}: {source}")]
    CredentialsFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The authenticator could not be built (usually an unreadable token file).
    #[error("Cannot build authenticator: {0}")]
    Authenticator(String),
    /// The OAuth flow did not produce a token.
    #[error("Cannot obtain an access token: {0}")]
    Token(String),
    /// The HTTPS client could not be configured.
    #[error("Cannot configure TLS: {0}")]
    Tls(String),
}

/// The `GConf` struct holds the configuration for Google authentication.
#[derive(Clone, Debug)]
pub struct GConf(Arc<InnerConf>);

/// The inner configuration for `GConf`.
#[derive(Clone, Debug)]
pub struct InnerConf {
    /// The path to the `credentials.json` file.
    pub credentials_path: PathBuf,
    /// The path to the persisted token file.
    pub token_path: PathBuf,
}

impl GConf {
    /// Creates a new `GConf`.
    pub fn new(credentials_path: PathBuf, token_path: PathBuf) -> GConf {
        GConf(Arc::new(InnerConf {
            credentials_path,
            token_path,
        }))
    }

    /// Path of the OAuth client secret.
    pub fn credentials_path(&self) -> &PathBuf {
        &self.0.credentials_path
    }

    /// Path of the persisted token.
    pub fn token_path(&self) -> &PathBuf {
        &self.0.token_path
    }
}

impl From<&AppConfig> for GConf {
    fn from(config: &AppConfig) -> Self {
        GConf::new(config.credentials_path.clone(), config.token_path.clone())
    }
}

/// Opens the consent page in the default browser during the first authorization.
struct BrowserFlowDelegate;

impl InstalledFlowDelegate for BrowserFlowDelegate {
    fn present_user_url<'a>(
        &'a self,
        url: &'a str,
        _need_code: bool,
    ) -> Pin<Box<dyn Future<Output = Result<String, String>> + Send + 'a>> {
        Box::pin(async move {
            info!(%url, "Opening the Google consent page in your browser");
            if let Err(e) = webbrowser::open(url) {
                warn!(error = %e, %url, "Could not open a browser, visit the URL manually");
            }
            Ok(String::new())
        })
    }
}

/// Authenticates with the Gmail API and returns a `GmailHubType`.
///
/// The token is read from (and written back to) `token_path`; only the first
/// run needs the interactive browser step.
pub async fn gmail_auth(conf: GConf, scopes: &[Scope]) -> Result<GmailHubType, AuthError> {
    info!(credentials = %conf.0.credentials_path.display(), "Authenticating with Gmail API");

    let secret = google_gmail1::yup_oauth2::read_application_secret(&conf.0.credentials_path)
        .await
        .map_err(|source| AuthError::CredentialsFile {
            path: conf.0.credentials_path.clone(),
            source,
        })?;

    let auth = InstalledFlowAuthenticator::builder(secret, InstalledFlowReturnMethod::HTTPRedirect)
        .persist_tokens_to_disk(&conf.0.token_path)
        .flow_delegate(Box::new(BrowserFlowDelegate))
        .build()
        .await
        .map_err(|e| AuthError::Authenticator(e.to_string()))?;

    // Request a token up front so credential problems surface here, not mid-ingestion.
    auth.token(scopes)
        .await
        .map_err(|e| AuthError::Token(e.to_string()))?;

    _ = CryptoProvider::install_default(default_provider());

    let https = HttpsConnectorBuilder::new()
        .with_native_roots()
        .map_err(|e| AuthError::Tls(e.to_string()))?
        .https_or_http()
        .enable_http1()
        .build();

    let client = Client::builder(TokioExecutor::new()).build(https);

    let hub = Gmail::new(client, auth);
    info!("Successfully authenticated with Gmail API");
    Ok(hub)
}
