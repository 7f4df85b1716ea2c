use crate::chat::{ChatSession, ContextChatEngine, all_emails_summary};
use crate::config::AppConfig;
use crate::document::{Document, DocumentBuilder};
use crate::index::DocumentIndex;
use crate::ingest::{IngestError, ingest};
use crate::llm::{LLM, LLMError, LLMFactory};
use crate::mail::{GmailSource, MailSource};
use crate::stats::EmailStats;
use crate::summarizer::Summarizer;
use crate::utils::context_hub::ContextHub;
use crate::utils::google_auth::GConf;
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info};

pub const NOT_INITIALIZED: &str = "Chat engine not initialized. Please run setup first.";

/// Result of a setup step as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SetupOutcome {
    pub success: bool,
    pub message: String,
}

impl SetupOutcome {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

fn report(result: Result<usize, IngestError>) -> SetupOutcome {
    match result {
        Ok(n) => SetupOutcome::ok(format!("Successfully processed {n} emails")),
        Err(e) => {
            error!(error = %e, "Setup failed");
            SetupOutcome::failed(e.to_string())
        }
    }
}

/// Owns one ingestion run and the chat session built on top of it.
///
/// The pipeline is fetch and process, then build the index, then set up the
/// chat engine. Each step needs the previous one. Starting a new fetch throws
/// away the documents, index and session of the last run.
pub struct InboxAssistant {
    config: AppConfig,
    hub: ContextHub,
    builder: DocumentBuilder,
    documents: Vec<Document>,
    index: Option<Arc<DocumentIndex>>,
    session: Option<ChatSession>,
}

impl InboxAssistant {
    pub fn new(config: AppConfig) -> Result<Self, IngestError> {
        let hub = ContextHub::new(GConf::from(&config));
        Ok(Self {
            config,
            hub,
            builder: DocumentBuilder::new()?,
            documents: Vec::new(),
            index: None,
            session: None,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Replaces the current documents with a fresh ingestion run.
    pub async fn fetch_and_process(
        &mut self,
        source: &dyn MailSource,
        summarizer: &mut Summarizer,
        max_emails: usize,
    ) -> Result<usize, IngestError> {
        self.documents.clear();
        self.index = None;
        self.session = None;

        self.documents = ingest(source, summarizer, &self.builder, max_emails).await?;
        Ok(self.documents.len())
    }

    /// Builds the index over the current documents.
    pub fn build_index(&mut self) -> Result<usize, IngestError> {
        let index = DocumentIndex::build(&self.documents)?;
        let len = index.len();
        self.index = Some(Arc::new(index));
        Ok(len)
    }

    /// Starts a chat session answering with `llm` over the built index.
    pub fn setup_chat_engine(&mut self, llm: Box<dyn LLM>) -> Result<(), IngestError> {
        let index = self
            .index
            .clone()
            .ok_or(IngestError::NotReady("No index available. Please build index first."))?;
        let engine = ContextChatEngine::new(llm, index);
        self.session = Some(ChatSession::new(
            self.documents.clone(),
            Box::new(engine),
            self.config.memory_token_limit,
        ));
        info!(documents = self.documents.len(), "Chat engine ready");
        Ok(())
    }

    /// Runs the whole pipeline against any mailbox and models.
    pub async fn setup(
        &mut self,
        source: &dyn MailSource,
        summarizer: &mut Summarizer,
        chat_llm: Box<dyn LLM>,
        max_emails: usize,
    ) -> Result<usize, IngestError> {
        let processed = self.fetch_and_process(source, summarizer, max_emails).await?;
        self.build_index()?;
        self.setup_chat_engine(chat_llm)?;
        Ok(processed)
    }

    /// A summarizer over the configured model.
    pub fn summarizer(&self) -> Result<Summarizer, LLMError> {
        Ok(Summarizer::new(LLMFactory::gemini(&self.config.llm)?))
    }

    async fn try_load_gmail(&mut self, max_emails: usize) -> Result<usize, IngestError> {
        let hub = self.hub.get_hub().await?;
        let source = GmailSource::new(hub);
        let mut summarizer = self.summarizer()?;
        let chat_llm = LLMFactory::gemini(&self.config.llm)?;
        self.setup(&source, &mut summarizer, chat_llm, max_emails).await
    }

    /// Loads the inbox from Gmail with the configured model and reports the outcome.
    pub async fn load_gmail(&mut self, max_emails: usize) -> SetupOutcome {
        info!(max_emails, "Loading Gmail data");
        report(self.try_load_gmail(max_emails).await)
    }

    /// Like [`InboxAssistant::setup`], reported as an outcome.
    pub async fn load(
        &mut self,
        source: &dyn MailSource,
        summarizer: &mut Summarizer,
        chat_llm: Box<dyn LLM>,
        max_emails: usize,
    ) -> SetupOutcome {
        report(self.setup(source, summarizer, chat_llm, max_emails).await)
    }

    pub fn is_ready(&self) -> bool {
        self.session.is_some()
    }

    /// Answers a query, or explains that setup has not run yet.
    pub async fn chat(&mut self, query: &str) -> String {
        match self.session.as_mut() {
            Some(session) => session.chat(query).await,
            None => NOT_INITIALIZED.to_string(),
        }
    }

    pub fn clear_memory(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.clear_memory();
        }
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn stats(&self) -> Option<EmailStats> {
        EmailStats::from_documents(&self.documents)
    }

    pub fn all_emails_summary(&self) -> String {
        all_emails_summary(&self.documents)
    }

    /// One digest report over every analysis of the current run.
    pub async fn daily_digest(&self, summarizer: &mut Summarizer) -> Result<String, IngestError> {
        if self.documents.is_empty() {
            return Err(IngestError::NotReady("No emails processed"));
        }
        let analyses: Vec<&str> = self
            .documents
            .iter()
            .map(|d| d.metadata.analysis.as_str())
            .collect();
        Ok(summarizer.digest(&analyses).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mail::MailError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct Inbox(usize);

    #[async_trait]
    impl MailSource for Inbox {
        async fn list_recent(&self, max: usize) -> Result<Vec<String>, MailError> {
            Ok((1..=self.0.min(max)).map(|i| format!("m{i}")).collect())
        }

        async fn fetch_raw(&self, id: &str) -> Result<Vec<u8>, MailError> {
            Ok(format!("Subject: Hello {id}\r\n\r\nHi\r\n").into_bytes())
        }
    }

    struct CannedLLM {
        reply: &'static str,
        prompts: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl LLM for CannedLLM {
        async fn prompt(&mut self, text: String) -> Result<String, LLMError> {
            self.prompts.lock().unwrap().push(text);
            Ok(self.reply.to_string())
        }
    }

    fn canned(reply: &'static str) -> (Box<dyn LLM>, Arc<Mutex<Vec<String>>>) {
        let prompts = Arc::new(Mutex::new(Vec::new()));
        (
            Box::new(CannedLLM {
                reply,
                prompts: prompts.clone(),
            }),
            prompts,
        )
    }

    fn assistant() -> InboxAssistant {
        InboxAssistant::new(AppConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn chat_before_setup() {
        let mut assistant = assistant();
        assert_eq!(assistant.chat("hi").await, NOT_INITIALIZED);
        assert!(!assistant.is_ready());
    }

    #[tokio::test]
    async fn steps_must_run_in_order() {
        let mut assistant = assistant();
        assert!(matches!(
            assistant.build_index(),
            Err(IngestError::Index(_))
        ));
        let (llm, _) = canned("x");
        assert!(matches!(
            assistant.setup_chat_engine(llm),
            Err(IngestError::NotReady(_))
        ));
    }

    #[tokio::test]
    async fn full_setup_then_chat() {
        let mut assistant = assistant();
        let (analysis_llm, _) = canned("Work email.\nPriority: Normal");
        let mut summarizer = Summarizer::new(analysis_llm);
        let (chat_llm, chat_prompts) = canned("Sure!");

        let n = assistant
            .setup(&Inbox(3), &mut summarizer, chat_llm, 10)
            .await
            .unwrap();
        assert_eq!(n, 3);
        assert!(assistant.is_ready());

        assert_eq!(assistant.chat("Any meetings?").await, "Sure!");
        assert_eq!(chat_prompts.lock().unwrap().len(), 1);

        let stats = assistant.stats().unwrap();
        assert_eq!(stats.total_emails, 3);
        assert!(assistant.all_emails_summary().contains("Hello m2"));
    }

    #[tokio::test]
    async fn refetch_resets_session() {
        let mut assistant = assistant();
        let (analysis_llm, _) = canned("a");
        let mut summarizer = Summarizer::new(analysis_llm);
        let (chat_llm, _) = canned("b");
        assistant
            .setup(&Inbox(2), &mut summarizer, chat_llm, 10)
            .await
            .unwrap();

        assistant
            .fetch_and_process(&Inbox(4), &mut summarizer, 10)
            .await
            .unwrap();
        assert!(!assistant.is_ready());
        assert_eq!(assistant.documents().len(), 4);
    }

    #[tokio::test]
    async fn digest_uses_every_analysis() {
        let mut assistant = assistant();
        let (analysis_llm, _) = canned("Category: Work");
        let mut summarizer = Summarizer::new(analysis_llm);
        let (chat_llm, _) = canned("b");
        assistant
            .setup(&Inbox(2), &mut summarizer, chat_llm, 10)
            .await
            .unwrap();

        let (digest_llm, digest_prompts) = canned(" Digest ");
        let mut digester = Summarizer::new(digest_llm);
        let digest = assistant.daily_digest(&mut digester).await.unwrap();
        assert_eq!(digest, "Digest");
        let prompts = digest_prompts.lock().unwrap();
        assert!(prompts[0].contains("1. Category: Work"));
        assert!(prompts[0].contains("2. Category: Work"));
    }

    #[test]
    fn outcome_constructors() {
        assert!(SetupOutcome::ok("fine").success);
        assert_eq!(SetupOutcome::failed("nope").message, "nope");
    }
}
