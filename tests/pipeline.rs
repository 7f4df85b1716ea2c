// End-to-end checks of ingestion, setup and chat against in-memory mailboxes and models.

use async_trait::async_trait;
use inbox_chat::chat::{ChatEngine, ChatSession, EngineRequest};
use inbox_chat::llm::{LLM, LLMError};
use inbox_chat::mail::{MailError, MailSource};
use inbox_chat::summarizer::Summarizer;
use inbox_chat::{AppConfig, InboxAssistant};
use std::sync::{Arc, Mutex};

struct Mailbox {
    count: usize,
    failing: Option<usize>,
}

impl Mailbox {
    fn new(count: usize) -> Self {
        Self { count, failing: None }
    }
}

#[async_trait]
impl MailSource for Mailbox {
    async fn list_recent(&self, max: usize) -> Result<Vec<String>, MailError> {
        Ok((1..=self.count.min(max)).map(|i| format!("msg-{i}")).collect())
    }

    async fn fetch_raw(&self, id: &str) -> Result<Vec<u8>, MailError> {
        if self.failing.map(|n| format!("msg-{n}")).as_deref() == Some(id) {
            return Err(MailError::Fetch {
                id: id.to_string(),
                reason: "connection reset".to_string(),
            });
        }
        let raw = format!(
            "Subject: =?UTF-8?Q?Weekly_update_{id}?=\r\n\
Content-Type: text/plain; charset=utf-8\r\n\
\r\n\
Status report for {id}.\r\n"
        );
        Ok(raw.into_bytes())
    }
}

/// Answers every analysis request with the same classification.
struct Classifier;

#[async_trait]
impl LLM for Classifier {
    async fn prompt(&mut self, _text: String) -> Result<String, LLMError> {
        Ok("Status report.\nCategory: Work\nPriority: Normal".to_string())
    }
}

/// Replies with the exact prompt it received.
struct Echo {
    seen: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl LLM for Echo {
    async fn prompt(&mut self, text: String) -> Result<String, LLMError> {
        self.seen.lock().unwrap().push(text.clone());
        Ok(text)
    }
}

struct Broken;

#[async_trait]
impl LLM for Broken {
    async fn prompt(&mut self, _text: String) -> Result<String, LLMError> {
        Err(LLMError::PromptError("service unavailable".to_string()))
    }
}

fn assistant() -> InboxAssistant {
    InboxAssistant::new(AppConfig::default()).unwrap()
}

fn echo() -> (Box<dyn LLM>, Arc<Mutex<Vec<String>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    (Box::new(Echo { seen: seen.clone() }), seen)
}

#[tokio::test]
async fn five_messages_get_dense_positions() {
    let mut assistant = assistant();
    let mut summarizer = Summarizer::new(Box::new(Classifier));
    let (chat, _) = echo();

    let outcome = assistant.load(&Mailbox::new(5), &mut summarizer, chat, 10).await;
    assert!(outcome.success, "{}", outcome.message);

    let docs = assistant.documents();
    assert_eq!(docs.len(), 5);
    for (i, doc) in docs.iter().enumerate() {
        assert_eq!(doc.metadata.email_position, i + 1);
        assert_eq!(doc.metadata.is_most_recent, i == 0);
        assert_eq!(doc.metadata.is_oldest, i == 4);
        assert!(!doc.metadata.subject.contains("=?"));
    }
    assert_eq!(docs[0].metadata.subject, "Weekly update msg-1");
}

#[tokio::test]
async fn one_failing_message_is_skipped() {
    let mut assistant = assistant();
    let mut summarizer = Summarizer::new(Box::new(Classifier));
    let (chat, _) = echo();
    let mailbox = Mailbox {
        count: 5,
        failing: Some(3),
    };

    let outcome = assistant.load(&mailbox, &mut summarizer, chat, 10).await;
    assert!(outcome.success);
    assert_eq!(outcome.message, "Successfully processed 4 emails");

    let ids: Vec<&str> = assistant
        .documents()
        .iter()
        .map(|d| d.metadata.email_id.as_str())
        .collect();
    assert_eq!(ids, vec!["msg-1", "msg-2", "msg-4", "msg-5"]);
    assert_eq!(assistant.documents()[3].metadata.email_position, 4);
    assert!(assistant.documents()[3].metadata.is_oldest);
}

#[tokio::test]
async fn empty_mailbox_reports_failure() {
    let mut assistant = assistant();
    let mut summarizer = Summarizer::new(Box::new(Classifier));
    let (chat, _) = echo();

    let outcome = assistant.load(&Mailbox::new(0), &mut summarizer, chat, 10).await;
    assert!(!outcome.success);
    assert_eq!(outcome.message, "No documents to index. Please fetch emails first.");
    assert!(!assistant.is_ready());
}

#[tokio::test]
async fn summary_survives_a_broken_engine() {
    let mut assistant = assistant();
    let mut summarizer = Summarizer::new(Box::new(Classifier));
    let outcome = assistant
        .load(&Mailbox::new(3), &mut summarizer, Box::new(Broken), 10)
        .await;
    assert!(outcome.success);

    let summary = assistant.chat("Please summarize all emails").await;
    assert!(summary.contains("Total Emails Processed: 3"));
    assert!(summary.contains("Weekly update msg-3"));
    assert!(summary.contains("Status report."));

    let apology = assistant.chat("Anything urgent?").await;
    assert!(apology.starts_with("I'm sorry"));
    assert!(apology.contains("service unavailable"));
}

#[tokio::test]
async fn oldest_question_carries_the_oldest_hint() {
    let mut assistant = assistant();
    let mut summarizer = Summarizer::new(Box::new(Classifier));
    let (chat, seen) = echo();
    assistant.load(&Mailbox::new(4), &mut summarizer, chat, 10).await;

    assistant.chat("What is the oldest email?").await;

    let prompts = seen.lock().unwrap();
    let last = prompts.last().unwrap();
    assert!(last.contains("The user wants information about the OLDEST email (Email #4)"));
}

#[tokio::test]
async fn echoed_prompt_states_count_and_recency() {
    let mut assistant = assistant();
    let mut summarizer = Summarizer::new(Box::new(Classifier));
    let (chat, _) = echo();
    assistant.load(&Mailbox::new(3), &mut summarizer, chat, 10).await;

    let answer = assistant.chat("What do I have?").await;
    assert!(answer.contains("User has 3 emails total"));
    assert!(answer.contains("Email #1 is the MOST RECENT"));
    assert!(answer.contains("Email #3 of 3"));
}

struct CapturingEngine {
    histories: Arc<Mutex<Vec<usize>>>,
}

#[async_trait]
impl ChatEngine for CapturingEngine {
    async fn chat(&mut self, request: EngineRequest<'_>) -> Result<String, LLMError> {
        self.histories.lock().unwrap().push(request.history.len());
        Ok("ok".to_string())
    }
}

#[tokio::test]
async fn session_memory_is_bounded_and_clearable() {
    let mut assistant = assistant();
    let mut summarizer = Summarizer::new(Box::new(Classifier));
    let (chat, _) = echo();
    assistant.load(&Mailbox::new(2), &mut summarizer, chat, 10).await;

    let histories = Arc::new(Mutex::new(Vec::new()));
    let engine = CapturingEngine {
        histories: histories.clone(),
    };
    // budget for roughly one exchange
    let mut session = ChatSession::new(assistant.documents().to_vec(), Box::new(engine), 10);

    session.chat("first question here").await;
    session.chat("second question here").await;
    session.chat("third").await;
    assert!(session.memory().token_count() <= 10);

    session.clear_memory();
    session.chat("fourth").await;
    assert_eq!(*histories.lock().unwrap().last().unwrap(), 0);
}
