// The `document` module turns processed emails into the documents the chat engine reasons over.

use crate::mail::Message;
use crate::summarizer::Analysis;
use crate::utils::{TEngine, TEngineError};
use chrono::{DateTime, Local, Utc};
use serde::Serialize;
use serde_json::json;

/// Number of body characters kept in a document.
pub const BODY_PREVIEW_CHARS: usize = 1000;

const DOCUMENT_TEMPLATE_NAME: &str = "document";

const DOCUMENT_TEMPLATE: &str = "
Email #{{position}} of {{total}}
Subject: {{subject}}
Email ID: {{email_id}}

Email Content:
{{truncate body preview_chars}}...

AI Analysis:
{{analysis}}

Processed: {{processed}}
Email Position: {{position}} out of {{total}} (1 = most recent, {{total}} = oldest)
";

/// Structured metadata kept next to the document text.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentMetadata {
    pub subject: String,
    pub raw_subject: Option<String>,
    pub email_id: String,
    pub analysis: String,
    pub processed_date: DateTime<Local>,
    pub received_at: Option<DateTime<Utc>>,
    /// 1 = most recent.
    pub email_position: usize,
    pub total_emails: usize,
    pub is_most_recent: bool,
    pub is_oldest: bool,
}

/// One processed email: rendered text plus metadata.
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    pub text: String,
    pub metadata: DocumentMetadata,
}

impl Document {
    /// First non-blank line of the analysis.
    pub fn analysis_headline(&self) -> Option<&str> {
        self.metadata
            .analysis
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty())
    }
}

/// Renders documents with a fixed field order.
pub struct DocumentBuilder {
    engine: TEngine,
}

impl DocumentBuilder {
    pub fn new() -> Result<Self, TEngineError> {
        let mut engine = TEngine::new();
        engine.register_template_string(DOCUMENT_TEMPLATE_NAME, DOCUMENT_TEMPLATE)?;
        Ok(Self { engine })
    }

    /// Builds one document per processed email.
    ///
    /// `processed` must be in listing order (newest first). Positions are
    /// assigned densely from 1 over exactly these items, so a skipped message
    /// leaves no gap.
    pub fn build(
        &self,
        processed: Vec<(Message, Analysis)>,
        processed_at: DateTime<Local>,
    ) -> Result<Vec<Document>, TEngineError> {
        let total = processed.len();
        let processed_label = processed_at.format("%Y-%m-%d %H:%M:%S").to_string();

        processed
            .into_iter()
            .enumerate()
            .map(|(i, (message, analysis))| {
                let position = i + 1;
                let text = self.engine.render(
                    DOCUMENT_TEMPLATE_NAME,
                    &json!({
                        "position": position,
                        "total": total,
                        "subject": message.subject,
                        "email_id": message.id,
                        "body": message.body,
                        "preview_chars": BODY_PREVIEW_CHARS,
                        "analysis": analysis.text,
                        "processed": processed_label,
                    }),
                )?;

                Ok(Document {
                    text,
                    metadata: DocumentMetadata {
                        subject: message.subject,
                        raw_subject: message.raw_subject,
                        email_id: message.id,
                        analysis: analysis.text,
                        processed_date: processed_at,
                        received_at: message.received_at,
                        email_position: position,
                        total_emails: total,
                        is_most_recent: position == 1,
                        is_oldest: position == total,
                    },
                })
            })
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn message(id: &str, subject: &str, body: &str) -> Message {
        Message {
            id: id.to_string(),
            raw: Vec::new(),
            raw_subject: Some(subject.to_string()),
            subject: subject.to_string(),
            body: body.to_string(),
            received_at: None,
        }
    }

    pub(crate) fn analysis(text: &str) -> Analysis {
        Analysis {
            text: text.to_string(),
        }
    }

    #[test]
    fn positions_and_flags() {
        let builder = DocumentBuilder::new().unwrap();
        let processed = (1..=5)
            .map(|i| {
                (
                    message(&format!("id{i}"), &format!("Subject {i}"), "body"),
                    analysis("Category: Work"),
                )
            })
            .collect();

        let docs = builder.build(processed, Local::now()).unwrap();

        assert_eq!(docs.len(), 5);
        for (i, doc) in docs.iter().enumerate() {
            assert_eq!(doc.metadata.email_position, i + 1);
            assert_eq!(doc.metadata.total_emails, 5);
            assert_eq!(doc.metadata.is_most_recent, i == 0);
            assert_eq!(doc.metadata.is_oldest, i == 4);
        }
        assert_eq!(docs[2].metadata.email_id, "id3");
    }

    #[test]
    fn text_has_fixed_field_order() {
        let builder = DocumentBuilder::new().unwrap();
        let docs = builder
            .build(
                vec![(message("abc", "Hi", "Hello there"), analysis("Short note."))],
                Local::now(),
            )
            .unwrap();
        let text = &docs[0].text;

        let order = [
            "Email #1 of 1",
            "Subject: Hi",
            "Email ID: abc",
            "Email Content:\nHello there...",
            "AI Analysis:\nShort note.",
            "Processed: ",
            "Email Position: 1 out of 1 (1 = most recent, 1 = oldest)",
        ];
        let mut cursor = 0;
        for field in order {
            let found = text[cursor..].find(field).expect(field);
            cursor += found + field.len();
        }
    }

    #[test]
    fn body_preview_is_capped() {
        let builder = DocumentBuilder::new().unwrap();
        let long_body = "x".repeat(BODY_PREVIEW_CHARS + 500);
        let docs = builder
            .build(vec![(message("a", "s", &long_body), analysis("a"))], Local::now())
            .unwrap();
        let xs = docs[0].text.matches('x').count();
        assert_eq!(xs, BODY_PREVIEW_CHARS);
    }

    #[test]
    fn single_document_is_newest_and_oldest() {
        let builder = DocumentBuilder::new().unwrap();
        let docs = builder
            .build(vec![(message("a", "s", "b"), analysis("a"))], Local::now())
            .unwrap();
        assert!(docs[0].metadata.is_most_recent);
        assert!(docs[0].metadata.is_oldest);
    }
}
