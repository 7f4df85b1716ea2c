// The `summarizer` module asks the model for a short summary and classification of each email.

use crate::llm::{LLM, LLMError};
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Categories the model is asked to choose from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Category {
    Work,
    Security,
    Promotion,
    Personal,
    Other,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Work,
        Category::Security,
        Category::Promotion,
        Category::Personal,
        Category::Other,
    ];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Priorities the model is asked to choose from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Priority {
    Urgent,
    Normal,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Urgent, Priority::Normal, Priority::Low];
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// The model's analysis of one email.
///
/// Kept as opaque text: the category and priority are requested by the
/// prompt but never parsed out or validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Analysis {
    pub text: String,
}

fn bracketed<T: fmt::Display>(items: &[T]) -> String {
    let names: Vec<String> = items.iter().map(|i| i.to_string()).collect();
    format!("[{}]", names.join(", "))
}

/// The prompt sent for a single email. Deterministic for a given subject and body.
pub fn analysis_prompt(subject: &str, body: &str) -> String {
    format!(
        "\nSummarize the following email in 2-3 sentences.\n\
Also classify:\n\
- Category: {}\n\
- Priority: {}\n\
\n\
Email:\n\
Subject: {subject}\n\
Body: {body}\n",
        bracketed(&Category::ALL),
        bracketed(&Priority::ALL),
    )
}

/// The prompt for the daily digest over all analyses.
pub fn digest_prompt(analyses: &[&str]) -> String {
    let listing = analyses
        .iter()
        .enumerate()
        .map(|(i, a)| format!("{}. {}", i + 1, a.trim()))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "\nHere are multiple email analyses. Create a short daily digest summary highlighting:\n\
- Count per category ({})\n\
- How many urgent items\n\
- 2-line executive summary\n\
\n\
Emails:\n\
{listing}\n",
        Category::ALL
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(", "),
    )
}

/// Sends emails to the model one at a time.
pub struct Summarizer {
    llm: Box<dyn LLM>,
}

impl Summarizer {
    /// Creates a new `Summarizer` over the given model.
    pub fn new(llm: Box<dyn LLM>) -> Self {
        Self { llm }
    }

    /// Summarizes and classifies one email. The response is trimmed and kept verbatim.
    pub async fn analyze(&mut self, subject: &str, body: &str) -> Result<Analysis, LLMError> {
        let prompt = analysis_prompt(subject, body);
        debug!(subject, prompt_len = prompt.len(), "Requesting analysis");
        let response = self.llm.prompt(prompt).await?;
        Ok(Analysis {
            text: response.trim().to_string(),
        })
    }

    /// Builds the daily digest report from a set of analyses.
    pub async fn digest(&mut self, analyses: &[&str]) -> Result<String, LLMError> {
        let response = self.llm.prompt(digest_prompt(analyses)).await?;
        Ok(response.trim().to_string())
    }
}
