// The `stats` module computes inbox statistics and the dashboard analytics.

use crate::document::Document;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::fmt;

/// Number of subjects shown in the stats preview.
const PREVIEW_SUBJECTS: usize = 5;

/// Fixed shortcut questions offered by the interfaces, as (label, question).
pub const QUICK_QUESTIONS: [(&str, &str); 6] = [
    ("📧 Recent Email", "What is my most recent email?"),
    ("💼 Work Emails", "How many work-related emails did I receive?"),
    ("🎯 Job Opportunities", "Show me all job opportunities"),
    ("📚 Learning Content", "What emails are about courses or learning?"),
    ("📊 Email Summary", "Summarize all my emails"),
    ("⏰ Oldest Email", "What is the oldest email?"),
];

/// Basic statistics over the processed emails.
#[derive(Debug, Clone, Serialize)]
pub struct EmailStats {
    pub total_emails: usize,
    /// The first few subjects, newest first.
    pub subjects: Vec<String>,
    pub all_subjects: Vec<String>,
    pub processed_date: DateTime<Local>,
}

impl EmailStats {
    /// `None` when nothing has been processed.
    pub fn from_documents(documents: &[Document]) -> Option<Self> {
        if documents.is_empty() {
            return None;
        }
        let all_subjects: Vec<String> = documents
            .iter()
            .map(|d| d.metadata.subject.clone())
            .collect();
        Some(Self {
            total_emails: documents.len(),
            subjects: all_subjects.iter().take(PREVIEW_SUBJECTS).cloned().collect(),
            all_subjects,
            processed_date: Local::now(),
        })
    }
}

/// Coarse subject bucket used by the dashboard charts.
///
/// Unlike the model's category this is a keyword match on the subject only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SubjectCategory {
    #[serde(rename = "Work/Career")]
    WorkCareer,
    Education,
    Marketing,
    Entertainment,
    Other,
}

const SUBJECT_RULES: &[(SubjectCategory, &[&str])] = &[
    (SubjectCategory::WorkCareer, &["job", "intern", "career", "linkedin"]),
    (SubjectCategory::Education, &["course", "skill", "learn", "certificate"]),
    (SubjectCategory::Marketing, &["patch", "product", "offer"]),
    (SubjectCategory::Entertainment, &["event", "live", "watch"]),
];

impl SubjectCategory {
    pub fn of(subject: &str) -> Self {
        let subject = subject.to_lowercase();
        SUBJECT_RULES
            .iter()
            .find(|(_, words)| words.iter().any(|w| subject.contains(w)))
            .map(|(category, _)| *category)
            .unwrap_or(SubjectCategory::Other)
    }
}

impl fmt::Display for SubjectCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SubjectCategory::WorkCareer => "Work/Career",
            SubjectCategory::Education => "Education",
            SubjectCategory::Marketing => "Marketing",
            SubjectCategory::Entertainment => "Entertainment",
            SubjectCategory::Other => "Other",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: SubjectCategory,
    pub count: usize,
}

/// Counts subjects per bucket, largest first. Ties keep first-seen order.
pub fn category_breakdown(subjects: &[String]) -> Vec<CategoryCount> {
    let mut counts: Vec<CategoryCount> = Vec::new();
    for subject in subjects {
        let category = SubjectCategory::of(subject);
        match counts.iter_mut().find(|c| c.category == category) {
            Some(entry) => entry.count += 1,
            None => counts.push(CategoryCount { category, count: 1 }),
        }
    }
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineRow {
    pub label: String,
    pub position: usize,
    pub category: SubjectCategory,
}

/// One row per subject; position 1 is the most recent email.
pub fn timeline(subjects: &[String]) -> Vec<TimelineRow> {
    subjects
        .iter()
        .enumerate()
        .map(|(i, subject)| TimelineRow {
            label: format!("Email #{}", i + 1),
            position: i + 1,
            category: SubjectCategory::of(subject),
        })
        .collect()
}
