use serde::Serialize;

/// What a chat query is asking for, as far as prompt augmentation cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Intent {
    /// List every processed email locally, without the engine.
    SummarizeAll,
    /// Questions about the newest email.
    MostRecent,
    /// Questions about the oldest email.
    Oldest,
    /// Requests to write a reply.
    DraftReply,
    /// Anything else.
    General,
}

/// Ordered rule table: the first group with a phrase contained in the query wins.
const RULES: &[(Intent, &[&str])] = &[
    (
        Intent::SummarizeAll,
        &[
            "all emails",
            "summarize emails",
            "show me all",
            "complete summary",
            "all subjects",
        ],
    ),
    (
        Intent::MostRecent,
        &["last email", "most recent", "latest email", "newest email"],
    ),
    (
        Intent::Oldest,
        &["first email", "oldest email", "earliest email"],
    ),
    (
        Intent::DraftReply,
        &[
            "write a reply",
            "draft a response",
            "reply to",
            "respond to",
            "write back",
        ],
    ),
];

/// Classifies a query by case-insensitive substring match against [`RULES`].
pub fn classify(query: &str) -> Intent {
    let query = query.to_lowercase();
    RULES
        .iter()
        .find(|(_, phrases)| phrases.iter().any(|p| query.contains(p)))
        .map(|(intent, _)| *intent)
        .unwrap_or(Intent::General)
}
