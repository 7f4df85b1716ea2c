use regex::Regex;
use std::sync::LazyLock;

/// Placeholder shown for messages without a usable subject.
pub const NO_SUBJECT: &str = "No Subject";

/// Matches an RFC 2047 encoded word, e.g. `=?UTF-8?Q?Caf=C3=A9?=`.
const WORD: &str = r"=\?[^?\s]+\?[QqBb]\?[^?]*\?=";

static ENCODED_WORD: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(WORD).ok());

/// A run of encoded words separated only by whitespace. The whitespace inside
/// a run is not part of the text.
static ENCODED_RUN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(&format!(r"{WORD}(?:\s+{WORD})*")).ok());

/// Turns a possibly MIME-encoded header value into a display string.
///
/// Each encoded word is decoded on its own with its declared charset, wherever
/// it sits in the value. Words that fail to decode (unknown charset, broken
/// base64) are removed. Never fails: the worst case is a cleaned-up copy of the
/// input, or [`NO_SUBJECT`] when nothing readable is left.
pub fn normalize_subject(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return NO_SUBJECT.to_string();
    };

    let unfolded = raw.replace("\r\n", "").replace('\n', "");
    let decoded = decode_encoded_words(&unfolded);
    let cleaned = decoded.trim();
    if cleaned.is_empty() {
        NO_SUBJECT.to_string()
    } else {
        cleaned.to_string()
    }
}

fn decode_encoded_words(text: &str) -> String {
    let (Some(run), Some(word)) = (ENCODED_RUN.as_ref(), ENCODED_WORD.as_ref()) else {
        return text.to_string();
    };
    run.replace_all(text, |caps: &regex::Captures<'_>| {
        word.find_iter(&caps[0])
            .map(|m| decode_word(m.as_str()).unwrap_or_default())
            .collect::<String>()
    })
    .into_owned()
}

/// Decodes a single encoded word, or `None` when mailparse leaves it encoded.
fn decode_word(word: &str) -> Option<String> {
    // mailparse wants a whole header line
    let line = format!("Subject: {word}\r\n");
    let (header, _) = mailparse::parse_header(line.as_bytes()).ok()?;
    let value = header.get_value();
    if value.contains("=?") {
        None
    } else {
        Some(value)
    }
}
