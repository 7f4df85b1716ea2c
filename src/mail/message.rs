use super::MailError;
use super::subject::normalize_subject;
use chrono::{DateTime, Utc};
use mailparse::{MailHeaderMap, ParsedMail};

/// One fetched email. Immutable once parsed.
#[derive(Debug, Clone)]
pub struct Message {
    /// Opaque provider identifier.
    pub id: String,
    /// The raw RFC 822 bytes as returned by the provider.
    pub raw: Vec<u8>,
    /// Subject header exactly as it appeared (possibly RFC 2047 encoded).
    pub raw_subject: Option<String>,
    /// Human-readable subject.
    pub subject: String,
    /// Plain-text body.
    pub body: String,
    /// Value of the `Date` header, when present and parsable.
    pub received_at: Option<DateTime<Utc>>,
}

impl Message {
    /// Parses a raw MIME message.
    ///
    /// The body is the first `text/plain` part found depth-first when the
    /// message is multipart, otherwise the single payload. A multipart message
    /// without any plain-text part has an empty body.
    pub fn parse(id: &str, raw: Vec<u8>) -> Result<Self, MailError> {
        let parsed = mailparse::parse_mail(&raw).map_err(|e| MailError::Parse {
            id: id.to_string(),
            reason: e.to_string(),
        })?;

        let raw_subject = parsed
            .headers
            .get_first_header("Subject")
            .map(|h| String::from_utf8_lossy(h.get_value_raw()).trim().to_string());
        let subject = normalize_subject(raw_subject.as_deref());

        let received_at = parsed
            .headers
            .get_first_value("Date")
            .and_then(|d| mailparse::dateparse(&d).ok())
            .and_then(|secs| DateTime::from_timestamp(secs, 0));

        let body = if parsed.subparts.is_empty() {
            body_text(&parsed)
        } else {
            first_plain_text(&parsed).unwrap_or_default()
        };

        Ok(Self {
            id: id.to_string(),
            subject,
            raw_subject,
            body,
            received_at,
            raw,
        })
    }
}

fn first_plain_text(part: &ParsedMail) -> Option<String> {
    if part.ctype.mimetype.eq_ignore_ascii_case("text/plain") {
        return Some(body_text(part));
    }
    part.subparts.iter().find_map(first_plain_text)
}

/// Decoded body of one part; undecodable bytes are replaced rather than failing.
fn body_text(part: &ParsedMail) -> String {
    part.get_body().unwrap_or_else(|_| {
        part.get_body_raw()
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
            .unwrap_or_default()
    })
}
