//! Shared helpers for the mock email tools.
//!
//! No real mail provider is contacted: the tools log what they would do and
//! return canned data shaped like a provider response.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// Folders exposed by the mock mailbox.
pub const FOLDERS: [&str; 4] = ["inbox", "sent", "drafts", "archive"];

pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 50;

/// Build a mock provider message id from a timestamp.
pub fn mock_message_id(at: DateTime<Utc>) -> String {
    format!("mock-{}", at.timestamp())
}

/// Clamp a requested page size to 1..=MAX_LIMIT.
pub fn clamp_limit(limit: i64) -> usize {
    limit.clamp(1, MAX_LIMIT) as usize
}

/// Message summary returned by listing tools.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageSummary {
    pub message_id: String,
    pub folder: String,
    pub from: String,
    pub to: String,
    pub subject: String,
    pub unread: bool,
    pub received_at: String,
}

/// Deterministic sample messages for a folder.
pub fn sample_messages(folder: &str, now: DateTime<Utc>) -> Vec<MessageSummary> {
    (0..12)
        .map(|i| {
            let (from, to) = if folder == "inbox" || folder == "archive" {
                (format!("sender{}@example.com", i + 1), "me@example.com".to_string())
            } else {
                ("me@example.com".to_string(), format!("contact{}@example.com", i + 1))
            };
            MessageSummary {
                message_id: format!("mock-{folder}-{:03}", i + 1),
                folder: folder.to_string(),
                from,
                to,
                subject: format!("Sample {} message #{}", folder, i + 1),
                unread: folder == "inbox" && i % 3 == 0,
                received_at: (now - Duration::hours(i as i64)).to_rfc3339(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_mock_message_id() {
        let at = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        assert_eq!(mock_message_id(at), "mock-1700000000");
    }

    #[test]
    fn test_clamp_limit() {
        assert_eq!(clamp_limit(10), 10);
        assert_eq!(clamp_limit(0), 1);
        assert_eq!(clamp_limit(-4), 1);
        assert_eq!(clamp_limit(500), 50);
    }

    #[test]
    fn test_sample_messages_direction() {
        let now = Utc::now();
        let inbox = sample_messages("inbox", now);
        assert_eq!(inbox[0].to, "me@example.com");
        assert!(inbox[0].unread);

        let sent = sample_messages("sent", now);
        assert_eq!(sent[0].from, "me@example.com");
        assert!(sent.iter().all(|m| !m.unread));
    }
}
