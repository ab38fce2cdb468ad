// Serialization of the task collection

use crate::task::Task;
use eyre::{Context, Result};
use tracing::{debug, warn};

/// Serialize the whole collection as a JSON array, preserving order
pub fn encode(tasks: &[Task]) -> Result<String> {
    serde_json::to_string(tasks).context("Failed to serialize tasks")
}

/// Parse a persisted collection
///
/// Never fails: `null`, malformed JSON or records of the wrong shape yield an
/// empty collection and a warning.
pub fn decode(raw: &str) -> Vec<Task> {
    if raw.trim().is_empty() {
        return Vec::new();
    }

    match serde_json::from_str::<Option<Vec<Task>>>(raw) {
        Ok(tasks) => {
            let tasks = tasks.unwrap_or_default();
            debug!(count = tasks.len(), "decode: parsed tasks");
            tasks
        }
        Err(e) => {
            warn!(error = ?e, "Failed to parse persisted tasks, starting empty");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn at(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_encode_decode_preserves_order_and_fields() {
        let tasks = vec![
            Task {
                id: 3,
                text: "Walk dog".to_string(),
                completed: false,
                created_at: at("2024-05-01T12:30:02.000Z"),
            },
            Task {
                id: 2,
                text: "Buy milk".to_string(),
                completed: true,
                created_at: at("2024-05-01T12:30:01.123Z"),
            },
        ];

        let raw = encode(&tasks).unwrap();
        assert!(raw.starts_with('['));
        assert_eq!(decode(&raw), tasks);
    }

    #[test]
    fn test_decode_empty_and_null() {
        assert!(decode("").is_empty());
        assert!(decode("   ").is_empty());
        assert!(decode("null").is_empty());
        assert!(decode("[]").is_empty());
    }

    #[test]
    fn test_decode_malformed() {
        assert!(decode("{malformed json}").is_empty());
        assert!(decode(r#"{"id":1}"#).is_empty());
        // Missing createdAt makes the whole collection unreadable
        assert!(decode(r#"[{"id":1,"text":"x","completed":false}]"#).is_empty());
    }

    #[test]
    fn test_decode_web_payload() {
        let raw = r#"[{"id":1714566600250,"text":"Walk dog","completed":false,"createdAt":"2024-05-01T12:30:00.250Z"}]"#;
        let tasks = decode(raw);
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, 1714566600250);
        assert_eq!(tasks[0].created_at, at("2024-05-01T12:30:00.250Z"));
    }
}
