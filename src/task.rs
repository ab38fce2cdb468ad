// Task model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single to-do entry
///
/// `id` and `created_at` are fixed at creation. The serialized form uses
/// `createdAt` to match payloads written by the web front end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub text: String,
    pub completed: bool,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Build a pending task; `text` must already be trimmed and non-empty
    pub(crate) fn new(id: i64, text: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            text,
            completed: false,
            created_at,
        }
    }
}

/// Aggregate counts over the whole collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
}

impl Stats {
    pub fn from_tasks<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Self {
        let mut total = 0;
        let mut completed = 0;
        for task in tasks {
            total += 1;
            if task.completed {
                completed += 1;
            }
        }
        Self {
            total,
            completed,
            pending: total - completed,
        }
    }
}

impl std::fmt::Display for Stats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} total, {} completed, {} pending",
            self.total, self.completed, self.pending
        )
    }
}

/// Tasks written on first launch when nothing is persisted
///
/// Ids count up to `now_ms` so the last sample carries the newest id.
pub(crate) fn sample_tasks(now_ms: i64, now: DateTime<Utc>) -> Vec<Task> {
    let samples = [
        ("Welcome to your beautiful todo app!", true),
        ("Click the checkbox to mark tasks as complete", false),
        ("Use the filters to view different task states", false),
        ("Try editing a task by clicking the edit icon", false),
    ];

    let count = samples.len() as i64;
    samples
        .into_iter()
        .enumerate()
        .map(|(i, (text, completed))| Task {
            id: now_ms - (count - 1 - i as i64),
            text: text.to_string(),
            completed,
            created_at: now,
        })
        .collect()
}
