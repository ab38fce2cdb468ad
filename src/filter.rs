// View filters over the task list

use crate::task::Task;
use eyre::{Result, eyre};
use std::str::FromStr;

/// Which tasks the list view shows
///
/// A filter never mutates the collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Filter {
    #[default]
    All,
    Active,    // completed == false
    Completed, // completed == true
}

impl Filter {
    /// Does `task` belong in this view
    pub fn matches(self, task: &Task) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !task.completed,
            Filter::Completed => task.completed,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Active => "active",
            Filter::Completed => "completed",
        }
    }

    /// Message shown when the filtered view is empty
    pub fn empty_message(self) -> String {
        format!("No {} tasks found", self.as_str())
    }
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Filter {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Filter::All),
            "active" => Ok(Filter::Active),
            "completed" => Ok(Filter::Completed),
            other => Err(eyre!(
                "Invalid filter: {} (expected all, active or completed)",
                other
            )),
        }
    }
}
