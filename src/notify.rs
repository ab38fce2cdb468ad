// Notifications and visual cues emitted by store operations

use crate::task::Task;

/// How a notification should be styled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Warning,
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Success => write!(f, "success"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// Toast-style message for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Success,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Warning,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Info,
        }
    }
}

/// Fire-and-forget visual flourish; presenters may ignore it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Celebration after completing or clearing tasks
    Confetti,
    /// Button feedback after adding a task
    Ripple,
}

/// What a store operation did
///
/// The default value is a silent no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    /// Task created, toggled, updated or deleted by the operation
    pub task: Option<Task>,
    pub notification: Option<Notification>,
    pub cue: Option<Cue>,
    /// The collection changed and was persisted
    pub changed: bool,
}

impl Outcome {
    pub fn none() -> Self {
        Self::default()
    }

    /// Informational message without any mutation
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            notification: Some(Notification::info(message)),
            ..Self::default()
        }
    }

    pub(crate) fn changed(task: Option<Task>, notification: Notification) -> Self {
        Self {
            task,
            notification: Some(notification),
            cue: None,
            changed: true,
        }
    }

    pub(crate) fn with_cue(mut self, cue: Cue) -> Self {
        self.cue = Some(cue);
        self
    }

    pub fn is_noop(&self) -> bool {
        !self.changed && self.notification.is_none()
    }
}
