// Presentation and confirmation contracts, plus a terminal presenter

use crate::filter::Filter;
use crate::kv::KeyValueStore;
use crate::notify::{Cue, Notification, Outcome, Severity};
use crate::store::TaskStore;
use crate::task::{Stats, Task};
use colored::Colorize;
use eyre::Result;
use std::io::Write;

/// Synchronous yes/no gate used before destructive operations
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Fixed answer, for scripted use (`--yes`) and tests
impl Confirm for bool {
    fn confirm(&mut self, _prompt: &str) -> bool {
        *self
    }
}

/// Everything a presenter needs after a state change
#[derive(Debug, Clone)]
pub struct Frame<'a> {
    /// Tasks matching the current filter, in order
    pub tasks: Vec<&'a Task>,
    pub filter: Filter,
    pub stats: Stats,
    /// True iff the whole collection is empty, regardless of filter
    pub show_empty_state: bool,
    pub editing_id: Option<i64>,
    pub notification: Option<Notification>,
    pub cue: Option<Cue>,
}

impl<'a> Frame<'a> {
    /// Snapshot `store` together with the result of the last operation
    pub fn capture<S: KeyValueStore>(store: &'a TaskStore<S>, outcome: Outcome) -> Self {
        Self {
            tasks: store.filtered_view().collect(),
            filter: store.filter(),
            stats: store.stats(),
            show_empty_state: store.is_empty(),
            editing_id: store.editing_id(),
            notification: outcome.notification,
            cue: outcome.cue,
        }
    }
}

/// Receives a frame after every state change
pub trait Presenter {
    fn present(&mut self, frame: &Frame<'_>) -> Result<()>;
}

/// Plain-text rendering of frames
pub struct TerminalPresenter<W: Write> {
    out: W,
}

impl TerminalPresenter<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_task(&mut self, task: &Task, editing: bool) -> Result<()> {
        let check = if task.completed { "[x]" } else { "[ ]" };
        let text = if task.completed {
            task.text.dimmed().strikethrough().to_string()
        } else {
            task.text.clone()
        };
        let marker = if editing { " (editing)".yellow().to_string() } else { String::new() };

        writeln!(self.out, "{} {} {}{}", check, task.id.to_string().dimmed(), text, marker)?;
        Ok(())
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn present(&mut self, frame: &Frame<'_>) -> Result<()> {
        if frame.show_empty_state {
            writeln!(self.out, "{}", "No tasks yet. Add one to get started!".dimmed())?;
        } else if frame.tasks.is_empty() {
            writeln!(self.out, "{}", frame.filter.empty_message().dimmed())?;
        } else {
            for task in &frame.tasks {
                self.write_task(task, frame.editing_id == Some(task.id))?;
            }
        }

        writeln!(self.out)?;
        writeln!(self.out, "{}", frame.stats.to_string().bold())?;

        if let Some(notification) = &frame.notification {
            let line = match notification.severity {
                Severity::Success => notification.message.green(),
                Severity::Warning => notification.message.yellow(),
                Severity::Info => notification.message.blue(),
            };
            writeln!(self.out, "{}", line)?;
        }

        self.out.flush()?;
        Ok(())
    }
}
