// Task store: the ordered task list, the view filter and the edit target

use crate::codec;
use crate::filter::Filter;
use crate::kv::{self, KeyValueStore};
use crate::notify::{Cue, Notification, Outcome};
use crate::task::{self, Stats, Task};
use crate::view::Confirm;
use chrono::Utc;
use eyre::Result;
use tracing::{debug, info, warn};

/// Key the collection is persisted under unless configured otherwise
pub const DEFAULT_KEY: &str = "todos";

/// Question put to the confirmation collaborator before clearing everything
pub const CLEAR_ALL_PROMPT: &str = "Are you sure you want to delete all tasks? This action cannot be undone.";

/// Owned task list backed by a key-value store
///
/// Every mutating operation writes the full collection before it returns, so
/// the persisted copy never lags the in-memory one.
pub struct TaskStore<S: KeyValueStore> {
    kv: S,
    key: String,
    tasks: Vec<Task>,
    filter: Filter,
    editing_id: Option<i64>,
    last_id: i64,
}

impl<S: KeyValueStore> TaskStore<S> {
    /// Load the collection stored under [`DEFAULT_KEY`], seeding samples when empty
    pub fn open(kv: S) -> Result<Self> {
        Self::open_with(kv, DEFAULT_KEY, true)
    }

    /// Load the collection stored under `key`
    ///
    /// Unreadable or malformed data counts as an empty collection. When the
    /// collection is empty and `seed_samples` is set, the sample tasks are
    /// written immediately.
    pub fn open_with(kv: S, key: impl Into<String>, seed_samples: bool) -> Result<Self> {
        let key = key.into();
        kv::validate_key(&key)?;

        let tasks = match kv.get(&key) {
            Ok(Some(raw)) => codec::decode(&raw),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(key = %key, error = ?e, "Failed to read persisted tasks, starting empty");
                Vec::new()
            }
        };

        let last_id = tasks.iter().map(|t| t.id).max().unwrap_or(0);
        let mut store = Self {
            kv,
            key,
            tasks,
            filter: Filter::All,
            editing_id: None,
            last_id,
        };

        if store.tasks.is_empty() && seed_samples {
            info!(key = %store.key, "No tasks found, writing samples");
            store.tasks = task::sample_tasks(store.next_id(), Utc::now());
            store.last_id = store.tasks.iter().map(|t| t.id).max().unwrap_or(store.last_id);
            store.persist()?;
        }

        info!(key = %store.key, count = store.tasks.len(), "Loaded tasks");
        Ok(store)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// All tasks, newest first
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: i64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn editing_id(&self) -> Option<i64> {
        self.editing_id
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Tasks matching the current filter, in collection order
    ///
    /// Recomputed on every call.
    pub fn filtered_view(&self) -> impl Iterator<Item = &Task> + '_ {
        let filter = self.filter;
        self.tasks.iter().filter(move |t| filter.matches(t))
    }

    pub fn stats(&self) -> Stats {
        Stats::from_tasks(&self.tasks)
    }

    /// The persistence backend
    pub fn backend(&self) -> &S {
        &self.kv
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Add a task at the front of the list
    ///
    /// Blank input is ignored.
    pub fn add(&mut self, raw_text: &str) -> Result<Outcome> {
        let text = raw_text.trim();
        if text.is_empty() {
            debug!("add: blank text ignored");
            return Ok(Outcome::none());
        }

        let task = Task::new(self.next_id(), text.to_string(), Utc::now());
        debug!(id = task.id, "add: created task");
        self.tasks.insert(0, task.clone());
        self.persist()?;

        let notification = Notification::success("Task added successfully!");
        Ok(Outcome::changed(Some(task), notification).with_cue(Cue::Ripple))
    }

    /// Flip the completion flag of a task
    pub fn toggle(&mut self, id: i64) -> Result<Outcome> {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            debug!(id, "toggle: unknown id");
            return Ok(Outcome::none());
        };

        task.completed = !task.completed;
        let task = task.clone();
        self.persist()?;

        if task.completed {
            let notification = Notification::success("🎉 Task completed! Great job!");
            Ok(Outcome::changed(Some(task), notification).with_cue(Cue::Confetti))
        } else {
            Ok(Outcome::changed(Some(task), Notification::info("Task marked as pending")))
        }
    }

    /// Start editing a task, abandoning any edit in progress
    pub fn begin_edit(&mut self, id: i64) {
        if self.get(id).is_none() {
            debug!(id, "begin_edit: unknown id");
            return;
        }

        if let Some(previous) = self.editing_id.replace(id)
            && previous != id
        {
            debug!(previous, id, "begin_edit: abandoned previous edit");
        }
    }

    /// Save the edit in progress for `id`
    ///
    /// Ignored unless `id` is being edited. Blank text deletes the task.
    pub fn commit_edit(&mut self, id: i64, raw_text: &str) -> Result<Outcome> {
        if self.editing_id != Some(id) {
            debug!(id, editing_id = ?self.editing_id, "commit_edit: not editing this task");
            return Ok(Outcome::none());
        }

        let text = raw_text.trim();
        if text.is_empty() {
            let outcome = self.delete(id)?;
            self.editing_id = None;
            return Ok(outcome);
        }

        self.editing_id = None;
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(Outcome::none());
        };

        task.text = text.to_string();
        let task = task.clone();
        self.persist()?;

        Ok(Outcome::changed(Some(task), Notification::success("Task updated successfully!")))
    }

    /// Drop the edit in progress without touching any task
    pub fn cancel_edit(&mut self) {
        self.editing_id = None;
    }

    /// Remove a task; unknown ids are ignored
    pub fn delete(&mut self, id: i64) -> Result<Outcome> {
        let Some(pos) = self.tasks.iter().position(|t| t.id == id) else {
            debug!(id, "delete: unknown id");
            return Ok(Outcome::none());
        };

        let task = self.tasks.remove(pos);
        if self.editing_id == Some(id) {
            self.editing_id = None;
        }
        self.persist()?;

        Ok(Outcome::changed(Some(task), Notification::warning("Task deleted!")))
    }

    /// Remove every completed task
    pub fn clear_completed(&mut self) -> Result<Outcome> {
        let count = self.tasks.iter().filter(|t| t.completed).count();
        if count == 0 {
            return Ok(Outcome::info("No completed tasks to clear!"));
        }

        self.tasks.retain(|t| !t.completed);
        if let Some(id) = self.editing_id
            && self.get(id).is_none()
        {
            self.editing_id = None;
        }
        self.persist()?;

        debug!(count, "clear_completed: removed tasks");
        let notification = Notification::success(format!("🎉 {} completed tasks cleared!", count));
        Ok(Outcome::changed(None, notification).with_cue(Cue::Confetti))
    }

    /// Remove every task once `confirm` agrees
    ///
    /// A declined confirmation leaves memory and storage untouched and
    /// produces no notification.
    pub fn clear_all(&mut self, confirm: &mut dyn Confirm) -> Result<Outcome> {
        if self.tasks.is_empty() {
            return Ok(Outcome::info("No tasks to clear!"));
        }

        if !confirm.confirm(CLEAR_ALL_PROMPT) {
            debug!("clear_all: declined");
            return Ok(Outcome::none());
        }

        let count = self.tasks.len();
        self.tasks.clear();
        self.editing_id = None;
        self.persist()?;

        debug!(count, "clear_all: removed tasks");
        Ok(Outcome::changed(None, Notification::success(format!("{} tasks cleared!", count))))
    }

    /// Change which tasks [`filtered_view`](Self::filtered_view) yields
    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    // ========================================================================
    // Helper methods
    // ========================================================================

    /// Millisecond timestamp, bumped past the last issued id when the clock
    /// has not advanced
    fn next_id(&mut self) -> i64 {
        let id = now_ms().max(self.last_id + 1);
        self.last_id = id;
        id
    }

    fn persist(&mut self) -> Result<()> {
        let raw = codec::encode(&self.tasks)?;
        self.kv.set(&self.key, &raw)?;
        debug!(key = %self.key, count = self.tasks.len(), "persist: wrote tasks");
        Ok(())
    }
}

// Helper function for timestamps
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}
