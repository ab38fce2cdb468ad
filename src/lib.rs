// TodoStore - Persistent task list with pluggable key-value storage

pub mod codec;
pub mod config;
pub mod filter;
pub mod kv;
pub mod notify;
pub mod store;
pub mod task;
pub mod view;

// Re-export main types for convenience
pub use config::{Backend, Config};
pub use filter::Filter;
pub use kv::{FileStore, KeyValueStore, MemoryStore, SqliteStore};
pub use notify::{Cue, Notification, Outcome, Severity};
pub use store::{TaskStore, now_ms};
pub use task::{Stats, Task};
pub use view::{Confirm, Frame, Presenter, TerminalPresenter};
