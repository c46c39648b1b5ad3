// TodoStore - In-memory todo list state with a terminal shell

pub mod command;
pub mod config;
pub mod error;
pub mod filter;
pub mod observer;
pub mod render;
pub mod shell;
pub mod store;
pub mod task;

// Re-export main types for convenience
pub use error::StoreError;
pub use filter::StatusFilter;
pub use observer::{Change, Snapshot, StoreObserver};
pub use store::{Counts, Mode, TaskListStore};
pub use task::{DraftField, Status, Task, TaskEntry, TaskId};
