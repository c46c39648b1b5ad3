// Change notification for store observers

use crate::filter::StatusFilter;
use crate::store::{Counts, Mode};
use crate::task::{DraftField, Status, Task, TaskEntry};
use serde::Serialize;
use std::sync::Arc;

/// What a successful mutation did
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Change {
    DraftEdited { field: DraftField },
    Appended { index: usize },
    Replaced { index: usize },
    StatusChanged { index: usize, status: Status },
    Deleted { index: usize },
    EditStarted { index: usize },
    EditCancelled,
    FilterChanged { filter: StatusFilter },
}

impl Change {
    /// Whether the rendered task list may look different after this change
    pub fn touches_list(&self) -> bool {
        // Edit start/cancel move the edit marker
        !matches!(self, Change::DraftEdited { .. })
    }

    /// Whether the rendered draft form may look different after this change
    pub fn touches_draft(&self) -> bool {
        match self {
            Change::DraftEdited { .. }
            | Change::Appended { .. }
            | Change::Replaced { .. }
            | Change::EditStarted { .. }
            | Change::EditCancelled => true,
            // Deleting the edit target drops back to add mode
            Change::Deleted { .. } => true,
            Change::StatusChanged { .. } | Change::FilterChanged { .. } => false,
        }
    }
}

/// Immutable view of the store at one revision
///
/// The task list is shared with the store until the next mutation, which
/// copies it, so a snapshot never changes after it is taken.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub revision: u64,
    pub mode: Mode,
    pub filter: StatusFilter,
    pub draft: Task,
    pub counts: Counts,
    pub tasks: Arc<Vec<TaskEntry>>,
}

impl Snapshot {
    pub fn task(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index).map(|entry| &entry.task)
    }

    /// Tasks visible under the snapshot's filter, in list order
    pub fn visible(&self) -> Vec<&Task> {
        self.tasks
            .iter()
            .map(|entry| &entry.task)
            .filter(|task| self.filter.matches(task))
            .collect()
    }

    /// Whether two snapshots share the same task list allocation
    pub fn shares_tasks_with(&self, other: &Snapshot) -> bool {
        Arc::ptr_eq(&self.tasks, &other.tasks)
    }
}

/// Receives a notification after every successful store mutation
pub trait StoreObserver {
    fn on_change(&mut self, change: &Change, snapshot: &Snapshot);
}

impl<F> StoreObserver for F
where
    F: FnMut(&Change, &Snapshot),
{
    fn on_change(&mut self, change: &Change, snapshot: &Snapshot) {
        self(change, snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_only_changes_skip_list() {
        assert!(!Change::DraftEdited { field: DraftField::Name }.touches_list());
        assert!(Change::EditCancelled.touches_list());
        assert!(Change::Appended { index: 0 }.touches_list());
        assert!(Change::FilterChanged { filter: StatusFilter::All }.touches_list());
    }

    #[test]
    fn test_list_only_changes_skip_draft() {
        let change = Change::StatusChanged {
            index: 0,
            status: Status::Complete,
        };
        assert!(!change.touches_draft());
        assert!(!Change::FilterChanged { filter: StatusFilter::Complete }.touches_draft());
        assert!(Change::Replaced { index: 1 }.touches_draft());
    }

    #[test]
    fn test_change_serialization() {
        let json = serde_json::to_string(&Change::Deleted { index: 3 }).unwrap();
        assert_eq!(json, r#"{"kind":"deleted","index":3}"#);
    }
}
