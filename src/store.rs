// In-memory task list store with copy-on-write snapshots

use crate::error::{Result, StoreError};
use crate::filter::StatusFilter;
use crate::observer::{Change, Snapshot, StoreObserver};
use crate::task::{DraftField, Status, Task, TaskEntry, TaskId};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Form mode derived from the edit target
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Adding,
    Editing(usize),
}

/// Task totals by status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Counts {
    pub total: usize,
    pub incomplete: usize,
    pub complete: usize,
}

#[derive(Debug, Clone, Copy)]
struct EditTarget {
    index: usize,
    id: TaskId,
}

/// Sole owner of the task list, the draft, the edit target and the filter
///
/// Every successful mutation bumps the revision and notifies observers with
/// a fresh [`Snapshot`]. Failed mutations leave the state and the revision
/// untouched.
pub struct TaskListStore {
    entries: Arc<Vec<TaskEntry>>,
    draft: Task,
    edit_target: Option<EditTarget>,
    filter: StatusFilter,
    revision: u64,
    observers: Vec<Box<dyn StoreObserver>>,
}

impl TaskListStore {
    /// Create an empty store in add mode with the `All` filter
    pub fn new() -> Self {
        Self::with_filter(StatusFilter::All)
    }

    /// Create an empty store with an initial filter
    pub fn with_filter(filter: StatusFilter) -> Self {
        info!(%filter, "Creating task list store");
        Self {
            entries: Arc::new(Vec::new()),
            draft: Task::default(),
            edit_target: None,
            filter,
            revision: 0,
            observers: Vec::new(),
        }
    }

    /// Register an observer; it is called after every successful mutation
    pub fn subscribe<O: StoreObserver + 'static>(&mut self, observer: O) {
        self.observers.push(Box::new(observer));
        debug!(observers = self.observers.len(), "subscribe: observer registered");
    }

    // ========================================================================
    // Draft and edit operations
    // ========================================================================

    /// Set one field of the draft, leaving the others untouched
    pub fn update_draft_field(&mut self, field: DraftField, value: impl Into<String>) {
        let value = value.into();
        match field {
            DraftField::Name => self.draft.name = value,
            DraftField::Description => self.draft.description = value,
        }
        debug!(%field, "update_draft_field: draft updated");
        self.publish(Change::DraftEdited { field });
    }

    /// Commit the draft: replace the edit target, or append when adding
    ///
    /// Blank fields are stored as-is. The draft is reset and the store is
    /// back in add mode afterwards. Returns the index written.
    pub fn submit_task(&mut self) -> usize {
        let task = std::mem::take(&mut self.draft);
        let entries = Arc::make_mut(&mut self.entries);

        let (index, change) = match self.edit_target.take() {
            Some(target) => {
                entries[target.index].task = task;
                debug!(index = target.index, "submit_task: replaced task");
                (target.index, Change::Replaced { index: target.index })
            }
            None => {
                entries.push(TaskEntry::new(task));
                let index = entries.len() - 1;
                debug!(index, "submit_task: appended task");
                (index, Change::Appended { index })
            }
        };

        self.publish(change);
        index
    }

    /// Copy the task at `index` into the draft and enter edit mode
    ///
    /// Calling this while already editing retargets the edit and discards
    /// the current draft.
    pub fn begin_edit(&mut self, index: usize) -> Result<()> {
        self.check_index(index, "begin_edit")?;

        let entry = &self.entries[index];
        self.draft = entry.task.clone();
        self.edit_target = Some(EditTarget { index, id: entry.id });

        debug!(index, "begin_edit: editing task");
        self.publish(Change::EditStarted { index });
        Ok(())
    }

    /// Leave edit mode and reset the draft
    pub fn cancel_edit(&mut self) {
        self.edit_target = None;
        self.draft = Task::default();
        debug!("cancel_edit: back to add mode");
        self.publish(Change::EditCancelled);
    }

    // ========================================================================
    // List mutations
    // ========================================================================

    /// Change only the status of the task at `index`
    pub fn set_task_status(&mut self, index: usize, status: Status) -> Result<()> {
        self.check_index(index, "set_task_status")?;

        Arc::make_mut(&mut self.entries)[index].task.status = status;

        debug!(index, %status, "set_task_status: status updated");
        self.publish(Change::StatusChanged { index, status });
        Ok(())
    }

    /// Remove the task at `index`; later tasks shift down by one
    ///
    /// Deleting the task being edited drops back to add mode with an empty
    /// draft. Deleting a task before it keeps the edit pointed at the same
    /// task. Returns the removed task.
    pub fn delete_task(&mut self, index: usize) -> Result<Task> {
        self.check_index(index, "delete_task")?;

        let removed = Arc::make_mut(&mut self.entries).remove(index);

        if let Some(target) = self.edit_target {
            match self.entries.iter().position(|entry| entry.id == target.id) {
                Some(position) => {
                    if position != target.index {
                        debug!(from = target.index, to = position, "delete_task: edit target shifted");
                    }
                    self.edit_target = Some(EditTarget {
                        index: position,
                        id: target.id,
                    });
                }
                None => {
                    debug!(index, "delete_task: deleted the edit target, back to add mode");
                    self.edit_target = None;
                    self.draft = Task::default();
                }
            }
        }

        debug!(index, len = self.entries.len(), "delete_task: task removed");
        self.publish(Change::Deleted { index });
        Ok(removed.task)
    }

    /// Replace the active status filter
    pub fn set_status_filter(&mut self, filter: StatusFilter) {
        self.filter = filter;
        debug!(%filter, "set_status_filter: filter changed");
        self.publish(Change::FilterChanged { filter });
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Tasks visible under the active filter, in list order
    ///
    /// Recomputed on every call.
    pub fn filter_tasks(&self) -> Vec<&Task> {
        self.tasks().filter(|task| self.filter.matches(task)).collect()
    }

    /// Visible tasks paired with their index in the full list
    pub fn filter_indexed(&self) -> Vec<(usize, &Task)> {
        self.tasks()
            .enumerate()
            .filter(|(_, task)| self.filter.matches(task))
            .collect()
    }

    /// All tasks in insertion order
    pub fn tasks(&self) -> impl ExactSizeIterator<Item = &Task> + '_ {
        self.entries.iter().map(|entry| &entry.task)
    }

    pub fn task(&self, index: usize) -> Option<&Task> {
        self.entries.get(index).map(|entry| &entry.task)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn draft(&self) -> &Task {
        &self.draft
    }

    pub fn mode(&self) -> Mode {
        match self.edit_target {
            Some(target) => Mode::Editing(target.index),
            None => Mode::Adding,
        }
    }

    pub fn edit_target(&self) -> Option<usize> {
        self.edit_target.map(|target| target.index)
    }

    pub fn status_filter(&self) -> StatusFilter {
        self.filter
    }

    /// Number of successful mutations so far
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn counts(&self) -> Counts {
        let complete = self.tasks().filter(|task| task.is_complete()).count();
        Counts {
            total: self.len(),
            incomplete: self.len() - complete,
            complete,
        }
    }

    /// Capture the current state
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            revision: self.revision,
            mode: self.mode(),
            filter: self.filter,
            draft: self.draft.clone(),
            counts: self.counts(),
            tasks: Arc::clone(&self.entries),
        }
    }

    // ========================================================================
    // Helper methods
    // ========================================================================

    fn check_index(&self, index: usize, op: &str) -> Result<()> {
        let len = self.entries.len();
        if index >= len {
            warn!(op, index, len, "Rejected out-of-range index");
            return Err(StoreError::IndexOutOfRange { index, len });
        }
        Ok(())
    }

    fn publish(&mut self, change: Change) {
        self.revision += 1;
        if self.observers.is_empty() {
            return;
        }

        let snapshot = self.snapshot();
        for observer in &mut self.observers {
            observer.on_change(&change, &snapshot);
        }
    }
}

impl Default for TaskListStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TaskListStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskListStore")
            .field("tasks", &self.entries)
            .field("draft", &self.draft)
            .field("mode", &self.mode())
            .field("filter", &self.filter)
            .field("revision", &self.revision)
            .field("observers", &self.observers.len())
            .finish()
    }
}
