// Data models for the todo list

use eyre::{Result, eyre};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Completion status of a task
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[default]
    Incomplete,
    Complete,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Incomplete => "Incomplete",
            Status::Complete => "Complete",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Status {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "incomplete" => Ok(Status::Incomplete),
            "complete" => Ok(Status::Complete),
            other => Err(eyre!("Unknown status: {} (expected incomplete or complete)", other)),
        }
    }
}

/// A single todo item
///
/// Plain value: two tasks are equal when all three fields are equal. The
/// same shape doubles as the in-progress form draft, whose default is the
/// empty draft `{ "", "", Incomplete }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub name: String,
    pub description: String,
    pub status: Status,
}

impl Task {
    pub fn new(name: impl Into<String>, description: impl Into<String>, status: Status) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            status,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.status == Status::Complete
    }
}

/// Draft fields editable from the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DraftField {
    Name,
    Description,
}

impl DraftField {
    pub fn as_str(&self) -> &'static str {
        match self {
            DraftField::Name => "name",
            DraftField::Description => "description",
        }
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DraftField {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "name" => Ok(DraftField::Name),
            "description" | "desc" => Ok(DraftField::Description),
            other => Err(eyre!("Unknown draft field: {}", other)),
        }
    }
}

/// Stable identifier assigned to a task when it enters the list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(Uuid);

impl TaskId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A task as stored in the list, paired with its id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskEntry {
    pub id: TaskId,
    #[serde(flatten)]
    pub task: Task,
}

impl TaskEntry {
    pub(crate) fn new(task: Task) -> Self {
        Self { id: TaskId::new(), task }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_task_is_empty_draft() {
        let draft = Task::default();
        assert_eq!(draft.name, "");
        assert_eq!(draft.description, "");
        assert_eq!(draft.status, Status::Incomplete);
    }

    #[test]
    fn test_task_equality_is_by_value() {
        let a = Task::new("Buy milk", "2%", Status::Incomplete);
        let b = Task::new("Buy milk", "2%", Status::Incomplete);
        assert_eq!(a, b);
        assert_ne!(a, Task::new("Buy milk", "2%", Status::Complete));
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("complete".parse::<Status>().unwrap(), Status::Complete);
        assert_eq!("Incomplete".parse::<Status>().unwrap(), Status::Incomplete);
        assert!("done".parse::<Status>().is_err());
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&Status::Complete).unwrap();
        assert_eq!(json, "\"Complete\"");
    }

    #[test]
    fn test_draft_field_parse() {
        assert_eq!("name".parse::<DraftField>().unwrap(), DraftField::Name);
        assert_eq!("desc".parse::<DraftField>().unwrap(), DraftField::Description);
        assert!("status".parse::<DraftField>().is_err());
    }

    #[test]
    fn test_task_ids_are_unique() {
        let a = TaskEntry::new(Task::default());
        let b = TaskEntry::new(Task::default());
        assert_ne!(a.id, b.id);
        assert_eq!(a.task, b.task);
    }

    #[test]
    fn test_entry_serializes_flat() {
        let entry = TaskEntry::new(Task::new("Pay bills", "", Status::Incomplete));
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["name"], "Pay bills");
        assert_eq!(value["status"], "Incomplete");
        assert!(value["id"].is_string());
    }
}
