// Text rendering of store state for the shell

use crate::observer::Snapshot;
use crate::store::{Mode, TaskListStore};
use crate::task::{Status, Task};
use colored::Colorize;
use eyre::{Context, Result};

/// Renders store state as terminal text
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// The visible tasks with their list indices, plus a status footer
    pub fn list(&self, store: &TaskListStore) -> String {
        let edit_target = store.edit_target();
        let visible = store.filter_indexed();

        let mut out = String::new();
        if visible.is_empty() {
            out.push_str(&self.dim("(no tasks)"));
            out.push('\n');
        }

        for (index, task) in visible {
            let marker = if edit_target == Some(index) { "*" } else { " " };
            out.push_str(&format!("[{}]{} {}\n", index, marker, self.task_line(task)));
        }

        let counts = store.counts();
        out.push_str(&self.dim(&format!(
            "{} tasks: {} complete, {} incomplete | filter: {}",
            counts.total,
            counts.complete,
            counts.incomplete,
            store.status_filter()
        )));
        out.push('\n');
        out
    }

    /// The draft form line, labelled by mode
    pub fn draft(&self, store: &TaskListStore) -> String {
        let label = match store.mode() {
            Mode::Adding => "Add Task".to_string(),
            Mode::Editing(index) => format!("Update Task ({})", index),
        };
        let draft = store.draft();
        format!(
            "{}: name={:?} description={:?}\n",
            self.bold(&label),
            draft.name,
            draft.description
        )
    }

    /// `name - description - Status: X`
    pub fn task_line(&self, task: &Task) -> String {
        format!(
            "{} - {} - Status: {}",
            self.bold(&task.name),
            task.description,
            self.status(task.status)
        )
    }

    pub fn error(&self, message: &str) -> String {
        let prefix = if self.color {
            "error:".red().bold().to_string()
        } else {
            "error:".to_string()
        };
        format!("{} {}\n", prefix, message)
    }

    fn status(&self, status: Status) -> String {
        if !self.color {
            return status.to_string();
        }
        match status {
            Status::Complete => status.as_str().green().to_string(),
            Status::Incomplete => status.as_str().yellow().to_string(),
        }
    }

    fn bold(&self, s: &str) -> String {
        if self.color { s.bold().to_string() } else { s.to_string() }
    }

    fn dim(&self, s: &str) -> String {
        if self.color { s.dimmed().to_string() } else { s.to_string() }
    }
}

/// Pretty JSON for a snapshot
pub fn json(snapshot: &Snapshot) -> Result<String> {
    serde_json::to_string_pretty(snapshot).context("Failed to serialize snapshot")
}
