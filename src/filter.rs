// Status filtering for the task list

use crate::task::{Status, Task};
use eyre::{Result, eyre};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// View filter over the task list
///
/// Only changes what a query returns; the list itself is never touched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Incomplete,
    Complete,
}

impl StatusFilter {
    /// Whether a task is visible under this filter
    pub fn matches(self, task: &Task) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Incomplete => task.status == Status::Incomplete,
            StatusFilter::Complete => task.status == Status::Complete,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Incomplete => "incomplete",
            StatusFilter::Complete => "complete",
        }
    }
}

impl std::fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for StatusFilter {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "incomplete" => Ok(StatusFilter::Incomplete),
            "complete" => Ok(StatusFilter::Complete),
            other => Err(eyre!(
                "Unknown filter: {} (expected all, incomplete or complete)",
                other
            )),
        }
    }
}
