//! Task data structure.
//!
//! A task is the only persisted record: an identifier, the text the user typed,
//! and a one-way completion flag.

use serde::{Deserialize, Serialize};

/// A single to-do entry.
///
/// Field names are part of the stored layout and must stay `id`, `task`, `completed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub task: String,
    pub completed: bool,
}

impl Task {
    /// Create an open task.
    pub fn new(id: u64, text: &str) -> Self {
        Task {
            id,
            task: text.to_string(),
            completed: false,
        }
    }
}

/// Next identifier to hand out for a list: one past the largest id present.
pub fn next_id(tasks: &[Task]) -> u64 {
    tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1
}
