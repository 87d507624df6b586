//! State controller for the to-do screen.
//!
//! Owns the task list, the theme flag and the id counter. All mutations go
//! through here; each one that changes the list hands a full snapshot to the
//! background writer.

use log::debug;

use crate::error::TodoError;
use crate::store::{BackgroundWriter, KeyValueStore, PersistenceAdapter};
use crate::task::{next_id, Task};

/// Answer to the clear-all prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirm,
    Cancel,
}

pub struct Controller {
    tasks: Vec<Task>,
    dark_theme: bool,
    next_id: u64,
    writer: BackgroundWriter,
}

impl Controller {
    /// Load the stored list and start the background writer.
    pub fn start<S>(adapter: PersistenceAdapter<S>, dark_theme: bool) -> std::io::Result<Self>
    where
        S: KeyValueStore + Send + 'static,
    {
        let tasks = adapter.load();
        let next_id = next_id(&tasks);
        let writer = BackgroundWriter::spawn(adapter)?;
        Ok(Controller {
            tasks,
            dark_theme,
            next_id,
            writer,
        })
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn is_dark(&self) -> bool {
        self.dark_theme
    }

    /// Append a new open task. Whitespace-only text is rejected.
    pub fn add_task(&mut self, text: &str) -> Result<u64, TodoError> {
        if text.trim().is_empty() {
            return Err(TodoError::EmptyTask);
        }
        let id = self.next_id;
        self.next_id += 1;
        self.tasks.push(Task::new(id, text));
        debug!("added task {id}");
        self.persist();
        Ok(id)
    }

    /// Mark a task completed. Returns false if no task has `id`.
    pub fn complete_task(&mut self, id: u64) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return false;
        };
        if task.completed {
            return true;
        }
        task.completed = true;
        debug!("completed task {id}");
        self.persist();
        true
    }

    /// Remove a task. Returns false if no task has `id`.
    pub fn delete_task(&mut self, id: u64) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() == before {
            return false;
        }
        debug!("deleted task {id}");
        self.persist();
        true
    }

    /// Empty the list once the user has confirmed. Returns true if cleared.
    pub fn clear_all(&mut self, answer: Confirmation) -> bool {
        if answer == Confirmation::Cancel {
            return false;
        }
        debug!("cleared {} task(s)", self.tasks.len());
        self.tasks.clear();
        self.persist();
        true
    }

    /// Set the theme flag. Presentation only, never stored.
    pub fn toggle_theme(&mut self, dark: bool) {
        self.dark_theme = dark;
    }

    /// Wait for outstanding writes and stop the writer.
    pub fn shutdown(&mut self) {
        self.writer.flush();
    }

    fn persist(&self) {
        self.writer.submit(self.tasks.clone());
    }
}
