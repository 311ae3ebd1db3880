// In-memory task collection with CRUD operations

use crate::error::BoardError;
use crate::models::{Assignee, Status, Task, now_ms};
use chrono::Utc;
use tracing::debug;

/// Owns the task collection; the only component that mutates it.
///
/// Insertion order is preserved and determines render order within a
/// column. The store never persists itself: the calling workflow saves the
/// local cache once after every mutation.
pub struct TaskStore {
    tasks: Vec<Task>,
    last_id: i64,
}

impl TaskStore {
    /// Build a store around an already-loaded collection.
    pub fn new(tasks: Vec<Task>) -> Self {
        let last_id = tasks.iter().map(|t| t.id).max().unwrap_or(0);
        Self { tasks, last_id }
    }

    /// Ids are millisecond timestamps with a monotonic watermark, so two
    /// creates within the same millisecond still get distinct ids.
    fn next_id(&mut self) -> i64 {
        let id = now_ms().max(self.last_id + 1);
        self.last_id = id;
        id
    }

    /// Create a new task in the todo column.
    pub fn create(
        &mut self,
        title: &str,
        description: &str,
        assignee: Assignee,
    ) -> Result<Task, BoardError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(BoardError::EmptyTitle);
        }

        let task = Task {
            id: self.next_id(),
            title: title.to_string(),
            description: description.trim().to_string(),
            status: Status::Todo,
            assignee,
            created: Utc::now(),
        };
        debug!(id = task.id, title = %task.title, "created task");
        self.tasks.push(task.clone());
        Ok(task)
    }

    /// Edit a task's title, description, and assignee in place.
    ///
    /// Never touches id, status, or created.
    pub fn update(
        &mut self,
        id: i64,
        title: &str,
        description: &str,
        assignee: Assignee,
    ) -> Result<Task, BoardError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(BoardError::EmptyTitle);
        }

        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(BoardError::NotFound(id))?;
        task.title = title.to_string();
        task.description = description.trim().to_string();
        task.assignee = assignee;
        debug!(id, "updated task");
        Ok(task.clone())
    }

    /// Remove a task.
    ///
    /// `NotFound` here means already-deleted; callers treat it as a no-op.
    pub fn delete(&mut self, id: i64) -> Result<(), BoardError> {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() == before {
            return Err(BoardError::NotFound(id));
        }
        debug!(id, "deleted task");
        Ok(())
    }

    /// Move a task to another column. Only the status field changes.
    pub fn move_status(&mut self, id: i64, status: Status) -> Result<Task, BoardError> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(BoardError::NotFound(id))?;
        task.status = status;
        debug!(id, status = %status, "moved task");
        Ok(task.clone())
    }

    /// Read-only view of the whole collection, in insertion order.
    pub fn list(&self) -> &[Task] {
        &self.tasks
    }

    /// Tasks in one column, in insertion order.
    pub fn column(&self, status: Status) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.status == status).collect()
    }

    pub fn get(&self, id: i64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Replace the whole collection (import path) and re-derive the id
    /// watermark from the incoming tasks.
    pub fn replace_all(&mut self, tasks: Vec<Task>) {
        self.last_id = tasks.iter().map(|t| t.id).max().unwrap_or(0);
        self.tasks = tasks;
    }
}
