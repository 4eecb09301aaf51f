//! In-memory task storage, filter tabs and statistics

use crate::models::{DraftError, Task, TaskDraft, TaskPatch, TaskStatus};
use crate::storage::id_generator::IdGenerator;
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

/// Dashboard filter tab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterCategory {
    #[default]
    All,
    Pending,
    InProgress,
    Completed,
    Overdue,
}

impl FilterCategory {
    /// Tabs in the order the dashboard shows them
    pub const ALL: [FilterCategory; 5] = [
        FilterCategory::All,
        FilterCategory::Pending,
        FilterCategory::InProgress,
        FilterCategory::Completed,
        FilterCategory::Overdue,
    ];

    /// Check if a task belongs to this tab on the given day
    pub fn matches(&self, task: &Task, today: NaiveDate) -> bool {
        match self {
            FilterCategory::All => true,
            FilterCategory::Pending => task.status == TaskStatus::Pending,
            FilterCategory::InProgress => task.status == TaskStatus::InProgress,
            FilterCategory::Completed => task.status == TaskStatus::Completed,
            FilterCategory::Overdue => task.is_overdue(today),
        }
    }

    /// Tab caption
    pub fn label(&self) -> &'static str {
        match self {
            FilterCategory::All => "All",
            FilterCategory::Pending => "Pending",
            FilterCategory::InProgress => "In Progress",
            FilterCategory::Completed => "Completed",
            FilterCategory::Overdue => "Overdue",
        }
    }
}

impl fmt::Display for FilterCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterCategory::All => write!(f, "all"),
            FilterCategory::Pending => write!(f, "pending"),
            FilterCategory::InProgress => write!(f, "in-progress"),
            FilterCategory::Completed => write!(f, "completed"),
            FilterCategory::Overdue => write!(f, "overdue"),
        }
    }
}

impl std::str::FromStr for FilterCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(FilterCategory::All),
            "pending" => Ok(FilterCategory::Pending),
            "in-progress" | "inprogress" | "in_progress" => Ok(FilterCategory::InProgress),
            "completed" | "done" => Ok(FilterCategory::Completed),
            "overdue" => Ok(FilterCategory::Overdue),
            _ => Err(format!("Unknown filter: {}", s)),
        }
    }
}

/// Task statistics over the whole store
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub overdue: usize,
}

impl TaskStats {
    /// Number of tasks in the given status
    pub fn count(&self, status: TaskStatus) -> usize {
        match status {
            TaskStatus::Pending => self.pending,
            TaskStatus::InProgress => self.in_progress,
            TaskStatus::Completed => self.completed,
        }
    }
}

/// Ordered, in-memory task storage
#[derive(Debug, Default, Clone)]
pub struct TaskStore {
    tasks: Vec<Task>,
    ids: IdGenerator,
}

impl TaskStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `tasks` in the given order
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        let ids = IdGenerator::after(tasks.iter().map(|t| t.id));
        TaskStore { tasks, ids }
    }

    /// Create a task from a draft and return it with its assigned ID
    pub fn add(&mut self, draft: TaskDraft, today: NaiveDate) -> Result<&Task, DraftError> {
        draft.validate()?;

        let id = self.ids.next_id().ok_or(DraftError::IdsExhausted)?;
        self.tasks.push(Task::from_draft(id, draft, today));
        log::debug!("Added task #{}", id);

        let index = self.tasks.len() - 1;
        Ok(&self.tasks[index])
    }

    /// Read a task by ID
    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Merge `patch` into the task with the given ID.
    ///
    /// Returns `false` when no such task exists; nothing is changed then.
    pub fn update(&mut self, id: u64, patch: &TaskPatch) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.apply(patch);
                log::debug!("Updated task #{}", id);
                true
            }
            None => {
                log::debug!("Ignoring update for unknown task #{}", id);
                false
            }
        }
    }

    /// Delete a task by ID, returning it if it existed
    pub fn delete(&mut self, id: u64) -> Option<Task> {
        let Some(index) = self.tasks.iter().position(|t| t.id == id) else {
            log::debug!("Ignoring delete for unknown task #{}", id);
            return None;
        };

        log::debug!("Deleted task #{}", id);
        Some(self.tasks.remove(index))
    }

    /// All tasks in insertion order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Tasks on the given tab, in store order
    pub fn filter(&self, category: FilterCategory, today: NaiveDate) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| category.matches(t, today))
            .collect()
    }

    /// Get statistics about tasks
    pub fn stats(&self, today: NaiveDate) -> TaskStats {
        let mut stats = TaskStats {
            total: self.tasks.len(),
            ..Default::default()
        };

        for task in &self.tasks {
            match task.status {
                TaskStatus::Pending => stats.pending += 1,
                TaskStatus::InProgress => stats.in_progress += 1,
                TaskStatus::Completed => stats.completed += 1,
            }

            if task.is_overdue(today) {
                stats.overdue += 1;
            }
        }

        stats
    }
}
