//! taskflow - in-memory task dashboard
//!
//! This library provides the task store, the filter and statistics
//! projections, the root controller that owns them, and the text renderers
//! for the sign-in screen, dashboard, task cards and debug sidebar.

pub mod app;
pub mod cli;
pub mod models;
pub mod storage;

pub use app::{App, AppOptions, Intent, LoginProvider, Outcome};
pub use models::{Priority, Task, TaskDraft, TaskPatch, TaskStatus};
pub use storage::{FilterCategory, TaskStats, TaskStore};
