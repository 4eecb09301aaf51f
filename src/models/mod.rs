//! Data models for taskflow

pub mod seed;
pub mod task;

pub use seed::{SeedError, demo_tasks, load_seed, parse_seed};
pub use task::{DraftError, Priority, Task, TaskDraft, TaskPatch, TaskStatus, parse_date};
