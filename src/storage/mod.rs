//! Storage layer for tasks

pub mod id_generator;
pub mod task_store;

pub use id_generator::IdGenerator;
pub use task_store::{FilterCategory, TaskStats, TaskStore};
