//! Initial task lists: the built-in demo set and YAML seed files

use crate::models::task::{Priority, Task, TaskStatus};
use chrono::NaiveDate;
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading a seed file
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),
    #[error("Duplicate task id in seed: {0}")]
    DuplicateId(u64),
    #[error("Task {0} in seed has an empty title")]
    EmptyTitle(u64),
}

/// Parse a YAML sequence of task records
pub fn parse_seed(content: &str) -> Result<Vec<Task>, SeedError> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    let tasks: Vec<Task> = serde_yaml::from_str(content)?;

    let mut seen = HashSet::new();
    for task in &tasks {
        if !seen.insert(task.id) {
            return Err(SeedError::DuplicateId(task.id));
        }
        if task.title.trim().is_empty() {
            return Err(SeedError::EmptyTitle(task.id));
        }
    }

    Ok(tasks)
}

/// Read and parse a seed file from disk
pub fn load_seed(path: &Path) -> Result<Vec<Task>, SeedError> {
    let content = std::fs::read_to_string(path)?;
    let tasks = parse_seed(&content)?;
    log::debug!("Loaded {} task(s) from {}", tasks.len(), path.display());
    Ok(tasks)
}

/// The two tasks the dashboard starts with when no seed is given
pub fn demo_tasks() -> Vec<Task> {
    let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN);

    vec![
        Task {
            id: 1,
            title: "Complete project documentation".to_string(),
            description: "Write comprehensive README and API documentation".to_string(),
            priority: Priority::High,
            status: TaskStatus::InProgress,
            due_date: date(2025, 7, 7),
            shared_with: vec!["user@example.com".to_string()],
            created_at: date(2025, 7, 5),
        },
        Task {
            id: 2,
            title: "Review code changes".to_string(),
            description: "Review pull requests and provide feedback".to_string(),
            priority: Priority::Medium,
            status: TaskStatus::Pending,
            due_date: date(2025, 7, 6),
            shared_with: Vec::new(),
            created_at: date(2025, 7, 5),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_seed() {
        let content = r#"
- id: 7
  title: Fix authentication bug
  description: Tokens expire too early
  priority: high
  status: in-progress
  dueDate: 2026-02-20
  sharedWith:
    - ana@example.com
  createdAt: 2026-02-13
- id: 9
  title: Simple task
  dueDate: 2026-03-01
  createdAt: 2026-02-13
"#;
        let tasks = parse_seed(content).unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].id, 7);
        assert_eq!(tasks[0].status, TaskStatus::InProgress);
        assert_eq!(tasks[0].priority, Priority::High);
        assert_eq!(tasks[0].shared_with, vec!["ana@example.com"]);
        assert_eq!(tasks[1].status, TaskStatus::Pending);
        assert_eq!(tasks[1].priority, Priority::Medium);
        assert!(tasks[1].description.is_empty());
    }

    #[test]
    fn test_parse_seed_empty() {
        assert!(parse_seed("").unwrap().is_empty());
        assert!(parse_seed("[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_seed_rejects_bad_date() {
        let content = r#"
- id: 1
  title: Broken
  dueDate: tomorrow
  createdAt: 2026-02-13
"#;
        assert!(matches!(parse_seed(content), Err(SeedError::YamlParse(_))));
    }

    #[test]
    fn test_parse_seed_rejects_bad_status() {
        let content = r#"
- id: 1
  title: Broken
  status: archived
  dueDate: 2026-02-13
  createdAt: 2026-02-13
"#;
        assert!(parse_seed(content).is_err());
    }

    #[test]
    fn test_parse_seed_duplicate_id() {
        let content = r#"
- id: 3
  title: One
  dueDate: 2026-02-13
  createdAt: 2026-02-13
- id: 3
  title: Two
  dueDate: 2026-02-13
  createdAt: 2026-02-13
"#;
        assert!(matches!(
            parse_seed(content),
            Err(SeedError::DuplicateId(3))
        ));
    }

    #[test]
    fn test_parse_seed_rejects_blank_title() {
        let content = r#"
- id: 1
  title: Fine
  dueDate: 2026-02-13
  createdAt: 2026-02-13
- id: 2
  title: "   "
  dueDate: 2026-02-13
  createdAt: 2026-02-13
"#;
        assert!(matches!(
            parse_seed(content),
            Err(SeedError::EmptyTitle(2))
        ));
    }

    #[test]
    fn test_load_seed_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "- id: 1\n  title: From disk\n  dueDate: 2026-01-02\n  createdAt: 2026-01-01"
        )
        .unwrap();

        let tasks = load_seed(file.path()).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "From disk");
    }

    #[test]
    fn test_load_seed_missing_file() {
        let result = load_seed(Path::new("/nonexistent/seed.yaml"));
        assert!(matches!(result, Err(SeedError::Io(_))));
    }

    #[test]
    fn test_demo_tasks() {
        let tasks = demo_tasks();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].id, 1);
        assert_eq!(tasks[1].id, 2);
        assert_eq!(tasks[0].shared_with.len(), 1);
    }
}
