//! Root controller owning the task store and the dashboard view state
//!
//! Screens never touch the store directly. They emit an [`Intent`], the
//! [`App`] applies it and reports an [`Outcome`], and the caller re-renders
//! from the borrowed state.

pub mod intent;

pub use intent::{Intent, LoginProvider};

use crate::models::{DraftError, Task, TaskPatch, TaskStatus};
use crate::storage::{FilterCategory, TaskStats, TaskStore};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashSet;
use std::time::Duration;

/// Pause between the completion pulse and the status commit
pub const COMPLETION_DELAY: Duration = Duration::from_millis(300);

/// Feature list mirrored by the debug sidebar
pub const FEATURES: [&str; 6] = [
    "CRUD Operations",
    "Task Filtering",
    "Status Management",
    "Priority System",
    "Due Date Tracking",
    "Responsive Design",
];

/// Start-up options collected from the command line
#[derive(Debug, Clone)]
pub struct AppOptions {
    pub skip_login: bool,
    pub show_sidebar: bool,
    pub completion_delay: Duration,
}

impl Default for AppOptions {
    fn default() -> Self {
        AppOptions {
            skip_login: false,
            show_sidebar: false,
            completion_delay: COMPLETION_DELAY,
        }
    }
}

/// Result of handling one intent
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    LoggedIn(LoginProvider),
    LoginRequired,
    FormOpened,
    FormClosed,
    Created(u64),
    Invalid(DraftError),
    Updated(u64),
    Deleted(u64),
    NotFound(u64),
    /// The card is pulsing; dispatch `CommitStatus` after `delay`
    CompletionScheduled { id: u64, delay: Duration },
    /// A completion for this card is already pending
    AlreadyCompleting(u64),
    FilterChanged(FilterCategory),
    SidebarToggled(bool),
}

/// Root view state
#[derive(Debug)]
pub struct App {
    store: TaskStore,
    authenticated: bool,
    active_filter: FilterCategory,
    form_open: bool,
    sidebar_visible: bool,
    completing: HashSet<u64>,
    completion_delay: Duration,
}

impl App {
    pub fn new(tasks: Vec<Task>, options: AppOptions) -> Self {
        App {
            store: TaskStore::with_tasks(tasks),
            authenticated: options.skip_login,
            active_filter: FilterCategory::default(),
            form_open: false,
            sidebar_visible: options.show_sidebar,
            completing: HashSet::new(),
            completion_delay: options.completion_delay,
        }
    }

    /// Apply one intent. `today` is the reference date for anything derived.
    pub fn dispatch(&mut self, intent: Intent, today: NaiveDate) -> Outcome {
        if !self.authenticated && !intent.allowed_before_login() {
            log::warn!("Rejected {:?} before login", intent);
            return Outcome::LoginRequired;
        }

        match intent {
            Intent::Login(provider) => {
                self.authenticated = true;
                log::info!("Signed in via {}", provider);
                Outcome::LoggedIn(provider)
            }
            Intent::OpenForm => {
                self.form_open = true;
                Outcome::FormOpened
            }
            Intent::CloseForm => {
                self.form_open = false;
                Outcome::FormClosed
            }
            Intent::Create(draft) => match self.store.add(draft, today) {
                Ok(task) => {
                    let id = task.id;
                    self.form_open = false;
                    Outcome::Created(id)
                }
                Err(e) => {
                    log::warn!("Rejected draft: {}", e);
                    Outcome::Invalid(e)
                }
            },
            Intent::Update { id, patch } => self.apply_patch(id, &patch),
            Intent::SetStatus { id, status } => self.set_status(id, status),
            Intent::CommitStatus { id, status } => {
                self.completing.remove(&id);
                self.apply_patch(id, &TaskPatch::status(status))
            }
            Intent::Delete(id) => match self.store.delete(id) {
                Some(_) => {
                    self.completing.remove(&id);
                    Outcome::Deleted(id)
                }
                None => Outcome::NotFound(id),
            },
            Intent::SetFilter(category) => {
                self.active_filter = category;
                Outcome::FilterChanged(category)
            }
            Intent::ToggleSidebar => {
                self.sidebar_visible = !self.sidebar_visible;
                Outcome::SidebarToggled(self.sidebar_visible)
            }
        }
    }

    fn apply_patch(&mut self, id: u64, patch: &TaskPatch) -> Outcome {
        if self.store.update(id, patch) {
            Outcome::Updated(id)
        } else {
            Outcome::NotFound(id)
        }
    }

    fn set_status(&mut self, id: u64, status: TaskStatus) -> Outcome {
        if self.store.get(id).is_none() {
            return Outcome::NotFound(id);
        }

        if status != TaskStatus::Completed || self.completion_delay.is_zero() {
            return self.apply_patch(id, &TaskPatch::status(status));
        }

        if !self.completing.insert(id) {
            return Outcome::AlreadyCompleting(id);
        }

        Outcome::CompletionScheduled {
            id,
            delay: self.completion_delay,
        }
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn tasks(&self) -> &[Task] {
        self.store.tasks()
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn active_filter(&self) -> FilterCategory {
        self.active_filter
    }

    pub fn is_form_open(&self) -> bool {
        self.form_open
    }

    pub fn is_sidebar_visible(&self) -> bool {
        self.sidebar_visible
    }

    /// Whether the card is showing the completion pulse
    pub fn is_completing(&self, id: u64) -> bool {
        self.completing.contains(&id)
    }

    /// Tasks on the active tab
    pub fn visible_tasks(&self, today: NaiveDate) -> Vec<&Task> {
        self.store.filter(self.active_filter, today)
    }

    pub fn stats(&self, today: NaiveDate) -> TaskStats {
        self.store.stats(today)
    }

    /// Read-only picture of the application state for the debug sidebar
    pub fn snapshot(&self, today: NaiveDate, last_updated: String) -> AppSnapshot<'_> {
        AppSnapshot {
            status: "running",
            authenticated: self.authenticated,
            tasks_loaded: !self.store.is_empty(),
            last_updated,
            active_filter: self.active_filter.to_string(),
            stats: self.stats(today),
            features: &FEATURES,
            tasks: self.store.tasks(),
        }
    }
}

/// Serializable view of the whole application state
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSnapshot<'a> {
    pub status: &'static str,
    pub authenticated: bool,
    pub tasks_loaded: bool,
    pub last_updated: String,
    pub active_filter: String,
    pub stats: TaskStats,
    pub features: &'static [&'static str],
    pub tasks: &'a [Task],
}
