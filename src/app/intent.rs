//! User intents emitted by the screens and handled by [`App`](super::App)

use crate::models::{TaskDraft, TaskPatch, TaskStatus};
use crate::storage::FilterCategory;
use std::fmt;

/// Sign-in choice on the auth screen. Every choice is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginProvider {
    Google,
    Github,
    Facebook,
    #[default]
    Demo,
}

impl LoginProvider {
    pub const ALL: [LoginProvider; 4] = [
        LoginProvider::Google,
        LoginProvider::Github,
        LoginProvider::Facebook,
        LoginProvider::Demo,
    ];

    /// Button caption on the auth screen
    pub fn label(&self) -> &'static str {
        match self {
            LoginProvider::Google => "Continue with Google",
            LoginProvider::Github => "Continue with GitHub",
            LoginProvider::Facebook => "Continue with Facebook",
            LoginProvider::Demo => "Try Demo Account",
        }
    }
}

impl fmt::Display for LoginProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoginProvider::Google => write!(f, "google"),
            LoginProvider::Github => write!(f, "github"),
            LoginProvider::Facebook => write!(f, "facebook"),
            LoginProvider::Demo => write!(f, "demo"),
        }
    }
}

impl std::str::FromStr for LoginProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "google" => Ok(LoginProvider::Google),
            "github" => Ok(LoginProvider::Github),
            "facebook" => Ok(LoginProvider::Facebook),
            "demo" => Ok(LoginProvider::Demo),
            _ => Err(format!("Unknown login provider: {}", s)),
        }
    }
}

/// Everything a screen can ask the root controller to do
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    Login(LoginProvider),
    OpenForm,
    CloseForm,
    Create(TaskDraft),
    /// Edit path: merges the patch immediately
    Update { id: u64, patch: TaskPatch },
    /// Card status action; completing goes through the pulse delay
    SetStatus { id: u64, status: TaskStatus },
    /// Commit a status change scheduled by `SetStatus`
    CommitStatus { id: u64, status: TaskStatus },
    Delete(u64),
    SetFilter(FilterCategory),
    ToggleSidebar,
}

impl Intent {
    /// Intents the auth screen can emit before login
    pub fn allowed_before_login(&self) -> bool {
        matches!(self, Intent::Login(_) | Intent::ToggleSidebar)
    }
}
