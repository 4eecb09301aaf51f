//! Command-line surface: argument parsing, rendering and the session loop

pub mod commands;
pub mod display;
pub mod shell;

pub use commands::{Cli, CommandError, SessionAction, parse_line};
pub use shell::{Clock, Session, SystemClock};
