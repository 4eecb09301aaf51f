//! Interactive session over line-oriented async I/O
//!
//! One line is read, parsed and applied to the [`App`] before the next one is
//! read. The only wait is the completion pulse, which runs between rendering
//! the pulsing card and dispatching the commit.

use crate::app::{App, Intent, Outcome};
use crate::cli::commands::{SessionAction, parse_line};
use crate::cli::display::{
    render_auth_screen, render_dashboard, render_sidebar, render_state_json, render_task_card,
};
use crate::models::TaskStatus;
use chrono::{Local, NaiveDate};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

const PROMPT: &str = "> ";
const LOGIN_HINT: &str = "Please sign in first: login [google|github|facebook|demo]";

/// Source of "today" and the sidebar's last-updated time
pub trait Clock {
    fn today(&self) -> NaiveDate;
    fn time_label(&self) -> String;
}

/// Wall clock in the local timezone
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn time_label(&self) -> String {
        Local::now().format("%H:%M:%S").to_string()
    }
}

/// Root controller plus the I/O loop that feeds it
pub struct Session<C: Clock> {
    app: App,
    clock: C,
}

impl<C: Clock> Session<C> {
    pub fn new(app: App, clock: C) -> Self {
        Self { app, clock }
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn into_app(self) -> App {
        self.app
    }

    /// Run until EOF or `quit`
    pub async fn run<R, W>(&mut self, mut reader: R, mut writer: W) -> anyhow::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        log::info!("Session started with {} task(s)", self.app.tasks().len());

        let mut line = String::new();

        let screen = self.render_screen();
        write_block(&mut writer, &screen).await?;

        loop {
            writer.write_all(PROMPT.as_bytes()).await?;
            writer.flush().await?;

            line.clear();
            let bytes_read = reader.read_line(&mut line).await?;

            if bytes_read == 0 {
                // EOF
                break;
            }

            let action = match parse_line(line.trim()) {
                Ok(action) => action,
                Err(e) => {
                    log::warn!("Rejected input {:?}: {}", line.trim(), e);
                    write_block(&mut writer, &format!("Error: {}", e)).await?;
                    continue;
                }
            };

            match action {
                SessionAction::Quit => break,
                SessionAction::Refresh => {
                    let screen = self.render_screen();
                    write_block(&mut writer, &screen).await?;
                }
                SessionAction::Help(text) => {
                    write_block(&mut writer, text.trim_end()).await?;
                }
                SessionAction::State | SessionAction::Show(_) if !self.app.is_authenticated() => {
                    log::debug!("Refused read-only view before login");
                    write_block(&mut writer, LOGIN_HINT).await?;
                }
                SessionAction::State => {
                    let snapshot = self
                        .app
                        .snapshot(self.clock.today(), self.clock.time_label());
                    let json = render_state_json(&snapshot)?;
                    write_block(&mut writer, &json).await?;
                }
                SessionAction::Show(id) => {
                    let text = match self.app.store().get(id) {
                        Some(task) => render_task_card(
                            task,
                            self.clock.today(),
                            self.app.is_completing(id),
                        ),
                        None => format!("Task #{} not found", id),
                    };
                    write_block(&mut writer, &text).await?;
                }
                SessionAction::Dispatch(intent) => {
                    self.dispatch(intent, &mut writer).await?;
                }
            }
        }

        log::info!("Session ended");
        Ok(())
    }

    async fn dispatch<W>(&mut self, intent: Intent, writer: &mut W) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        let outcome = self.app.dispatch(intent, self.clock.today());
        if let Some(notice) = notice(&outcome) {
            write_block(writer, &notice).await?;
        }

        if let Outcome::CompletionScheduled { id, delay } = outcome {
            let screen = self.render_screen();
            write_block(writer, &screen).await?;

            tokio::time::sleep(delay).await;

            let commit = Intent::CommitStatus {
                id,
                status: TaskStatus::Completed,
            };
            let outcome = self.app.dispatch(commit, self.clock.today());
            if let Some(notice) = notice(&outcome) {
                write_block(writer, &notice).await?;
            }
        }

        let screen = self.render_screen();
        write_block(writer, &screen).await
    }

    /// Auth screen before login, dashboard after; sidebar underneath either
    fn render_screen(&self) -> String {
        let today = self.clock.today();

        let main = if self.app.is_authenticated() {
            render_dashboard(&self.app, today)
        } else {
            render_auth_screen()
        };

        let sidebar = render_sidebar(&self.app, today, &self.clock.time_label());
        format!("{}\n\n{}", main, sidebar)
    }
}

/// One-line status message for an outcome, if it warrants one
fn notice(outcome: &Outcome) -> Option<String> {
    match outcome {
        Outcome::LoggedIn(provider) => Some(format!("Signed in with {}", provider)),
        Outcome::LoginRequired => Some(LOGIN_HINT.to_string()),
        Outcome::Created(id) => Some(format!("Created task #{}", id)),
        Outcome::Invalid(e) => Some(format!("Error: {}", e)),
        Outcome::Updated(id) => Some(format!("Updated #{}", id)),
        Outcome::Deleted(id) => Some(format!("Deleted #{}", id)),
        Outcome::NotFound(id) => Some(format!("Task #{} not found", id)),
        Outcome::CompletionScheduled { id, .. } => Some(format!("Completing #{}...", id)),
        Outcome::AlreadyCompleting(id) => Some(format!("#{} is already being completed", id)),
        Outcome::FormOpened
        | Outcome::FormClosed
        | Outcome::FilterChanged(_)
        | Outcome::SidebarToggled(_) => None,
    }
}

async fn write_block<W>(writer: &mut W, text: &str) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    writer.write_all(text.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_is_silent_for_view_changes() {
        assert!(notice(&Outcome::FormOpened).is_none());
        assert!(notice(&Outcome::SidebarToggled(true)).is_none());
        assert_eq!(notice(&Outcome::Deleted(4)).unwrap(), "Deleted #4");
        assert_eq!(
            notice(&Outcome::NotFound(9)).unwrap(),
            "Task #9 not found"
        );
    }
}
