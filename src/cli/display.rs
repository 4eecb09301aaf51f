//! Display formatting for the session screens
//!
//! Every renderer borrows what it shows and returns the text; nothing here
//! can change application state.

use crate::app::{App, AppSnapshot, FEATURES, LoginProvider};
use crate::models::{Task, TaskStatus};
use crate::storage::{FilterCategory, TaskStats};
use chrono::{Datelike, NaiveDate};
use tabled::{
    Table, Tabled,
    builder::Builder,
    settings::{Alignment, Modify, Style, object::Columns},
};

const BRAND: &str = "TaskFlow";

/// Stat cards across the top of the dashboard
#[derive(Tabled)]
struct StatCards {
    #[tabled(rename = "Total Tasks")]
    total: usize,
    #[tabled(rename = "Completed")]
    completed: usize,
    #[tabled(rename = "Pending")]
    pending: usize,
    #[tabled(rename = "Overdue")]
    overdue: usize,
}

impl From<&TaskStats> for StatCards {
    fn from(stats: &TaskStats) -> Self {
        StatCards {
            total: stats.total,
            completed: stats.completed,
            pending: stats.pending,
            overdue: stats.overdue,
        }
    }
}

/// Task row for the sidebar's task table
#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Priority")]
    priority: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Due")]
    due: String,
}

impl From<&Task> for TaskRow {
    fn from(task: &Task) -> Self {
        TaskRow {
            id: format!("{}", task.id),
            title: truncate(&task.title, 28),
            priority: task.priority.to_string(),
            status: task.status.label().to_lowercase(),
            due: task.due_date.to_string(),
        }
    }
}

/// Key/value row used by the sidebar cards
#[derive(Tabled)]
struct StatsRow {
    #[tabled(rename = "Metric")]
    metric: String,
    #[tabled(rename = "Value")]
    value: String,
}

impl StatsRow {
    fn new(metric: &str, value: impl ToString) -> Self {
        StatsRow {
            metric: metric.to_string(),
            value: value.to_string(),
        }
    }
}

/// Render the sign-in screen
pub fn render_auth_screen() -> String {
    let mut lines = vec![
        BRAND.to_string(),
        "Organize your tasks, boost your productivity".to_string(),
        String::new(),
        "Welcome Back".to_string(),
        "Sign in to access your tasks and collaborate with others".to_string(),
        String::new(),
    ];

    for provider in LoginProvider::ALL {
        if provider == LoginProvider::Demo {
            lines.push("── Or for demo ──".to_string());
        }
        lines.push(format!("  {:<24} login {}", provider.label(), provider));
    }

    boxed(&lines.join("\n"))
}

/// Render the dashboard: header, stat cards, filter tabs and task list
pub fn render_dashboard(app: &App, today: NaiveDate) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{}  ·  Welcome back, User!  ·  type `new` for a new task\n\n",
        BRAND
    ));

    out.push_str(&render_stat_cards(&app.stats(today)));
    out.push_str("\n\nYour Tasks\n");
    out.push_str(&render_filter_tabs(app.active_filter()));
    out.push('\n');

    let visible = app.visible_tasks(today);
    if visible.is_empty() {
        out.push_str(&render_empty_state(app.active_filter()));
    } else {
        let cards: Vec<String> = visible
            .iter()
            .map(|task| render_task_card(task, today, app.is_completing(task.id)))
            .collect();
        out.push_str(&cards.join("\n"));
    }

    if app.is_form_open() {
        out.push('\n');
        out.push_str(&render_task_form());
    }

    out
}

/// Render the four stat cards
pub fn render_stat_cards(stats: &TaskStats) -> String {
    Table::new([StatCards::from(stats)])
        .with(Style::rounded())
        .to_string()
}

/// Render the tab strip with the active tab bracketed
pub fn render_filter_tabs(active: FilterCategory) -> String {
    FilterCategory::ALL
        .iter()
        .map(|tab| {
            if *tab == active {
                format!("[{}]", tab.label())
            } else {
                format!(" {} ", tab.label())
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Message shown when the active tab has no tasks
pub fn render_empty_state(active: FilterCategory) -> String {
    let hint = if active == FilterCategory::All {
        "Create your first task to get started!".to_string()
    } else {
        format!("No {} tasks at the moment.", active)
    };

    format!("No tasks found\n{}\nType `new` to create a task.", hint)
}

/// Render one task card
pub fn render_task_card(task: &Task, today: NaiveDate, completing: bool) -> String {
    let overdue = task.is_overdue(today);
    let mut lines = Vec::new();

    let title = if task.is_completed() {
        strike(&task.title)
    } else {
        task.title.clone()
    };
    lines.push(format!("#{}  {}", task.id, title));

    if !task.description.is_empty() {
        lines.push(task.description.clone());
    }

    let mut badges = vec![
        format!("[{} Priority]", task.priority.label()),
        format!("[{}]", task.status.label()),
    ];
    if overdue {
        badges.push("[Overdue]".to_string());
    }
    lines.push(badges.join(" "));

    let mut meta = format!("Due {}", format_due(task.due_date, today));
    if overdue {
        meta.push_str(" (!)");
    }
    if !task.shared_with.is_empty() {
        meta.push_str(&format!("  ·  Shared with {}", task.shared_with.len()));
    }
    lines.push(meta);

    lines.push(format!("Actions: {}", card_actions(task).join(" | ")));

    if completing {
        lines.push("... completing".to_string());
    }

    boxed(&lines.join("\n"))
}

/// Commands offered on a card. Quick actions come first, then the menu.
pub fn card_actions(task: &Task) -> Vec<String> {
    let mut actions = Vec::new();

    if task.status != TaskStatus::Completed {
        actions.push(format!("complete {}", task.id));
    }
    if task.status == TaskStatus::Pending {
        actions.push(format!("start {}", task.id));
    }

    actions.push(format!("status {} <pending|in-progress|completed>", task.id));
    actions.push(format!("update {} ...", task.id));
    actions.push(format!("delete {}", task.id));
    actions
}

/// Render the new-task form help
pub fn render_task_form() -> String {
    let lines = [
        "New Task",
        "add <title> --due YYYY-MM-DD [-d <description>]",
        "    [-p low|medium|high] [-s pending|in-progress|completed]",
        "cancel",
    ];
    boxed(&lines.join("\n"))
}

/// Render the debug sidebar, or its "show" hint when hidden
pub fn render_sidebar(app: &App, today: NaiveDate, last_updated: &str) -> String {
    if !app.is_sidebar_visible() {
        return "[Show Output] type `sidebar`".to_string();
    }

    let stats = app.stats(today);
    let yes_no = |b: bool| if b { "Yes" } else { "No" };

    let state_rows = vec![
        StatsRow::new("Status", "Running"),
        StatsRow::new("Authenticated", yes_no(app.is_authenticated())),
        StatsRow::new("Tasks Loaded", yes_no(!app.tasks().is_empty())),
        StatsRow::new("Last Updated", last_updated),
    ];

    let stats_rows = vec![
        StatsRow::new("Total Tasks", stats.total),
        StatsRow::new("Completed", stats.completed),
        StatsRow::new("In Progress", stats.in_progress),
        StatsRow::new("Pending", stats.pending),
        StatsRow::new("Overdue", stats.overdue),
    ];

    let mut out = String::new();
    out.push_str("Application Output  (type `sidebar` to hide)\n\n");

    out.push_str("Application State\n");
    out.push_str(&Table::new(state_rows).with(Style::rounded()).to_string());

    out.push_str("\n\nTask Statistics\n");
    out.push_str(
        &Table::new(stats_rows)
            .with(Style::rounded())
            .with(Modify::new(Columns::single(1)).with(Alignment::right()))
            .to_string(),
    );

    out.push_str("\n\nFeatures Implemented\n");
    for feature in FEATURES {
        out.push_str(&format!("  ✓ {}\n", feature));
    }

    out.push_str(&format!("\nCurrent Tasks ({})\n", app.tasks().len()));
    if app.tasks().is_empty() {
        out.push_str("No tasks available");
    } else {
        let rows: Vec<TaskRow> = app.tasks().iter().map(TaskRow::from).collect();
        out.push_str(
            &Table::new(rows)
                .with(Style::rounded())
                .with(Modify::new(Columns::single(0)).with(Alignment::right()))
                .to_string(),
        );
    }

    out
}

/// Pretty-printed JSON of the application state
pub fn render_state_json(snapshot: &AppSnapshot<'_>) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(snapshot)
}

/// "Jul 7", with the year appended when it is not the current year
pub fn format_due(due: NaiveDate, today: NaiveDate) -> String {
    if due.year() == today.year() {
        due.format("%b %-d").to_string()
    } else {
        due.format("%b %-d, %Y").to_string()
    }
}

/// Wrap text in a single rounded box
fn boxed(content: &str) -> String {
    let mut builder = Builder::default();
    builder.push_record([content]);
    builder.build().with(Style::rounded()).to_string()
}

/// Overlay a strike-through on every character
fn strike(s: &str) -> String {
    s.chars().flat_map(|c| [c, '\u{0336}']).collect()
}

/// Truncate a string to a maximum number of characters
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Format for error messages
pub fn error(msg: &str) {
    eprintln!("Error: {}", msg);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{AppOptions, Intent};
    use crate::models::{TaskDraft, demo_tasks};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn app() -> App {
        App::new(
            demo_tasks(),
            AppOptions {
                skip_login: true,
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_format_due() {
        let today = date(2025, 7, 1);
        assert_eq!(format_due(date(2025, 7, 7), today), "Jul 7");
        assert_eq!(format_due(date(2026, 1, 15), today), "Jan 15, 2026");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a much longer title", 10), "a much ...");
        assert_eq!(truncate("ééééééééééé", 5), "éé...");
    }

    #[test]
    fn test_auth_screen_lists_every_provider() {
        let screen = render_auth_screen();
        assert!(screen.contains("Welcome Back"));
        for provider in LoginProvider::ALL {
            assert!(screen.contains(provider.label()));
        }
    }

    #[test]
    fn test_task_card_badges() {
        let task = &demo_tasks()[1];
        let card = render_task_card(task, date(2025, 7, 1), false);

        assert!(card.contains("Review code changes"));
        assert!(card.contains("[Medium Priority]"));
        assert!(card.contains("[Pending]"));
        assert!(card.contains("Due Jul 6"));
        assert!(!card.contains("Overdue"));
        assert!(!card.contains("Shared with"));
        assert!(card.contains("complete 2"));
        assert!(card.contains("start 2"));
    }

    #[test]
    fn test_task_card_overdue_and_shared() {
        let task = &demo_tasks()[0];
        let card = render_task_card(task, date(2026, 1, 1), true);

        assert!(card.contains("[In Progress]"));
        assert!(card.contains("[Overdue]"));
        assert!(card.contains("Due Jul 7, 2025"));
        assert!(card.contains("Shared with 1"));
        assert!(card.contains("completing"));
        assert!(!card.contains("start 1"));
    }

    #[test]
    fn test_completed_card_has_no_complete_action() {
        let mut task = demo_tasks()[0].clone();
        task.status = TaskStatus::Completed;
        let actions = card_actions(&task);
        assert!(!actions.iter().any(|a| a.starts_with("complete")));
        assert!(actions.iter().any(|a| a == "delete 1"));

        let card = render_task_card(&task, date(2026, 1, 1), false);
        assert!(!card.contains("[Overdue]"));
    }

    #[test]
    fn test_filter_tabs_mark_active() {
        let tabs = render_filter_tabs(FilterCategory::InProgress);
        assert!(tabs.contains("[In Progress]"));
        assert!(tabs.contains(" All "));
    }

    #[test]
    fn test_empty_state_messages() {
        assert!(render_empty_state(FilterCategory::All).contains("Create your first task"));
        assert!(
            render_empty_state(FilterCategory::Overdue)
                .contains("No overdue tasks at the moment.")
        );
    }

    #[test]
    fn test_dashboard_shows_stats_and_cards() {
        let app = app();
        let out = render_dashboard(&app, date(2025, 7, 1));
        assert!(out.contains("Total Tasks"));
        assert!(out.contains("Complete project documentation"));
        assert!(out.contains("[All]"));
        assert!(!out.contains("New Task"));
    }

    #[test]
    fn test_dashboard_empty_filter_and_form() {
        let mut app = app();
        let today = date(2025, 7, 1);
        app.dispatch(Intent::SetFilter(FilterCategory::Completed), today);
        app.dispatch(Intent::OpenForm, today);

        let out = render_dashboard(&app, today);
        assert!(out.contains("No completed tasks at the moment."));
        assert!(out.contains("New Task"));
    }

    #[test]
    fn test_sidebar_hidden_and_visible() {
        let mut app = app();
        let today = date(2025, 7, 1);
        assert!(render_sidebar(&app, today, "12:00:00").contains("Show Output"));

        app.dispatch(Intent::ToggleSidebar, today);
        let out = render_sidebar(&app, today, "12:00:00");
        assert!(out.contains("Application State"));
        assert!(out.contains("In Progress"));
        assert!(out.contains("12:00:00"));
        assert!(out.contains("Current Tasks (2)"));
        assert!(out.contains("Due Date Tracking"));
    }

    #[test]
    fn test_sidebar_without_tasks() {
        let mut app = App::new(
            Vec::new(),
            AppOptions {
                skip_login: true,
                show_sidebar: true,
                ..Default::default()
            },
        );
        let today = date(2025, 7, 1);
        let out = render_sidebar(&app, today, "now");
        assert!(out.contains("No tasks available"));

        app.dispatch(Intent::Create(TaskDraft::new("x", today)), today);
        assert!(render_sidebar(&app, today, "now").contains("Current Tasks (1)"));
    }

    #[test]
    fn test_state_json() {
        let app = app();
        let json = render_state_json(&app.snapshot(date(2025, 7, 1), "now".to_string())).unwrap();
        assert!(json.contains("\"lastUpdated\": \"now\""));
        assert!(json.contains("\"dueDate\": \"2025-07-07\""));
    }
}
