use chrono::{Days, NaiveDate};
use std::time::Duration;
use taskflow::cli::{Clock, Session};
use taskflow::models::demo_tasks;
use taskflow::{App, AppOptions, FilterCategory, Priority, Task, TaskDraft, TaskStatus};

#[derive(Clone, Copy)]
struct FixedClock(NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }

    fn time_label(&self) -> String {
        "09:30:00".to_string()
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 7, 6).unwrap()
}

fn options(delay: Duration) -> AppOptions {
    AppOptions {
        skip_login: false,
        show_sidebar: false,
        completion_delay: delay,
    }
}

async fn run_script(tasks: Vec<Task>, delay: Duration, script: &str) -> (App, String) {
    let mut session = Session::new(App::new(tasks, options(delay)), FixedClock(today()));
    let mut output = Vec::new();

    session
        .run(script.as_bytes(), &mut output)
        .await
        .expect("session should not fail");

    let text = String::from_utf8(output).expect("output is utf-8");
    (session.into_app(), text)
}

#[tokio::test]
async fn auth_screen_until_login() {
    let (app, out) = run_script(demo_tasks(), Duration::ZERO, "delete 1\nlogin google\n").await;

    assert!(out.contains("Continue with Google"));
    assert!(out.contains("Please sign in first"));
    assert!(out.contains("Signed in with google"));
    assert!(out.contains("Total Tasks"));
    assert!(app.is_authenticated());
    assert_eq!(app.tasks().len(), 2);
}

#[tokio::test]
async fn task_views_hidden_until_login() {
    let (app, out) = run_script(demo_tasks(), Duration::ZERO, "show 1\nstate\n").await;

    assert!(!app.is_authenticated());
    assert_eq!(out.matches("Please sign in first").count(), 2);
    assert!(!out.contains("Complete project documentation"));
    assert!(!out.contains("\"dueDate\""));
}

#[tokio::test]
async fn create_update_delete_flow() {
    let script = "\
login
new
add \"Ship release\" -p high --due 2025-07-10 -d \"Tag and publish\"
update 3 --title \"Ship 1.0\" -s in-progress
delete 1
quit
add \"never reached\" --due 2025-07-10
";
    let (app, out) = run_script(demo_tasks(), Duration::ZERO, script).await;

    assert!(out.contains("New Task"));
    assert!(out.contains("Created task #3"));
    assert!(out.contains("Updated #3"));
    assert!(out.contains("Deleted #1"));

    let ids: Vec<u64> = app.tasks().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![2, 3]);

    let shipped = app.store().get(3).unwrap();
    assert_eq!(shipped.title, "Ship 1.0");
    assert_eq!(shipped.description, "Tag and publish");
    assert_eq!(shipped.priority, Priority::High);
    assert_eq!(shipped.status, TaskStatus::InProgress);
    assert_eq!(shipped.created_at, today());
    assert!(shipped.shared_with.is_empty());
}

#[tokio::test]
async fn completion_pulse_then_commit() {
    let script = "login\ncomplete 2\nfilter completed\n";
    let (app, out) = run_script(demo_tasks(), Duration::from_millis(5), script).await;

    assert!(out.contains("Completing #2..."));
    assert!(out.contains("... completing"));
    assert!(out.contains("Updated #2"));
    assert_eq!(app.store().get(2).unwrap().status, TaskStatus::Completed);
    assert_eq!(app.active_filter(), FilterCategory::Completed);
    assert_eq!(app.stats(today()).completed, 1);
}

#[tokio::test]
async fn bad_input_does_not_end_session() {
    let script = "login\nadd \"No date\"\nadd x --due 2025-99-01\nfrobnicate\nupdate 42 -p low\nshow 1\n";
    let (app, out) = run_script(demo_tasks(), Duration::ZERO, script).await;

    assert!(out.matches("Error:").count() >= 3);
    assert!(out.contains("Task #42 not found"));
    assert!(out.contains("Complete project documentation"));
    assert_eq!(app.tasks().len(), 2);
}

#[tokio::test]
async fn sidebar_and_state_dump() {
    let script = "sidebar\nlogin demo\nstate\n";
    let (app, out) = run_script(Vec::new(), Duration::ZERO, script).await;

    assert!(out.contains("Show Output"));
    assert!(out.contains("Application State"));
    assert!(out.contains("No tasks available"));
    assert!(out.contains("\"authenticated\": true"));
    assert!(out.contains("\"tasksLoaded\": false"));
    assert!(out.contains("09:30:00"));
    assert!(app.is_sidebar_visible());
}

#[test]
fn overdue_scenario_through_controller() {
    let mut app = App::new(
        Vec::new(),
        AppOptions {
            skip_login: true,
            ..Default::default()
        },
    );
    let yesterday = today() - Days::new(1);

    app.dispatch(
        taskflow::Intent::Create(TaskDraft::new("late", yesterday)),
        today(),
    );
    app.dispatch(taskflow::Intent::SetFilter(FilterCategory::Overdue), today());
    assert_eq!(app.visible_tasks(today()).len(), 1);

    app.dispatch(
        taskflow::Intent::Update {
            id: 1,
            patch: taskflow::TaskPatch::status(TaskStatus::Completed),
        },
        today(),
    );
    assert!(app.visible_tasks(today()).is_empty());
    assert_eq!(app.stats(today()).overdue, 0);
}
