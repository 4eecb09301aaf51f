//! taskflow CLI - in-memory task dashboard

use anyhow::Result;
use clap::Parser;
use std::io::Write;
use std::time::Duration;
use taskflow::cli::display::error;
use taskflow::cli::{Cli, Session, SystemClock};
use taskflow::models::{demo_tasks, load_seed};
use taskflow::{App, AppOptions};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .init();

    let cli = Cli::parse();

    let result = run(cli);

    if let Err(e) = &result {
        error(&e.to_string());
        std::process::exit(1);
    }

    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let tasks = if let Some(path) = &cli.seed {
        load_seed(path)?
    } else if cli.empty {
        Vec::new()
    } else {
        demo_tasks()
    };

    let options = AppOptions {
        skip_login: cli.skip_login,
        show_sidebar: cli.show_sidebar,
        completion_delay: Duration::from_millis(cli.completion_delay_ms),
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .enable_io()
        .build()?;

    let mut session = Session::new(App::new(tasks, options), SystemClock);

    runtime.block_on(async {
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();
        session.run(stdin, stdout).await
    })
}
