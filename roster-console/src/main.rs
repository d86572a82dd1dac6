//! Roster console - terminal front-end for the admin panels

mod app;
mod config;
mod logger;
mod render;

use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader};

use app::{App, Flow, Screen};
use config::Config;

fn prompt(screen: Screen) {
    let label = match screen {
        Screen::Login => "login",
        Screen::Employees => "employees",
        Screen::Users => "users",
    };
    print!("{label}> ");
    let _ = std::io::stdout().flush();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Configuration (.env, environment, flags)
    let config = Config::from_env();

    // 2. Logging; the guard flushes file output on exit
    let _guard = logger::init_logger(&config.log_level, config.log_dir.as_deref())?;
    tracing::info!(api = %config.api_url, data_dir = %config.data_dir.display(), "Roster console starting");

    // 3. Screens, resuming a stored session if there is one
    let mut app = App::new(config)?;
    app.start().await?;

    // 4. Command loop
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt(app.screen());
        let Some(line) = lines.next_line().await? else {
            break;
        };
        match app.handle(&line).await {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(e) => {
                tracing::error!(error = %e, "Command failed");
                println!("Error: {e}");
            }
        }
    }

    tracing::info!("Roster console stopped");
    Ok(())
}
