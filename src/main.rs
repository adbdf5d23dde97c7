//! Main entry point for shist.
//!
//! Loads the history, runs the selector on the alternate screen, restores the
//! terminal and then hands the chosen command to the shell. The exit status
//! tells a `bind -x` widget what to do with the printed line.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use shist::app::App;
use shist::config::{Cli, Config};
use shist::history::HistoryStore;
use shist::session::Session;
use shist::shell::{self, bind::bind_command, EXIT_NOTHING};
use shist::ui::terminal::{self, list_capacity};
use shist::utils::guard::RestoreGuard;
use shist::utils::logger::init_logging;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Initialize logging before anything else
    init_logging();

    let cli = Cli::parse();

    if let Some(shell_name) = cli.bind.as_deref() {
        return match bind_command(shell_name, cli.iocsti) {
            Ok(command) => {
                println!("{}", command);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("shist: {}", e);
                ExitCode::from(EXIT_NOTHING)
            }
        };
    }

    match run(&cli).await {
        Ok(status) => ExitCode::from(status),
        Err(err) => {
            tracing::error!("Exiting with error: {:#}", err);
            eprintln!("shist: {:#}", err);
            ExitCode::from(shell::error_status(&err))
        }
    }
}

async fn run(cli: &Cli) -> Result<u8> {
    let config = Config::resolve(cli, |key| std::env::var(key).ok())?;
    tracing::info!("Starting with {:?}", config);

    let store = HistoryStore::open(&config.histfile)?;

    let outcome = {
        let mut tui = terminal::init()?;
        let _restore = RestoreGuard::with(|| {
            if let Err(e) = terminal::restore() {
                tracing::error!("Failed to restore terminal: {}", e);
            }
        });

        let capacity = list_capacity(tui.size()?.height);
        let mut app = App::new(Session::new(store, &config, capacity));
        app.draw(&mut tui)?;
        app.run(&mut tui).await?;
        app.finish()
    };

    // The terminal is back in cooked mode and the input reader has stopped.
    Ok(shell::deliver(outcome.as_ref(), config.inject_mode)?)
}
