//! Logging initialization and configuration.
//!
//! Logs never go to the terminal: the TUI owns the screen, and in print mode
//! stdout belongs to the calling shell. Instead each run writes its own file
//! in the `logs/` directory next to the executable.
//!
//! `shist` is launched on every Ctrl-R, so logging is opt-in. Nothing is set
//! up unless `RUST_LOG` is present:
//! - `RUST_LOG=debug` - filter changes, fetch scans and scrolling
//! - `RUST_LOG=trace` - every selection move and redraw decision
//! - `RUST_LOG=info` - startup, history loading and the final action

use std::fs;
use std::path::PathBuf;

use chrono::Local;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize file logging if `RUST_LOG` is set.
///
/// Each run creates a new file, e.g. `logs/shist.2024-12-06-14-30-25.log`.
pub fn init_logging() {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => return,
    };

    let log_dir = match std::env::current_exe() {
        Ok(exe_path) => exe_path
            .parent()
            .map(|p| p.join("logs"))
            .unwrap_or_else(|| PathBuf::from("logs")),
        Err(_) => PathBuf::from("logs"),
    };

    if let Err(e) = fs::create_dir_all(&log_dir) {
        eprintln!("Warning: Failed to create logs directory: {}", e);
        return;
    }

    let timestamp = Local::now().format("%Y-%m-%d-%H-%M-%S");
    let log_path = log_dir.join(format!("shist.{}.log", timestamp));

    let log_file = match fs::File::create(&log_path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Warning: Failed to create log file: {}", e);
            return;
        }
    };

    // Non-blocking so a slow disk never stalls a keystroke.
    let (non_blocking, guard) = tracing_appender::non_blocking(log_file);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    // The writer must outlive every log call, i.e. the whole process.
    std::mem::forget(guard);

    tracing::info!("Logging initialized - writing to {}", log_path.display());
}
