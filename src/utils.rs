use std::path::Path;

use crossterm::cursor::Show;
use crossterm::event::DisableMouseCapture;
use crossterm::execute;
use crossterm::terminal::{LeaveAlternateScreen, disable_raw_mode};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::{AppError, Result};

pub fn init_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // intentionally ignore errors here since we're already in a panic
        let _ = restore_tui();
        original_hook(panic_info);
    }));
}

pub fn restore_tui() -> std::io::Result<()> {
    disable_raw_mode()?;
    execute!(std::io::stdout(), DisableMouseCapture, LeaveAlternateScreen, Show)?;
    Ok(())
}

/// Set up file logging next to the config document (sshman.log).
pub fn init_tracing(log_dir: &Path, log_level: &str) -> Result<()> {
    let file_appender = tracing_appender::rolling::never(log_dir, "sshman.log");

    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    // Priority: RUST_LOG env var > caller-supplied default
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let fmt_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true)
        .with_ansi(false); // no ANSI colors in the log file

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| AppError::Persistence(format!("Failed to initialize tracing: {}", e)))?;

    // Keep the guard alive for the duration of the program
    std::mem::forget(_guard);

    Ok(())
}
