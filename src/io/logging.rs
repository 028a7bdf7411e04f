use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Environment variable checked before `RUST_LOG`
pub const LOG_ENV: &str = "BATHSCHED_LOG";

const LOG_FILE: &str = "bathsched.log";

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default))
}

/// CLI logging: warnings and up to stderr, so stdout stays clean for `--json`
pub fn init_cli_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter("warn"))
        .with_writer(std::io::stderr)
        .without_time()
        .try_init();
}

/// TUI logging: everything goes to `<log_dir>/bathsched.log` through a background
/// writer, since the terminal belongs to the UI. Keep the guard alive until exit.
pub fn init_tui_logging(log_dir: &Path) -> std::io::Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)?;
    let appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter("bathsched=info"))
        .with_writer(writer)
        .with_ansi(false)
        .try_init();
    Ok(guard)
}
