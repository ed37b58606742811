// Logging Bootstrap
// Console logging with an env filter, plus an optional per-session log file

use std::fs;
use std::path::PathBuf;
use std::sync::OnceLock;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();
static INITIALIZED: OnceLock<()> = OnceLock::new();

/// `TEXTGUARD_LOG` first, then `RUST_LOG`, then `info`.
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env("TEXTGUARD_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

fn log_dir() -> Option<PathBuf> {
    match std::env::var("TEXTGUARD_LOG_DIR") {
        Ok(p) if !p.trim().is_empty() => Some(PathBuf::from(p)),
        _ => None,
    }
}

fn init_console_only_logging() {
    let console_layer = fmt::layer().with_writer(std::io::stderr).with_target(true);
    let _ = tracing_subscriber::registry()
        .with(env_filter())
        .with(console_layer)
        .try_init();
}

/// Install the global subscriber. Safe to call more than once; only the first call
/// has an effect. Logs go to stderr so stdout stays clean for JSON output.
pub fn init_logging() {
    if INITIALIZED.set(()).is_err() {
        return;
    }

    let Some(dir) = log_dir() else {
        init_console_only_logging();
        return;
    };

    if let Err(e) = fs::create_dir_all(&dir) {
        eprintln!("Failed to create log directory {}: {}", dir.display(), e);
        init_console_only_logging();
        return;
    }

    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let log_filename = format!("textguard_{}.log", timestamp);
    let (file_writer, file_guard) = tracing_appender::non_blocking(rolling::never(&dir, &log_filename));
    let _ = LOG_GUARD.set(file_guard);

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    let console_layer = fmt::layer().with_writer(std::io::stderr).with_target(true);
    let _ = tracing_subscriber::registry()
        .with(env_filter())
        .with(file_layer)
        .with(console_layer)
        .try_init();
    info!("Log file: {}/{}", dir.display(), log_filename);
}
