//! Tracing setup
//!
//! The TUI owns stdout, so events only ever go to a daily rolling file.
//! `RUST_LOG` wins over the configured level.

use crate::config::Config;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const LOG_FILE_PREFIX: &str = "srefs-tui.log";

/// Install the global subscriber. The returned guard flushes the file
/// writer on drop and must live until the program exits.
pub fn init(config: &Config) -> Option<WorkerGuard> {
    if !config.log_to_file {
        return None;
    }

    let log_dir = Config::log_dir()?;
    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        eprintln!("Warning: Could not create log directory {:?}: {}", log_dir, e);
        return None;
    }

    let default_filter = format!("srefs_tui={}", config.log_level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let file_appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    Some(guard)
}
