//! Logging infrastructure
//!
//! Structured logging setup for embeddings that don't bring their own
//! subscriber. Level comes from the config, with an optional daily-rolling
//! file output.

use std::path::Path;

use crate::core::Config;

/// Initialize the tracing subscriber from the runtime config.
///
/// Safe to skip entirely when the embedding application installs its own
/// subscriber.
pub fn init_logger(config: &Config) {
    init_logger_with(&config.log_level, config.log_dir.as_deref());
}

/// Initialize with an explicit level and optional log directory.
pub fn init_logger_with(log_level: &str, log_dir: Option<&str>) {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(log_level.parse().unwrap_or(tracing::Level::INFO))
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        if log_path.exists()
            && let Some(dir_str) = log_path.to_str()
        {
            let file_appender = tracing_appender::rolling::daily(dir_str, "boothsync");
            subscriber.with_writer(file_appender).init();
            return;
        }
    }

    subscriber.init();
}
