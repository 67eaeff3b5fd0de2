//! Tracing initialization for test runs.
//!
//! Installs a console layer plus a timestamped file layer under the
//! configured logs directory (one file per run). Filtering follows
//! `RUST_LOG` when set, defaulting to `info`.
//!
//! Initialization is idempotent: if a subscriber is already installed (for
//! example by a previous test in the same process) the call is a no-op, so
//! test binaries can call [`init`] from every fixture.

use std::path::Path;

use chrono::Local;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Install the run-wide subscriber, logging to the given directory.
pub fn init(logs_dir: &Path) {
    // Best effort: logging must never take the run down.
    let _ = std::fs::create_dir_all(logs_dir);

    let filename = format!("test_run_{}.log", Local::now().format("%Y%m%d_%H%M%S"));
    let file_appender = tracing_appender::rolling::never(logs_dir, filename);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false);
    let console_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(console_layer)
        .try_init();
}

/// Install the subscriber using the configured logs directory.
pub fn init_from_config(config: &Config) {
    init(&config.logs_dir);
}
