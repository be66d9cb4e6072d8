//! Tracing subscriber setup
//!
//! Shared tracing configuration used by the binary and by tests. Logs go to a
//! file because stdout belongs to the alternate screen.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Default log path under the system temp dir, namespaced by pid so parallel
/// instances don't clobber each other.
pub fn default_log_path() -> PathBuf {
    std::env::temp_dir().join(format!("coreterm-{}.log", std::process::id()))
}

/// Initialize the global tracing subscriber with file logging.
///
/// Returns false (and stays silent) if the log file cannot be created; the
/// app runs fine without diagnostics.
pub fn init_global(log_file_path: &Path) -> bool {
    let Ok(log_file) = File::create(log_file_path) else {
        return false;
    };
    build_subscriber(log_file).init();
    true
}

/// Build a subscriber with file logging and RUST_LOG filtering (DEBUG default).
pub fn build_subscriber(log_file: File) -> impl tracing::Subscriber + Send + Sync {
    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into());

    let fmt_layer = fmt::layer().with_writer(Arc::new(log_file));

    tracing_subscriber::registry().with(fmt_layer).with(env_filter)
}
