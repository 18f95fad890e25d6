//! Logging Setup
//!
//! Installs the global `tracing` subscriber for the binaries.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;

/// Filter used when neither `RUST_LOG` nor a configured level is usable
pub const DEFAULT_FILTER: &str = "chime=info";

/// Resolve the filter directive: `RUST_LOG` wins, then the configured level.
///
/// A bare level such as `debug` is scoped to this crate; anything that
/// already looks like a directive list is used as written.
pub fn filter_directive(rust_log: Option<String>, level: &str) -> String {
    if let Some(directive) = rust_log.filter(|d| !d.trim().is_empty()) {
        return directive;
    }
    let level = level.trim();
    if level.is_empty() {
        DEFAULT_FILTER.to_string()
    } else if level.contains('=') || level.contains(',') {
        level.to_string()
    } else {
        format!("chime={}", level)
    }
}

/// Initialize logging from the `[logging]` config section.
///
/// Calling it twice is harmless; the second subscriber is ignored.
pub fn init(config: &LoggingConfig) -> std::io::Result<()> {
    let directive = filter_directive(std::env::var("RUST_LOG").ok(), &config.level);
    let filter = tracing_subscriber::EnvFilter::try_new(&directive)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_FILTER));

    let (writer, ansi) = match &config.file {
        Some(path) => (BoxMakeWriter::new(Mutex::new(open_log_file(Path::new(path))?)), false),
        None => (BoxMakeWriter::new(std::io::stderr), true),
    };

    let registry = tracing_subscriber::registry().with(filter);
    let result = if config.format.eq_ignore_ascii_case("json") {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(writer))
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(ansi)
                    .with_writer(writer),
            )
            .try_init()
    };

    if let Err(e) = result {
        tracing::debug!("Logging already initialized: {}", e);
    }
    Ok(())
}

fn open_log_file(path: &Path) -> std::io::Result<std::fs::File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}
