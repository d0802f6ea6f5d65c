use std::{path::Path, sync::LazyLock};

use anyhow::{anyhow, Result};
use tracing::level_filters::LevelFilter;
use tracing_appender::rolling::{Builder, RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt::{format::FmtSpan, writer::MakeWriterExt},
    EnvFilter,
};

pub const SERVER_PREFIX: &str = "server";
pub const TRACKER_PREFIX: &str = "tracker";

const DEFAULT_LEVEL: &str = "info";
const KEPT_LOG_FILES: usize = 5;

/// Filter directive limiting output to this crate. An explicit level beats `RUST_LOG`, which
/// beats [DEFAULT_LEVEL].
fn crate_directive(log_level: Option<LevelFilter>, env_level: Option<String>) -> String {
    let level = log_level
        .map(|v| v.to_string())
        .or(env_level.filter(|v| !v.trim().is_empty()))
        .unwrap_or_else(|| DEFAULT_LEVEL.into());
    format!("{}={level}", env!("CARGO_PKG_NAME").replace('-', "_"))
}

fn daily_appender(prefix: &str, application_data_path: &Path) -> Result<RollingFileAppender> {
    Ok(Builder::new()
        .rotation(Rotation::DAILY)
        .max_log_files(KEPT_LOG_FILES)
        .filename_prefix(prefix)
        .build(application_data_path.join("logs"))?)
}

/// Installs the global subscriber. Everything goes into a daily rotated file under
/// `application_data_path/logs`; stdout only gets a copy when `show_std` is set, since the
/// terminal form shares it with the user.
pub fn enable_logging(
    prefix: &str,
    application_data_path: &Path,
    log_level: Option<LevelFilter>,
    show_std: bool,
) -> Result<()> {
    let appender = daily_appender(prefix, application_data_path)?;
    let stdout = std::io::stdout.with_filter(move |_| show_std);
    let directive = crate_directive(log_level, std::env::var("RUST_LOG").ok());

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&directive))
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(stdout.and(appender))
        .pretty()
        .try_init()
        .map_err(|e| anyhow!("Failed to install logging with {directive}: {e}"))
}

pub static TEST_LOGGING: LazyLock<()> = LazyLock::new(|| {
    tracing_subscriber::fmt()
        .with_max_level(LevelFilter::TRACE)
        .with_test_writer()
        .pretty()
        .init()
});
