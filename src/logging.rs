//! File-based logging.
//!
//! Diagnostics go through `tracing` into a daily rotating file so that the
//! interactive player prompt keeps the terminal to itself. User facing lines
//! are printed with the status macros from the crate root instead.

use std::path::Path;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_FILE_PREFIX: &str = "tunedeck";

/// Initialize the logging system.
///
/// Logs are written to `<log_dir>/tunedeck.YYYY-MM-DD`. The level can be
/// controlled via `RUST_LOG`; the default is debug for this crate and warn for
/// everything else.
pub fn init_logging(log_dir: &Path) -> crate::Res<()> {
    std::fs::create_dir_all(log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // The writer flushes on drop; keep it for the lifetime of the process.
    Box::leak(Box::new(guard));

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("tunedeck=debug,warn"));

    let fmt_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    tracing::info!(dir = %log_dir.display(), "logging initialized");
    Ok(())
}

/// Log the outcome of a gateway call.
#[macro_export]
macro_rules! log_gateway_result {
    ($operation:expr, $result:expr) => {
        match &$result {
            Ok(_) => tracing::debug!(operation = $operation, "gateway request successful"),
            Err(e) => tracing::warn!(operation = $operation, error = %e, "gateway request failed"),
        }
    };
}
