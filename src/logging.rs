//! Logging configuration for VIA RAG

use std::path::Path;

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::{self};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Registry;

use crate::config::LoggingConfig;
use crate::Result;

/// Initialize logging with configuration; `level_override` wins over the config level
pub fn init_logging(config: &LoggingConfig, level_override: Option<&str>) -> Result<()> {
    let level = level_override.unwrap_or(&config.level);

    // Create logs directory if it doesn't exist
    let logs_dir = Path::new(&config.directory);
    if !logs_dir.exists() {
        std::fs::create_dir_all(logs_dir)?;
    }

    // RUST_LOG takes precedence when set
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{level},viarag={level}")));

    let file_appender = tracing_appender::rolling::daily(logs_dir, "viarag.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let console_layer = fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr);

    let file_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_writer(non_blocking)
        .with_ansi(false); // No colors in file

    Registry::default()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| crate::ViaRagError::Custom(format!("failed to install logger: {e}")))?;

    tracing::info!("Logging initialized with level: {}", level);
    tracing::info!(
        "Log files will be saved to: {}/viarag.log.YYYY-MM-DD",
        config.directory
    );

    // The writer must outlive main
    std::mem::forget(guard);

    Ok(())
}

/// Initialize simple logging for testing
pub fn init_simple_logging() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(true)
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init()
        .map_err(|e| crate::ViaRagError::Custom(format!("failed to install logger: {e}")))?;

    tracing::info!("Simple logging initialized");
    Ok(())
}
