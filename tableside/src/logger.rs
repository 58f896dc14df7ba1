//! Logging infrastructure
//!
//! The TUI owns the terminal, so logs go to a daily rolling file under
//! the data directory instead of stdout. Filtering follows `RUST_LOG`
//! and defaults to `info`.

use std::io;
use std::path::Path;

/// Initialize the global logger writing into `log_dir`
pub fn init(log_dir: &Path) -> io::Result<()> {
    std::fs::create_dir_all(log_dir)?;

    let file_appender = tracing_appender::rolling::daily(log_dir, "tableside");

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(file_appender)
        .with_ansi(false)
        .with_target(false)
        .init();

    tracing::info!("Logger initialized: {}", log_dir.display());
    Ok(())
}
