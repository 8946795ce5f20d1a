use std::io;

use anyhow::Result;
use once_cell::sync::OnceCell;
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::{config::AppConfig, infrastructure::directories::ResolvedPaths};

const LOG_FILE_PREFIX: &str = "monitor.log";

// keeps the file writer flushing until the process exits
static GUARD: OnceCell<WorkerGuard> = OnceCell::new();

/// `RUST_LOG` wins over `LOG_LEVEL`; an unparseable level means `info`.
fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| level_filter(level))
}

fn level_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
}

pub fn init_tracing(config: &AppConfig, paths: &ResolvedPaths) -> Result<()> {
    if GUARD.get().is_some() {
        return Ok(());
    }

    let (file_writer, guard) =
        tracing_appender::non_blocking(rolling::daily(&paths.logs_dir, LOG_FILE_PREFIX));

    tracing_subscriber::registry()
        .with(build_filter(&config.logging.level))
        .with(fmt::layer().with_writer(io::stdout).with_target(true))
        .with(
            fmt::layer()
                .with_writer(file_writer)
                .with_target(true)
                .with_ansi(false),
        )
        .try_init()?;
    let _ = GUARD.set(guard);

    tracing::info!(
        target: "app",
        logs = %paths.logs_dir.display(),
        file = LOG_FILE_PREFIX,
        "tracing initialized"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use tracing_subscriber::filter::LevelFilter;

    use super::*;

    #[test]
    fn configured_level_is_applied() {
        assert_eq!(level_filter("debug").max_level_hint(), Some(LevelFilter::DEBUG));
        assert_eq!(level_filter("warn").max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn malformed_level_falls_back_to_info() {
        assert_eq!(
            level_filter("pipeline=loudest").max_level_hint(),
            Some(LevelFilter::INFO)
        );
    }
}
