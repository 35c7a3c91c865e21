use std::env;
use std::fs;
use std::io;
use tracing::debug;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Set up stdout plus non-blocking file logging.
///
/// `verbose` raises the default level to debug, which surfaces the
/// per-phase scan detail the engine logs. The `TRACING_LEVEL` env var
/// overrides both; `LOG_DIR` relocates the log file.
pub fn init_logger(verbose: bool) -> impl Drop {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = env::var("TRACING_LEVEL").unwrap_or_else(|_| default_level.to_string());

    let log_dir = env::var("LOG_DIR").unwrap_or_else(|_| "./logs".to_string());
    if let Err(err) = fs::create_dir_all(&log_dir) {
        eprintln!("Could not create log directory {}: {}", log_dir, err);
    }
    let file_appender = tracing_appender::rolling::never(&log_dir, "filedrift.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(io::stdout)
                .compact()
                .with_target(false)
                .without_time()
                .with_ansi(true),
        )
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .with(EnvFilter::new(filter))
        .init();

    debug!("Logging to stdout and {}/filedrift.log", log_dir);

    guard
}
