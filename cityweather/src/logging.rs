use cityweather_core::LoggingMiddleware;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable naming the log file
pub const LOG_ENV: &str = "CITYWEATHER_LOG";

/// Initialize tracing with optional file output.
///
/// Logging is off unless `CITYWEATHER_LOG` holds a file path; anything written
/// to stdout would corrupt the terminal UI. The filter comes from `RUST_LOG`
/// and defaults to `info`.
pub fn init_tracing() {
    let Some(log_path) = std::env::var(LOG_ENV).ok().filter(|p| !p.is_empty()) else {
        return;
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Warning: could not open log file {log_path}: {e}");
            return;
        }
    };

    let file_layer = fmt::layer()
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();
}

/// Store middleware that logs every action except the spinner tick.
///
/// `Tick` fires every 100 ms, idle or not.
pub fn action_logger() -> LoggingMiddleware {
    LoggingMiddleware::new().skipping(&["Tick"])
}
