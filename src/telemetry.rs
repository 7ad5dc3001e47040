use std::path::PathBuf;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;

/// Environment variable naming the log file; overrides `logging.file`.
pub const LOG_ENV_VAR: &str = "ELMISH_LOG";

/// Resolves the log file base path: `ELMISH_LOG` first, then the config.
pub fn log_path(config: &LoggingConfig) -> Option<PathBuf> {
    std::env::var_os(LOG_ENV_VAR)
        .map(PathBuf::from)
        .or_else(|| config.file.clone())
}

/// Initialize tracing with optional file output.
///
/// Logging is disabled unless `ELMISH_LOG` or `logging.file` names a file.
/// The file is created as `{path}.{timestamp}.{pid}` so several processes
/// can log side by side. Returns whether a subscriber was installed.
pub fn init_tracing(config: &LoggingConfig) -> bool {
    let Some(log_path) = log_path(config) else {
        return false;
    };

    let pid = std::process::id();
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let unique_path = format!("{}.{}.{}", log_path.display(), timestamp, pid);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.filter));

    let Ok(file) = std::fs::File::create(&unique_path) else {
        eprintln!("Warning: Failed to create log file: {}", unique_path);
        return false;
    };

    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()
        .is_ok()
}
