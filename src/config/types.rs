use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub host: HostConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings for the local host runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostConfig {
    /// Max transitions one outer dispatch may drain, counting the ones
    /// queued by transitions themselves (default: 10000).
    #[serde(default = "default_max_chained_dispatches")]
    pub max_chained_dispatches: usize,
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default `EnvFilter` directive when `RUST_LOG` is unset (default: "info").
    #[serde(default = "default_filter")]
    pub filter: String,
    /// Log file base path. `ELMISH_LOG` overrides it.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_max_chained_dispatches() -> usize {
    10_000
}

fn default_filter() -> String {
    "info".to_string()
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            max_chained_dispatches: default_max_chained_dispatches(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            file: None,
        }
    }
}
