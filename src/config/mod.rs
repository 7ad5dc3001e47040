//! Runtime configuration.
//!
//! Everything has a default, so a missing file or a partial file is fine.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{Config, HostConfig, LoggingConfig};
