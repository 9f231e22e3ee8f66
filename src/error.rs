use std::path::PathBuf;

use thiserror::Error;

/// Failures while loading a [`GameConfig`](crate::config::GameConfig).
///
/// The simulation itself never fails; values out of range are clamped.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}
