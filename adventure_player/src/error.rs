//! Error types for loading adventures and reading configuration.

use adventure_graph::GraphError;
use thiserror::Error;

/// Why an adventure could not be loaded.
///
/// Every variant is recoverable: the session that requested the load is
/// left exactly as it was.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The fetch itself failed.
    #[error("could not fetch adventure: {message}")]
    Transport { message: String, retryable: bool },

    /// The payload was not valid JSON.
    #[error("adventure is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// The payload has no `nodes` array.
    #[error("adventure payload has no nodes")]
    MissingNodes,

    /// The payload does not match the adventure schema.
    #[error("invalid adventure at `{path}`: {reason}")]
    Schema { path: String, reason: String },

    /// The payload parsed but its graph is inconsistent.
    #[error("invalid adventure graph: {0}")]
    Graph(#[from] GraphError),
}

impl LoadError {
    /// Whether trying the same load again may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            LoadError::Transport { retryable, .. } => *retryable,
            LoadError::Parse(_) => true,
            _ => false,
        }
    }
}

/// Failure reading player configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}
