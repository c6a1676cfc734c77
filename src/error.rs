use thiserror::Error;

/// Unified error type for lconf-version operations
#[derive(Error, Debug)]
pub enum VersionError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in lconf-version
pub type Result<T> = std::result::Result<T, VersionError>;

impl VersionError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        VersionError::Config(msg.into())
    }
}
