//! Error types for arcanum-save

use thiserror::Error;

/// Persistence error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("RON parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("RON serialize error: {0}")]
    Serialize(#[from] ron::Error),

    #[error("Unsupported save version: {0}")]
    UnsupportedVersion(u32),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
