//! Error types for arcanum-content

use thiserror::Error;

/// Content loading error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("RON parse error: {0}")]
    Ron(#[from] ron::error::SpannedError),

    #[error("Duplicate definition: {0}")]
    DuplicateDefinition(String),

    #[error("Dangling reference: {kind} {id} referenced by {referrer}")]
    DanglingReference {
        kind: &'static str,
        id: String,
        referrer: String,
    },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
