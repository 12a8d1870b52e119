use thiserror::Error;

/// Custom error types for karaplan.
///
/// The planning core itself is infallible (every option combination maps to
/// some plan); these errors belong to the external probing layer.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Required external tool not found: {0}")]
    DependencyNotFound(String),

    #[error("Failed to start command '{0}': {1}")]
    CommandStart(String, std::io::Error),

    #[error("Unable to parse ffmpeg version from: {0}")]
    VersionUnparsable(String),
}

/// Result type for karaplan operations
pub type CoreResult<T> = std::result::Result<T, CoreError>;
