//! Error types for the nightfade engine.

/// Top-level error type for the scheduling engine.
#[derive(Debug, thiserror::Error)]
pub enum FadeError {
    /// Configuration file or CLI argument error.
    #[error("config error: {0}")]
    Config(String),

    /// Launchd job document encode/decode error.
    #[error("job codec error: {0}")]
    Codec(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, FadeError>;
