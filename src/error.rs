//! Engine error type
//!
//! Every boundary call either returns a usable value or one of these. A failed
//! render is always an `Err`, never a blank frame.

/// Core error type for the maze engine.
#[derive(thiserror::Error, Debug)]
pub enum EngineError {
    /// Serialized state could not be parsed
    #[error("malformed state: {0}")]
    MalformedState(#[source] serde_json::Error),

    /// Serialized input record could not be parsed
    #[error("malformed input: {0}")]
    MalformedInput(#[source] serde_json::Error),

    /// State was written by an incompatible engine version
    #[error("unsupported state version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    /// State parsed but violates an engine invariant
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// Input record carries values the engine cannot integrate
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Settings could not be parsed
    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    /// State could not be serialized
    #[error("encode error: {0}")]
    Encode(#[source] serde_json::Error),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type used throughout the engine.
pub type EngineResult<T> = Result<T, EngineError>;

impl EngineError {
    /// Shorthand for an `InvalidState` with a formatted reason
    pub(crate) fn invalid_state(reason: impl Into<String>) -> Self {
        EngineError::InvalidState(reason.into())
    }
}
