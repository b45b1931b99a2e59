//! Error types for the engine crate.

/// Errors that can occur while preparing a comparison.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EngineError {
    /// The combined input exceeds the configured guard.
    #[error("input too large: {size} bytes exceeds the limit of {limit} bytes")]
    InputTooLarge { size: usize, limit: usize },
}

/// Convenience alias for engine results.
pub type EngineResult<T> = Result<T, EngineError>;
