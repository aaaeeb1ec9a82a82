//! Error types for layout operations.

use thiserror::Error;

/// Result type for layout operations.
pub type LayoutResult<T> = Result<T, LayoutError>;

/// Errors that can occur in layout operations.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// Element not found on the canvas.
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// An interactive session is already in flight.
    #[error("A {0} session is already active")]
    SessionActive(&'static str),

    /// Update or end called with no matching session in flight.
    #[error("No active {0} session")]
    NoActiveSession(&'static str),

    /// Document serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
