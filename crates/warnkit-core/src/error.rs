//! Error types for loading and describing warnings.
//!
//! Constructing or registering a warning never fails; these errors only come
//! from parsing external input (kind names, JSON warning specs).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WarnError {
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Unknown warning kind: {0}")]
    UnknownKind(String),

    #[error("Warning message must not be empty")]
    EmptyMessage,

    #[error("Invalid warning spec at index {index}: {message}")]
    InvalidSpec { index: usize, message: String },
}
