//! Error types for the JSON adapter layer.
//!
//! The tree transform itself is best-effort and infallible: anything not
//! promotable passes through unchanged. Errors only arise at the boundary,
//! when decoding a declaration document from JSON or encoding the result.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
}
