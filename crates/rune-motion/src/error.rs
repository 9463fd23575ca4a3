//! Error types for decoding animation requests.
//!
//! Resolving and starting animations never fails: skipped keys, blocked keys
//! and missing optional structures are ordinary control flow. Errors only
//! arise at the edges where requests are decoded from text.

use thiserror::Error;

/// Result type for fallible motion operations.
pub type Result<T> = std::result::Result<T, MotionError>;

/// Errors that can occur while decoding animation descriptions.
#[derive(Error, Debug)]
pub enum MotionError {
    /// The JSON document does not describe a valid request or transition.
    #[error("invalid animation request: {0}")]
    InvalidRequest(#[from] serde_json::Error),

    /// A transition `type` string names no known transition kind.
    #[error("unknown transition type `{0}`")]
    InvalidTransitionType(String),

    /// A target key names no animatable property.
    #[error("unknown animatable property `{0}`")]
    UnknownProperty(String),
}
