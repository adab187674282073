//! Error types for hex parsing and wire decoding.

use thiserror::Error;

/// Errors raised while turning a hex string into bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HexError {
    /// Non-hex character or an odd number of digits after the `0x` prefix.
    #[error("Malformed hex '{input}': {reason}")]
    Malformed { input: String, reason: String },

    /// A strict fixed-width constructor received the wrong number of bytes.
    #[error("Length mismatch: expected {expected} bytes, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}

/// A quantity token could not be read as a non-negative integer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid quantity '{token}': {reason}")]
pub struct NumericError {
    pub token: String,
    pub reason: String,
}

impl NumericError {
    pub(crate) fn new(token: &str, reason: impl Into<String>) -> Self {
        Self {
            token: token.to_string(),
            reason: reason.into(),
        }
    }
}

/// Why a single wire field failed to decode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error(transparent)]
    Hex(#[from] HexError),

    #[error(transparent)]
    Numeric(#[from] NumericError),
}

/// Errors from the wire-to-domain conversion layer.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// A present field was malformed and the decoder runs in strict mode.
    #[error("Invalid field '{field}': {source}")]
    Field {
        field: &'static str,
        #[source]
        source: FieldError,
    },

    /// The payload did not have the JSON shape of the requested record.
    #[error("Invalid wire shape: {0}")]
    Shape(#[from] serde_json::Error),
}

impl DecodeError {
    /// Name of the offending wire field, if the error is field-scoped.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::Field { field, .. } => Some(field),
            Self::Shape(_) => None,
        }
    }
}
