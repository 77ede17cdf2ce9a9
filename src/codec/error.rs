//! Errors reported by method and content header codecs.

use thiserror::Error;

/// Failure decoding a method or content header payload.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// The payload ended before a field could be read.
    #[error("truncated {field}: need {needed} bytes, have {available}")]
    Truncated {
        /// Name of the field being read.
        field: &'static str,
        /// Bytes required by the field.
        needed: usize,
        /// Bytes left in the payload.
        available: usize,
    },

    /// A field was read but its value is not acceptable.
    #[error("invalid {field}: {reason}")]
    InvalidField {
        /// Name of the rejected field.
        field: &'static str,
        /// Human-readable explanation.
        reason: String,
    },
}

impl DecodeError {
    /// Build an [`InvalidField`](Self::InvalidField) error.
    #[must_use]
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}
