//! ABI codec errors

use thiserror::Error;

/// Errors raised while packing or unpacking ABI data
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AbiError {
    /// Number of values does not match the number of coders
    #[error("types/values length mismatch: expected {expected}, got {got}")]
    LengthMismatch {
        /// Number of coders
        expected: usize,
        /// Number of values supplied
        got: usize,
    },

    /// Named input used with a coder that has no field name
    #[error("cannot encode object for signature with missing names")]
    MissingName,

    /// Named input used with two coders sharing a field name
    #[error("cannot encode object for signature with duplicate names: {0}")]
    DuplicateName(String),

    /// Named input lacks a value for a field
    #[error("argument object missing field: {0}")]
    MissingField(String),

    /// Not enough bytes to decode
    #[error("insufficient data length: need {needed} bytes, have {available}")]
    BufferOverrun {
        /// Bytes the read required
        needed: usize,
        /// Bytes actually available
        available: usize,
    },

    /// Unsupported or malformed type string
    #[error("invalid type: {0}")]
    InvalidType(String),

    /// Value does not fit the coder
    #[error("invalid {type_name} value: {reason}")]
    InvalidValue {
        /// Wire type of the coder
        type_name: String,
        /// What was wrong
        reason: String,
    },

    /// Integer outside the range of its width
    #[error("value out-of-bounds for {0}")]
    OutOfBounds(String),

    /// Decoded string payload is not UTF-8
    #[error("invalid utf-8 string data")]
    InvalidUtf8,

    /// A single field failed to decode
    #[error("field {index} ({type_name}) failed to decode: {source}")]
    Field {
        /// Position of the field
        index: usize,
        /// Field name, when the coder has one
        name: Option<String>,
        /// Wire type of the coder
        type_name: String,
        /// Underlying failure
        source: Box<AbiError>,
    },

    /// No field at this position
    #[error("no field at index {0}")]
    IndexOutOfRange(usize),

    /// No uniquely named field with this name
    #[error("no uniquely named field: {0}")]
    UnknownName(String),

    /// Malformed JSON definition
    #[error("invalid abi definition: {0}")]
    InvalidDefinition(String),

    /// No function or variable with this name
    #[error("unknown abi entry: {0}")]
    UnknownEntry(String),

    /// Call data selector matches no function
    #[error("unknown function selector: 0x{0}")]
    UnknownSelector(String),
}

impl AbiError {
    /// True for structural failures that abort a whole decode
    pub fn is_buffer_overrun(&self) -> bool {
        matches!(self, AbiError::BufferOverrun { .. })
    }

    pub(crate) fn invalid_value(type_name: impl Into<String>, reason: impl Into<String>) -> Self {
        AbiError::InvalidValue {
            type_name: type_name.into(),
            reason: reason.into(),
        }
    }
}
