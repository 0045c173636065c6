//! Crate error type.

use json_delta_pointer::PointerError;
use thiserror::Error;

use crate::json_value::Value;

pub type Result<T, E = JsonError> = std::result::Result<T, E>;

#[derive(Debug, Error, Clone)]
pub enum JsonError {
    #[error("INVALID_POINTER_SYNTAX")]
    InvalidPointerSyntax,
    /// A host value outside object/array/string/number/boolean/null.
    #[error("INVALID_OBJECT_TYPE: {0}")]
    InvalidObjectType(String),
    #[error("REFERENCES_NONEXISTENT_VALUE")]
    ReferencesNonexistentValue,
    /// The patch is not an array of objects.
    #[error("INVALID_PATCH_FORMAT")]
    InvalidPatchFormat,
    #[error("UNKNOWN_OPERATION: {0}")]
    UnknownOperation(String),
    #[error("MISSING_REQUIRED_FIELD: {op} at index {index} requires '{field}'")]
    MissingRequiredField {
        op: String,
        index: usize,
        field: String,
    },
    /// `found` is `None` when the path itself did not resolve.
    #[error("PATCH_TEST_FAILED: {path}")]
    PatchTestFailed {
        path: String,
        expected: Value,
        found: Option<Value>,
    },
    #[error("CODEC: {0}")]
    Codec(String),
}

impl JsonError {
    pub(crate) fn missing_field(op: &str, index: usize, field: &str) -> Self {
        JsonError::MissingRequiredField {
            op: op.to_string(),
            index,
            field: field.to_string(),
        }
    }
}

impl From<PointerError> for JsonError {
    fn from(err: PointerError) -> Self {
        match err {
            PointerError::InvalidPointerSyntax => JsonError::InvalidPointerSyntax,
        }
    }
}

impl From<serde_json::Error> for JsonError {
    fn from(err: serde_json::Error) -> Self {
        JsonError::Codec(err.to_string())
    }
}

/// Test failures compare by path only; the carried values are diagnostics.
impl PartialEq for JsonError {
    fn eq(&self, other: &Self) -> bool {
        use JsonError::*;
        match (self, other) {
            (InvalidPointerSyntax, InvalidPointerSyntax)
            | (ReferencesNonexistentValue, ReferencesNonexistentValue)
            | (InvalidPatchFormat, InvalidPatchFormat) => true,
            (InvalidObjectType(a), InvalidObjectType(b)) => a == b,
            (UnknownOperation(a), UnknownOperation(b)) => a == b,
            (
                MissingRequiredField { op, index, field },
                MissingRequiredField {
                    op: op2,
                    index: index2,
                    field: field2,
                },
            ) => op == op2 && index == index2 && field == field2,
            (PatchTestFailed { path, .. }, PatchTestFailed { path: path2, .. }) => path == path2,
            (Codec(a), Codec(b)) => a == b,
            _ => false,
        }
    }
}
