use thiserror::Error;

use crate::form::fields::{ControlKind, FieldName};

/// Errors raised while mounting or mutating a form document.
///
/// These are wiring mistakes, not user input problems: user input failures are
/// reported through `ValidationResult` and never propagate as errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("No control is mounted for required field '{0}'")]
    MissingControl(FieldName),

    #[error("Control '{field}' is mounted as {found}, expected {expected}")]
    ControlKindMismatch {
        field: FieldName,
        expected: ControlKind,
        found: ControlKind,
    },

    #[error("Control '{field}' ({kind}) cannot hold this kind of value")]
    ValueKindMismatch { field: FieldName, kind: ControlKind },

    #[error("'{value}' is not an option of '{field}'")]
    UnknownOption { field: FieldName, value: String },
}
