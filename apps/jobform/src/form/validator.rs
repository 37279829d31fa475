#![allow(dead_code)]

//! Field validation. Pure: reads the document, never writes to it.

use std::sync::OnceLock;

use regex::Regex;

use crate::form::document::FormDocument;
use crate::form::fields::{ControlKind, FieldDescriptor, FieldName, FieldRegistry};

/// Passwords must have exactly this many UTF-16 units; not a minimum.
pub const PASSWORD_LENGTH: usize = 8;

pub const INVALID_EMAIL_MESSAGE: &str = "Enter a valid email address";
pub const INVALID_PASSWORD_LENGTH_MESSAGE: &str = "Password must be exactly 8 characters";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    Required,
    InvalidLength,
    InvalidFormat,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: FieldName,
    pub kind: ValidationErrorKind,
    pub message: String,
}

/// All currently failing fields, at most one entry per field, in page order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    errors: Vec<FieldError>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn get(&self, field: FieldName) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field == field)
    }

    pub fn failing_fields(&self) -> impl Iterator<Item = FieldName> + '_ {
        self.errors.iter().map(|e| e.field)
    }
}

/// Checks every required field independently; one failing field never hides
/// another.
pub fn validate(document: &FormDocument, registry: &FieldRegistry) -> ValidationResult {
    let errors = registry
        .required()
        .iter()
        .filter_map(|descriptor| check_field(document, descriptor))
        .collect();

    ValidationResult { errors }
}

fn check_field(document: &FormDocument, descriptor: &FieldDescriptor) -> Option<FieldError> {
    // The caption comes from the mounted control, not the static table.
    let descriptor = document
        .control(descriptor.name)
        .map(|c| c.descriptor())
        .unwrap_or(descriptor);
    let field = descriptor.name;

    let present = match descriptor.kind {
        ControlKind::RadioGroup => document.selected_option(field).is_some(),
        ControlKind::Checkbox => document.is_checked(field),
        ControlKind::File => document.file(field).is_some(),
        ControlKind::Text | ControlKind::Email | ControlKind::Password => {
            return check_text(document.text(field).unwrap_or_default(), descriptor);
        }
    };

    (!present).then(|| required(descriptor))
}

fn check_text(value: &str, descriptor: &FieldDescriptor) -> Option<FieldError> {
    // Any raw email text gets the format check, so a blank-looking address
    // reports the format error instead of `Required`.
    if descriptor.kind == ControlKind::Email && !value.is_empty() && !is_valid_email(value) {
        return Some(FieldError {
            field: descriptor.name,
            kind: ValidationErrorKind::InvalidFormat,
            message: INVALID_EMAIL_MESSAGE.to_string(),
        });
    }

    if value.trim().is_empty() {
        return Some(required(descriptor));
    }

    // Length counts UTF-16 units of the raw value, surrounding spaces included.
    if descriptor.kind == ControlKind::Password
        && value.encode_utf16().count() != PASSWORD_LENGTH
    {
        return Some(FieldError {
            field: descriptor.name,
            kind: ValidationErrorKind::InvalidLength,
            message: INVALID_PASSWORD_LENGTH_MESSAGE.to_string(),
        });
    }

    None
}

fn required(descriptor: &FieldDescriptor) -> FieldError {
    let message = match descriptor.required_message {
        Some(message) => message.to_string(),
        None => format!("{} is required", descriptor.caption()),
    };
    FieldError {
        field: descriptor.name,
        kind: ValidationErrorKind::Required,
        message,
    }
}

/// `local@domain.tld`: no whitespace anywhere, exactly one `@`, at least one
/// dot after it.
pub fn is_valid_email(email: &str) -> bool {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"))
        .is_match(email)
}
