//! Field registry: the static description of every control on the
//! application form and the resolution of the required set against a mounted
//! document.

use std::fmt;

use crate::errors::FormError;
use crate::form::document::FormDocument;

/// Every named control on the application form, in page order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldName {
    FullName,
    Email,
    Phone,
    BirthDate,
    Gender,
    Address,
    Interest,
    Experience,
    Education,
    Login,
    Password,
    AcceptTerms,
    Resume,
}

impl FieldName {
    /// The control's `name`, which is also its key in records and payloads.
    pub const fn as_str(self) -> &'static str {
        match self {
            FieldName::FullName => "fullName",
            FieldName::Email => "email",
            FieldName::Phone => "phone",
            FieldName::BirthDate => "birthDate",
            FieldName::Gender => "gender",
            FieldName::Address => "address",
            FieldName::Interest => "interest",
            FieldName::Experience => "experience",
            FieldName::Education => "education",
            FieldName::Login => "login",
            FieldName::Password => "password",
            FieldName::AcceptTerms => "acceptTerms",
            FieldName::Resume => "resume",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    Text,
    Email,
    Password,
    RadioGroup,
    Checkbox,
    File,
}

impl ControlKind {
    /// Radio groups and checkboxes have no individual error styling.
    pub fn has_error_styling(self) -> bool {
        !matches!(self, ControlKind::RadioGroup | ControlKind::Checkbox)
    }
}

impl fmt::Display for ControlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ControlKind::Text => "text",
            ControlKind::Email => "email",
            ControlKind::Password => "password",
            ControlKind::RadioGroup => "radio-group",
            ControlKind::Checkbox => "checkbox",
            ControlKind::File => "file",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: FieldName,
    /// Caption shown next to the control. Required fields carry a trailing " *".
    pub label: &'static str,
    pub required: bool,
    pub kind: ControlKind,
    /// Option values for radio groups; empty for every other kind.
    pub options: &'static [&'static str],
    /// Overrides the generic "<label> is required" message.
    pub required_message: Option<&'static str>,
}

impl FieldDescriptor {
    const fn new(name: FieldName, label: &'static str, kind: ControlKind) -> Self {
        Self {
            name,
            label,
            required: false,
            kind,
            options: &[],
            required_message: None,
        }
    }

    const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    const fn with_options(mut self, options: &'static [&'static str]) -> Self {
        self.options = options;
        self
    }

    const fn with_required_message(mut self, message: &'static str) -> Self {
        self.required_message = Some(message);
        self
    }

    /// The caption without the trailing required marker.
    pub fn caption(&self) -> &'static str {
        self.label.strip_suffix(" *").unwrap_or(self.label)
    }
}

pub const GENDER_OPTIONS: &[&str] = &["male", "female", "other", "prefer-not-to-say"];

/// The complete application form, in page order.
pub const FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::new(FieldName::FullName, "Full Name *", ControlKind::Text).required(),
    FieldDescriptor::new(FieldName::Email, "Email *", ControlKind::Email).required(),
    FieldDescriptor::new(FieldName::Phone, "Phone *", ControlKind::Text).required(),
    FieldDescriptor::new(FieldName::BirthDate, "Birth Date *", ControlKind::Text).required(),
    FieldDescriptor::new(FieldName::Gender, "Gender *", ControlKind::RadioGroup)
        .required()
        .with_options(GENDER_OPTIONS)
        .with_required_message("Please select a gender"),
    FieldDescriptor::new(FieldName::Address, "Address", ControlKind::Text),
    FieldDescriptor::new(FieldName::Interest, "Area of Interest", ControlKind::Text),
    FieldDescriptor::new(FieldName::Experience, "Professional Experience", ControlKind::Text),
    FieldDescriptor::new(FieldName::Education, "Education", ControlKind::Text),
    FieldDescriptor::new(FieldName::Login, "Login", ControlKind::Text),
    FieldDescriptor::new(FieldName::Password, "Password *", ControlKind::Password)
        .required()
        .with_required_message("Password is required"),
    FieldDescriptor::new(
        FieldName::AcceptTerms,
        "I accept the terms and conditions *",
        ControlKind::Checkbox,
    )
    .required()
    .with_required_message("You must accept the terms and conditions"),
    FieldDescriptor::new(FieldName::Resume, "Resume (PDF)", ControlKind::File),
];

/// The ordered required set, resolved against a mounted document.
///
/// Resolution fails fast: a required field without a matching control is a
/// mount error rather than a field that silently skips validation.
#[derive(Debug, Clone)]
pub struct FieldRegistry {
    required: Vec<FieldDescriptor>,
}

impl FieldRegistry {
    pub fn resolve(document: &FormDocument) -> Result<Self, FormError> {
        let mut required = Vec::new();

        for descriptor in FIELDS.iter().filter(|d| d.required) {
            let control = document
                .control(descriptor.name)
                .ok_or(FormError::MissingControl(descriptor.name))?;

            if control.kind() != descriptor.kind {
                return Err(FormError::ControlKindMismatch {
                    field: descriptor.name,
                    expected: descriptor.kind,
                    found: control.kind(),
                });
            }

            required.push(*descriptor);
        }

        Ok(Self { required })
    }

    pub fn required(&self) -> &[FieldDescriptor] {
        &self.required
    }
}
