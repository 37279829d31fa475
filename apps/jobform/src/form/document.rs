//! The mounted form: controls, error slots, upload display and submit button.
//!
//! A `FormDocument` is the single piece of mutable state of a form session.
//! It is created once per mount and handed to every component explicitly.

use std::collections::BTreeMap;
use std::fmt;

use crate::errors::FormError;
use crate::form::fields::{ControlKind, FieldDescriptor, FieldName, FIELDS};
use crate::form::upload::SelectedFile;

pub const UPLOAD_PLACEHOLDER: &str = "Click to select or drag your resume in PDF";
pub const SUBMIT_LABEL: &str = "Submit Application";
pub const SUBMIT_BUSY_LABEL: &str = "Sending...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlValue {
    Text(String),
    Choice(Option<String>),
    Checked(bool),
    File(Option<SelectedFile>),
}

impl ControlValue {
    fn initial(kind: ControlKind) -> Self {
        match kind {
            ControlKind::Text | ControlKind::Email | ControlKind::Password => {
                ControlValue::Text(String::new())
            }
            ControlKind::RadioGroup => ControlValue::Choice(None),
            ControlKind::Checkbox => ControlValue::Checked(false),
            ControlKind::File => ControlValue::File(None),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Control {
    descriptor: FieldDescriptor,
    value: ControlValue,
    in_error: bool,
}

impl Control {
    fn new(descriptor: FieldDescriptor) -> Self {
        Self {
            descriptor,
            value: ControlValue::initial(descriptor.kind),
            in_error: false,
        }
    }

    pub fn name(&self) -> FieldName {
        self.descriptor.name
    }

    pub fn kind(&self) -> ControlKind {
        self.descriptor.kind
    }

    pub fn descriptor(&self) -> &FieldDescriptor {
        &self.descriptor
    }

    pub fn value(&self) -> &ControlValue {
        &self.value
    }

    pub fn is_in_error(&self) -> bool {
        self.in_error
    }

    pub(crate) fn clear_error_state(&mut self) {
        self.in_error = false;
    }

    fn mismatch(&self) -> FormError {
        FormError::ValueKindMismatch {
            field: self.name(),
            kind: self.kind(),
        }
    }
}

/// What the upload area shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UploadDisplay {
    #[default]
    Placeholder,
    Selected(String),
}

impl fmt::Display for UploadDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadDisplay::Placeholder => f.write_str(UPLOAD_PLACEHOLDER),
            UploadDisplay::Selected(name) => write!(f, "\u{1F4C4} {name}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitButton {
    disabled: bool,
    label: &'static str,
}

impl SubmitButton {
    pub fn idle() -> Self {
        Self {
            disabled: false,
            label: SUBMIT_LABEL,
        }
    }

    pub fn set_busy(&mut self) {
        self.disabled = true;
        self.label = SUBMIT_BUSY_LABEL;
    }

    pub fn set_idle(&mut self) {
        *self = Self::idle();
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn label(&self) -> &'static str {
        self.label
    }
}

#[derive(Debug, Clone)]
pub struct FormDocument {
    controls: BTreeMap<FieldName, Control>,
    /// One slot per required field plus one per upload control.
    error_slots: BTreeMap<FieldName, String>,
    upload_display: UploadDisplay,
    submit_button: SubmitButton,
}

impl FormDocument {
    /// The full job application form.
    pub fn job_application() -> Self {
        Self::from_descriptors(FIELDS.iter().copied())
    }

    pub fn from_descriptors(descriptors: impl IntoIterator<Item = FieldDescriptor>) -> Self {
        let mut controls = BTreeMap::new();
        let mut error_slots = BTreeMap::new();

        for descriptor in descriptors {
            if descriptor.required || descriptor.kind == ControlKind::File {
                error_slots.insert(descriptor.name, String::new());
            }
            controls.insert(descriptor.name, Control::new(descriptor));
        }

        Self {
            controls,
            error_slots,
            upload_display: UploadDisplay::default(),
            submit_button: SubmitButton::idle(),
        }
    }

    pub fn control(&self, name: FieldName) -> Option<&Control> {
        self.controls.get(&name)
    }

    /// Controls in page order.
    pub fn controls(&self) -> impl Iterator<Item = &Control> {
        self.controls.values()
    }

    pub fn text(&self, name: FieldName) -> Option<&str> {
        match self.control(name)?.value() {
            ControlValue::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn selected_option(&self, name: FieldName) -> Option<&str> {
        match self.control(name)?.value() {
            ControlValue::Choice(choice) => choice.as_deref(),
            _ => None,
        }
    }

    pub fn is_checked(&self, name: FieldName) -> bool {
        matches!(
            self.control(name).map(Control::value),
            Some(ControlValue::Checked(true))
        )
    }

    pub fn file(&self, name: FieldName) -> Option<&SelectedFile> {
        match self.control(name)?.value() {
            ControlValue::File(file) => file.as_ref(),
            _ => None,
        }
    }

    pub fn set_text(&mut self, name: FieldName, value: impl Into<String>) -> Result<(), FormError> {
        let control = self.control_mut(name)?;
        if let ControlValue::Text(current) = &mut control.value {
            *current = value.into();
            return Ok(());
        }
        Err(control.mismatch())
    }

    pub fn select_option(&mut self, name: FieldName, option: &str) -> Result<(), FormError> {
        let control = self.control_mut(name)?;
        let known = control.descriptor.options.iter().any(|o| *o == option);
        if let ControlValue::Choice(choice) = &mut control.value {
            if !known {
                return Err(FormError::UnknownOption {
                    field: name,
                    value: option.to_string(),
                });
            }
            *choice = Some(option.to_string());
            return Ok(());
        }
        Err(control.mismatch())
    }

    pub fn set_checked(&mut self, name: FieldName, checked: bool) -> Result<(), FormError> {
        let control = self.control_mut(name)?;
        if let ControlValue::Checked(current) = &mut control.value {
            *current = checked;
            return Ok(());
        }
        Err(control.mismatch())
    }

    pub fn set_file(
        &mut self,
        name: FieldName,
        file: Option<SelectedFile>,
    ) -> Result<(), FormError> {
        let control = self.control_mut(name)?;
        if let ControlValue::File(current) = &mut control.value {
            *current = file;
            return Ok(());
        }
        Err(control.mismatch())
    }

    /// Restores every control to its initial value. Error state and the upload
    /// display are left alone; the controller clears those separately.
    pub fn reset(&mut self) {
        for control in self.controls.values_mut() {
            control.value = ControlValue::initial(control.kind());
        }
    }

    /// The text currently shown in a field's error slot, if any.
    pub fn error_message(&self, name: FieldName) -> Option<&str> {
        self.error_slots
            .get(&name)
            .map(String::as_str)
            .filter(|message| !message.is_empty())
    }

    pub fn upload_display(&self) -> &UploadDisplay {
        &self.upload_display
    }

    pub fn submit_button(&self) -> &SubmitButton {
        &self.submit_button
    }

    pub(crate) fn set_upload_display(&mut self, display: UploadDisplay) {
        self.upload_display = display;
    }

    pub(crate) fn submit_button_mut(&mut self) -> &mut SubmitButton {
        &mut self.submit_button
    }

    /// Writes into the field's error slot. Fields without a slot are ignored.
    pub(crate) fn write_error_slot(&mut self, name: FieldName, message: &str) {
        if let Some(slot) = self.error_slots.get_mut(&name) {
            slot.clear();
            slot.push_str(message);
        }
    }

    pub(crate) fn set_error_state(&mut self, name: FieldName, in_error: bool) {
        if let Some(control) = self.controls.get_mut(&name) {
            control.in_error = in_error;
        }
    }

    pub(crate) fn error_slots_mut(&mut self) -> impl Iterator<Item = &mut String> {
        self.error_slots.values_mut()
    }

    pub(crate) fn controls_mut(&mut self) -> impl Iterator<Item = &mut Control> {
        self.controls.values_mut()
    }

    fn control_mut(&mut self, name: FieldName) -> Result<&mut Control, FormError> {
        self.controls
            .get_mut(&name)
            .ok_or(FormError::MissingControl(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_application_mounts_every_field() {
        let document = FormDocument::job_application();
        assert_eq!(document.controls().count(), FIELDS.len());
        assert_eq!(document.text(FieldName::FullName), Some(""));
        assert_eq!(document.selected_option(FieldName::Gender), None);
        assert!(!document.is_checked(FieldName::AcceptTerms));
        assert!(document.file(FieldName::Resume).is_none());
    }

    #[test]
    fn test_error_slots_only_for_required_and_upload() {
        let mut document = FormDocument::job_application();
        document.write_error_slot(FieldName::Address, "ignored");
        document.write_error_slot(FieldName::Resume, "bad file");
        assert_eq!(document.error_message(FieldName::Address), None);
        assert_eq!(document.error_message(FieldName::Resume), Some("bad file"));
    }

    #[test]
    fn test_setting_wrong_value_kind_is_rejected() {
        let mut document = FormDocument::job_application();
        let err = document.set_text(FieldName::AcceptTerms, "yes").unwrap_err();
        assert_eq!(
            err,
            FormError::ValueKindMismatch {
                field: FieldName::AcceptTerms,
                kind: ControlKind::Checkbox,
            }
        );
    }

    #[test]
    fn test_unknown_radio_option_is_rejected() {
        let mut document = FormDocument::job_application();
        let err = document
            .select_option(FieldName::Gender, "unknown")
            .unwrap_err();
        assert!(matches!(err, FormError::UnknownOption { .. }));
        document.select_option(FieldName::Gender, "female").unwrap();
        assert_eq!(document.selected_option(FieldName::Gender), Some("female"));
    }

    #[test]
    fn test_reset_restores_initial_values() {
        let mut document = FormDocument::job_application();
        document.set_text(FieldName::FullName, "Ada Lovelace").unwrap();
        document.set_checked(FieldName::AcceptTerms, true).unwrap();
        document
            .set_file(
                FieldName::Resume,
                Some(SelectedFile::new("cv.pdf", "application/pdf", 10)),
            )
            .unwrap();

        document.reset();

        assert_eq!(document.text(FieldName::FullName), Some(""));
        assert!(!document.is_checked(FieldName::AcceptTerms));
        assert!(document.file(FieldName::Resume).is_none());
    }

    #[test]
    fn test_submit_button_busy_cycle() {
        let mut button = SubmitButton::idle();
        button.set_busy();
        assert!(button.is_disabled());
        assert_eq!(button.label(), SUBMIT_BUSY_LABEL);
        button.set_idle();
        assert!(!button.is_disabled());
        assert_eq!(button.label(), SUBMIT_LABEL);
    }

    #[test]
    fn test_upload_display_text() {
        assert_eq!(UploadDisplay::Placeholder.to_string(), UPLOAD_PLACEHOLDER);
        assert!(UploadDisplay::Selected("cv.pdf".into())
            .to_string()
            .ends_with(" cv.pdf"));
    }
}
