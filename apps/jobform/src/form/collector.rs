#![allow(dead_code)]

use std::collections::BTreeMap;

use crate::form::document::{ControlValue, FormDocument};
use crate::form::upload::SelectedFile;

/// Value a checked checkbox contributes.
pub const CHECKBOX_ON: &str = "on";

/// Snapshot of the form taken right before sending. Never validated here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormRecord {
    values: BTreeMap<String, String>,
    files: BTreeMap<String, SelectedFile>,
}

impl FormRecord {
    pub fn value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn file(&self, key: &str) -> Option<&SelectedFile> {
        self.files.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

/// Reserved record key for a file control's selection, e.g. `resumeFile`.
pub fn file_key(control_name: &str) -> String {
    format!("{control_name}File")
}

/// Reads every control the way a browser serializes a form: text values are
/// always present, a radio group only once something is checked, a checkbox
/// only while checked. Selected files go under their reserved key.
pub fn collect(document: &FormDocument) -> FormRecord {
    let mut record = FormRecord::default();

    for control in document.controls() {
        let name = control.name().as_str();
        match control.value() {
            ControlValue::Text(value) => {
                record.values.insert(name.to_string(), value.clone());
            }
            ControlValue::Choice(Some(option)) => {
                record.values.insert(name.to_string(), option.clone());
            }
            ControlValue::Checked(true) => {
                record.values.insert(name.to_string(), CHECKBOX_ON.to_string());
            }
            ControlValue::File(Some(file)) => {
                record.files.insert(file_key(name), file.clone());
            }
            ControlValue::Choice(None) | ControlValue::Checked(false) | ControlValue::File(None) => {}
        }
    }

    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::fields::FieldName;
    use crate::form::upload::PDF_MIME;

    #[test]
    fn test_empty_form_has_text_keys_only() {
        let record = collect(&FormDocument::job_application());
        assert_eq!(record.value("fullName"), Some(""));
        assert_eq!(record.value("address"), Some(""));
        assert_eq!(record.value("gender"), None);
        assert_eq!(record.value("acceptTerms"), None);
        assert!(record.file("resumeFile").is_none());
    }

    #[test]
    fn test_checked_controls_and_file_are_collected() {
        let mut document = FormDocument::job_application();
        document.set_text(FieldName::FullName, "Ada Lovelace").unwrap();
        document.select_option(FieldName::Gender, "other").unwrap();
        document.set_checked(FieldName::AcceptTerms, true).unwrap();
        document
            .set_file(
                FieldName::Resume,
                Some(SelectedFile::new("cv.pdf", PDF_MIME, 2048)),
            )
            .unwrap();

        let record = collect(&document);

        assert_eq!(record.value("fullName"), Some("Ada Lovelace"));
        assert_eq!(record.value("gender"), Some("other"));
        assert_eq!(record.value("acceptTerms"), Some(CHECKBOX_ON));
        assert_eq!(record.file("resumeFile").unwrap().name(), "cv.pdf");
        assert!(record.keys().all(|k| k != "resume"));
    }
}
