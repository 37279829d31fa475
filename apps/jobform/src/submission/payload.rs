#![allow(dead_code)]

use reqwest::multipart::Form;

use crate::form::collector::{file_key, FormRecord};
use crate::form::fields::FieldName;

pub const RESUME_FILE_NAME_KEY: &str = "resumeFileName";

/// Keys sent on every submission, in wire order.
pub const PAYLOAD_KEYS: [&str; 12] = [
    "fullName",
    "email",
    "phone",
    "birthDate",
    "gender",
    "address",
    "interest",
    "experience",
    "education",
    "login",
    "password",
    RESUME_FILE_NAME_KEY,
];

/// The fixed-shape body of a submission. Missing values are sent as empty
/// strings; the resume travels by name only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionPayload {
    fields: Vec<(&'static str, String)>,
}

impl SubmissionPayload {
    pub fn from_record(record: &FormRecord) -> Self {
        let resume_key = file_key(FieldName::Resume.as_str());

        let fields = PAYLOAD_KEYS
            .iter()
            .map(|&key| {
                let value = if key == RESUME_FILE_NAME_KEY {
                    record.file(&resume_key).map(|f| f.name())
                } else {
                    record.value(key)
                };
                (key, value.unwrap_or_default().to_string())
            })
            .collect();

        Self { fields }
    }

    pub fn fields(&self) -> &[(&'static str, String)] {
        &self.fields
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn into_multipart(self) -> Form {
        self.fields
            .into_iter()
            .fold(Form::new(), |form, (key, value)| form.text(key, value))
    }
}
