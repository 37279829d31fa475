// Application form: field registry, mounted document, validation, error
// presentation, upload guard, record collection and the phone mask.
// Nothing in here performs I/O except `SelectedFile::from_path`.

pub mod collector;
pub mod document;
pub mod fields;
pub mod phone;
pub mod presenter;
pub mod upload;
pub mod validator;

pub use document::FormDocument;
