//! File Guard: keeps the resume upload within the accepted type and size.

use std::path::Path;

use tokio::io::AsyncReadExt;
use tracing::{debug, warn};

use crate::form::document::{FormDocument, UploadDisplay};
use crate::form::fields::FieldName;
use crate::form::presenter::{clear_error, show_error};

pub const PDF_MIME: &str = "application/pdf";
/// 5MB
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

pub const REJECTED_TYPE_MESSAGE: &str = "Only PDF files are accepted";
pub const REJECTED_SIZE_MESSAGE: &str = "The file must be at most 5MB";

const PDF_MAGIC: &[u8] = b"%PDF-";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadConstraint {
    pub allowed_mime: &'static str,
    pub max_bytes: u64,
}

pub const RESUME_CONSTRAINT: UploadConstraint = UploadConstraint {
    allowed_mime: PDF_MIME,
    max_bytes: MAX_UPLOAD_BYTES,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadOutcome {
    Accepted,
    RejectedType,
    RejectedSize,
    Cleared,
}

impl UploadConstraint {
    /// Type is checked before size.
    pub fn check(&self, file: &SelectedFile) -> UploadOutcome {
        if file.mime_type() != self.allowed_mime {
            UploadOutcome::RejectedType
        } else if file.size() > self.max_bytes {
            UploadOutcome::RejectedSize
        } else {
            UploadOutcome::Accepted
        }
    }
}

/// A file picked for upload. Only its metadata is kept: the bytes never leave
/// the applicant's machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    name: String,
    mime_type: String,
    size: u64,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size,
        }
    }

    /// Builds a selection from a file on disk. The MIME type is sniffed from
    /// the leading bytes, falling back to the extension.
    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let size = tokio::fs::metadata(path).await?.len();

        let mut head = Vec::with_capacity(PDF_MAGIC.len());
        tokio::fs::File::open(path)
            .await?
            .take(PDF_MAGIC.len() as u64)
            .read_to_end(&mut head)
            .await?;

        let mime_type = if head.starts_with(PDF_MAGIC) {
            PDF_MIME
        } else {
            mime_from_extension(path)
        };

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        debug!(%name, mime_type, size, "Selected file from disk");
        Ok(Self::new(name, mime_type, size))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn size(&self) -> u64 {
        self.size
    }
}

fn mime_from_extension(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("pdf") => PDF_MIME,
        Some("txt") => "text/plain",
        Some("doc") => "application/msword",
        Some("docx") => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}

/// Runs on every change of an upload control.
///
/// Rejected selections are removed from the control and reported in its error
/// slot; the display keeps whatever it showed before.
pub fn guard_upload(
    document: &mut FormDocument,
    field: FieldName,
    constraint: &UploadConstraint,
    selection: Option<SelectedFile>,
) -> UploadOutcome {
    let Some(file) = selection else {
        clear_selection(document, field);
        document.set_upload_display(UploadDisplay::Placeholder);
        return UploadOutcome::Cleared;
    };

    let outcome = constraint.check(&file);
    match outcome {
        UploadOutcome::RejectedType | UploadOutcome::RejectedSize => {
            let message = if outcome == UploadOutcome::RejectedType {
                REJECTED_TYPE_MESSAGE
            } else {
                REJECTED_SIZE_MESSAGE
            };
            warn!(
                name = file.name(),
                mime_type = file.mime_type(),
                size = file.size(),
                "Upload rejected: {message}"
            );
            show_error(document, field, message);
            clear_selection(document, field);
        }
        UploadOutcome::Accepted => {
            document.set_upload_display(UploadDisplay::Selected(file.name().to_string()));
            clear_error(document, field);
            if document.set_file(field, Some(file)).is_err() {
                warn!(%field, "Upload guard invoked on a non-file control");
            }
        }
        UploadOutcome::Cleared => {}
    }

    outcome
}

fn clear_selection(document: &mut FormDocument, field: FieldName) {
    if document.set_file(field, None).is_err() {
        warn!(%field, "Upload guard invoked on a non-file control");
    }
}
