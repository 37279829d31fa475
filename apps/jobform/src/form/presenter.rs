use crate::form::document::FormDocument;
use crate::form::fields::FieldName;
use crate::form::validator::ValidationResult;

/// Writes `message` into the field's error slot and marks the control as in
/// error. Radio groups and checkboxes only get the slot text.
pub fn show_error(document: &mut FormDocument, field: FieldName, message: &str) {
    document.write_error_slot(field, message);

    if styles_errors(document, field) {
        document.set_error_state(field, true);
    }
}

pub fn clear_error(document: &mut FormDocument, field: FieldName) {
    document.write_error_slot(field, "");

    if styles_errors(document, field) {
        document.set_error_state(field, false);
    }
}

/// Empties every error slot and drops the error state of every control.
pub fn clear_all_errors(document: &mut FormDocument) {
    for slot in document.error_slots_mut() {
        slot.clear();
    }
    for control in document.controls_mut().filter(|c| c.is_in_error()) {
        control.clear_error_state();
    }
}

/// Replaces whatever is currently shown with the failures of `result`.
pub fn present(document: &mut FormDocument, result: &ValidationResult) {
    clear_all_errors(document);
    for error in result.errors() {
        show_error(document, error.field, &error.message);
    }
}

fn styles_errors(document: &FormDocument, field: FieldName) -> bool {
    document
        .control(field)
        .is_some_and(|c| c.kind().has_error_styling())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::fields::FieldRegistry;
    use crate::form::validator::validate;

    fn in_error(document: &FormDocument, field: FieldName) -> bool {
        document.control(field).unwrap().is_in_error()
    }

    #[test]
    fn test_show_and_clear_text_field() {
        let mut document = FormDocument::job_application();
        show_error(&mut document, FieldName::Email, "Enter a valid email address");
        assert_eq!(
            document.error_message(FieldName::Email),
            Some("Enter a valid email address")
        );
        assert!(in_error(&document, FieldName::Email));

        clear_error(&mut document, FieldName::Email);
        assert_eq!(document.error_message(FieldName::Email), None);
        assert!(!in_error(&document, FieldName::Email));
    }

    #[test]
    fn test_radio_and_checkbox_get_text_only() {
        let mut document = FormDocument::job_application();
        show_error(&mut document, FieldName::Gender, "Please select a gender");
        show_error(&mut document, FieldName::AcceptTerms, "accept");
        assert_eq!(
            document.error_message(FieldName::Gender),
            Some("Please select a gender")
        );
        assert!(!in_error(&document, FieldName::Gender));
        assert!(!in_error(&document, FieldName::AcceptTerms));
    }

    #[test]
    fn test_clear_all_sweeps_everything() {
        let mut document = FormDocument::job_application();
        show_error(&mut document, FieldName::FullName, "x");
        show_error(&mut document, FieldName::Resume, "y");
        show_error(&mut document, FieldName::Gender, "z");

        clear_all_errors(&mut document);

        assert!(document
            .controls()
            .all(|c| !c.is_in_error() && document.error_message(c.name()).is_none()));
    }

    #[test]
    fn test_present_replaces_stale_errors() {
        let mut document = FormDocument::job_application();
        show_error(&mut document, FieldName::Resume, "Only PDF files are accepted");
        let registry = FieldRegistry::resolve(&document).unwrap();

        let result = validate(&document, &registry);
        present(&mut document, &result);

        assert_eq!(document.error_message(FieldName::Resume), None);
        assert_eq!(
            document.error_message(FieldName::FullName),
            Some("Full Name is required")
        );
        assert!(in_error(&document, FieldName::FullName));
    }
}
