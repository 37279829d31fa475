//! Lifecycle controller: owns a mounted form and turns events into calls on
//! the validator, upload guard, collector and submission client.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info};

use crate::errors::FormError;
use crate::form::collector::collect;
use crate::form::document::{FormDocument, UploadDisplay};
use crate::form::fields::{FieldName, FieldRegistry};
use crate::form::phone::format_phone;
use crate::form::presenter::{clear_all_errors, clear_error, present};
use crate::form::upload::{guard_upload, SelectedFile, UploadOutcome, RESUME_CONSTRAINT};
use crate::form::validator::{validate, ValidationResult};
use crate::prompter::{Notice, Prompter, CLEAR_AFTER_SUCCESS_QUESTION, CLEAR_FORM_QUESTION};
use crate::submission::{Acknowledgement, SubmissionClient, SubmitError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    Submit,
    /// A keystroke or paste in a text-like control.
    Input { field: FieldName, value: String },
    /// A radio option picked, addressed by group name.
    OptionSelected { field: FieldName, option: String },
    Toggled { field: FieldName, checked: bool },
    FileSelected {
        field: FieldName,
        file: Option<SelectedFile>,
    },
    Clear,
}

#[derive(Debug)]
pub enum SubmitOutcome {
    /// Nothing was sent; the failures are on display.
    Invalid(ValidationResult),
    Sent {
        ack: Acknowledgement,
        /// Whether the applicant took the offer to clear the form afterwards.
        cleared: bool,
    },
    Failed(SubmitError),
}

#[derive(Debug)]
pub enum EventOutcome {
    Updated,
    Upload(UploadOutcome),
    Submitted(SubmitOutcome),
    /// `false` when the applicant declined the confirmation.
    Cleared(bool),
}

pub struct LifecycleController {
    document: FormDocument,
    registry: FieldRegistry,
    client: SubmissionClient,
    prompter: Arc<dyn Prompter>,
    clear_prompt_delay: Duration,
}

impl LifecycleController {
    /// Mounts `document`. Fails if a required field has no usable control.
    pub fn mount(
        document: FormDocument,
        client: SubmissionClient,
        prompter: Arc<dyn Prompter>,
        clear_prompt_delay: Duration,
    ) -> Result<Self, FormError> {
        let registry = FieldRegistry::resolve(&document)?;
        info!(
            required = registry.required().len(),
            endpoint = client.endpoint(),
            "Form mounted"
        );

        Ok(Self {
            document,
            registry,
            client,
            prompter,
            clear_prompt_delay,
        })
    }

    pub fn document(&self) -> &FormDocument {
        &self.document
    }

    /// Hands the document back; the controller is gone after this.
    pub fn unmount(self) -> FormDocument {
        debug!("Form unmounted");
        self.document
    }

    pub async fn dispatch(&mut self, event: FormEvent) -> Result<EventOutcome, FormError> {
        let outcome = match event {
            FormEvent::Submit => EventOutcome::Submitted(self.submit().await),
            FormEvent::Input { field, value } => {
                self.input(field, value)?;
                EventOutcome::Updated
            }
            FormEvent::OptionSelected { field, option } => {
                self.select_option(field, &option)?;
                EventOutcome::Updated
            }
            FormEvent::Toggled { field, checked } => {
                self.toggle(field, checked)?;
                EventOutcome::Updated
            }
            FormEvent::FileSelected { field, file } => {
                EventOutcome::Upload(self.select_file(field, file))
            }
            FormEvent::Clear => EventOutcome::Cleared(self.clear().await),
        };
        Ok(outcome)
    }

    /// Stores a typed value and drops the field's error. The phone field is
    /// re-masked on every input.
    pub fn input(&mut self, field: FieldName, value: String) -> Result<(), FormError> {
        let value = if field == FieldName::Phone {
            format_phone(&value)
        } else {
            value
        };
        self.document.set_text(field, value)?;
        clear_error(&mut self.document, field);
        Ok(())
    }

    pub fn select_option(&mut self, field: FieldName, option: &str) -> Result<(), FormError> {
        self.document.select_option(field, option)?;
        clear_error(&mut self.document, field);
        Ok(())
    }

    pub fn toggle(&mut self, field: FieldName, checked: bool) -> Result<(), FormError> {
        self.document.set_checked(field, checked)?;
        clear_error(&mut self.document, field);
        Ok(())
    }

    pub fn select_file(&mut self, field: FieldName, file: Option<SelectedFile>) -> UploadOutcome {
        guard_upload(&mut self.document, field, &RESUME_CONSTRAINT, file)
    }

    /// Validates, then sends. The submit button stays busy until the request
    /// settles, whichever way it goes.
    ///
    /// After a successful send the applicant is offered a clear. A "yes" to
    /// that offer resets the form directly; unlike [`clear`](Self::clear), the
    /// "clear all fields?" confirmation is not asked a second time.
    pub async fn submit(&mut self) -> SubmitOutcome {
        let result = validate(&self.document, &self.registry);
        present(&mut self.document, &result);

        if !result.is_valid() {
            info!(failing = result.errors().len(), "Submission blocked by validation");
            return SubmitOutcome::Invalid(result);
        }

        let record = collect(&self.document);

        self.document.submit_button_mut().set_busy();
        let sent = self.client.submit(&record).await;
        self.document.submit_button_mut().set_idle();

        match sent {
            Ok(ack) => {
                self.prompter.notify(Notice::Success).await;
                tokio::time::sleep(self.clear_prompt_delay).await;
                let cleared = self.prompter.confirm(CLEAR_AFTER_SUCCESS_QUESTION).await;
                if cleared {
                    self.reset();
                }
                SubmitOutcome::Sent { ack, cleared }
            }
            Err(e) => {
                error!("Failed to send application: {e}");
                self.prompter
                    .notify(Notice::Failure(e.user_message().to_string()))
                    .await;
                SubmitOutcome::Failed(e)
            }
        }
    }

    /// Asks first; returns whether the form was cleared.
    pub async fn clear(&mut self) -> bool {
        if !self.prompter.confirm(CLEAR_FORM_QUESTION).await {
            return false;
        }
        self.reset();
        true
    }

    fn reset(&mut self) {
        self.document.reset();
        clear_all_errors(&mut self.document);
        self.document.set_upload_display(UploadDisplay::Placeholder);
        info!("Form cleared");
    }
}
