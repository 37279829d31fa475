//! Terminal front-end: renders the mounted form and turns menu picks into
//! form events. All dialoguer calls block, so they run on the blocking pool.

use anyhow::{Context, Result};
use async_trait::async_trait;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Password, Select};
use tracing::warn;

use crate::form::document::{ControlValue, FormDocument};
use crate::form::fields::{ControlKind, FieldName, FIELDS};
use crate::form::upload::SelectedFile;
use crate::lifecycle::{EventOutcome, FormEvent, LifecycleController, SubmitOutcome};
use crate::prompter::{Notice, Prompter};

pub struct TerminalPrompter;

#[async_trait]
impl Prompter for TerminalPrompter {
    async fn confirm(&self, question: &str) -> bool {
        let question = question.to_string();
        let answer = blocking(move || {
            Confirm::with_theme(&ColorfulTheme::default())
                .with_prompt(question)
                .default(false)
                .interact()
        })
        .await;

        answer.unwrap_or_else(|e| {
            warn!("Confirmation prompt failed: {e:#}");
            false
        })
    }

    async fn notify(&self, notice: Notice) {
        println!("\n{}\n", notice.text());
    }
}

const ACTIONS: &[&str] = &[
    "Fill in a field",
    "Attach resume",
    "Submit application",
    "Clear form",
    "Quit",
];

/// Runs until the applicant quits.
pub async fn run_session(controller: &mut LifecycleController) -> Result<()> {
    loop {
        println!("{}", render(controller.document()));

        let action = blocking(|| {
            Select::with_theme(&ColorfulTheme::default())
                .with_prompt("What next?")
                .items(ACTIONS)
                .default(0)
                .interact()
        })
        .await?;

        let event = match action {
            0 => match ask_field_value(controller.document()).await? {
                Some(event) => event,
                None => continue,
            },
            1 => ask_resume().await?,
            2 => FormEvent::Submit,
            3 => FormEvent::Clear,
            _ => return Ok(()),
        };

        match controller.dispatch(event).await? {
            EventOutcome::Submitted(SubmitOutcome::Invalid(result)) => {
                println!("\nPlease fix {} field(s) before sending.", result.errors().len());
            }
            EventOutcome::Cleared(true) => println!("\nForm cleared."),
            _ => {}
        }
    }
}

fn render(document: &FormDocument) -> String {
    let mut lines = vec![String::new()];
    for control in document.controls() {
        let shown = match control.value() {
            ControlValue::Text(value) if control.kind() == ControlKind::Password => {
                "*".repeat(value.chars().count())
            }
            ControlValue::Text(value) => value.clone(),
            ControlValue::Choice(choice) => choice.clone().unwrap_or_default(),
            ControlValue::Checked(true) => "[x]".to_string(),
            ControlValue::Checked(false) => "[ ]".to_string(),
            ControlValue::File(_) => document.upload_display().to_string(),
        };
        let marker = if control.is_in_error() { "!" } else { " " };
        lines.push(format!("{marker} {:<38} {shown}", control.descriptor().label));

        if let Some(message) = document.error_message(control.name()) {
            lines.push(format!("    \u{2192} {message}"));
        }
    }
    let button = document.submit_button();
    let state = if button.is_disabled() { " (busy)" } else { "" };
    lines.push(format!("\n[ {} ]{state}", button.label()));
    lines.join("\n")
}

async fn ask_field_value(document: &FormDocument) -> Result<Option<FormEvent>> {
    let fields: Vec<_> = FIELDS
        .iter()
        .filter(|d| d.kind != ControlKind::File && document.control(d.name).is_some())
        .collect();
    let labels: Vec<&str> = fields.iter().map(|d| d.label).collect();

    let picked = blocking(move || {
        Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Field")
            .items(&labels)
            .interact_opt()
    })
    .await?;
    let Some(descriptor) = picked.map(|i| fields[i]) else {
        return Ok(None);
    };

    let field = descriptor.name;
    let label = descriptor.caption();
    let event = match descriptor.kind {
        ControlKind::RadioGroup => {
            let options = descriptor.options;
            let index = blocking(move || {
                Select::with_theme(&ColorfulTheme::default())
                    .with_prompt(label)
                    .items(options)
                    .interact()
            })
            .await?;
            FormEvent::OptionSelected {
                field,
                option: options[index].to_string(),
            }
        }
        ControlKind::Checkbox => {
            let checked = blocking(move || {
                Confirm::with_theme(&ColorfulTheme::default())
                    .with_prompt(label)
                    .interact()
            })
            .await?;
            FormEvent::Toggled { field, checked }
        }
        ControlKind::Password => {
            let value = blocking(move || {
                Password::with_theme(&ColorfulTheme::default())
                    .with_prompt(label)
                    .allow_empty_password(true)
                    .interact()
            })
            .await?;
            FormEvent::Input { field, value }
        }
        ControlKind::Text | ControlKind::Email | ControlKind::File => {
            let current = document.text(field).unwrap_or_default().to_string();
            let value = blocking(move || {
                Input::<String>::with_theme(&ColorfulTheme::default())
                    .with_prompt(label)
                    .with_initial_text(current)
                    .allow_empty(true)
                    .interact_text()
            })
            .await?;
            FormEvent::Input { field, value }
        }
    };

    Ok(Some(event))
}

async fn ask_resume() -> Result<FormEvent> {
    let path = blocking(|| {
        Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt("Path to your resume (empty to remove)")
            .allow_empty(true)
            .interact_text()
    })
    .await?;

    let file = match path.trim() {
        "" => None,
        path => match SelectedFile::from_path(path).await {
            Ok(file) => Some(file),
            Err(e) => {
                warn!("Could not read '{path}': {e}");
                println!("\nCould not read '{path}': {e}");
                None
            }
        },
    };

    Ok(FormEvent::FileSelected {
        field: FieldName::Resume,
        file,
    })
}

async fn blocking<T, F>(prompt: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> dialoguer::Result<T> + Send + 'static,
{
    let answer = tokio::task::spawn_blocking(prompt)
        .await
        .context("Terminal prompt task panicked")?;
    answer.context("Terminal prompt failed")
}
