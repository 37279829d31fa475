mod config;
mod errors;
mod form;
mod lifecycle;
mod prompter;
mod submission;
mod terminal;

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::form::FormDocument;
use crate::lifecycle::LifecycleController;
use crate::submission::SubmissionClient;
use crate::terminal::TerminalPrompter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load configuration first (every value has a compiled-in default)
    let config = Config::from_env()?;

    // Structured logging goes to stderr so it stays out of the form
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting job application form v{}", env!("CARGO_PKG_VERSION"));

    let client = SubmissionClient::from_config(&config);
    info!(
        "Submission client ready (timeout: {}ms, ack mode: {:?})",
        config.submit_timeout.as_millis(),
        config.ack_mode
    );

    let mut controller = LifecycleController::mount(
        FormDocument::job_application(),
        client,
        Arc::new(TerminalPrompter),
        config.clear_prompt_delay,
    )
    .context("Application form failed to mount")?;

    terminal::run_session(&mut controller).await?;

    controller.unmount();
    Ok(())
}
