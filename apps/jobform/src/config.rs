use std::time::Duration;

use anyhow::{Context, Result};

use crate::submission::{AckMode, DEFAULT_ENDPOINT_URL, DEFAULT_SUBMIT_TIMEOUT};

/// Delay between the success notice and the offer to clear the form.
pub const DEFAULT_CLEAR_PROMPT_DELAY: Duration = Duration::from_millis(1000);

/// Form configuration loaded from environment variables.
/// Every setting falls back to the compiled-in default of the hosted form.
#[derive(Debug, Clone)]
pub struct Config {
    pub endpoint_url: String,
    pub submit_timeout: Duration,
    pub ack_mode: AckMode,
    pub clear_prompt_delay: Duration,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            endpoint_url: std::env::var("JOBFORM_ENDPOINT_URL")
                .unwrap_or_else(|_| DEFAULT_ENDPOINT_URL.to_string()),
            submit_timeout: millis_env("JOBFORM_SUBMIT_TIMEOUT_MS")?
                .unwrap_or(DEFAULT_SUBMIT_TIMEOUT),
            ack_mode: match std::env::var("JOBFORM_ACK_MODE") {
                Ok(raw) => raw
                    .parse::<AckMode>()
                    .with_context(|| format!("JOBFORM_ACK_MODE has invalid value '{raw}'"))?,
                Err(_) => AckMode::default(),
            },
            clear_prompt_delay: millis_env("JOBFORM_CLEAR_PROMPT_DELAY_MS")?
                .unwrap_or(DEFAULT_CLEAR_PROMPT_DELAY),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn millis_env(key: &str) -> Result<Option<Duration>> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map(|ms| Some(Duration::from_millis(ms)))
            .with_context(|| format!("{key} must be a whole number of milliseconds")),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_millis_env_parses_trimmed_value() {
        std::env::set_var("JOBFORM_TEST_MILLIS_VALID", " 250 ");
        let parsed = millis_env("JOBFORM_TEST_MILLIS_VALID").unwrap();
        assert_eq!(parsed, Some(Duration::from_millis(250)));
    }

    #[test]
    fn test_millis_env_unset_is_none() {
        std::env::remove_var("JOBFORM_TEST_MILLIS_UNSET");
        assert_eq!(millis_env("JOBFORM_TEST_MILLIS_UNSET").unwrap(), None);
    }

    #[test]
    fn test_millis_env_rejects_non_numeric_with_key_in_message() {
        std::env::set_var("JOBFORM_TEST_MILLIS_INVALID", "abc");
        let err = millis_env("JOBFORM_TEST_MILLIS_INVALID").unwrap_err();
        assert!(format!("{err:#}").contains("JOBFORM_TEST_MILLIS_INVALID"));
    }

    // The only test that touches the real JOBFORM_* variables.
    #[test]
    fn test_invalid_ack_mode_fails_startup() {
        std::env::set_var("JOBFORM_ACK_MODE", "trusting");
        let result = Config::from_env();
        std::env::remove_var("JOBFORM_ACK_MODE");

        let err = result.unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("JOBFORM_ACK_MODE"));
        assert!(message.contains("trusting"));
    }
}
