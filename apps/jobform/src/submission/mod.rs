/// Submission client: the only place that talks to the spreadsheet endpoint.
///
/// TRUST BOUNDARY: in `AckMode::Opaque` (the default) the response is never
/// read. A request that leaves without a local network error counts as
/// delivered, so success is optimistic: "sent" and "accepted" cannot be told
/// apart. `AckMode::Verified` is for endpoints whose status can be read.
use std::str::FromStr;
use std::time::Duration;

use reqwest::Client;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::Config;
use crate::form::collector::FormRecord;

pub mod payload;

pub use payload::SubmissionPayload;

/// The hosted spreadsheet script that receives applications.
pub const DEFAULT_ENDPOINT_URL: &str = "https://script.google.com/macros/s/AKfycbw4TcOTY4Hj5vzncrKntyulHhCyk7VVIRjgO3V2Kw3nTT6Gt78By2WlD82jsGL7DoWqxQ/exec";
pub const DEFAULT_SUBMIT_TIMEOUT: Duration = Duration::from_millis(30_000);

pub const TIMEOUT_MESSAGE: &str = "Timeout: the request took too long to respond.";
pub const CONNECTION_FAILURE_MESSAGE: &str = "Connection error. Please try again.";
pub const REJECTED_MESSAGE: &str = "The application could not be accepted. Please try again.";

/// How much of the endpoint's answer the client is allowed to trust.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AckMode {
    /// Response unreadable; delivery is assumed once the request is sent.
    #[default]
    Opaque,
    /// Response status is read; non-2xx is a rejection.
    Verified,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("expected 'opaque' or 'verified', got '{0}'")]
pub struct UnknownAckMode(String);

impl FromStr for AckMode {
    type Err = UnknownAckMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "opaque" => Ok(AckMode::Opaque),
            "verified" => Ok(AckMode::Verified),
            other => Err(UnknownAckMode(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acknowledgement {
    /// Sent without a network error; the endpoint's verdict is unknown.
    Assumed,
    Confirmed { status: u16 },
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("request did not settle within {}ms", .0.as_millis())]
    Timeout(Duration),

    #[error("connection failure: {0}")]
    ConnectionFailure(#[from] reqwest::Error),

    #[error("endpoint rejected the submission (status {status})")]
    Rejected { status: u16 },
}

impl SubmitError {
    /// The text shown to the applicant in the failure notice.
    pub fn user_message(&self) -> &'static str {
        match self {
            SubmitError::Timeout(_) => TIMEOUT_MESSAGE,
            SubmitError::ConnectionFailure(_) => CONNECTION_FAILURE_MESSAGE,
            SubmitError::Rejected { .. } => REJECTED_MESSAGE,
        }
    }
}

#[derive(Clone)]
pub struct SubmissionClient {
    client: Client,
    endpoint: String,
    timeout: Duration,
    ack_mode: AckMode,
}

impl SubmissionClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration, ack_mode: AckMode) -> Self {
        Self {
            // No client-level timeout: the deadline is enforced by cancelling
            // the request future so it can be told apart from network errors.
            client: Client::builder()
                .build()
                .expect("Failed to build HTTP client"),
            endpoint: endpoint.into(),
            timeout,
            ack_mode,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.endpoint_url.clone(),
            config.submit_timeout,
            config.ack_mode,
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sends one application. Never retries.
    pub async fn submit(&self, record: &FormRecord) -> Result<Acknowledgement, SubmitError> {
        let payload = SubmissionPayload::from_record(record);
        debug!(
            endpoint = %self.endpoint,
            fields = payload.fields().len(),
            "Sending application as multipart form"
        );

        let request = self
            .client
            .post(&self.endpoint)
            .multipart(payload.into_multipart())
            .send();

        let response = match tokio::time::timeout(self.timeout, request).await {
            Err(_) => return Err(SubmitError::Timeout(self.timeout)),
            Ok(Err(e)) if e.is_timeout() => return Err(SubmitError::Timeout(self.timeout)),
            Ok(result) => result?,
        };

        let status = response.status();
        match self.ack_mode {
            AckMode::Opaque => {
                info!("Application request sent");
                Ok(Acknowledgement::Assumed)
            }
            AckMode::Verified if status.is_success() => {
                info!(status = status.as_u16(), "Application accepted");
                Ok(Acknowledgement::Confirmed {
                    status: status.as_u16(),
                })
            }
            AckMode::Verified => Err(SubmitError::Rejected {
                status: status.as_u16(),
            }),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Throwaway endpoints for exercising the client against real sockets.

    use axum::extract::{Multipart, State};
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::Router;
    use tokio::net::TcpListener;
    use tokio::sync::mpsc;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct CapturedField {
        pub name: String,
        pub file_name: Option<String>,
        pub value: String,
    }

    #[derive(Clone)]
    struct Capture {
        tx: mpsc::UnboundedSender<Vec<CapturedField>>,
        status: StatusCode,
    }

    async fn capture(State(capture): State<Capture>, mut multipart: Multipart) -> StatusCode {
        let mut fields = Vec::new();
        while let Ok(Some(field)) = multipart.next_field().await {
            let name = field.name().unwrap_or_default().to_string();
            let file_name = field.file_name().map(str::to_string);
            let value = field.text().await.unwrap_or_default();
            fields.push(CapturedField {
                name,
                file_name,
                value,
            });
        }
        let _ = capture.tx.send(fields);
        capture.status
    }

    /// Serves `POST /exec`, records every multipart body and answers `status`.
    pub async fn capture_endpoint(
        status: StatusCode,
    ) -> (String, mpsc::UnboundedReceiver<Vec<CapturedField>>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let app = Router::new()
            .route("/exec", post(capture))
            .with_state(Capture { tx, status });

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{addr}/exec"), rx)
    }

    /// Accepts connections and never answers.
    pub async fn silent_endpoint() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });
        format!("http://{addr}/exec")
    }

    /// An address nothing listens on.
    pub fn closed_endpoint() -> String {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{addr}/exec")
    }
}
