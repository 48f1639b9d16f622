use std::fmt::{Debug, Formatter};
use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};

use crate::error_chain_fmt;
use crate::send_request::{RecipientSource, SendRequest};

/// What the remote service reports back for an accepted submission: a
/// human-readable message plus its partition of the submitted addresses.
/// The arrays are optional on the wire and default to empty.
#[derive(serde::Deserialize, Debug)]
pub struct DeliveryResponse {
    pub message: String,
    #[serde(default)]
    pub valid_emails: Vec<String>,
    #[serde(default)]
    pub invalid_emails: Vec<String>,
}

#[derive(serde::Deserialize)]
struct RemoteFailure {
    error: String,
}

#[derive(thiserror::Error)]
pub enum DeliveryError {
    // Display carries the surfaced message because that is exactly what the
    // user sees
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },
    #[error("Failed to send emails")]
    Transport(#[source] reqwest::Error),
}

impl Debug for DeliveryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

pub struct DeliveryClient {
    http_client: Client,
    base_url: String,
    timeout: Duration,
}

impl DeliveryClient {
    pub fn new(base_url: String, timeout: Duration) -> Self {
        Self {
            http_client: Client::new(),
            base_url,
            timeout,
        }
    }

    /// Posts one multipart submission to the delivery service and waits for
    /// its verdict.
    ///
    /// The payload carries `subject`, `body`, `scheduled_time` when one was
    /// supplied, and exactly one recipient field: an attached file travels as
    /// the binary `file` part under its original name, typed addresses as the
    /// `emails` text part. A non-success status surfaces the response's
    /// `error` field when it has one; connect, timeout and decode failures
    /// all collapse into the generic transport message.
    pub async fn send(&self, request: SendRequest) -> Result<DeliveryResponse, DeliveryError> {
        let url = format!("{}/send-email", self.base_url);

        let mut form = Form::new()
            .text("subject", request.subject)
            .text("body", request.body);

        if let Some(scheduled_time) = request.scheduled_time {
            form = form.text("scheduled_time", scheduled_time);
        }

        form = match request.recipients {
            RecipientSource::Text(emails) => form.text("emails", emails),
            RecipientSource::Csv(attachment) => {
                let file_name = attachment.file_name().to_owned();
                let part = Part::bytes(attachment.into_bytes())
                    .file_name(file_name)
                    .mime_str("text/csv")
                    .map_err(DeliveryError::Transport)?;
                form.part("file", part)
            }
        };

        let response = self
            .http_client
            .post(&url)
            .timeout(self.timeout)
            .multipart(form)
            .send()
            .await
            .map_err(DeliveryError::Transport)?;

        let status = response.status();
        if status.is_success() {
            response
                .json::<DeliveryResponse>()
                .await
                .map_err(DeliveryError::Transport)
        } else {
            let message = response
                .json::<RemoteFailure>()
                .await
                .map(|failure| failure.error)
                .unwrap_or_else(|_| "Failed to send emails".to_string());
            Err(DeliveryError::Rejected { status, message })
        }
    }
}
