//! Report submission client
//!
//! One operation: POST the form, read the body, normalize it. Every path ends
//! in a [`SubmissionOutcome`]; nothing is returned as `Err` and nothing is
//! retried.
//!
//! Normalization is lenient on purpose. The script endpoint sometimes answers
//! a successful submission with plain text, so a body that is not JSON at all
//! counts as success. A plain-text *error* body is
//! therefore reported as success too; [`ResponseBody::Unstructured`] keeps the
//! raw text for callers that want to look closer.

use serde_json::Value;
use url::Url;

use crate::config::{AppConfig, ConfigError};
use crate::form::ReportForm;
use crate::outcome::SubmissionOutcome;
use crate::transport::{HttpTransport, Transport};
use crate::DEFAULT_ENDPOINT;

/// Classified response body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseBody {
    /// Body parsed as JSON
    Structured(SubmissionOutcome),
    /// Not JSON at all, kept verbatim
    Unstructured(String),
}

impl ResponseBody {
    /// Outcome reported to the caller. Unstructured bodies map to success.
    pub fn into_outcome(self) -> SubmissionOutcome {
        match self {
            ResponseBody::Structured(outcome) => outcome,
            ResponseBody::Unstructured(_) => SubmissionOutcome::Success,
        }
    }
}

/// Classify a raw response body.
///
/// Any valid JSON is structured. `"result": "success"` is success,
/// `"result": "error"` is an error whose `error` member is kept as the
/// message (non-string members are rendered as JSON). Valid JSON of any other
/// shape is an error outcome.
pub fn normalize(body: &str) -> ResponseBody {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => ResponseBody::Structured(outcome_from_value(&value)),
        Err(_) => ResponseBody::Unstructured(body.to_string()),
    }
}

fn outcome_from_value(value: &Value) -> SubmissionOutcome {
    match value.get("result").and_then(Value::as_str) {
        Some("success") => SubmissionOutcome::Success,
        Some("error") => SubmissionOutcome::Error {
            error: match value.get("error") {
                None | Some(Value::Null) => None,
                Some(Value::String(message)) => Some(message.clone()),
                Some(other) => Some(other.to_string()),
            },
        },
        _ => SubmissionOutcome::error(format!("unexpected response: {}", value)),
    }
}

/// Submits reports to a single endpoint
#[derive(Debug, Clone)]
pub struct ReportClient<T = HttpTransport> {
    endpoint: Url,
    transport: T,
}

impl ReportClient<HttpTransport> {
    /// Client built from configuration (endpoint and optional timeout)
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        let endpoint = config.endpoint_url()?;
        let transport = match config.timeout() {
            Some(timeout) => HttpTransport::with_timeout(timeout)
                .map_err(|e| ConfigError::Invalid(e.to_string()))?,
            None => HttpTransport::new(),
        };
        Ok(Self::new(endpoint, transport))
    }
}

impl Default for ReportClient<HttpTransport> {
    fn default() -> Self {
        let endpoint = Url::parse(DEFAULT_ENDPOINT).expect("default endpoint is a valid URL");
        Self::new(endpoint, HttpTransport::new())
    }
}

impl<T: Transport> ReportClient<T> {
    /// Client posting to `endpoint` over `transport`
    pub fn new(endpoint: Url, transport: T) -> Self {
        Self {
            endpoint,
            transport,
        }
    }

    /// Endpoint reports are posted to
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Submit a report and normalize the response
    pub async fn submit_report(&self, form: ReportForm) -> SubmissionOutcome {
        tracing::debug!(endpoint = %self.endpoint, fields = form.len(), "submitting report");

        let text = match self.transport.post_form(&self.endpoint, form).await {
            Ok(text) => text,
            Err(e) => {
                tracing::error!("Network error: {}", e);
                return SubmissionOutcome::error(e.to_string());
            }
        };

        match normalize(&text) {
            ResponseBody::Structured(outcome) => {
                tracing::info!(result = outcome.result(), "report submitted");
                outcome
            }
            body @ ResponseBody::Unstructured(_) => {
                tracing::warn!("Could not parse JSON: {}", text);
                body.into_outcome()
            }
        }
    }
}
