//! HTTP transport

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use url::Url;

use crate::form::{FormError, ReportForm};

/// Transport failure: the request never completed or the body could not be read
#[derive(Debug, Error)]
pub enum TransportError {
    /// Request failed or the body could not be read
    #[error("{0}")]
    Http(String),
    /// Form could not be encoded as multipart
    #[error(transparent)]
    Form(#[from] FormError),
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        TransportError::Http(e.to_string())
    }
}

/// Sends a form and hands back the raw response body
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST `form` to `endpoint` and return the full body as text
    async fn post_form(&self, endpoint: &Url, form: ReportForm) -> Result<String, TransportError>;
}

/// reqwest-backed transport
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Transport with reqwest defaults and no timeout
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Transport with a whole-request timeout
    pub fn with_timeout(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_form(&self, endpoint: &Url, form: ReportForm) -> Result<String, TransportError> {
        let body = form.into_multipart()?;

        let resp = self
            .client
            .post(endpoint.clone())
            .multipart(body)
            .send()
            .await?;

        tracing::debug!(status = %resp.status(), "report endpoint responded");

        Ok(resp.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_error_converts() {
        let err: TransportError = FormError::Mime("x".into()).into();
        assert_eq!(err.to_string(), "invalid mime type 'x'");
    }
}
