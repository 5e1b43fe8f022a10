//! Application context
//!
//! Built once at startup and handed to whatever triggers submissions.

use crate::client::ReportClient;
use crate::config::{AppConfig, ConfigError};
use crate::form::ReportForm;
use crate::notify::{Notifier, TerminalNotifier, Toast};
use crate::outcome::SubmissionOutcome;
use crate::transport::{HttpTransport, Transport};

/// Report client plus the notifier that reports its outcomes
pub struct App<T = HttpTransport, N = TerminalNotifier> {
    client: ReportClient<T>,
    notifier: N,
}

impl App<HttpTransport, TerminalNotifier> {
    /// Wire the default HTTP client and terminal toasts from configuration
    pub fn new(config: &AppConfig) -> Result<Self, ConfigError> {
        let client = ReportClient::from_config(config)?;
        let notifier = TerminalNotifier::new(config.toast_config());
        tracing::debug!(
            endpoint = %client.endpoint(),
            position = ?notifier.config().position,
            duration_ms = notifier.config().duration.as_millis() as u64,
            "application initialized"
        );
        Ok(Self::with_parts(client, notifier))
    }
}

impl<T: Transport, N: Notifier> App<T, N> {
    /// Context from an existing client and notifier
    pub fn with_parts(client: ReportClient<T>, notifier: N) -> Self {
        Self { client, notifier }
    }

    /// The underlying report client
    pub fn client(&self) -> &ReportClient<T> {
        &self.client
    }

    /// Submit a report and show a toast for the outcome.
    /// Returns as soon as the toast is shown, not when it is dismissed.
    pub async fn submit(&self, form: ReportForm) -> SubmissionOutcome {
        let outcome = self.client.submit_report(form).await;
        self.notifier.notify(Toast::from_outcome(&outcome)).await;
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::{ToastConfig, ToastKind, ToastPosition};
    use std::time::Duration;
    use crate::transport::TransportError;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};
    use url::Url;

    struct FixedBody(Result<&'static str, &'static str>);

    #[async_trait]
    impl Transport for FixedBody {
        async fn post_form(&self, _endpoint: &Url, _form: ReportForm) -> Result<String, TransportError> {
            self.0
                .map(String::from)
                .map_err(|e| TransportError::Http(e.to_string()))
        }
    }

    #[derive(Clone, Default)]
    struct Recording(Arc<Mutex<Vec<Toast>>>);

    #[async_trait]
    impl Notifier for Recording {
        async fn notify(&self, toast: Toast) {
            self.0.lock().unwrap().push(toast);
        }
    }

    fn app(body: Result<&'static str, &'static str>) -> (App<FixedBody, Recording>, Recording) {
        let recording = Recording::default();
        let client = ReportClient::new(Url::parse("http://localhost/exec").unwrap(), FixedBody(body));
        (App::with_parts(client, recording.clone()), recording)
    }

    #[test]
    fn test_success_shows_success_toast() {
        let (app, toasts) = app(Ok(r#"{"result":"success"}"#));

        let outcome = tokio_test::block_on(app.submit(ReportForm::new().text("name", "Ada")));

        assert!(outcome.is_success());
        let toasts = toasts.0.lock().unwrap();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].kind, ToastKind::Success);
    }

    #[test]
    fn test_network_failure_shows_error_toast() {
        let (app, toasts) = app(Err("ECONNREFUSED"));

        let outcome = tokio_test::block_on(app.submit(ReportForm::new()));

        assert_eq!(outcome, SubmissionOutcome::error("ECONNREFUSED"));
        let toasts = toasts.0.lock().unwrap();
        assert_eq!(toasts[0], Toast::error("Failed to submit report: ECONNREFUSED"));
    }

    #[test]
    fn test_plain_text_reply_shows_success_toast() {
        let (app, toasts) = app(Ok("Thanks!"));

        let outcome = tokio_test::block_on(app.submit(ReportForm::new()));

        assert!(outcome.is_success());
        assert_eq!(toasts.0.lock().unwrap()[0].kind, ToastKind::Success);
    }

    #[tokio::test]
    async fn test_submit_does_not_wait_for_toast_dismissal() {
        let notifier = TerminalNotifier::new(ToastConfig {
            position: ToastPosition::TopRight,
            duration: Duration::from_secs(60),
        })
        .with_interactive(true);
        let client = ReportClient::new(
            Url::parse("http://localhost/exec").unwrap(),
            FixedBody(Ok(r#"{"result":"success"}"#)),
        );
        let app = App::with_parts(client, notifier);

        let outcome = tokio::time::timeout(Duration::from_secs(1), app.submit(ReportForm::new()))
            .await
            .expect("submit waited for the toast to be dismissed");

        assert!(outcome.is_success());
    }

    #[test]
    fn test_new_rejects_bad_endpoint() {
        let config = AppConfig {
            endpoint: Some("::nope".into()),
            ..Default::default()
        };
        assert!(App::new(&config).is_err());
    }

    #[test]
    fn test_new_uses_configured_endpoint() {
        let config = AppConfig {
            endpoint: Some("http://127.0.0.1:9/exec".into()),
            ..Default::default()
        };
        let app = App::new(&config).unwrap();
        assert_eq!(app.client().endpoint().as_str(), "http://127.0.0.1:9/exec");
    }
}
