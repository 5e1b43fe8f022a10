//! Report Submit - Form Report Submission Client
//!
//! Posts a multipart form to a remote script endpoint and normalizes whatever
//! comes back into a [`SubmissionOutcome`].
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                          REPORT SUBMIT                       │
//! │                                                              │
//! │  ┌──────────────┐   ┌──────────────┐   ┌──────────────────┐  │
//! │  │  ReportForm  │──▶│ ReportClient │──▶│    Transport     │  │
//! │  │  (multipart) │   │ (normalize)  │   │ (reqwest POST)   │  │
//! │  └──────────────┘   └──────┬───────┘   └──────────────────┘  │
//! │                            │                                 │
//! │                   ┌────────▼─────────┐                       │
//! │                   │ SubmissionOutcome│──▶ Notifier (toast)   │
//! │                   └──────────────────┘                       │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use report_submit::{ReportClient, ReportForm};
//!
//! # async fn run() {
//! let client: ReportClient = ReportClient::default();
//! let form = ReportForm::new()
//!     .text("name", "Ada")
//!     .text("message", "Printer on fire");
//!
//! let outcome = client.submit_report(form).await;
//! if outcome.is_success() {
//!     println!("submitted");
//! }
//! # }
//! ```

#![warn(missing_docs)]

pub mod app;
pub mod client;
pub mod config;
pub mod form;
pub mod notify;
pub mod outcome;
pub mod transport;

pub use app::App;
pub use client::{normalize, ReportClient, ResponseBody};
pub use config::{AppConfig, ConfigError};
pub use form::{FormError, FormValue, ReportForm};
pub use notify::{Notifier, TerminalNotifier, Toast, ToastConfig, ToastKind, ToastPosition};
pub use outcome::SubmissionOutcome;
pub use transport::{HttpTransport, Transport, TransportError};

/// Default report endpoint
pub const DEFAULT_ENDPOINT: &str = "https://script.google.com/macros/s/AKfycbwQqpf2Cp1PFt4QoqJ5Sk67UBix-pqARNZerO-iB9aZZcMRa5lVIoFjuNv8hYU0pbMG/exec";
