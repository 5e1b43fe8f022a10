//! Toast notifications
//!
//! Terminal rendition of the success/error toast shown after a submission.

use std::io::{IsTerminal, Write};
use std::time::Duration;

use async_trait::async_trait;
use colored::Colorize;
use serde::{Deserialize, Serialize};

use crate::outcome::SubmissionOutcome;

/// Default auto-dismiss duration
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(3000);

const DEFAULT_WIDTH: usize = 80;

/// Screen corner (or edge) a toast is anchored to
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum ToastPosition {
    TopLeft,
    Top,
    #[default]
    TopRight,
    BottomLeft,
    Bottom,
    BottomRight,
}

impl ToastPosition {
    fn is_top(self) -> bool {
        matches!(self, Self::TopLeft | Self::Top | Self::TopRight)
    }
}

/// Notification settings, fixed at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastConfig {
    pub position: ToastPosition,
    /// Zero keeps the toast on screen
    pub duration: Duration,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            position: ToastPosition::TopRight,
            duration: DEFAULT_TOAST_DURATION,
        }
    }
}

/// Success or error styling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// A single notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            message: message.into(),
        }
    }

    /// Toast describing a submission outcome
    pub fn from_outcome(outcome: &SubmissionOutcome) -> Self {
        match outcome {
            SubmissionOutcome::Success => Self::success("Report submitted successfully"),
            SubmissionOutcome::Error { error: Some(msg) } => {
                Self::error(format!("Failed to submit report: {}", msg))
            }
            SubmissionOutcome::Error { error: None } => Self::error("Failed to submit report"),
        }
    }

    fn label(&self) -> &'static str {
        match self.kind {
            ToastKind::Success => "✔",
            ToastKind::Error => "✖",
        }
    }
}

/// Displays toasts.
///
/// `notify` returns once the toast is shown; dismissal happens in the
/// background.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Show `toast`
    async fn notify(&self, toast: Toast);
}

/// Renders toasts on stderr
#[derive(Debug, Clone)]
pub struct TerminalNotifier {
    config: ToastConfig,
    width: usize,
    interactive: bool,
}

impl TerminalNotifier {
    pub fn new(config: ToastConfig) -> Self {
        Self {
            config,
            width: DEFAULT_WIDTH,
            interactive: std::io::stderr().is_terminal(),
        }
    }

    /// Override the line width used for alignment
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Force terminal behavior (auto-clear) on or off
    pub fn with_interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    pub fn config(&self) -> &ToastConfig {
        &self.config
    }

    /// Uncolored lines for `toast`, aligned per position.
    /// Top toasts are followed by a blank line, bottom toasts preceded by one.
    pub fn render(&self, toast: &Toast) -> Vec<String> {
        let text = format!("{} {}", toast.label(), toast.message);
        let len = text.chars().count();
        let pad = match self.config.position {
            ToastPosition::TopLeft | ToastPosition::BottomLeft => 0,
            ToastPosition::Top | ToastPosition::Bottom => self.width.saturating_sub(len) / 2,
            ToastPosition::TopRight | ToastPosition::BottomRight => self.width.saturating_sub(len),
        };
        let line = format!("{}{}", " ".repeat(pad), text);

        if self.config.position.is_top() {
            vec![line, String::new()]
        } else {
            vec![String::new(), line]
        }
    }
}

impl Default for TerminalNotifier {
    fn default() -> Self {
        Self::new(ToastConfig::default())
    }
}

fn write_toast(lines: &[String], kind: ToastKind) {
    let mut stderr = std::io::stderr().lock();
    for line in lines {
        let styled = match kind {
            ToastKind::Success => line.green().bold(),
            ToastKind::Error => line.red().bold(),
        };
        let _ = writeln!(stderr, "{}", styled);
    }
    let _ = stderr.flush();
}

fn clear_lines(count: usize) {
    let mut stderr = std::io::stderr().lock();
    for _ in 0..count {
        // cursor up, clear line
        let _ = write!(stderr, "\x1b[1A\x1b[2K");
    }
    let _ = stderr.flush();
}

#[async_trait]
impl Notifier for TerminalNotifier {
    async fn notify(&self, toast: Toast) {
        let lines = self.render(&toast);
        write_toast(&lines, toast.kind);

        if !self.interactive || self.config.duration.is_zero() {
            return;
        }

        // dismissal only runs while a runtime is alive
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            return;
        };
        let duration = self.config.duration;
        let count = lines.len();
        handle.spawn(async move {
            tokio::time::sleep(duration).await;
            clear_lines(count);
        });
    }
}
