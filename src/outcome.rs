//! Submission outcome

use serde::{Deserialize, Serialize};

/// Normalized result of a report submission.
///
/// Serializes as `{"result": "success"}` or
/// `{"result": "error", "error": "<message>"}`. Unknown fields in a remote
/// response are ignored when deserializing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "lowercase")]
pub enum SubmissionOutcome {
    /// The endpoint accepted the report
    Success,
    /// The endpoint rejected the report or could not be reached
    Error {
        /// Failure message, when one is available
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
}

impl SubmissionOutcome {
    /// Error outcome carrying a message
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            error: Some(message.into()),
        }
    }

    /// Returns true for [`SubmissionOutcome::Success`]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// The `result` literal: `"success"` or `"error"`
    pub fn result(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error { .. } => "error",
        }
    }

    /// Error message, if any
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Success => None,
            Self::Error { error } => error.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_serializes_without_error_field() {
        let json = serde_json::to_string(&SubmissionOutcome::Success).unwrap();
        assert_eq!(json, r#"{"result":"success"}"#);
    }

    #[test]
    fn test_error_serializes_message() {
        let json = serde_json::to_string(&SubmissionOutcome::error("bad input")).unwrap();
        assert_eq!(json, r#"{"result":"error","error":"bad input"}"#);
    }

    #[test]
    fn test_error_without_message_omits_field() {
        let json = serde_json::to_string(&SubmissionOutcome::Error { error: None }).unwrap();
        assert_eq!(json, r#"{"result":"error"}"#);
    }

    #[test]
    fn test_deserialize_ignores_extra_fields() {
        let outcome: SubmissionOutcome =
            serde_json::from_str(r#"{"result":"success","row":42}"#).unwrap();
        assert_eq!(outcome, SubmissionOutcome::Success);

        let outcome: SubmissionOutcome =
            serde_json::from_str(r#"{"result":"error","error":"quota","row":null}"#).unwrap();
        assert_eq!(outcome.message(), Some("quota"));

        let outcome: SubmissionOutcome = serde_json::from_str(r#"{"result":"error"}"#).unwrap();
        assert_eq!(outcome, SubmissionOutcome::Error { error: None });
    }

    #[test]
    fn test_unknown_result_is_rejected() {
        assert!(serde_json::from_str::<SubmissionOutcome>(r#"{"result":"pending"}"#).is_err());
        assert!(serde_json::from_str::<SubmissionOutcome>(r#"{"status":"ok"}"#).is_err());
    }

    #[test]
    fn test_accessors() {
        assert!(SubmissionOutcome::Success.is_success());
        assert_eq!(SubmissionOutcome::Success.result(), "success");
        assert_eq!(SubmissionOutcome::Success.message(), None);

        let err = SubmissionOutcome::error("boom");
        assert!(!err.is_success());
        assert_eq!(err.result(), "error");
        assert_eq!(err.message(), Some("boom"));
    }
}
