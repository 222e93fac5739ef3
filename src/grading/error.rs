//! Grading-specific error types and handling

use std::time::Duration;
use thiserror::Error;

/// The only message a user ever sees for a failed submission
pub const SUBMISSION_FAILED_MESSAGE: &str = "Failed to grade essay. Please try again.";

/// Result type for grading operations
pub type GradeResult<T> = Result<T, GradingError>;

/// Reasons a grading request can fail.
///
/// The variants exist for diagnostics only; every one of them is shown to the
/// user as [`SUBMISSION_FAILED_MESSAGE`].
#[derive(Error, Debug, Clone)]
pub enum GradingError {
    #[error("Network error: {message}")]
    Network { message: String },

    #[error("Grading service unavailable: {message}")]
    Unavailable { message: String },

    #[error("Grading request timed out after {timeout:?}")]
    Timeout { timeout: Duration },

    #[error("Grading service returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Invalid response from grading service: {details}")]
    InvalidResponse { details: String },

    #[error("Grading client configuration error: {message}")]
    Configuration { message: String },
}

impl GradingError {
    /// Create a network error
    pub fn network(message: impl Into<String>) -> Self {
        GradingError::Network {
            message: message.into(),
        }
    }

    /// Create a service unavailable error
    pub fn unavailable(message: impl Into<String>) -> Self {
        GradingError::Unavailable {
            message: message.into(),
        }
    }

    /// Create a timeout error
    pub fn timeout(timeout: Duration) -> Self {
        GradingError::Timeout { timeout }
    }

    /// Create an HTTP status error
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        GradingError::Status {
            status,
            message: message.into(),
        }
    }

    /// Create an invalid response error
    pub fn invalid_response(details: impl Into<String>) -> Self {
        GradingError::InvalidResponse {
            details: details.into(),
        }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        GradingError::Configuration {
            message: message.into(),
        }
    }

    /// The user-facing message for this error
    pub fn user_message(&self) -> &'static str {
        SUBMISSION_FAILED_MESSAGE
    }

    /// Short machine-friendly label for logs
    pub fn kind(&self) -> &'static str {
        match self {
            GradingError::Network { .. } => "network",
            GradingError::Unavailable { .. } => "unavailable",
            GradingError::Timeout { .. } => "timeout",
            GradingError::Status { .. } => "status",
            GradingError::InvalidResponse { .. } => "invalid_response",
            GradingError::Configuration { .. } => "configuration",
        }
    }
}

impl From<reqwest::Error> for GradingError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            // reqwest does not report the configured duration back
            GradingError::timeout(Duration::ZERO)
        } else if err.is_connect() {
            GradingError::unavailable(err.to_string())
        } else if err.is_decode() {
            GradingError::invalid_response(err.to_string())
        } else {
            GradingError::network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for GradingError {
    fn from(err: serde_json::Error) -> Self {
        GradingError::invalid_response(format!("JSON parsing error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_error_has_the_same_user_message() {
        let errors = vec![
            GradingError::network("connection reset"),
            GradingError::unavailable("connection refused"),
            GradingError::timeout(Duration::from_secs(30)),
            GradingError::status(500, "boom"),
            GradingError::invalid_response("missing field `grade`"),
            GradingError::config_error("bad url"),
        ];

        for error in errors {
            assert_eq!(error.user_message(), SUBMISSION_FAILED_MESSAGE);
        }
    }

    #[test]
    fn test_json_error_becomes_invalid_response() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let grading_error: GradingError = err.into();

        assert_eq!(grading_error.kind(), "invalid_response");
        assert!(grading_error.to_string().contains("JSON parsing error"));
    }

    #[test]
    fn test_status_error_display() {
        let error = GradingError::status(400, "No valid essay text provided");
        assert_eq!(
            error.to_string(),
            "Grading service returned status 400: No valid essay text provided"
        );
    }
}
