use std::io;
use thiserror::Error;

/// Application-wide error type.
///
/// Only two variants are ever shown to the user as a notification:
/// `EmptyInput` and `AnalysisFailed`. The remaining variants belong to the
/// startup path (configuration, file input) and never come out of `analyze`.
#[derive(Debug, Error)]
pub enum AppError {
    /// The submitted text was empty or whitespace-only.
    #[error("Please enter some text to analyze")]
    EmptyInput,

    /// Any failure downstream of the request client. The cause is kept for
    /// logging but is not part of the user-facing message.
    #[error("Failed to analyze text. Please try again.")]
    AnalysisFailed(#[source] ClientError),

    /// Represents configuration-related errors (e.g., missing environment variables).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Represents data validation errors (e.g., invalid input format).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Represents standard input/output errors.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        match self {
            AppError::EmptyInput => AppError::EmptyInput,
            AppError::AnalysisFailed(e) => AppError::AnalysisFailed(e.clone()),
            AppError::Config(s) => AppError::Config(s.clone()),
            AppError::Validation(s) => AppError::Validation(s.clone()),
            AppError::Io(e) => AppError::Io(io::Error::new(e.kind(), e.to_string())),
        }
    }
}

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        AppError::AnalysisFailed(err)
    }
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        AppError::Config(format!("URL parse error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Config(format!("Validation errors: {}", err))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Config(format!("HTTP client error: {}", err))
    }
}

/// Detailed cause of a failed classification request.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ClientError {
    /// Connection, TLS or body-read failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// The service answered with a non-success status.
    #[error("request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    /// The request did not complete within the configured timeout.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// The response envelope or the classification payload could not be parsed.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// The service returned a score outside 1-8.
    #[error("score {0} is outside the 1-8 range")]
    OutOfRange(i64),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Malformed(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Malformed(format!("JSON error: {}", err))
    }
}

impl From<tokio::time::error::Elapsed> for ClientError {
    fn from(err: tokio::time::error::Elapsed) -> Self {
        ClientError::Timeout(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_failed_hides_cause_in_message() {
        let err = AppError::from(ClientError::Status {
            status: 500,
            body: "boom".to_string(),
        });
        assert_eq!(err.to_string(), "Failed to analyze text. Please try again.");

        let source = std::error::Error::source(&err).map(|s| s.to_string());
        assert_eq!(
            source.as_deref(),
            Some("request failed with status 500: boom")
        );
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(AppError::EmptyInput.to_string(), "Please enter some text to analyze");
        let cloned = AppError::AnalysisFailed(ClientError::OutOfRange(9)).clone();
        assert!(matches!(cloned, AppError::AnalysisFailed(ClientError::OutOfRange(9))));
    }

    #[test]
    fn test_serde_error_maps_to_malformed() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        assert!(matches!(ClientError::from(err), ClientError::Malformed(_)));
    }
}
