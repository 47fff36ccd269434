//! Client error taxonomy.

use campus_erp_core::error::FieldErrors;
use thiserror::Error;

/// Errors surfaced by the API client.
///
/// Backend validation failures carry their per-field messages so the form
/// can show them in place; everything else is a single notice for the page.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The backend rejected the payload with per-field messages.
    #[error("Validation failed: {field_errors}")]
    Validation {
        /// Field name to messages, as returned by the backend.
        field_errors: FieldErrors,
    },

    /// No valid session: missing, expired, or unrefreshable tokens.
    #[error("Unauthorized")]
    Unauthorized,

    /// The backend answered with a status the client has no handling for.
    #[error("Unexpected response ({status}): {message}")]
    Unexpected {
        /// HTTP status code.
        status: u16,
        /// Best-effort message pulled from the response body.
        message: String,
    },

    /// The request never completed (DNS, connect, timeout, TLS).
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A URL could not be built from the configured base.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The submission cannot be sent as built.
    #[error("Invalid submission: {0}")]
    InvalidSubmission(String),
}

/// A convenience alias for `Result<T, ClientError>`.
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display_includes_fields() {
        let mut field_errors = FieldErrors::new();
        field_errors.push("name", "already exists");
        let err = ClientError::Validation { field_errors };
        assert!(err.to_string().contains("name: already exists"));
    }

    #[test]
    fn test_unexpected_display() {
        let err = ClientError::Unexpected {
            status: 503,
            message: "maintenance".into(),
        };
        assert_eq!(err.to_string(), "Unexpected response (503): maintenance");
    }
}
