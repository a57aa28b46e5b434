//! Internal error types for synthesis requests.
//!
//! These errors are internal to `retrovox-synth` and are mapped to
//! [`SpeakError`](retrovox_voice::SpeakError) at the port boundary.

use thiserror::Error;

/// Result type alias for synthesis operations.
pub type SynthResult<T> = Result<T, SynthError>;

/// Errors related to the remote synthesis service.
#[derive(Debug, Error)]
pub enum SynthError {
    /// The service answered with a non-success HTTP status.
    #[error("Synthesis request failed with status {status}: {url}")]
    RequestFailed {
        /// HTTP status code
        status: u16,
        /// The URL that was requested
        url: String,
    },

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// URL parsing error (bad base URL configuration).
    #[error("Invalid backend URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_failed_error_message() {
        let error = SynthError::RequestFailed {
            status: 500,
            url: "http://localhost:9452/api/synthesize".to_string(),
        };
        let msg = error.to_string();
        assert!(msg.contains("500"));
        assert!(msg.contains("/api/synthesize"));
    }

    #[test]
    fn invalid_url_error_message() {
        let error: SynthError = url::ParseError::EmptyHost.into();
        assert!(error.to_string().contains("Invalid backend URL"));
    }

    #[test]
    fn synth_result_ok() {
        let result: SynthResult<i32> = Ok(42);
        assert!(matches!(result, Ok(42)));
    }
}
