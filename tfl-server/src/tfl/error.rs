//! TfL client error types.

/// Errors that can occur when fetching lines from the TfL API.
#[derive(Debug, thiserror::Error)]
pub enum TflError {
    /// HTTP request failed (network error, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status
    #[error("TfL API error {status}: {message}")]
    RemoteFetchFailed { status: u16, message: String },

    /// Response body was not a JSON array
    #[error("malformed TfL response: {message}")]
    MalformedResponse {
        message: String,
        body: Option<String>,
    },

    /// The caller's cancellation signal fired before the fetch completed
    #[error("operation cancelled")]
    Cancelled,

    /// The provider has been closed and can no longer reach the API
    #[error("line provider is closed")]
    Closed,

    /// Configuration can never produce a valid request
    #[error("invalid TfL configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = TflError::RemoteFetchFailed {
            status: 503,
            message: "Service Unavailable".into(),
        };
        assert_eq!(err.to_string(), "TfL API error 503: Service Unavailable");

        let err = TflError::MalformedResponse {
            message: "invalid type: map, expected a sequence".into(),
            body: Some("{}".into()),
        };
        assert!(err.to_string().contains("malformed TfL response"));
        assert!(err.to_string().contains("expected a sequence"));

        assert_eq!(TflError::Cancelled.to_string(), "operation cancelled");
        assert_eq!(TflError::Closed.to_string(), "line provider is closed");
    }
}
