//! API error types for the recommender client.

use thiserror::Error;

/// Errors that can occur when talking to the recommendation service.
///
/// The ingredient editor treats all of these identically (log and hide the
/// suggestion panel); the recommend call surfaces them in the results view.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network or HTTP transport error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("Server returned HTTP {0}")]
    HttpStatus(u16),

    /// The response body did not match the expected shape.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The server rejected the request with an `{ "error": ... }` body.
    #[error("{0}")]
    Rejected(String),

    /// The server could not be reached at all.
    #[error("Cannot connect to {0}")]
    ConnectionFailed(String),

    /// Invalid server URL in configuration.
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),
}

/// Result type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// Create an error from a non-2xx HTTP status code.
    pub fn from_status(status: reqwest::StatusCode) -> Self {
        ApiError::HttpStatus(status.as_u16())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_error_from_status() {
        let err = ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert!(matches!(err, ApiError::HttpStatus(500)));

        let err = ApiError::from_status(StatusCode::NOT_FOUND);
        assert!(matches!(err, ApiError::HttpStatus(404)));
    }

    #[test]
    fn test_error_display() {
        let err = ApiError::HttpStatus(502);
        assert_eq!(err.to_string(), "Server returned HTTP 502");

        let err = ApiError::MalformedResponse("missing field".to_string());
        assert_eq!(err.to_string(), "Malformed response: missing field");

        let err = ApiError::Rejected("Recommender system not loaded".to_string());
        assert_eq!(err.to_string(), "Recommender system not loaded");
    }
}
