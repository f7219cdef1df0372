//! NexTrip client error types.

/// Errors from the NexTrip HTTP client.
///
/// Every variant is a transport failure from the caller's point of view:
/// none are retried.
#[derive(Debug, thiserror::Error)]
pub enum TransitError {
    /// HTTP request failed (connection refused, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configured base URL cannot be used to build request URLs
    #[error("invalid base URL {url:?}: {message}")]
    InvalidBaseUrl { url: String, message: String },

    /// API returned a non-2xx status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body was not the JSON we expected
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },
}

impl TransitError {
    /// HTTP status code, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            TransitError::Http(e) => e.status().map(|s| s.as_u16()),
            TransitError::Api { status, .. } => Some(*status),
            TransitError::InvalidBaseUrl { .. } | TransitError::Json { .. } => None,
        }
    }
}
