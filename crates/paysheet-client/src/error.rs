//! Client error types.

/// Errors that can occur when using the Stripe API client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Stripe API returned an error.
    #[error("Stripe API error: {error_type} - {message}")]
    Api {
        /// Error type, e.g. `invalid_request_error`.
        error_type: String,
        /// Error message.
        message: String,
        /// Error code.
        code: Option<String>,
        /// Parameter that caused the error.
        param: Option<String>,
        /// HTTP status code.
        status: u16,
    },

    /// A success response was not JSON or did not have the expected shape.
    #[error("failed to decode response from {endpoint}")]
    Decoding {
        /// The endpoint that returned the response.
        endpoint: String,
    },

    /// The client secret is malformed or cannot be used with this key.
    #[error("invalid client secret")]
    InvalidClientSecret,

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl ClientError {
    /// HTTP status of the response that caused the error, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
