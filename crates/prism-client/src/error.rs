//! Error types for the client crate.

use thiserror::Error;

/// Errors that can occur when talking to the service.
#[derive(Debug, Error)]
pub enum ClientError {
    /// No response reached the client (connection refused, DNS failure,
    /// connection reset mid-flight).
    #[error("network error: {0}")]
    Transport(String),

    /// The service answered with an HTTP error and a structured detail
    /// message.
    #[error("{detail}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Server-supplied detail, verbatim.
        detail: String,
    },

    /// The service requires authentication for this call.
    #[error("authentication required")]
    Unauthorized,

    /// The response body could not be decoded.
    #[error("failed to parse response: {0}")]
    Parse(String),

    /// A request URL could not be constructed.
    #[error("invalid url: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    /// True for failures where no response reached the client.
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Transport(_))
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_displays_detail_verbatim() {
        let err = ClientError::Api {
            status: 422,
            detail: "Transcript too short to analyze".to_string(),
        };
        assert_eq!(err.to_string(), "Transcript too short to analyze");
        assert!(!err.is_transport());
    }

    #[test]
    fn test_transport_detection() {
        let err = ClientError::Transport("connection refused".to_string());
        assert!(err.is_transport());
    }
}
