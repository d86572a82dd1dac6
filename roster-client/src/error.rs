//! Client error types

use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure: connection refused, DNS, TLS, timeout
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// HTTP status for API errors
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the request never got an answer from the backend
    pub fn is_network(&self) -> bool {
        matches!(self, ClientError::Network(_))
    }

    /// Short text suitable for a toast
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Network(_) => {
                "Connection error. Check that the server is running.".to_string()
            }
            ClientError::Api { message, .. } => message.clone(),
            ClientError::InvalidResponse(_) | ClientError::Serialization(_) => {
                "Unexpected response from the server".to_string()
            }
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
