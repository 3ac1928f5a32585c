//! Shared Error Types
//!
//! This module defines the error taxonomy used across the client.
//!
//! # Error Categories
//!
//! - `Transport` - network-level failures (DNS, TLS, timeouts)
//! - `Status` - HTTP responses outside the 2xx range
//! - `Backend` - responses the backend itself marked as failed
//! - `Decode` - JSON deserialization failures
//! - `Validation` - client-side input validation failures
//! - `NotAuthenticated` - an operation that requires a session token
//!
//! # Thread Safety
//!
//! All error types are `Send + Sync` and can be safely shared across thread boundaries.
use thiserror::Error;

/// Errors that can occur when talking to the ride backend
#[derive(Debug, Error, Clone)]
pub enum ApiError {
    /// Network-level failure before a response was received
    #[error("Network error: {message}")]
    Transport {
        /// Human-readable error message
        message: String,
    },

    /// HTTP response with a non-success status code
    #[error("Request failed: HTTP {code} - {message}")]
    Status {
        /// HTTP status code
        code: u16,
        /// Response body or status text
        message: String,
    },

    /// The backend answered but flagged the operation as failed
    #[error("Backend rejected request: {message}")]
    Backend {
        /// Human-readable error message
        message: String,
    },

    /// JSON deserialization error
    #[error("Failed to parse response: {message}")]
    Decode {
        /// Human-readable error message
        message: String,
    },

    /// Client-side validation error
    #[error("Validation error in field '{field}': {message}")]
    Validation {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// Operation requires a session token
    #[error("Not authenticated")]
    NotAuthenticated,
}

impl ApiError {
    /// Create a new transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a new HTTP status error
    pub fn status(code: u16, message: impl Into<String>) -> Self {
        Self::Status {
            code,
            message: message.into(),
        }
    }

    /// Create a new backend error
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }

    /// Create a new decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Whether retrying the same request later could succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport { .. } => true,
            Self::Status { code, .. } => *code >= 500,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::decode(err.to_string())
        } else if let Some(status) = err.status() {
            Self::status(status.as_u16(), err.to_string())
        } else {
            Self::transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::decode(format!("JSON error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_error() {
        let error = ApiError::transport("connection refused");
        match error {
            ApiError::Transport { message } => {
                assert_eq!(message, "connection refused");
            }
            _ => panic!("Expected Transport"),
        }
    }

    #[test]
    fn test_validation_error() {
        let error = ApiError::validation("email", "Invalid email format");
        match error {
            ApiError::Validation { field, message } => {
                assert_eq!(field, "email");
                assert_eq!(message, "Invalid email format");
            }
            _ => panic!("Expected Validation"),
        }
    }

    #[test]
    fn test_error_display() {
        let error = ApiError::status(502, "bad gateway");
        let display = format!("{}", error);
        assert!(display.contains("502"));
        assert!(display.contains("bad gateway"));
    }

    #[test]
    fn test_retryable_classification() {
        assert!(ApiError::transport("timeout").is_retryable());
        assert!(ApiError::status(503, "unavailable").is_retryable());
        assert!(!ApiError::status(404, "not found").is_retryable());
        assert!(!ApiError::backend("blocked user").is_retryable());
        assert!(!ApiError::NotAuthenticated.is_retryable());
    }

    #[test]
    fn test_from_serde_error() {
        let invalid_json = "{ invalid json }";
        let result: Result<serde_json::Value, _> = serde_json::from_str(invalid_json);
        let serde_error = result.unwrap_err();
        let api_error: ApiError = serde_error.into();

        match api_error {
            ApiError::Decode { .. } => {}
            _ => panic!("Expected Decode from serde error"),
        }
    }
}
