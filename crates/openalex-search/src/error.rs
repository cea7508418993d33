//! Error types for the OpenAlex search client.
//!
//! Uses `thiserror` for structured error handling with automatic `From` implementations.

use std::path::PathBuf;

/// Errors from the HTTP client layer.
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// HTTP transport error (connection, DNS, TLS, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Middleware error
    #[error("Middleware error: {0}")]
    Middleware(#[from] reqwest_middleware::Error),

    /// Non-2xx response from the catalog API.
    #[error("Request failed ({status}): {message}")]
    Request {
        /// HTTP status code
        status: u16,
        /// Upstream error message, or the status text
        message: String,
    },

    /// JSON parsing error
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// A URL could not be built from the given input.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    /// Create a request error.
    #[must_use]
    pub fn request(status: u16, message: impl Into<String>) -> Self {
        Self::Request {
            status,
            message: message.into(),
        }
    }

    /// HTTP status of a failed request, if the server answered.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Request { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Message suitable for showing inline to a user.
    ///
    /// Upstream messages are passed through as-is; transport failures fall
    /// back to their display text.
    #[must_use]
    pub fn to_user_message(&self) -> String {
        match self {
            Self::Request { message, .. } => message.clone(),
            Self::Http(e) if e.is_timeout() => "Request timed out".to_string(),
            Self::Http(e) if e.is_connect() => "Could not connect to the catalog".to_string(),
            _ => self.to_string(),
        }
    }
}

/// Errors from saving export artifacts.
#[derive(thiserror::Error, Debug)]
pub enum ExportError {
    /// Filesystem failure while writing an artifact.
    #[error("Failed to write {path}: {source}")]
    Io {
        /// Target path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The artifact name would escape the target directory.
    #[error("Invalid file name: {0}")]
    InvalidFileName(String),
}

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Result type alias for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_error_user_message() {
        let err = ClientError::request(400, "Invalid filter value");
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.to_user_message(), "Invalid filter value");
        assert!(err.to_string().contains("400"));
    }

    #[test]
    fn test_invalid_url_has_no_status() {
        let err = ClientError::InvalidUrl("::".to_string());
        assert_eq!(err.status(), None);
        assert!(err.to_user_message().contains("Invalid URL"));
    }

    #[test]
    fn test_export_error_mentions_path() {
        let err = ExportError::Io {
            path: PathBuf::from("/tmp/out/work-W1.xml"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("work-W1.xml"));
    }
}
