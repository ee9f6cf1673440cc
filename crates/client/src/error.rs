//! Client error shape.

use std::time::Duration;

/// Normalized error for API calls.
///
/// Server-reported failures carry the HTTP status and the server's error code;
/// transport failures carry no status and a transport code instead, with
/// `TIMEOUT` distinguishing an elapsed deadline from other network errors.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct ApiClientError {
    /// Human-readable description, preferring the server-supplied message.
    pub message: String,
    /// HTTP status code, absent for transport failures.
    pub status: Option<u16>,
    /// Machine-readable code: the server's error code, or `TIMEOUT` /
    /// `NETWORK_ERROR` for transport failures.
    pub code: Option<String>,
}

impl ApiClientError {
    /// Build from a server error envelope.
    pub(crate) fn from_server(status: u16, message: String, code: Option<String>) -> Self {
        Self {
            message,
            status: Some(status),
            code,
        }
    }

    /// Build from a transport-level failure.
    pub(crate) fn from_transport(err: &reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            Self {
                message: format!("Request timed out after {}s", timeout.as_secs()),
                status: None,
                code: Some("TIMEOUT".to_string()),
            }
        } else {
            Self {
                message: err.to_string(),
                status: None,
                code: Some("NETWORK_ERROR".to_string()),
            }
        }
    }

    /// Build from a local setup problem (bad base URL, client construction).
    pub(crate) fn setup(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
            code: Some("CLIENT_ERROR".to_string()),
        }
    }

    /// Whether this error came from the transport layer rather than the
    /// server.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        self.status.is_none()
    }

    /// Whether the request hit the client-side deadline.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        self.code.as_deref() == Some("TIMEOUT")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn server_error_keeps_status_and_code() {
        let err = ApiClientError::from_server(
            404,
            "Report not found".to_string(),
            Some("REPORT_NOT_FOUND".to_string()),
        );
        assert_eq!(err.status, Some(404));
        assert_eq!(err.code.as_deref(), Some("REPORT_NOT_FOUND"));
        assert!(!err.is_transport());
        assert!(!err.is_timeout());
        assert_eq!(err.to_string(), "Report not found");
    }

    #[test]
    fn setup_error_is_transport() {
        let err = ApiClientError::setup("bad base url");
        assert!(err.is_transport());
        assert_eq!(err.code.as_deref(), Some("CLIENT_ERROR"));
    }
}
