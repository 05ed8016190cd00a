//! Face++ client error types.

use thiserror::Error;

/// Face++ throttles with HTTP 403 and this error message.
pub const CONCURRENCY_LIMIT_EXCEEDED: &str = "CONCURRENCY_LIMIT_EXCEEDED";

pub type FaceppResult<T> = Result<T, FaceppError>;

#[derive(Debug, Error)]
pub enum FaceppError {
    #[error("Face++ service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout after {0} seconds")]
    Timeout(u64),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl FaceppError {
    /// Map a non-success HTTP status to an error.
    pub fn from_http_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        let throttled = status == 403 && message.starts_with(CONCURRENCY_LIMIT_EXCEEDED);
        match status {
            429 | 500..=599 => Self::ServiceUnavailable(format!("HTTP {}: {}", status, message)),
            _ if throttled => Self::ServiceUnavailable(format!("HTTP {}: {}", status, message)),
            _ => Self::RequestFailed(format!("HTTP {}: {}", status, message)),
        }
    }

    pub fn is_timeout(&self) -> bool {
        match self {
            FaceppError::Timeout(_) => true,
            FaceppError::Network(e) => e.is_timeout(),
            _ => false,
        }
    }

    /// True when the service could not be reached or refused to serve.
    pub fn is_transport(&self) -> bool {
        match self {
            FaceppError::ServiceUnavailable(_) => true,
            FaceppError::Network(e) => !e.is_timeout() && (e.is_connect() || e.is_request()),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_http_status() {
        assert!(matches!(
            FaceppError::from_http_status(503, "down"),
            FaceppError::ServiceUnavailable(_)
        ));
        assert!(matches!(
            FaceppError::from_http_status(429, "Too Many Requests"),
            FaceppError::ServiceUnavailable(_)
        ));
        assert!(matches!(
            FaceppError::from_http_status(403, CONCURRENCY_LIMIT_EXCEEDED),
            FaceppError::ServiceUnavailable(_)
        ));
        assert!(matches!(
            FaceppError::from_http_status(403, "AUTHENTICATION_ERROR"),
            FaceppError::RequestFailed(_)
        ));
        assert!(matches!(
            FaceppError::from_http_status(400, "INVALID_IMAGE_SIZE"),
            FaceppError::RequestFailed(_)
        ));
    }

    #[test]
    fn test_classification() {
        assert!(FaceppError::Timeout(30).is_timeout());
        assert!(!FaceppError::Timeout(30).is_transport());
        assert!(FaceppError::ServiceUnavailable("x".into()).is_transport());
        assert!(!FaceppError::RequestFailed("x".into()).is_transport());
        assert!(!FaceppError::InvalidResponse("x".into()).is_timeout());
    }
}
