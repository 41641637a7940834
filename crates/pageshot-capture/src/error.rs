//! Capture Error Types

use thiserror::Error;

pub type CaptureResult<T> = Result<T, CaptureError>;

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("Element not found for selector: {0}")]
    ElementNotFound(String),

    #[error("Network error: Internet disconnected: {0}")]
    NetworkUnreachable(String),

    #[error("Network error: Domain name not resolved: {0}")]
    DnsResolutionFailure(String),

    #[error("Network error: Connection timed out: {0}")]
    ConnectionTimeout(String),

    #[error("Image encoding failed: {0}")]
    Encoding(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Chrome browser error: {0}")]
    Browser(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request failed: {0}")]
    HttpRequest(String),

    #[error("Capture provider not configured")]
    ProviderNotConfigured,

    #[error("Screenshot capture failed: {0}")]
    CaptureFailed(String),
}

impl CaptureError {
    /// Classify a navigation failure reported by the browser driver.
    ///
    /// headless_chrome surfaces navigation failures as strings rather than
    /// structured net-error kinds, so this keys on the Chrome net-error code
    /// embedded in the message. Anything unrecognized stays a plain browser
    /// error with the message preserved verbatim.
    pub fn classify_navigation(message: String) -> Self {
        if message.contains("net::ERR_INTERNET_DISCONNECTED") {
            CaptureError::NetworkUnreachable(message)
        } else if message.contains("ERR_NAME_NOT_RESOLVED") {
            CaptureError::DnsResolutionFailure(message)
        } else if message.contains("ERR_CONNECTION_TIMED_OUT") {
            CaptureError::ConnectionTimeout(message)
        } else {
            CaptureError::Browser(message)
        }
    }

    /// Short category name used in failure logs
    pub fn category(&self) -> &'static str {
        match self {
            CaptureError::ElementNotFound(_) => "element-not-found",
            CaptureError::NetworkUnreachable(_) => "network-unreachable",
            CaptureError::DnsResolutionFailure(_) => "dns-resolution-failure",
            CaptureError::ConnectionTimeout(_) => "connection-timeout",
            CaptureError::Encoding(_) => "encoding",
            CaptureError::InvalidUrl(_) => "invalid-url",
            CaptureError::Browser(_) => "browser",
            CaptureError::Io(_) => "io",
            CaptureError::HttpRequest(_) => "http-request",
            CaptureError::ProviderNotConfigured => "provider-not-configured",
            CaptureError::CaptureFailed(_) => "capture-failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_internet_disconnected() {
        let err = CaptureError::classify_navigation(
            "navigation failed: net::ERR_INTERNET_DISCONNECTED".to_string(),
        );
        assert!(matches!(err, CaptureError::NetworkUnreachable(_)));
    }

    #[test]
    fn test_classify_name_not_resolved() {
        let err = CaptureError::classify_navigation(
            "navigation failed: net::ERR_NAME_NOT_RESOLVED".to_string(),
        );
        assert!(matches!(err, CaptureError::DnsResolutionFailure(_)));
    }

    #[test]
    fn test_classify_connection_timed_out() {
        let err = CaptureError::classify_navigation(
            "navigation failed: net::ERR_CONNECTION_TIMED_OUT".to_string(),
        );
        assert!(matches!(err, CaptureError::ConnectionTimeout(_)));
    }

    #[test]
    fn test_classify_unknown_preserves_message() {
        let err = CaptureError::classify_navigation("something odd happened".to_string());
        match err {
            CaptureError::Browser(msg) => assert_eq!(msg, "something odd happened"),
            other => panic!("Expected Browser error, got: {:?}", other),
        }
    }

    #[test]
    fn test_error_display() {
        let error = CaptureError::InvalidUrl("test".to_string());
        assert!(format!("{}", error).contains("Invalid URL"));

        let error = CaptureError::ElementNotFound("#missing".to_string());
        assert!(format!("{}", error).contains("#missing"));

        let error = CaptureError::ProviderNotConfigured;
        assert!(format!("{}", error).contains("not configured"));
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(
            CaptureError::ElementNotFound("#x".to_string()).category(),
            "element-not-found"
        );
        assert_eq!(
            CaptureError::classify_navigation("net::ERR_NAME_NOT_RESOLVED".to_string()).category(),
            "dns-resolution-failure"
        );
    }
}
