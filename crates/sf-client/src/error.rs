//! Error types for sf-client.

use crate::fault::SalesforceError;

/// Result type alias for sf-client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for sf-client operations.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional source error.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    /// Create a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// Create a new error with the given kind and source.
    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
        }
    }

    /// Returns the unified Salesforce error if the server answered with a
    /// non-success status.
    pub fn salesforce_error(&self) -> Option<&SalesforceError> {
        match &self.kind {
            ErrorKind::Salesforce(err) => Some(err),
            _ => None,
        }
    }

    /// HTTP status of the failed exchange, if a response was received.
    pub fn status(&self) -> Option<u16> {
        self.salesforce_error().map(SalesforceError::http_status)
    }

    /// Returns true if the server reported the resource as missing (HTTP 404).
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Returns true if no usable response was received.
    pub fn is_transport(&self) -> bool {
        self.kind.is_transport()
    }

    /// Returns true if the request was aborted by its context.
    pub fn is_cancelled(&self) -> bool {
        matches!(self.kind, ErrorKind::Cancelled)
    }
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// The server answered with a non-2xx status.
    #[error("{0}")]
    Salesforce(SalesforceError),

    /// Request timeout or context deadline exceeded.
    #[error("Request timeout")]
    Timeout,

    /// The request was cancelled through its context.
    #[error("Request cancelled")]
    Cancelled,

    /// Connection error.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Any other failure that left us without a response.
    #[error("Transport error: {0}")]
    Transport(String),

    /// A success response whose body could not be decoded.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Request body serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ErrorKind {
    /// Returns true for failures that happened before a response arrived.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ErrorKind::Timeout
                | ErrorKind::Cancelled
                | ErrorKind::Connection(_)
                | ErrorKind::Transport(_)
        )
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            ErrorKind::Timeout
        } else if err.is_connect() {
            ErrorKind::Connection(err.to_string())
        } else if err.is_builder() {
            ErrorKind::InvalidUrl(err.to_string())
        } else {
            ErrorKind::Transport(err.to_string())
        };

        Error::with_source(kind, err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::with_source(ErrorKind::Decode(err.to_string()), err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::with_source(ErrorKind::InvalidUrl(err.to_string()), err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_display_messages() {
        let cases: Vec<(ErrorKind, &str)> = vec![
            (ErrorKind::Timeout, "Request timeout"),
            (ErrorKind::Cancelled, "Request cancelled"),
            (
                ErrorKind::Connection("refused".into()),
                "Connection error: refused",
            ),
            (
                ErrorKind::Transport("reset by peer".into()),
                "Transport error: reset by peer",
            ),
            (
                ErrorKind::Decode("unexpected EOF".into()),
                "Decode error: unexpected EOF",
            ),
            (
                ErrorKind::InvalidUrl("no scheme".into()),
                "Invalid URL: no scheme",
            ),
            (
                ErrorKind::Config("missing field".into()),
                "Configuration error: missing field",
            ),
        ];

        for (kind, expected_substring) in cases {
            let display = kind.to_string();
            assert!(
                display.contains(expected_substring),
                "Expected '{display}' to contain '{expected_substring}'"
            );
        }
    }

    #[test]
    fn test_transport_classification() {
        assert!(Error::new(ErrorKind::Timeout).is_transport());
        assert!(Error::new(ErrorKind::Cancelled).is_transport());
        assert!(Error::new(ErrorKind::Connection("x".into())).is_transport());
        assert!(!Error::new(ErrorKind::Decode("x".into())).is_transport());

        let protocol = Error::new(ErrorKind::Salesforce(SalesforceError::from_response(
            404,
            b"[{\"message\":\"gone\",\"errorCode\":\"NOT_FOUND\"}]",
        )));
        assert!(!protocol.is_transport());
        assert!(protocol.is_not_found());
        assert_eq!(protocol.status(), Some(404));
    }

    #[test]
    fn test_protocol_error_keeps_transport_source() {
        let source_err = std::io::Error::other("connection reset while reading body");
        let err = Error::with_source(
            ErrorKind::Salesforce(SalesforceError::from_response(502, b"")),
            source_err,
        );

        assert!(err.source.is_some());
        assert_eq!(err.status(), Some(502));
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<String>("not valid json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err.kind, ErrorKind::Decode(_)));
        assert!(err.source.is_some());
    }

    #[test]
    fn test_from_url_parse_error() {
        let url_err = url::Url::parse("not a url").unwrap_err();
        let err: Error = url_err.into();
        assert!(matches!(err.kind, ErrorKind::InvalidUrl(_)));
    }
}
