//! Error types for sf-rest.

use dynforce_client::SalesforceError;

/// Result type alias for sf-rest operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for record, query and describe operations.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    pub kind: ErrorKind,
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// True for failures detected locally before any request was sent.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::NoTypeIdClientOrId
                | ErrorKind::MissingExternalId(_)
                | ErrorKind::NotAuthenticated
        )
    }

    /// The unified Salesforce error, if the server answered with a non-2xx status.
    pub fn salesforce_error(&self) -> Option<&SalesforceError> {
        match &self.kind {
            ErrorKind::Salesforce(err) => Some(err),
            _ => None,
        }
    }

    /// HTTP status of a protocol failure.
    pub fn status(&self) -> Option<u16> {
        self.salesforce_error().map(SalesforceError::http_status)
    }

    /// True if the server reported that the resource does not exist.
    pub fn is_not_found(&self) -> bool {
        self.salesforce_error()
            .is_some_and(SalesforceError::is_not_found)
    }

    /// True if the call was aborted through its context.
    pub fn is_cancelled(&self) -> bool {
        self.client_error()
            .is_some_and(dynforce_client::Error::is_cancelled)
    }

    fn client_error(&self) -> Option<&dynforce_client::Error> {
        self.source
            .as_deref()
            .and_then(|source| source.downcast_ref::<dynforce_client::Error>())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// The record has no client binding, no type, or (where required) no id.
    #[error("sObject has no type id, client or id")]
    NoTypeIdClientOrId,

    /// Upsert needs an external id field name and a value for it.
    #[error("missing external id: {0}")]
    MissingExternalId(String),

    #[error("not authenticated: the session holds no access token")]
    NotAuthenticated,

    #[error("{0}")]
    Salesforce(SalesforceError),

    /// A successful response whose body could not be decoded.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Connection failure, timeout or cancellation.
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("{0}")]
    Other(String),
}

impl From<dynforce_client::Error> for Error {
    fn from(err: dynforce_client::Error) -> Self {
        use dynforce_client::ErrorKind as ClientKind;

        let kind = match &err.kind {
            ClientKind::Salesforce(fault) => ErrorKind::Salesforce(fault.clone()),
            ClientKind::Decode(msg) => ErrorKind::Decode(msg.clone()),
            kind if kind.is_transport() => ErrorKind::Transport(kind.to_string()),
            kind => ErrorKind::Other(kind.to_string()),
        };
        Error {
            kind,
            source: Some(Box::new(err)),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error {
            kind: ErrorKind::Decode(err.to_string()),
            source: Some(Box::new(err)),
        }
    }
}
