//! Salesforce REST API client.
//!
//! This client wraps `SalesforceClient` from `dynforce-client` and is the
//! factory for live [`SObject`] records. Query, describe and Apex helpers
//! live in the submodules.

use std::sync::Arc;

use dynforce_client::{
    ApiSurface, ClientConfig, SalesforceClient, Session, SfHttpClient, Transport,
};

use crate::error::{Error, ErrorKind, Result};
use crate::sobject::SObject;

mod apex;
mod describe;
mod query;

/// Salesforce REST API client.
///
/// Cloning is cheap and every record produced by this client holds a clone,
/// so records stay usable for follow-up CRUD calls without re-authenticating.
///
/// # Example
///
/// ```rust,ignore
/// use dynforce_rest::{Context, SalesforceRestClient};
///
/// let client = SalesforceRestClient::new(
///     "https://myorg.my.salesforce.com",
///     "access_token_here",
/// )?;
/// let ctx = Context::background();
///
/// // Query
/// let page = client.query(&ctx, "SELECT Id, Subject FROM Case LIMIT 10").await?;
///
/// // Create
/// let case = client.sobject("Case").set("Subject", "New").create(&ctx).await?;
///
/// // Update
/// let case = case.set("Subject", "Updated").update(&ctx).await?;
///
/// // Delete
/// case.delete(&ctx).await?;
/// ```
#[derive(Debug, Clone)]
pub struct SalesforceRestClient {
    client: SalesforceClient,
}

impl SalesforceRestClient {
    /// Create a new REST client with the given instance URL and access token.
    pub fn new(instance_url: impl Into<String>, access_token: impl Into<String>) -> Result<Self> {
        let client = SalesforceClient::new(instance_url, access_token)?;
        Ok(Self { client })
    }

    /// Create a new REST client with custom HTTP configuration.
    pub fn with_config(
        instance_url: impl Into<String>,
        access_token: impl Into<String>,
        config: ClientConfig,
    ) -> Result<Self> {
        let client = SalesforceClient::with_config(instance_url, access_token, config)?;
        Ok(Self { client })
    }

    /// Create a REST client for a session obtained elsewhere (OAuth, CLI, SOAP login).
    pub fn with_session(session: Session) -> Result<Self> {
        let http = SfHttpClient::default_client()?;
        Ok(Self::with_transport(session, Arc::new(http)))
    }

    /// Create a REST client that sends requests through `transport`.
    pub fn with_transport(session: Session, transport: Arc<dyn Transport>) -> Self {
        Self::from_client(SalesforceClient::from_parts(session, transport))
    }

    /// Create a REST client from an existing SalesforceClient.
    pub fn from_client(client: SalesforceClient) -> Self {
        Self { client }
    }

    /// Get the underlying SalesforceClient.
    pub fn inner(&self) -> &SalesforceClient {
        &self.client
    }

    /// The session this client authenticates with.
    pub fn session(&self) -> &Session {
        self.client.session()
    }

    /// Get the instance URL.
    pub fn instance_url(&self) -> &str {
        self.client.instance_url()
    }

    /// Get the access token.
    pub fn access_token(&self) -> &str {
        self.client.access_token()
    }

    /// Get the API version.
    pub fn api_version(&self) -> &str {
        self.client.api_version()
    }

    /// Set the API version.
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.client = self.client.with_api_version(version);
        self
    }

    /// An empty record of `sobject_type` bound to this client.
    pub fn sobject(&self, sobject_type: impl Into<String>) -> SObject {
        SObject::new()
            .with_type(sobject_type)
            .with_client(self.clone())
    }

    // =========================================================================
    // API surface
    // =========================================================================

    /// A client whose queries go to the Tooling API.
    ///
    /// Returns a new value; `self` keeps querying the REST API.
    pub fn tooling(&self) -> Self {
        Self::from_client(self.client.clone().with_surface(ApiSurface::Tooling))
    }

    /// A client whose queries go to the REST API.
    pub fn untooling(&self) -> Self {
        Self::from_client(self.client.clone().with_surface(ApiSurface::Rest))
    }

    /// True if queries go to the Tooling API.
    pub fn is_tooling(&self) -> bool {
        self.client.surface() == ApiSurface::Tooling
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    /// Fail with [`ErrorKind::NotAuthenticated`] if the session holds no token.
    pub(crate) fn ensure_authenticated(&self) -> Result<()> {
        if self.client.session().is_authenticated() {
            Ok(())
        } else {
            Err(Error::new(ErrorKind::NotAuthenticated))
        }
    }

    /// `{instance}/services/data/v{version}/sobjects/{segment}/...`, each
    /// segment percent-encoded.
    pub(crate) fn sobject_url(&self, segments: &[&str]) -> String {
        let path = segments
            .iter()
            .map(|segment| urlencoding::encode(segment))
            .collect::<Vec<_>>()
            .join("/");
        self.client.rest_url(&format!("sobjects/{path}"))
    }
}
