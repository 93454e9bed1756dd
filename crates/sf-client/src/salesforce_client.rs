//! High-level Salesforce client with typed HTTP methods.
//!
//! This module provides `SalesforceClient`, which combines a [`Session`] with
//! a [`Transport`] and turns every non-2xx answer into a unified
//! [`SalesforceError`].
//!
//! ## Security
//!
//! - Access tokens are redacted in Debug output
//! - Response bodies are sanitized before they are logged

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

use crate::client::SfHttpClient;
use crate::config::ClientConfig;
use crate::context::Context;
use crate::error::{Error, ErrorKind, Result};
use crate::fault::{sanitize_for_log, SalesforceError};
use crate::request::{RequestBuilder, RequestMethod};
use crate::response::Response;
use crate::session::Session;
use crate::transport::Transport;

/// Path prefix shared by every data API resource, including query
/// continuation URLs returned as `nextRecordsUrl`.
pub const DATA_PATH_PREFIX: &str = "/services/data";

/// Which API surface query requests are sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApiSurface {
    /// `/services/data/vXX.X/...`
    #[default]
    Rest,
    /// `/services/data/vXX.X/tooling/...`
    Tooling,
}

/// Low-level Salesforce API client.
///
/// Cloning is cheap: the transport is shared and the session is immutable.
/// Changing the API surface produces a new value instead of mutating shared
/// state, so a REST and a Tooling client can be used concurrently.
///
/// # Example
///
/// ```rust,ignore
/// use dynforce_client::{Context, SalesforceClient};
///
/// let client = SalesforceClient::new("https://myorg.my.salesforce.com", token)?;
/// let limits: serde_json::Value = client
///     .get_json(&Context::background(), &client.rest_url("limits"))
///     .await?;
/// ```
#[derive(Clone)]
pub struct SalesforceClient {
    transport: Arc<dyn Transport>,
    session: Session,
    surface: ApiSurface,
}

impl std::fmt::Debug for SalesforceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SalesforceClient")
            .field("session", &self.session)
            .field("surface", &self.surface)
            .finish_non_exhaustive()
    }
}

impl SalesforceClient {
    /// Create a new Salesforce client with the given instance URL and access token.
    pub fn new(instance_url: impl Into<String>, access_token: impl Into<String>) -> Result<Self> {
        Self::with_config(instance_url, access_token, ClientConfig::default())
    }

    /// Create a new Salesforce client with custom configuration.
    pub fn with_config(
        instance_url: impl Into<String>,
        access_token: impl Into<String>,
        config: ClientConfig,
    ) -> Result<Self> {
        let session = Session::new(instance_url, access_token)?;
        let http = SfHttpClient::new(config)?;
        Ok(Self::from_parts(session, Arc::new(http)))
    }

    /// Create a client from an existing session and any transport.
    pub fn from_parts(session: Session, transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            session,
            surface: ApiSurface::Rest,
        }
    }

    /// Set the API version (e.g., "62.0").
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.session = self.session.with_api_version(version);
        self
    }

    /// Return a client that sends queries to the given API surface.
    pub fn with_surface(mut self, surface: ApiSurface) -> Self {
        self.surface = surface;
        self
    }

    /// The API surface used for queries.
    pub fn surface(&self) -> ApiSurface {
        self.surface
    }

    /// The session this client authenticates with.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Get the instance URL.
    pub fn instance_url(&self) -> &str {
        self.session.instance_url()
    }

    /// Get the access token.
    pub fn access_token(&self) -> &str {
        self.session.access_token()
    }

    /// Get the API version.
    pub fn api_version(&self) -> &str {
        self.session.api_version()
    }

    /// Build the full URL for a path.
    ///
    /// If the path starts with `/`, it's appended to the instance URL.
    /// Otherwise, it's assumed to be a full URL.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else if path.starts_with('/') {
            format!("{}{}", self.instance_url(), path)
        } else {
            format!("{}/{}", self.instance_url(), path)
        }
    }

    /// Build the REST API URL for a path.
    ///
    /// Example: `rest_url("sobjects/Case")` -> `{instance}/services/data/v54.0/sobjects/Case`
    pub fn rest_url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        format!(
            "{}{}/v{}/{}",
            self.instance_url(),
            DATA_PATH_PREFIX,
            self.api_version(),
            path
        )
    }

    /// Build the Tooling API URL for a path.
    ///
    /// Example: `tooling_url("query")` -> `{instance}/services/data/v54.0/tooling/query`
    pub fn tooling_url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        self.rest_url(&format!("tooling/{path}"))
    }

    /// Build the query URL for a SOQL statement on the active API surface.
    pub fn query_url(&self, soql: &str) -> String {
        let path = format!("query?q={}", urlencoding::encode(soql));
        match self.surface {
            ApiSurface::Rest => self.rest_url(&path),
            ApiSurface::Tooling => self.tooling_url(&path),
        }
    }

    // =========================================================================
    // Base HTTP Methods (with authentication)
    // =========================================================================

    /// Create a request builder with authentication.
    pub fn request(&self, method: RequestMethod, url: &str) -> RequestBuilder {
        RequestBuilder::new(method, self.url(url)).bearer_auth(self.access_token())
    }

    /// Create a GET request builder with authentication.
    pub fn get(&self, url: &str) -> RequestBuilder {
        self.request(RequestMethod::Get, url)
    }

    /// Create a POST request builder with authentication.
    pub fn post(&self, url: &str) -> RequestBuilder {
        self.request(RequestMethod::Post, url)
    }

    /// Create a PATCH request builder with authentication.
    pub fn patch(&self, url: &str) -> RequestBuilder {
        self.request(RequestMethod::Patch, url)
    }

    /// Create a DELETE request builder with authentication.
    pub fn delete(&self, url: &str) -> RequestBuilder {
        self.request(RequestMethod::Delete, url)
    }

    /// Send a request and classify the answer.
    ///
    /// A 2xx response is returned as-is. Anything else becomes
    /// [`ErrorKind::Salesforce`] via [`SalesforceError::from_response`].
    #[instrument(skip(self, ctx, request), fields(method = %request.method(), url = %request.url()))]
    pub async fn execute(&self, ctx: &Context, request: RequestBuilder) -> Result<Response> {
        let response = self.transport.send(request, ctx).await?;
        if response.is_success() {
            return Ok(response);
        }

        let fault = SalesforceError::from_response(response.status(), response.body());
        warn!(
            status = fault.http_status(),
            error_code = fault.error_code(),
            body = %sanitize_for_log(&String::from_utf8_lossy(response.body())),
            "Salesforce request failed"
        );
        Err(Error::new(ErrorKind::Salesforce(fault)))
    }

    // =========================================================================
    // Typed JSON Methods
    // =========================================================================

    /// GET request with JSON response deserialization.
    pub async fn get_json<T: DeserializeOwned>(&self, ctx: &Context, url: &str) -> Result<T> {
        self.execute(ctx, self.get(url)).await?.json()
    }

    /// GET request to REST API with JSON response.
    pub async fn rest_get<T: DeserializeOwned>(&self, ctx: &Context, path: &str) -> Result<T> {
        self.get_json(ctx, &self.rest_url(path)).await
    }

    /// POST request with JSON body and response.
    pub async fn post_json<T: DeserializeOwned, B: Serialize>(
        &self,
        ctx: &Context,
        url: &str,
        body: &B,
    ) -> Result<T> {
        let request = self.post(url).json(body)?;
        self.execute(ctx, request).await?.json()
    }

    /// PATCH request with JSON body. Returns the raw response, which is
    /// usually empty (204 No Content).
    pub async fn patch_json<B: Serialize>(
        &self,
        ctx: &Context,
        url: &str,
        body: &B,
    ) -> Result<Response> {
        let request = self.patch(url).json(body)?;
        self.execute(ctx, request).await
    }

    /// DELETE request.
    pub async fn delete_request(&self, ctx: &Context, url: &str) -> Result<()> {
        self.execute(ctx, self.delete(url)).await.map(|_| ())
    }
}

/// One page of a SOQL query.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QueryResult<T> {
    /// Total number of records matching the query.
    #[serde(rename = "totalSize")]
    pub total_size: u64,

    /// Whether all records are returned (no more pages).
    pub done: bool,

    /// URL to fetch next batch of results.
    #[serde(
        rename = "nextRecordsUrl",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub next_records_url: Option<String>,

    /// The records.
    #[serde(default = "Vec::new")]
    pub records: Vec<T>,
}

impl<T> QueryResult<T> {
    /// Transform every record of the page.
    pub fn map_records<U>(self, f: impl FnMut(T) -> U) -> QueryResult<U> {
        QueryResult {
            total_size: self.total_size,
            done: self.done,
            next_records_url: self.next_records_url,
            records: self.records.into_iter().map(f).collect(),
        }
    }
}
