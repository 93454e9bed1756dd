//! # dynforce-client
//!
//! Core HTTP client infrastructure for the Salesforce data APIs.
//!
//! This crate provides:
//! - A [`Transport`] seam with a reqwest implementation ([`SfHttpClient`])
//! - Compression support (gzip, deflate) and connection pooling
//! - Per-call deadlines and cancellation through [`Context`]
//! - A single [`SalesforceError`] shape for every failed response, whether
//!   the body was a JSON error array, a SOAP fault or plain text
//! - Request/response tracing with sanitized bodies
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Application Layer                        │
//! │  (dynforce-rest: records, CRUD, queries)                    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   SalesforceClient                          │
//! │  - Holds the session + a shared transport                   │
//! │  - Builds REST/Tooling URLs                                 │
//! │  - Turns non-2xx answers into SalesforceError               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 Transport (SfHttpClient)                    │
//! │  - One request, one buffered response                       │
//! │  - Honors Context deadline / cancellation                   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use dynforce_client::{Context, SalesforceClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), dynforce_client::Error> {
//!     let client = SalesforceClient::new("https://myorg.my.salesforce.com", token)?;
//!
//!     let limits: serde_json::Value = client
//!         .rest_get(&Context::background(), "limits")
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod context;
mod error;
mod fault;
mod request;
mod response;
mod salesforce_client;
mod session;
mod transport;

pub use client::SfHttpClient;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use context::{CancelHandle, Context};
pub use error::{Error, ErrorKind, Result};
pub use fault::SalesforceError;
pub use request::{RequestBody, RequestBuilder, RequestMethod};
pub use response::Response;
pub use salesforce_client::{ApiSurface, QueryResult, SalesforceClient, DATA_PATH_PREFIX};
pub use session::Session;
pub use transport::Transport;

/// Default Salesforce API version.
pub const DEFAULT_API_VERSION: &str = "54.0";

/// User-Agent sent with every request.
pub const USER_AGENT: &str = concat!("dynforce/", env!("CARGO_PKG_VERSION"));
