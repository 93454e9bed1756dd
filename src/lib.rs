//! # dynforce
//!
//! Dynamic record client for the Salesforce REST and Tooling APIs.
//!
//! Records are schema-less: fields are read and written by name, and
//! relationships are followed at runtime. Every record returned by the
//! client stays bound to it, so follow-up CRUD calls need no extra setup.
//!
//! ## Security
//!
//! - Access tokens are redacted in Debug output
//! - Tracing skips contexts and request bodies
//! - Logged error bodies are sanitized and truncated
//!
//! ## Crates
//!
//! - **dynforce-client** - Session, cancellation context, transport, unified error decoding
//! - **dynforce-rest** - Records, CRUD, SOQL/Tooling query, describe, Apex helpers
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use dynforce::{Context, SalesforceRestClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = SalesforceRestClient::new(
//!         std::env::var("SF_INSTANCE_URL")?,
//!         std::env::var("SF_ACCESS_TOKEN")?,
//!     )?;
//!     let ctx = Context::with_timeout(std::time::Duration::from_secs(30));
//!
//!     let page = client.query(&ctx, "SELECT Id, Subject, ParentId FROM Case LIMIT 10").await?;
//!     for case in &page.records {
//!         println!("{}", case.string_field("Subject"));
//!         if let Some(parent) = case.related_record("Case", "ParentId") {
//!             let parent = parent.get(&ctx, None).await?;
//!             println!("  parent: {}", parent.string_field("Subject"));
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```

// Re-export all crates for convenient access
pub use dynforce_client as client;
pub use dynforce_rest as rest;

// Re-export commonly used types at the top level
pub use dynforce_client::{
    ClientConfig, Context, QueryResult, SalesforceClient, SalesforceError, Session,
};
pub use dynforce_rest::{Error, ErrorKind, Result, SObject, SalesforceRestClient};

/// Field values are plain JSON values.
pub use serde_json::{json, Value};
