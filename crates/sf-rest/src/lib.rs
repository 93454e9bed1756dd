//! # dynforce-rest
//!
//! Schema-less Salesforce records over the REST and Tooling APIs.
//!
//! ## Features
//!
//! - **SObject** - Dynamic records with typed, never-failing field accessors
//!   and relationship navigation
//! - **CRUD** - Get, Create, Update, Upsert (by external id), Delete
//! - **SOQL Query** - One page per call, with continuation URLs for the rest
//! - **Tooling API** - Query metadata objects and run anonymous Apex
//! - **Describe** - Global and per-type metadata
//! - **Apex REST** - Call custom endpoints
//!
//! ## Example
//!
//! ```rust,ignore
//! use dynforce_rest::{Context, SalesforceRestClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), dynforce_rest::Error> {
//!     let client = SalesforceRestClient::new(
//!         "https://myorg.my.salesforce.com",
//!         "access_token_here",
//!     )?;
//!     let ctx = Context::background();
//!
//!     // Create
//!     let case = client
//!         .sobject("Case")
//!         .set("Subject", "Printer on fire")
//!         .create(&ctx)
//!         .await?;
//!
//!     // Query, page by page
//!     let mut page = client.query(&ctx, "SELECT Id, Subject FROM Case").await?;
//!     loop {
//!         for record in &page.records {
//!             println!("{} {}", record.id().unwrap_or_default(), record.string_field("Subject"));
//!         }
//!         match page.next_records_url.as_deref() {
//!             Some(next) if !page.done => page = client.query(&ctx, next).await?,
//!             _ => break,
//!         }
//!     }
//!
//!     // Delete
//!     case.delete(&ctx).await?;
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod sobject;
mod types;

// Main client
pub use client::SalesforceRestClient;

// Records
pub use sobject::{SObject, SObjectAttributes, ATTRIBUTES_KEY, ID_FIELD};

// Error types
pub use error::{Error, ErrorKind, Result};

// Response payloads
pub use types::{CreateResult, ExecuteAnonymousResult, OperationError, SObjectMeta, UpsertResult};

// Re-export dynforce-client types that users might need
pub use dynforce_client::{
    ClientConfig, ClientConfigBuilder, CancelHandle, Context, QueryResult, RequestMethod,
    SalesforceError, Session,
};
