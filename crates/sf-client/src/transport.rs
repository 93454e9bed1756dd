//! The request/response capability the rest of the crate is written against.

use async_trait::async_trait;

use crate::context::Context;
use crate::error::Result;
use crate::request::RequestBuilder;
use crate::response::Response;

/// Sends one HTTP request and returns the buffered response.
///
/// Implementations must:
/// - return `Ok` with the full body for every status code, including non-2xx;
/// - honor `ctx`, aborting with a cancellation or timeout error;
/// - send exactly one request (no retries).
#[async_trait]
pub trait Transport: Send + Sync + std::fmt::Debug {
    async fn send(&self, request: RequestBuilder, ctx: &Context) -> Result<Response>;
}
