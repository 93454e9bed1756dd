use bytes::Bytes;
use dynforce_client::{Context, RequestMethod};
use tracing::{debug, instrument};

use crate::error::Result;
use crate::types::ExecuteAnonymousResult;

impl super::SalesforceRestClient {
    /// Call a custom Apex REST endpoint.
    ///
    /// `path` is relative to the instance URL, e.g. `services/apexrest/orders`.
    /// The body, if any, is sent as JSON text; the raw response body is
    /// returned for the caller to decode.
    #[instrument(skip(self, ctx, body))]
    pub async fn apex_rest(
        &self,
        ctx: &Context,
        method: RequestMethod,
        path: &str,
        body: Option<String>,
    ) -> Result<Bytes> {
        self.ensure_authenticated()?;

        let mut request = self
            .client
            .request(method, path)
            .header("Content-Type", "application/json");
        if let Some(body) = body {
            request = request.json_text(body);
        }

        let response = self.client.execute(ctx, request).await?;
        Ok(response.into_body())
    }

    /// Run anonymous Apex through the Tooling API.
    ///
    /// Compilation and runtime failures are reported in the returned result,
    /// not as an error.
    #[instrument(skip(self, ctx, apex_body))]
    pub async fn execute_anonymous(
        &self,
        ctx: &Context,
        apex_body: &str,
    ) -> Result<ExecuteAnonymousResult> {
        self.ensure_authenticated()?;

        let url = self.client.tooling_url(&format!(
            "executeAnonymous/?anonymousBody={}",
            urlencoding::encode(apex_body)
        ));
        let result: ExecuteAnonymousResult = self.client.get_json(ctx, &url).await?;
        debug!(
            compiled = result.compiled,
            success = result.success,
            "Anonymous Apex executed"
        );
        Ok(result)
    }
}
