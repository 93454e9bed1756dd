use dynforce_client::Context;
use tracing::instrument;

use crate::error::Result;
use crate::types::SObjectMeta;

impl super::SalesforceRestClient {
    /// List every SObject available in the org (`sobjects`).
    #[instrument(skip(self, ctx))]
    pub async fn describe_global(&self, ctx: &Context) -> Result<SObjectMeta> {
        self.ensure_authenticated()?;
        self.client
            .rest_get(ctx, "sobjects")
            .await
            .map_err(Into::into)
    }

    /// Field and relationship metadata of one SObject type.
    #[instrument(skip(self, ctx))]
    pub async fn describe_sobject(&self, ctx: &Context, sobject_type: &str) -> Result<SObjectMeta> {
        self.ensure_authenticated()?;
        let url = self.sobject_url(&[sobject_type, "describe"]);
        self.client.get_json(ctx, &url).await.map_err(Into::into)
    }
}
