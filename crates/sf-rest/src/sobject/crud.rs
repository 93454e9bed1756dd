//! Get, create, update, upsert, delete and describe for a single record.
//!
//! Preconditions (client, type, id, external id) are checked locally and fail
//! before any request is built. A failed call never mutates the record it
//! was called on; successful calls return a new record value.

use dynforce_client::{Context, SalesforceError};
use tracing::{debug, instrument};

use super::SObject;
use crate::client::SalesforceRestClient;
use crate::error::{Error, ErrorKind, Result};
use crate::types::{CreateResult, OperationError, SObjectMeta, UpsertResult};

impl SObject {
    /// Client and type, or the precondition error.
    fn target(&self) -> Result<(&SalesforceRestClient, &str)> {
        let sobject_type = self.sobject_type();
        match &self.client {
            Some(client) if !sobject_type.is_empty() => {
                client.ensure_authenticated()?;
                Ok((client, sobject_type))
            }
            _ => Err(Error::new(ErrorKind::NoTypeIdClientOrId)),
        }
    }

    /// Client, type and id, or the precondition error.
    fn addressed_target(&self) -> Result<(&SalesforceRestClient, &str, &str)> {
        let (client, sobject_type) = self.target()?;
        let id = self
            .id()
            .ok_or_else(|| Error::new(ErrorKind::NoTypeIdClientOrId))?;
        Ok((client, sobject_type, id))
    }

    /// Fetch the record.
    ///
    /// `id` takes priority over the id stored on this record. The result is a
    /// fresh record bound to the same client.
    #[instrument(skip(self, ctx), fields(sobject = %self.sobject_type()))]
    pub async fn get(&self, ctx: &Context, id: Option<&str>) -> Result<SObject> {
        let (client, sobject_type) = self.target()?;
        let id = id
            .filter(|id| !id.is_empty())
            .or_else(|| self.id())
            .ok_or_else(|| Error::new(ErrorKind::NoTypeIdClientOrId))?;

        let url = client.sobject_url(&[sobject_type, id]);
        let mut record: SObject = client.inner().get_json(ctx, &url).await?;

        if record.sobject_type().is_empty() {
            record.set_type(sobject_type);
        }
        record.external_id_field = self.external_id_field.clone();
        record.bind(client);
        Ok(record)
    }

    /// Create the record.
    ///
    /// Sends every data field except `Id`. Returns a copy of this record with
    /// the new id set; other server-side defaults are not fetched.
    #[instrument(skip(self, ctx), fields(sobject = %self.sobject_type()))]
    pub async fn create(&self, ctx: &Context) -> Result<SObject> {
        let (client, sobject_type) = self.target()?;
        let url = client.sobject_url(&[sobject_type]);

        let request = client.inner().post(&url).json_value(self.payload(None));
        let response = client.inner().execute(ctx, request).await?;
        let result: CreateResult = response.json()?;

        if !result.success || result.id.is_empty() {
            return Err(rejected(response.status(), &result.errors));
        }

        debug!(id = %result.id, "Record created");
        let mut created = self.clone();
        created.set_id(result.id);
        Ok(created)
    }

    /// Update the record from its data fields.
    #[instrument(skip(self, ctx), fields(sobject = %self.sobject_type()))]
    pub async fn update(&self, ctx: &Context) -> Result<SObject> {
        let (client, sobject_type, id) = self.addressed_target()?;
        let url = client.sobject_url(&[sobject_type, id]);

        client
            .inner()
            .patch_json(ctx, &url, &self.payload(None))
            .await?;
        Ok(self.clone())
    }

    /// Insert or update by external id.
    ///
    /// Requires [`SObject::with_external_id_field`] and a value for that
    /// field. When the server creates a record the returned copy carries the
    /// new id; when it updates one (204) the existing id, if any, is kept.
    #[instrument(skip(self, ctx), fields(sobject = %self.sobject_type()))]
    pub async fn upsert(&self, ctx: &Context) -> Result<SObject> {
        let (client, sobject_type) = self.target()?;
        let field = self.external_id_field_name().ok_or_else(|| {
            Error::new(ErrorKind::MissingExternalId(
                "no external id field set on record".to_string(),
            ))
        })?;
        let value = self.external_id().ok_or_else(|| {
            Error::new(ErrorKind::MissingExternalId(format!(
                "field {field} has no value"
            )))
        })?;

        let url = client.sobject_url(&[sobject_type, field, value.as_str()]);
        let response = client
            .inner()
            .patch_json(ctx, &url, &self.payload(Some(field)))
            .await?;

        let mut upserted = self.clone();
        if !response.is_empty() {
            let result: UpsertResult = response.json()?;
            if !result.success {
                return Err(rejected(response.status(), &result.errors));
            }
            debug!(id = %result.id, created = result.created, "Record upserted");
            if !result.id.is_empty() {
                upserted.set_id(result.id);
            }
        }
        Ok(upserted)
    }

    /// Delete the record.
    ///
    /// Deleting an id that no longer exists fails with a not-found error.
    #[instrument(skip(self, ctx), fields(sobject = %self.sobject_type()))]
    pub async fn delete(&self, ctx: &Context) -> Result<()> {
        let (client, sobject_type, id) = self.addressed_target()?;
        let url = client.sobject_url(&[sobject_type, id]);
        client.inner().delete_request(ctx, &url).await?;
        Ok(())
    }

    /// Describe this record's type.
    #[instrument(skip(self, ctx), fields(sobject = %self.sobject_type()))]
    pub async fn describe(&self, ctx: &Context) -> Result<SObjectMeta> {
        let (client, sobject_type) = self.target()?;
        client.describe_sobject(ctx, sobject_type).await
    }
}

/// A 2xx answer that reported `success: false`.
fn rejected(status: u16, errors: &[OperationError]) -> Error {
    let code = errors
        .first()
        .map(|e| e.status_code.as_str())
        .unwrap_or_default();
    let message = if errors.is_empty() {
        "operation reported success=false".to_string()
    } else {
        errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ")
    };
    Error::new(ErrorKind::Salesforce(SalesforceError::from_parts(
        status, code, message,
    )))
}
