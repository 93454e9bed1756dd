//! Schema-less Salesforce records.
//!
//! An [`SObject`] is a bag of JSON fields plus the out-of-band state needed to
//! act on it remotely: the `attributes` block (type and resource URL), an
//! optional client handle and an optional external id field name used by
//! upsert. Only the fields are sent to the server.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::client::SalesforceRestClient;

mod crud;

/// Field holding the record id.
pub const ID_FIELD: &str = "Id";

/// Reserved key carrying the record's type and URL.
pub const ATTRIBUTES_KEY: &str = "attributes";

/// The `attributes` block of a record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SObjectAttributes {
    /// SObject type name, e.g. `Case`.
    #[serde(rename = "type", default)]
    pub sobject_type: String,

    /// Resource path of the record, e.g. `/services/data/v54.0/sobjects/Case/500...`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// A Salesforce record whose fields are only known at runtime.
///
/// Records produced by [`SalesforceRestClient::sobject`], by a query, or by a
/// CRUD call are *live*: they hold a client handle and can be fetched,
/// created, updated, upserted or deleted. A record built literally with
/// [`SObject::new`] fails every network operation until a client is attached
/// with [`SObject::with_client`].
///
/// Typed accessors never fail. An absent field or a value of another shape
/// yields the zero value of the requested type.
///
/// # Example
///
/// ```rust,ignore
/// let case = client
///     .sobject("Case")
///     .set("Subject", "Printer on fire")
///     .create(&ctx)
///     .await?;
///
/// let fetched = case.get(&ctx, None).await?;
/// assert_eq!(fetched.string_field("Subject"), "Printer on fire");
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SObject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    attributes: Option<SObjectAttributes>,

    #[serde(flatten)]
    fields: Map<String, Value>,

    #[serde(skip)]
    client: Option<SalesforceRestClient>,

    #[serde(skip)]
    external_id_field: Option<String>,
}

impl PartialEq for SObject {
    /// Records compare by data: attributes, fields and external id marker.
    fn eq(&self, other: &Self) -> bool {
        self.attributes == other.attributes
            && self.fields == other.fields
            && self.external_id_field == other.external_id_field
    }
}

impl SObject {
    /// An empty record with no type and no client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from a decoded JSON object.
    ///
    /// An `attributes` entry is lifted out of the field map.
    pub fn from_map(mut fields: Map<String, Value>) -> Self {
        let attributes = fields
            .remove(ATTRIBUTES_KEY)
            .and_then(|value| serde_json::from_value(value).ok());
        Self {
            attributes,
            fields,
            client: None,
            external_id_field: None,
        }
    }

    // =========================================================================
    // Identity
    // =========================================================================

    /// The SObject type name, or `""` if unset.
    pub fn sobject_type(&self) -> &str {
        self.attributes
            .as_ref()
            .map(|a| a.sobject_type.as_str())
            .unwrap_or_default()
    }

    /// Set the type name. The last call wins.
    pub fn set_type(&mut self, sobject_type: impl Into<String>) -> &mut Self {
        self.attributes
            .get_or_insert_with(SObjectAttributes::default)
            .sobject_type = sobject_type.into();
        self
    }

    /// Builder form of [`SObject::set_type`].
    pub fn with_type(mut self, sobject_type: impl Into<String>) -> Self {
        self.set_type(sobject_type);
        self
    }

    /// The `attributes` block, if the record has one.
    pub fn attributes(&self) -> Option<&SObjectAttributes> {
        self.attributes.as_ref()
    }

    /// The record id, if set and non-empty.
    pub fn id(&self) -> Option<&str> {
        match self.fields.get(ID_FIELD) {
            Some(Value::String(id)) if !id.is_empty() => Some(id),
            _ => None,
        }
    }

    /// Set the record id.
    pub fn set_id(&mut self, id: impl Into<String>) -> &mut Self {
        self.fields
            .insert(ID_FIELD.to_string(), Value::String(id.into()));
        self
    }

    // =========================================================================
    // Client binding
    // =========================================================================

    /// Attach a client so the record can be used for network operations.
    pub fn with_client(mut self, client: SalesforceRestClient) -> Self {
        self.client = Some(client);
        self
    }

    /// The client this record is bound to.
    pub fn client(&self) -> Option<&SalesforceRestClient> {
        self.client.as_ref()
    }

    /// True if a client is attached.
    pub fn is_live(&self) -> bool {
        self.client.is_some()
    }

    pub(crate) fn bind(&mut self, client: &SalesforceRestClient) {
        self.client = Some(client.clone());
    }

    // =========================================================================
    // External id
    // =========================================================================

    /// Mark `field` as the external id used by [`SObject::upsert`].
    pub fn with_external_id_field(mut self, field: impl Into<String>) -> Self {
        self.external_id_field = Some(field.into());
        self
    }

    /// Name of the external id field, if one was set.
    pub fn external_id_field_name(&self) -> Option<&str> {
        self.external_id_field.as_deref().filter(|f| !f.is_empty())
    }

    /// Value of the external id field. Numbers are rendered as text.
    pub fn external_id(&self) -> Option<String> {
        let field = self.external_id_field_name()?;
        match self.fields.get(field)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    // =========================================================================
    // Field access
    // =========================================================================

    /// All data fields (never includes `attributes`).
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// The field exactly as decoded. `None` means the field is absent;
    /// `Some(Value::Null)` means it was present and null.
    pub fn raw_field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// A string field, or `""` if absent or not a string.
    pub fn string_field(&self, name: &str) -> &str {
        self.fields
            .get(name)
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// A numeric field, or `0.0` if absent or not a number.
    pub fn number_field(&self, name: &str) -> f64 {
        self.fields
            .get(name)
            .and_then(Value::as_f64)
            .unwrap_or_default()
    }

    /// A boolean field, or `false` if absent or not a boolean.
    pub fn boolean_field(&self, name: &str) -> bool {
        self.fields
            .get(name)
            .and_then(Value::as_bool)
            .unwrap_or_default()
    }

    /// Set a field. Local only; nothing is validated until the record is
    /// sent to the server.
    ///
    /// Setting `attributes` replaces the attributes block instead of adding a
    /// data field; a value that is not an attributes object clears it.
    pub fn set_field(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        let name = name.into();
        let value = value.into();
        if name == ATTRIBUTES_KEY {
            self.attributes = serde_json::from_value(value).ok();
        } else {
            self.fields.insert(name, value);
        }
        self
    }

    /// Builder form of [`SObject::set_field`].
    pub fn set(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set_field(name, value);
        self
    }

    /// Remove a field, returning its previous value.
    pub fn remove_field(&mut self, name: &str) -> Option<Value> {
        self.fields.remove(name)
    }

    // =========================================================================
    // Relationships
    // =========================================================================

    /// Navigate a relationship without a network call.
    ///
    /// - If `field` holds a nested record (a query selected relationship
    ///   fields), that record is returned with type `expected_type`.
    /// - If `field` holds a non-empty id string, an identity-only record of
    ///   `expected_type` is returned; call [`SObject::get`] to load it.
    /// - Otherwise the relationship is unpopulated and `None` is returned.
    ///
    /// The returned record shares this record's client.
    pub fn related_record(&self, expected_type: &str, field: &str) -> Option<SObject> {
        let mut related = match self.fields.get(field)? {
            Value::Object(map) => SObject::from_map(map.clone()),
            Value::String(id) if !id.is_empty() => {
                let mut record = SObject::new();
                record.set_id(id.as_str());
                record
            }
            _ => return None,
        };

        related.set_type(expected_type);
        related.client = self.client.clone();
        Some(related)
    }

    /// Request body for create/update/upsert: data fields without `Id` and
    /// without `exclude`.
    pub(crate) fn payload(&self, exclude: Option<&str>) -> Value {
        let body: Map<String, Value> = self
            .fields
            .iter()
            .filter(|(name, _)| name.as_str() != ID_FIELD && Some(name.as_str()) != exclude)
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        Value::Object(body)
    }
}
