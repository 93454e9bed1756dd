//! Response payloads of the record and Apex endpoints.

use serde::{Deserialize, Serialize};

/// Opaque describe payload (`sobjects/{type}/describe`, `sobjects`).
///
/// Kept schema-less: the describe shape differs between API versions and
/// callers usually only read a handful of keys.
pub type SObjectMeta = serde_json::Map<String, serde_json::Value>;

/// Result of a create operation.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateResult {
    pub id: String,
    pub success: bool,
    #[serde(default)]
    pub errors: Vec<OperationError>,
}

/// Result of an upsert that created a record.
///
/// An upsert that updated an existing record answers 204 with no body.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpsertResult {
    pub id: String,
    pub success: bool,
    #[serde(default)]
    pub created: bool,
    #[serde(default)]
    pub errors: Vec<OperationError>,
}

/// Error entry inside a create/upsert result.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OperationError {
    #[serde(rename = "statusCode", alias = "errorCode", default)]
    pub status_code: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub fields: Vec<String>,
}

/// Outcome of `tooling/executeAnonymous`.
///
/// Compilation and runtime failures are reported here rather than as errors.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteAnonymousResult {
    #[serde(default)]
    pub line: i32,
    #[serde(default)]
    pub column: i32,
    pub compiled: bool,
    pub success: bool,
    #[serde(default)]
    pub compile_problem: Option<String>,
    #[serde(default)]
    pub exception_stack_trace: Option<String>,
    #[serde(default)]
    pub exception_message: Option<String>,
}
