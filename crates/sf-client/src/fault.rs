//! Unified Salesforce error value and the decoder chain that produces it.
//!
//! REST and Tooling failures arrive as JSON arrays, SOAP failures as XML
//! faults, and proxies or load balancers may answer with HTML or an empty
//! body. [`SalesforceError::from_response`] runs an ordered list of decode
//! strategies over the body; the last one (raw text) cannot fail, so a failed
//! exchange always yields a typed error.

use std::sync::LazyLock;

use quick_xml::events::Event;
use quick_xml::Reader;
use serde::Deserialize;

/// A failed exchange with the Salesforce API, normalized across payload encodings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct SalesforceError {
    message: String,
    http_status: u16,
    error_code: String,
    error_message: String,
    fields: Vec<String>,
}

impl SalesforceError {
    /// Build an error from a status code and the raw response body.
    ///
    /// Never fails: unrecognized bodies become the message verbatim.
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        let text = String::from_utf8_lossy(body);

        for (name, strategy) in STRATEGIES {
            if let Some(err) = strategy(status, &text) {
                tracing::trace!(strategy = name, status, "Decoded Salesforce error body");
                return err;
            }
        }

        Self::raw(status, text.into_owned())
    }

    /// Build an error from already-structured parts, e.g. the `errors` array
    /// of a create result.
    pub fn from_parts(
        status: u16,
        error_code: impl Into<String>,
        error_message: impl Into<String>,
    ) -> Self {
        let error_code = error_code.into();
        let error_message = error_message.into();
        Self {
            message: format_message(status, &error_message, &error_code),
            http_status: status,
            error_code,
            error_message,
            fields: Vec::new(),
        }
    }

    fn raw(status: u16, body: String) -> Self {
        Self {
            message: body.clone(),
            http_status: status,
            error_code: String::new(),
            error_message: body,
            fields: Vec::new(),
        }
    }

    fn with_fields(mut self, fields: Vec<String>) -> Self {
        self.fields = fields;
        self
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// HTTP status code of the failed response.
    pub fn http_status(&self) -> u16 {
        self.http_status
    }

    /// Remote error code such as `NOT_FOUND` or `sf:INVALID_LOGIN`.
    ///
    /// Empty when the body carried no structured error.
    pub fn error_code(&self) -> &str {
        &self.error_code
    }

    /// Remote error message, or the raw body when no structure was recognized.
    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    /// Field names the server attached to the error, if any.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Returns true if the remote resource does not exist.
    pub fn is_not_found(&self) -> bool {
        self.http_status == 404
    }
}

fn format_message(status: u16, error_message: &str, error_code: &str) -> String {
    format!("Salesforce error (HTTP {status}): {error_message} [{error_code}]")
}

type Strategy = fn(u16, &str) -> Option<SalesforceError>;

/// Decode attempts in priority order. Raw text is the implicit final step.
const STRATEGIES: &[(&str, Strategy)] = &[
    ("json-array", from_json_array),
    ("json-object", from_json_object),
    ("soap-fault", from_soap_fault),
];

/// Salesforce REST error entry.
#[derive(Debug, Deserialize)]
struct RestErrorEntry {
    message: String,
    #[serde(rename = "errorCode")]
    error_code: String,
    #[serde(default)]
    fields: Option<Vec<String>>,
}

impl RestErrorEntry {
    fn into_error(self, status: u16) -> SalesforceError {
        SalesforceError::from_parts(status, self.error_code, self.message)
            .with_fields(self.fields.unwrap_or_default())
    }
}

fn from_json_array(status: u16, body: &str) -> Option<SalesforceError> {
    let entries: Vec<RestErrorEntry> = serde_json::from_str(body).ok()?;
    entries.into_iter().next().map(|e| e.into_error(status))
}

fn from_json_object(status: u16, body: &str) -> Option<SalesforceError> {
    let entry: RestErrorEntry = serde_json::from_str(body).ok()?;
    Some(entry.into_error(status))
}

#[derive(Clone, Copy)]
enum FaultField {
    Code,
    String,
}

fn from_soap_fault(status: u16, body: &str) -> Option<SalesforceError> {
    let mut reader = Reader::from_str(body);
    reader.config_mut().trim_text(true);

    let mut saw_fault = false;
    let mut in_fault = false;
    let mut current: Option<FaultField> = None;
    let mut fault_code = String::new();
    let mut fault_string = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"Fault" => {
                    saw_fault = true;
                    in_fault = true;
                }
                b"faultcode" if in_fault => current = Some(FaultField::Code),
                b"faultstring" if in_fault => current = Some(FaultField::String),
                _ => {}
            },
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"Fault" => in_fault = false,
                b"faultcode" | b"faultstring" => current = None,
                _ => {}
            },
            Ok(Event::Text(text)) => {
                if let Some(field) = current {
                    let text = text.unescape().ok()?;
                    match field {
                        FaultField::Code => fault_code.push_str(&text),
                        FaultField::String => fault_string.push_str(&text),
                    }
                }
            }
            Ok(Event::CData(data)) => {
                if let Some(field) = current {
                    let text = String::from_utf8_lossy(&data);
                    match field {
                        FaultField::Code => fault_code.push_str(&text),
                        FaultField::String => fault_string.push_str(&text),
                    }
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(_) => return None,
        }
    }

    saw_fault.then(|| SalesforceError::from_parts(status, fault_code, fault_string))
}

const MAX_PREVIEW_LENGTH: usize = 500;

static TOKEN_PATTERN: LazyLock<Option<regex_lite::Regex>> =
    LazyLock::new(|| regex_lite::Regex::new(r"00[A-Za-z0-9]{13,}[!][A-Za-z0-9_.]+").ok());

static SESSION_PATTERN: LazyLock<Option<regex_lite::Regex>> =
    LazyLock::new(|| regex_lite::Regex::new(r"sid=[A-Za-z0-9]{20,}").ok());

/// Redact access tokens and session ids from a response body and truncate it
/// so it can be written to logs.
pub(crate) fn sanitize_for_log(body: &str) -> String {
    let mut sanitized = body.to_string();

    if let Some(pattern) = TOKEN_PATTERN.as_ref() {
        sanitized = pattern
            .replace_all(&sanitized, "[REDACTED_TOKEN]")
            .into_owned();
    }
    if let Some(pattern) = SESSION_PATTERN.as_ref() {
        sanitized = pattern
            .replace_all(&sanitized, "sid=[REDACTED]")
            .into_owned();
    }

    if sanitized.len() > MAX_PREVIEW_LENGTH {
        let mut end = MAX_PREVIEW_LENGTH;
        while !sanitized.is_char_boundary(end) {
            end -= 1;
        }
        sanitized.truncate(end);
        sanitized.push_str("...[truncated]");
    }

    sanitized
}
