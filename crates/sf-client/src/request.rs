//! HTTP request building with Salesforce-specific headers.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::error::{Error, ErrorKind, Result};

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMethod {
    Get,
    Post,
    Patch,
    Put,
    Delete,
}

impl RequestMethod {
    /// Convert to reqwest::Method.
    pub fn to_reqwest(&self) -> reqwest::Method {
        match self {
            RequestMethod::Get => reqwest::Method::GET,
            RequestMethod::Post => reqwest::Method::POST,
            RequestMethod::Patch => reqwest::Method::PATCH,
            RequestMethod::Put => reqwest::Method::PUT,
            RequestMethod::Delete => reqwest::Method::DELETE,
        }
    }

    /// The method name as sent on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestMethod::Get => "GET",
            RequestMethod::Post => "POST",
            RequestMethod::Patch => "PATCH",
            RequestMethod::Put => "PUT",
            RequestMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for RequestMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builder for HTTP requests handed to a [`Transport`](crate::Transport).
pub struct RequestBuilder {
    pub(crate) method: RequestMethod,
    pub(crate) url: String,
    pub(crate) headers: HashMap<String, String>,
    pub(crate) body: Option<RequestBody>,
    pub(crate) bearer_token: Option<String>,
}

impl fmt::Debug for RequestBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestBuilder")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("headers", &self.headers)
            .field("body", &self.body)
            .field("bearer_token", &self.bearer_token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Request body content.
#[derive(Debug, Clone)]
pub enum RequestBody {
    Json(serde_json::Value),
    Text(String),
}

impl RequestBuilder {
    /// Create a new request builder.
    pub fn new(method: RequestMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            body: None,
            bearer_token: None,
        }
    }

    /// The request method.
    pub fn method(&self) -> RequestMethod {
        self.method
    }

    /// The fully-qualified request URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Headers set on the request (excluding authorization).
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// The request body, if any.
    pub fn body(&self) -> Option<&RequestBody> {
        self.body.as_ref()
    }

    /// The bearer token, if set.
    pub fn bearer_token(&self) -> Option<&str> {
        self.bearer_token.as_deref()
    }

    /// Set the bearer token for authentication.
    pub fn bearer_auth(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Add a header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Set JSON body.
    pub fn json<T: Serialize>(self, body: &T) -> Result<Self> {
        let value = serde_json::to_value(body)
            .map_err(|e| Error::with_source(ErrorKind::Serialization(e.to_string()), e))?;
        Ok(self.json_value(value))
    }

    /// Set raw JSON body.
    pub fn json_value(mut self, body: serde_json::Value) -> Self {
        self.body = Some(RequestBody::Json(body));
        self.headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        self
    }

    /// Set an already-encoded JSON body.
    pub fn json_text(mut self, body: impl Into<String>) -> Self {
        self.body = Some(RequestBody::Text(body.into()));
        self.headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        self
    }
}
