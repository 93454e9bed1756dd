//! Buffered HTTP responses.
//!
//! Transports read the whole body before returning, so a failed exchange can
//! still be classified from its payload.

use std::collections::HashMap;

use bytes::Bytes;
use serde::de::DeserializeOwned;

use crate::error::{Error, ErrorKind, Result};

/// A fully-read HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    status: u16,
    headers: HashMap<String, String>,
    body: Bytes,
}

impl Response {
    /// Create a response. Header names are normalized to lowercase.
    pub fn new(status: u16, headers: HashMap<String, String>, body: impl Into<Bytes>) -> Self {
        let headers = headers
            .into_iter()
            .map(|(k, v)| (k.to_lowercase(), v))
            .collect();

        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// Get the HTTP status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Returns true if the response status is successful (2xx).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get a header value (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(String::as_str)
    }

    /// Get the Content-Type header.
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// The raw response body.
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Returns true if the server sent no body (e.g. 204 No Content).
    pub fn is_empty(&self) -> bool {
        self.body.iter().all(u8::is_ascii_whitespace)
    }

    /// Consume the response and return its body.
    pub fn into_body(self) -> Bytes {
        self.body
    }

    /// Get the response body as text.
    pub fn text(&self) -> Result<String> {
        String::from_utf8(self.body.to_vec()).map_err(|e| {
            Error::with_source(
                ErrorKind::Decode("Failed to decode response as UTF-8".to_string()),
                e,
            )
        })
    }

    /// Deserialize the response body as JSON.
    ///
    /// Failures are reported as [`ErrorKind::Decode`]: the server accepted the
    /// request but sent something this client does not understand.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(Into::into)
    }
}
