//! Authenticated session state.
//!
//! A session is produced by whatever login flow the caller uses (OAuth,
//! SOAP login, `sf org display`) and is read-only afterwards.

use crate::error::{Error, ErrorKind, Result};
use crate::DEFAULT_API_VERSION;

/// Access token, instance URL and API version of an authenticated org.
///
/// ## Security
///
/// The access token is redacted in Debug output.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    instance_url: String,
    access_token: String,
    api_version: String,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("instance_url", &self.instance_url)
            .field("access_token", &"[REDACTED]")
            .field("api_version", &self.api_version)
            .finish()
    }
}

impl Session {
    /// Create a session for `instance_url` (e.g. `https://myorg.my.salesforce.com`).
    ///
    /// Trailing slashes are trimmed. Fails if the URL is not absolute.
    pub fn new(instance_url: impl Into<String>, access_token: impl Into<String>) -> Result<Self> {
        let instance_url = instance_url.into();
        let parsed = url::Url::parse(&instance_url)?;
        if parsed.cannot_be_a_base() {
            return Err(Error::new(ErrorKind::InvalidUrl(format!(
                "instance URL must be absolute: {instance_url}"
            ))));
        }

        Ok(Self {
            instance_url: instance_url.trim_end_matches('/').to_string(),
            access_token: access_token.into(),
            api_version: DEFAULT_API_VERSION.to_string(),
        })
    }

    /// Set the API version. Accepts `"62.0"` as well as `"v62.0"`.
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        let version = version.into();
        self.api_version = version.trim_start_matches(['v', 'V']).to_string();
        self
    }

    /// The access token sent as a bearer credential.
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// The instance URL, without trailing slash.
    pub fn instance_url(&self) -> &str {
        &self.instance_url
    }

    /// The API version, without the `v` prefix.
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Returns true if the session holds a token.
    pub fn is_authenticated(&self) -> bool {
        !self.access_token.is_empty()
    }
}
