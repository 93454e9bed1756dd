//! reqwest-backed transport with compression and Salesforce-friendly defaults.

use std::collections::HashMap;

use async_trait::async_trait;
use tracing::{debug, info, instrument};

use crate::config::ClientConfig;
use crate::context::Context;
use crate::error::{Error, ErrorKind, Result};
use crate::fault::SalesforceError;
use crate::request::{RequestBody, RequestBuilder};
use crate::response::Response;
use crate::transport::Transport;

/// HTTP transport for Salesforce APIs.
#[derive(Debug, Clone)]
pub struct SfHttpClient {
    inner: reqwest::Client,
    config: ClientConfig,
}

impl SfHttpClient {
    /// Create a new HTTP client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let inner = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .user_agent(&config.user_agent)
            .gzip(config.accept_compressed)
            .deflate(config.accept_compressed)
            .build()
            .map_err(|e| Error::with_source(ErrorKind::Config(e.to_string()), e))?;

        Ok(Self { inner, config })
    }

    /// Create a new HTTP client with default configuration.
    pub fn default_client() -> Result<Self> {
        Self::new(ClientConfig::default())
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn send_once(&self, request: RequestBuilder) -> Result<Response> {
        let mut req = self
            .inner
            .request(request.method.to_reqwest(), &request.url);

        if let Some(ref token) = request.bearer_token {
            req = req.bearer_auth(token);
        }

        for (name, value) in &request.headers {
            req = req.header(name.as_str(), value.as_str());
        }

        if let Some(body) = request.body {
            req = match body {
                RequestBody::Json(value) => req.json(&value),
                RequestBody::Text(text) => req.body(text),
            };
        }

        if self.config.enable_tracing {
            debug!(method = %request.method, url = %request.url, "Sending request");
        }

        let response = req.send().await?;
        let status = response.status().as_u16();

        if self.config.enable_tracing {
            let content_length = response.content_length();
            if response.status().is_success() {
                debug!(status, content_length, "Response received");
            } else {
                info!(status, content_length, "Non-success response");
            }
        }

        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();

        match response.bytes().await {
            Ok(body) => Ok(Response::new(status, headers, body)),
            // We know the exchange failed but not why; keep both causes.
            Err(err) if !(200..300).contains(&status) => Err(Error::with_source(
                ErrorKind::Salesforce(SalesforceError::from_response(status, b"")),
                err,
            )),
            Err(err) => Err(err.into()),
        }
    }
}

#[async_trait]
impl Transport for SfHttpClient {
    #[instrument(skip(self, request, ctx), fields(method = %request.method, url = %request.url))]
    async fn send(&self, request: RequestBuilder, ctx: &Context) -> Result<Response> {
        ctx.run(self.send_once(request)).await
    }
}
