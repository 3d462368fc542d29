//! HTTP upstream client implementation

use async_trait::async_trait;
use axum::body::Bytes;
use reqwest::Client;
use tracing::{debug, error};

use crate::config::UpstreamConfig;
use crate::error::{AppError, Result};
use crate::upstream::traits::Upstream;

/// Plain GET against a single fixed URL
pub struct HttpUpstream {
    url: String,
    client: Client,
}

impl HttpUpstream {
    /// Create an upstream for the given URL. No request timeout is set.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let client = Client::builder().build()?;

        Ok(Self {
            url: url.into(),
            client,
        })
    }

    /// Create an upstream from configuration
    pub fn from_config(config: &UpstreamConfig) -> Result<Self> {
        Self::new(config.url.clone())
    }
}

#[async_trait]
impl Upstream for HttpUpstream {
    fn url(&self) -> &str {
        &self.url
    }

    async fn fetch(&self) -> Result<Bytes> {
        debug!(upstream = %self.url, "Fetching upstream data");

        let response = self.client.get(&self.url).send().await.map_err(|e| {
            error!(upstream = %self.url, error = %e, "Failed to fetch data from service");
            AppError::UpstreamUnreachable {
                url: self.url.clone(),
                source: e,
            }
        })?;

        let status = response.status();

        // `bytes` consumes the response, so the connection is released on
        // both the success and the error path.
        let body = response.bytes().await.map_err(|e| {
            error!(upstream = %self.url, error = %e, "Failed to read upstream body");
            AppError::BodyRead {
                url: self.url.clone(),
                source: e,
            }
        })?;

        debug!(
            upstream = %self.url,
            status = %status,
            bytes = body.len(),
            "Upstream body read"
        );

        Ok(body)
    }
}
