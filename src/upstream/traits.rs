//! Common trait for upstream data sources

use async_trait::async_trait;
use axum::body::Bytes;

use crate::error::Result;

/// A source the gateway relays a response body from
#[async_trait]
pub trait Upstream: Send + Sync {
    /// Address the data is fetched from
    fn url(&self) -> &str;

    /// Fetch the complete response body.
    ///
    /// Fails with `UpstreamUnreachable` when no response arrives and with
    /// `BodyRead` when the body cannot be read to the end. The upstream status
    /// code is not inspected.
    async fn fetch(&self) -> Result<Bytes>;
}
