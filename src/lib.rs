//! Data gateway
//!
//! A small HTTP gateway that greets on `/` and relays the body of a single
//! configured upstream on `/data`, together with the repository search
//! service that upstream is expected to be.

pub mod api;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod lifecycle;
pub mod telemetry;
pub mod upstream;

pub use error::{AppError, Result};

use axum::http::{HeaderName, HeaderValue};
use std::sync::Arc;

use crate::config::Settings;
use crate::upstream::{HttpUpstream, Upstream};

/// Application state shared across all handlers
pub struct AppState {
    pub upstream: Arc<dyn Upstream>,
    /// Header attached to every relayed body
    pub relay_header: (HeaderName, HeaderValue),
}

impl AppState {
    pub fn new(upstream: Arc<dyn Upstream>, relay_header: (HeaderName, HeaderValue)) -> Self {
        Self {
            upstream,
            relay_header,
        }
    }

    /// Build the state for an HTTP upstream described by `settings`
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let upstream = HttpUpstream::from_config(&settings.upstream)?;
        Ok(Self::new(Arc::new(upstream), settings.relay.header()?))
    }
}
