//! Configuration module

pub mod settings;

pub use settings::{
    FetcherConfig, LoggingConfig, RelayConfig, ServerConfig, Settings, UpstreamConfig,
};
