//! Application settings and configuration management

use crate::error::{AppError, Result};
use axum::http::{HeaderName, HeaderValue};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming an alternative configuration file
pub const CONFIG_PATH_ENV: &str = "DATA_GATEWAY_CONFIG";

const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub relay: RelayConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub fetcher: FetcherConfig,
}

/// Gateway listener configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// The single service `/data` is forwarded to
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_upstream_url")]
    pub url: String,
}

fn default_upstream_url() -> String {
    "http://localhost:8081/data".to_string()
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            url: default_upstream_url(),
        }
    }
}

/// Header attached to relayed upstream bodies.
///
/// The header name defaults to the literal `content`, not `content-type`.
/// Set `content_header = "content-type"` to emit a standard declaration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RelayConfig {
    #[serde(default = "default_content_header")]
    pub content_header: String,
    #[serde(default = "default_content_type")]
    pub content_type: String,
}

fn default_content_header() -> String {
    "content".to_string()
}

fn default_content_type() -> String {
    "application/json".to_string()
}

impl RelayConfig {
    /// Parse the configured header into a name/value pair
    pub fn header(&self) -> Result<(HeaderName, HeaderValue)> {
        let name = HeaderName::from_bytes(self.content_header.as_bytes()).map_err(|_| {
            AppError::config(format!(
                "Invalid relay header name '{}'",
                self.content_header
            ))
        })?;
        let value = HeaderValue::from_str(&self.content_type).map_err(|_| {
            AppError::config(format!(
                "Invalid relay header value '{}'",
                self.content_type
            ))
        })?;
        Ok((name, value))
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            content_header: default_content_header(),
            content_type: default_content_type(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// `json` or `pretty`
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// Settings for the repository search service behind the gateway
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FetcherConfig {
    #[serde(default = "default_fetcher_host")]
    pub host: String,
    #[serde(default = "default_fetcher_port")]
    pub port: u16,
    #[serde(default = "default_search_url")]
    pub search_url: String,
    #[serde(default = "default_pages")]
    pub pages: u32,
    #[serde(default = "default_per_page")]
    pub per_page: u32,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_fetcher_host() -> String {
    "127.0.0.1".to_string()
}

fn default_fetcher_port() -> u16 {
    8081
}

fn default_search_url() -> String {
    "https://api.github.com/search/repositories?q=nvim+plugin".to_string()
}

fn default_pages() -> u32 {
    4
}

fn default_per_page() -> u32 {
    100
}

fn default_user_agent() -> String {
    "Rust reqwest".to_string()
}

impl FetcherConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Validate the search service settings. The gateway never calls this.
    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            return Err(AppError::config("Fetcher port cannot be 0"));
        }

        reqwest::Url::parse(&self.search_url).map_err(|e| {
            AppError::config(format!(
                "Invalid search url '{}': {}",
                self.search_url, e
            ))
        })?;

        if self.pages == 0 {
            return Err(AppError::config("Fetcher must request at least one page"));
        }

        Ok(())
    }
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            host: default_fetcher_host(),
            port: default_fetcher_port(),
            search_url: default_search_url(),
            pages: default_pages(),
            per_page: default_per_page(),
            user_agent: default_user_agent(),
        }
    }
}

impl Settings {
    /// Load settings from the configuration file and environment variables
    pub fn load() -> Result<Self> {
        // `var_os` so a non-UTF-8 path is reported instead of silently replaced.
        let path = std::env::var_os(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
        Self::load_from_path(path)
    }

    /// Load settings from a specific configuration file path
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let name = path.to_str().ok_or_else(|| {
            AppError::config(format!(
                "Configuration path '{}' is not valid UTF-8",
                path.display()
            ))
        })?;

        let config = Config::builder()
            .add_source(File::with_name(name).required(false))
            // Override with environment variables (DATA_GATEWAY__SECTION__KEY)
            .add_source(
                Environment::with_prefix("DATA_GATEWAY")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Settings = config.try_deserialize()?;
        Ok(settings)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(AppError::config("Server port cannot be 0"));
        }

        let url = reqwest::Url::parse(&self.upstream.url).map_err(|e| {
            AppError::config(format!(
                "Invalid upstream url '{}': {}",
                self.upstream.url, e
            ))
        })?;
        if !["http", "https"].contains(&url.scheme()) {
            return Err(AppError::config(format!(
                "Upstream url '{}' must use http or https",
                self.upstream.url
            )));
        }

        self.relay.header()?;

        Ok(())
    }
}
