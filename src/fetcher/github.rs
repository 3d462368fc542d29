//! Repository search client
//!
//! Pages of a GitHub repository search are requested concurrently and merged
//! into a single list ordered by ascending star count. A page that fails is
//! logged and skipped.

use futures::future::join_all;
use reqwest::{header::USER_AGENT, Client};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::FetcherConfig;
use crate::error::{AppError, Result};

/// A repository as returned to callers. The star count is only used for ordering.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Repository {
    pub name: String,
    pub description: Option<String>,
    pub html_url: String,
    #[serde(skip_serializing)]
    pub stargazers_count: u32,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    items: Vec<Repository>,
}

/// Client for the paged repository search
pub struct RepositorySearch {
    client: Client,
    search_url: String,
    pages: u32,
    per_page: u32,
    user_agent: String,
}

impl RepositorySearch {
    /// Create a search client from configuration
    pub fn new(config: &FetcherConfig) -> Result<Self> {
        let client = Client::builder().build()?;

        Ok(Self {
            client,
            search_url: config.search_url.clone(),
            pages: config.pages,
            per_page: config.per_page,
            user_agent: config.user_agent.clone(),
        })
    }

    /// Fetch every configured page and merge the results.
    ///
    /// Failed pages are logged and left out, so this yields an empty list
    /// when every page failed.
    pub async fn fetch_repositories(&self) -> Result<Vec<Repository>> {
        let results = join_all((1..=self.pages).map(|page| self.fetch_page(page))).await;

        let mut repositories = Vec::new();
        for (page, result) in (1..=self.pages).zip(results) {
            match result {
                Ok(repos) => repositories.extend(repos),
                Err(e) => warn!(page = page, error = %e, "Error fetching page"),
            }
        }

        repositories.sort_by_key(|repo| repo.stargazers_count);
        Ok(repositories)
    }

    async fn fetch_page(&self, page: u32) -> Result<Vec<Repository>> {
        debug!(page = page, "Fetching page");

        let response = self
            .client
            .get(&self.search_url)
            .query(&[("per_page", self.per_page), ("page", page)])
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::UpstreamStatus {
                url: response.url().to_string(),
                status: status.as_u16(),
            });
        }

        let result: SearchResult = response.json().await?;
        if result.items.is_empty() {
            return Err(AppError::EmptyPage(page));
        }

        Ok(result.items)
    }
}
