// Catalog client: one GET per listing, JSON decoded into ListResult.
// No retry, backoff, or caching; failures surface to the query store as-is.

use std::fmt;

use reqwest::Url;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::CatalogError;
use crate::types::{Category, EngineConfig, ListResult};

/// HTTP client for the remote catalog service.
#[derive(Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl fmt::Debug for CatalogClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl CatalogClient {
    pub fn new(config: &EngineConfig) -> Self {
        Self::with_http(reqwest::Client::new(), config)
    }

    pub fn with_http(http: reqwest::Client, config: &EngineConfig) -> Self {
        CatalogClient {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    /// `{base}/{endpoint}?api_key={key}[&query={keyword}]`.
    ///
    /// The keyword is only sent for search; an absent keyword searches for "".
    pub fn request_url(&self, category: Category, keyword: Option<&str>) -> Result<Url, CatalogError> {
        let mut url = Url::parse(&format!("{}/{}", self.base_url, category.endpoint()))
            .map_err(|e| CatalogError::Url(e.to_string()))?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("api_key", &self.api_key);
            if category == Category::Search {
                pairs.append_pair("query", keyword.unwrap_or_default());
            }
        }
        Ok(url)
    }

    /// Fetch one listing.
    pub async fn fetch(&self, category: Category, keyword: Option<&str>) -> Result<ListResult, CatalogError> {
        let url = self.request_url(category, keyword)?;
        debug!(%category, "fetching catalog listing");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            #[derive(Debug, Deserialize)]
            struct ErrorBody {
                #[serde(default)]
                status_message: Option<String>,
            }

            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.status_message)
                .unwrap_or_else(|| format!("request failed with status {}", status));
            warn!(%category, status = status.as_u16(), %message, "catalog request rejected");
            return Err(CatalogError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let list: ListResult = serde_json::from_str(&body)?;
        debug!(%category, items = list.item_count(), "catalog listing decoded");
        Ok(list)
    }

    pub async fn now_playing(&self) -> Result<ListResult, CatalogError> {
        self.fetch(Category::NowPlaying, None).await
    }

    pub async fn top_rated(&self) -> Result<ListResult, CatalogError> {
        self.fetch(Category::TopRated, None).await
    }

    pub async fn upcoming(&self) -> Result<ListResult, CatalogError> {
        self.fetch(Category::Upcoming, None).await
    }

    pub async fn airing_today(&self) -> Result<ListResult, CatalogError> {
        self.fetch(Category::AiringToday, None).await
    }

    pub async fn popular(&self) -> Result<ListResult, CatalogError> {
        self.fetch(Category::Popular, None).await
    }

    pub async fn tv_top_rated(&self) -> Result<ListResult, CatalogError> {
        self.fetch(Category::TvTopRated, None).await
    }

    pub async fn search(&self, keyword: &str) -> Result<ListResult, CatalogError> {
        self.fetch(Category::Search, Some(keyword)).await
    }
}
