//! NewsData.io news search.

use crate::http::{check_status, connection_error, decode_error, HttpSettings};
use async_trait::async_trait;
use reqwest::Client;
use screener_core::error::DataError;
use screener_core::traits::NewsSource;
use screener_core::types::NewsArticle;
use serde::Deserialize;
use tracing::debug;

/// Public NewsData.io host.
pub const NEWSDATA_BASE_URL: &str = "https://newsdata.io";

/// NewsData.io credentials and host.
#[derive(Debug, Clone)]
pub struct NewsDataConfig {
    pub api_key: String,
    pub base_url: String,
}

impl NewsDataConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: NEWSDATA_BASE_URL.to_string(),
        }
    }

    /// Read the API key from the environment variable `var`.
    pub fn from_env(var: &str) -> Result<Self, DataError> {
        let api_key = std::env::var(var)
            .map_err(|_| DataError::Configuration(format!("{} not set", var)))?;
        if api_key.trim().is_empty() {
            return Err(DataError::Configuration(format!("{} is empty", var)));
        }
        Ok(Self::new(api_key))
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

#[derive(Debug, Deserialize)]
struct NewsResponse {
    status: String,
    #[serde(default)]
    results: Option<Vec<NewsResult>>,
}

#[derive(Debug, Deserialize)]
struct NewsResult {
    title: Option<String>,
    description: Option<String>,
}

/// News search backed by the NewsData.io `news` endpoint.
pub struct NewsDataSource {
    client: Client,
    config: NewsDataConfig,
}

impl NewsDataSource {
    pub fn new(config: NewsDataConfig, http: &HttpSettings) -> Result<Self, DataError> {
        Ok(Self {
            client: http.build_client()?,
            config,
        })
    }

    fn parse_response(body: NewsResponse) -> Result<Vec<NewsArticle>, DataError> {
        if body.status != "success" {
            return Err(DataError::ApiError(format!("status {}", body.status)));
        }
        Ok(body
            .results
            .unwrap_or_default()
            .into_iter()
            .map(|r| NewsArticle::new(r.title.unwrap_or_default(), r.description.unwrap_or_default()))
            .collect())
    }
}

#[async_trait]
impl NewsSource for NewsDataSource {
    async fn search_news(&self, query: &str) -> Result<Vec<NewsArticle>, DataError> {
        let url = format!("{}/api/1/news", self.config.base_url);

        let resp = self
            .client
            .get(&url)
            .query(&[
                ("apikey", self.config.api_key.as_str()),
                ("q", query),
                ("language", "en"),
            ])
            .send()
            .await
            .map_err(connection_error)?;
        let resp = check_status(resp, query).await?;

        let body: NewsResponse = resp.json().await.map_err(decode_error)?;
        let articles = Self::parse_response(body)?;
        debug!(query, articles = articles.len(), "News search complete");
        Ok(articles)
    }

    fn name(&self) -> &str {
        "newsdata"
    }
}
