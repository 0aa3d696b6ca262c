//! Top-headlines client for NewsAPI.

use anyhow::{anyhow, Result};
use log::debug;
use serde::Deserialize;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// How many headlines a single news request reads out.
const HEADLINE_COUNT: usize = 5;

#[derive(Deserialize)]
struct HeadlinesResponse {
    status: String,
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Deserialize)]
struct Article {
    title: String,
}

#[derive(Clone)]
pub struct NewsClient {
    client: reqwest::Client,
    api_key: Option<String>,
}

impl NewsClient {
    pub fn new(client: reqwest::Client, api_key: Option<String>) -> Self {
        NewsClient { client, api_key }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Top headlines, newest first, capped at [`HEADLINE_COUNT`].
    pub async fn top_headlines(&self) -> Result<Vec<String>> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| anyhow!("news service is not configured"))?;

        debug!("fetching top headlines");
        let data: HeadlinesResponse = self
            .client
            .get("https://newsapi.org/v2/top-headlines")
            .query(&[("country", "us"), ("apiKey", api_key)])
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if data.status != "ok" {
            return Err(anyhow!("news service returned status {}", data.status));
        }
        Ok(data
            .articles
            .into_iter()
            .take(HEADLINE_COUNT)
            .map(|a| a.title)
            .collect())
    }
}
