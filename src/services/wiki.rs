//! Wikipedia summary lookups via the REST v1 summary endpoint.

use log::debug;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum WikiError {
    /// No article with that title.
    #[error("page not found")]
    NotFound,
    /// The title matches several articles.
    #[error("ambiguous topic")]
    Ambiguous,
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

#[derive(Deserialize)]
struct SummaryResponse {
    #[serde(default)]
    extract: String,
    #[serde(rename = "type", default)]
    page_type: String,
}

#[derive(Clone)]
pub struct WikiClient {
    client: reqwest::Client,
}

impl WikiClient {
    pub fn new(client: reqwest::Client) -> Self {
        WikiClient { client }
    }

    /// Fetch a short summary of `topic`.
    pub async fn summary(&self, topic: &str) -> Result<String, WikiError> {
        let title = topic.trim().replace(' ', "_");
        debug!("fetching wikipedia summary for {title}");

        let response = self
            .client
            .get(format!(
                "https://en.wikipedia.org/api/rest_v1/page/summary/{title}"
            ))
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(WikiError::NotFound);
        }
        let data: SummaryResponse = response.error_for_status()?.json().await?;

        if data.page_type == "disambiguation" {
            return Err(WikiError::Ambiguous);
        }
        if data.extract.is_empty() {
            return Err(WikiError::NotFound);
        }
        Ok(data.extract)
    }
}
