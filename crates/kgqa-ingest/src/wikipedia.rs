//! Fetch plain-text page extracts from a MediaWiki site.
//!
//! Uses the `action=query&prop=extracts&explaintext=1` API, which returns
//! the article body with markup stripped.

use std::time::Duration;

use serde::Deserialize;

use kgqa_core::Document;

use crate::config::IngestConfig;
use crate::error::{IngestError, Result};

/// Loader for encyclopedia pages.
pub struct WikipediaLoader {
    client: reqwest::Client,
    base_url: String,
}

impl WikipediaLoader {
    pub fn new(config: &IngestConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.wikipedia_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch one page by title. Redirects are followed.
    pub async fn load(&self, title: &str) -> Result<Document> {
        let url = format!("{}/w/api.php", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("action", "query"),
                ("format", "json"),
                ("formatversion", "2"),
                ("prop", "extracts"),
                ("explaintext", "1"),
                ("redirects", "1"),
                ("titles", title),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: ApiResponse = response.json().await?;
        let page = body
            .query
            .and_then(|q| q.pages.into_iter().next())
            .ok_or_else(|| IngestError::Source(format!("No pages returned for {title}")))?;

        if page.missing {
            return Err(IngestError::PageNotFound {
                title: title.to_string(),
            });
        }

        let text = page.extract.unwrap_or_default();
        if text.trim().is_empty() {
            return Err(IngestError::Source(format!("Page {} has no text", page.title)));
        }

        let source = format!("{}/wiki/{}", self.base_url, page.title.replace(' ', "_"));
        tracing::info!(
            title = %page.title,
            chars = text.chars().count(),
            "Fetched page"
        );
        Ok(Document::new(source, page.title, text))
    }

    /// Fetch several pages in order, stopping at the first failure.
    pub async fn load_all(&self, titles: &[String]) -> Result<Vec<Document>> {
        let mut docs = Vec::with_capacity(titles.len());
        for title in titles {
            docs.push(self.load(title).await?);
        }
        Ok(docs)
    }
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    query: Option<ApiQuery>,
}

#[derive(Debug, Deserialize)]
struct ApiQuery {
    #[serde(default)]
    pages: Vec<ApiPage>,
}

#[derive(Debug, Deserialize)]
struct ApiPage {
    title: String,
    #[serde(default)]
    missing: bool,
    extract: Option<String>,
}
