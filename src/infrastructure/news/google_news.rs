//! Headline search over the Google News RSS endpoint.

use crate::domain::ports::NewsFeed;
use crate::domain::types::NewsItem;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest_middleware::ClientWithMiddleware;
use rss::Channel;
use std::io::Cursor;
use tracing::debug;
use url::Url;

pub struct GoogleNewsFeed {
    base_url: String,
    client: ClientWithMiddleware,
}

impl GoogleNewsFeed {
    pub fn new(base_url: &str, client: ClientWithMiddleware) -> Self {
        Self {
            base_url: base_url.to_string(),
            client,
        }
    }

    fn search_url(&self, query: &str) -> Result<Url> {
        Url::parse_with_params(
            &self.base_url,
            &[("q", query), ("hl", "en-US"), ("gl", "US"), ("ceid", "US:en")],
        )
        .with_context(|| format!("Invalid news URL for query '{}'", query))
    }
}

#[async_trait]
impl NewsFeed for GoogleNewsFeed {
    async fn search(&self, query: &str, max_items: usize) -> Result<Vec<NewsItem>> {
        let url = self.search_url(query)?;

        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .with_context(|| format!("News request failed for query '{}'", query))?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("News request for '{}' returned HTTP {}", query, status);
        }

        let body = response
            .bytes()
            .await
            .with_context(|| format!("Failed to read news body for query '{}'", query))?;

        let channel = Channel::read_from(Cursor::new(body))
            .with_context(|| format!("Failed to parse news feed for query '{}'", query))?;

        let items: Vec<NewsItem> = channel
            .items()
            .iter()
            .filter_map(|item| item.title())
            .take(max_items)
            .map(|title| NewsItem {
                title: title.to_string(),
            })
            .collect();

        debug!("GoogleNewsFeed: '{}' returned {} headlines", query, items.len());
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::core::HttpClientFactory;

    #[test]
    fn test_search_url_encodes_query() {
        let feed = GoogleNewsFeed::new(
            "https://news.google.com/rss/search",
            HttpClientFactory::create_client(),
        );
        let url = feed.search_url("Apple AAPL stock").unwrap();
        let query = url.query().unwrap();
        assert!(query.contains("q=Apple+AAPL+stock"));
        assert!(query.contains("hl=en-US"));
    }
}
