use crate::domain::ports::Fetcher;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(15);
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(10);

/// reqwest-backed [`Fetcher`]. Only a 200 response yields a body.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        Self::with_timeouts(DEFAULT_CONNECT_TIMEOUT, DEFAULT_READ_TIMEOUT)
    }

    pub fn with_timeouts(connect_timeout: Duration, read_timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .read_timeout(read_timeout)
            .build()?;
        Ok(Self { client })
    }

    async fn get_body(&self, url: &str) -> std::result::Result<Option<String>, reqwest::Error> {
        tracing::debug!("Making API request to: {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if status != StatusCode::OK {
            tracing::error!("Error response code: {}", status.as_u16());
            return Ok(None);
        }

        // reqwest decodes using the charset in Content-Type, falling back to UTF-8
        let body = response.text().await?;
        Ok(Some(body))
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Option<String> {
        match self.get_body(url).await {
            Ok(body) => body,
            Err(e) => {
                tracing::error!("Problem retrieving the earthquake JSON results: {}", e);
                None
            }
        }
    }
}
