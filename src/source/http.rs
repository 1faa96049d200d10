use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::LoadError;
use crate::source::CsvSource;

pub struct HttpSource {
    client: Client,
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, LoadError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| LoadError::HttpClient { source })?;
        Ok(Self::with_client(url, client))
    }

    pub fn with_client(url: impl Into<String>, client: Client) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl CsvSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn read_all(&self) -> Result<String, LoadError> {
        let resp = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|source| LoadError::Transport {
                url: self.url.clone(),
                source,
            })?;

        let status = resp.status();
        if !status.is_success() {
            warn!("Fetching {} returned {}", self.url, status);
            return Err(LoadError::HttpStatus {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let body = resp.text().await.map_err(|source| LoadError::Transport {
            url: self.url.clone(),
            source,
        })?;
        debug!("Fetched {} bytes from {}", body.len(), self.url);

        Ok(body)
    }
}
