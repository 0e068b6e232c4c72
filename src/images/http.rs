use std::time::Duration;

use async_trait::async_trait;

use super::{ImageSource, LoadError};
use crate::config::ImagesConfig;

/// HTTPS image source backed by a shared reqwest client.
pub struct HttpSource {
    client: reqwest::Client,
    max_bytes: usize,
}

impl HttpSource {
    pub fn new(config: &ImagesConfig) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;
        Ok(Self {
            client,
            max_bytes: config.max_bytes,
        })
    }
}

#[async_trait]
impl ImageSource for HttpSource {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, LoadError> {
        let response = self.client.get(url).send().await?.error_for_status()?;

        // Reject oversized bodies up front when the server declares a length;
        // the post-download check covers servers that don't.
        if let Some(length) = response.content_length() {
            if length as usize > self.max_bytes {
                return Err(LoadError::TooLarge(length as usize));
            }
        }

        let bytes = response.bytes().await?;
        if bytes.len() > self.max_bytes {
            return Err(LoadError::TooLarge(bytes.len()));
        }
        Ok(bytes.to_vec())
    }
}
