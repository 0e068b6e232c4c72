pub mod http;
pub mod thumbnail;

pub use http::HttpSource;
pub use thumbnail::Thumbnail;

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),
    #[error("respuesta demasiado grande ({0} bytes)")]
    TooLarge(usize),
    #[error("{0}")]
    Decode(#[from] image::ImageError),
}

/// Source of raw image bytes. The production impl fetches over HTTPS; tests
/// substitute stubs.
#[async_trait]
pub trait ImageSource: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, LoadError>;
}

/// Outcome of one entry's load, reported back to the engine loop. `key` is
/// the entry's lowercase name.
#[derive(Debug, Clone)]
pub enum ImageEvent {
    Loaded { key: String, thumbnail: Thumbnail },
    Failed { key: String, message: String },
}

impl ImageEvent {
    pub fn key(&self) -> &str {
        match self {
            ImageEvent::Loaded { key, .. } | ImageEvent::Failed { key, .. } => key,
        }
    }
}

/// Spawn one independent fetch+decode task for an entry. The task never
/// touches shared state; it reports through `events` and is abortable via
/// the returned handle when the entry is removed.
pub fn spawn_loader(
    source: Arc<dyn ImageSource>,
    key: String,
    url: String,
    cols: u16,
    rows: u16,
    events: mpsc::Sender<ImageEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let event = match load(source.as_ref(), &url, cols, rows).await {
            Ok(thumbnail) => ImageEvent::Loaded { key, thumbnail },
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "image load failed");
                ImageEvent::Failed {
                    key,
                    message: e.to_string(),
                }
            }
        };
        let _ = events.send(event).await;
    })
}

async fn load(
    source: &dyn ImageSource,
    url: &str,
    cols: u16,
    rows: u16,
) -> Result<Thumbnail, LoadError> {
    let bytes = source.fetch(url).await?;
    Ok(thumbnail::decode(&bytes, cols, rows)?)
}
