//! The fetch boundary. The core itself never touches the network: it
//! receives a plain `Vec<Photo>` via [`crate::Gallery::set_photos`]. This
//! module defines the provider contract that supplies such a batch and the
//! deterministic placeholder dataset substituted when the real source
//! fails.

use async_trait::async_trait;
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use thiserror::Error;
use tracing::warn;

use crate::GalleryConfig;
use crate::gallery::Photo;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("photo source unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("malformed photo payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[async_trait]
pub trait PhotoProvider: Send + Sync {
    async fn fetch_photos(&self) -> Result<Vec<Photo>, ProviderError>;
    fn name(&self) -> &str;
}

/// Provider that serves the generated placeholder dataset.
#[derive(Debug, Clone)]
pub struct PlaceholderProvider {
    pub anchor: DateTime<Utc>,
    pub count: usize,
}

impl PlaceholderProvider {
    pub fn new(anchor: DateTime<Utc>, count: usize) -> Self {
        Self { anchor, count }
    }
}

#[async_trait]
impl PhotoProvider for PlaceholderProvider {
    async fn fetch_photos(&self) -> Result<Vec<Photo>, ProviderError> {
        Ok(placeholder_photos(self.anchor, self.count))
    }

    fn name(&self) -> &str {
        "placeholder"
    }
}

/// Generates `count` stand-in photos, one per day counting back from
/// `anchor`. Deterministic for a fixed anchor, so repeated fallbacks yield
/// an identical batch.
pub fn placeholder_photos(anchor: DateTime<Utc>, count: usize) -> Vec<Photo> {
    (0..count)
        .map(|i| {
            let taken = anchor - Duration::days(i as i64);
            let picsum_id = (i * 17) % 1000;
            Photo {
                filename: format!("{}_cat_{}.jpg", taken.format("%Y-%m-%d_%H-%M-%S"), i),
                url: format!("https://picsum.photos/id/{picsum_id}/1200/800"),
                thumb_url: Some(format!("https://picsum.photos/id/{picsum_id}/300/300")),
                taken_at: Some(taken.to_rfc3339_opts(SecondsFormat::Millis, true)),
                id: None,
            }
        })
        .collect()
}

/// Fetches from `provider`, substituting the placeholder dataset on
/// failure. The core downstream of this call does not distinguish the two
/// outcomes; the substitution is logged and otherwise invisible.
pub async fn fetch_or_placeholder(
    provider: &dyn PhotoProvider,
    config: &GalleryConfig,
) -> Vec<Photo> {
    match provider.fetch_photos().await {
        Ok(photos) => photos,
        Err(e) => {
            warn!(
                "photo provider {} failed ({e}), substituting {} placeholder photos",
                provider.name(),
                config.placeholder_count
            );
            placeholder_photos(Utc::now(), config.placeholder_count)
        }
    }
}
