use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use super::resolver;

/// A raw photo record as delivered by the photo source. Immutable once
/// received; all derived state lives on [`ResolvedPhoto`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub filename: String,
    pub url: String,
    #[serde(default)]
    pub thumb_url: Option<String>,
    #[serde(default)]
    pub taken_at: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
}

impl Photo {
    /// Thumbnail asset, falling back to the full-size URL when the record
    /// carries no dedicated thumbnail.
    pub fn thumb(&self) -> &str {
        self.thumb_url.as_deref().unwrap_or(&self.url)
    }
}

/// A photo plus its derived canonical timestamp and date decomposition.
///
/// The four derived fields are all `Some` or all `None`: a photo either has
/// a determinable date or it does not. Derivation happens once per input
/// batch via [`ResolvedPhoto::from_photo`] and is never mutated afterward.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedPhoto {
    #[serde(flatten)]
    pub photo: Photo,
    pub timestamp: Option<DateTime<Utc>>,
    pub year: Option<i32>,
    /// 1-12
    pub month: Option<u32>,
    /// 1-31
    pub day: Option<u32>,
}

impl ResolvedPhoto {
    pub fn from_photo(photo: Photo) -> Self {
        let timestamp = resolver::resolve(photo.taken_at.as_deref(), &photo.filename);
        Self {
            year: timestamp.map(|t| t.year()),
            month: timestamp.map(|t| t.month()),
            day: timestamp.map(|t| t.day()),
            timestamp,
            photo,
        }
    }

    /// `YYYY-MM-DD` caption for grid cells, `None` when undated.
    pub fn date_label(&self) -> Option<String> {
        self.timestamp.map(|t| t.format("%Y-%m-%d").to_string())
    }

    /// `YYYY-MM-DD HH:MM:SS` caption for the full-size view.
    pub fn datetime_label(&self) -> Option<String> {
        self.timestamp
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
    }
}
