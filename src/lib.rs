use serde::{Deserialize, Serialize};
use std::path::Path;

pub mod gallery;
pub mod provider;
pub mod viewer;

pub use gallery::{
    FilterSelection, Gallery, GalleryError, MonthNode, Photo, ResolvedPhoto, TemporalIndex,
    YearNode,
};
pub use provider::{
    PhotoProvider, PlaceholderProvider, ProviderError, fetch_or_placeholder, placeholder_photos,
};
pub use viewer::{DisplaySource, KeyboardHook, ListenerGuard, NullKeyboardHook, Viewer, ViewerState};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub app: AppConfig,
    pub gallery: GalleryConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub name: String,
    pub log_level: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GalleryConfig {
    /// Number of photos in the substitute dataset handed out when the
    /// real photo source fails.
    pub placeholder_count: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: "Nendaiki".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            placeholder_count: 36,
        }
    }
}

impl Config {
    /// Loads configuration from a TOML file. Missing sections and fields
    /// fall back to their defaults.
    pub fn from_toml_file(path: &Path) -> Result<Self, GalleryError> {
        let config_content = std::fs::read_to_string(path)?;
        Ok(toml_edit::de::from_str::<Config>(&config_content)?)
    }
}
