use thiserror::Error;

use crate::provider::ProviderError;

#[derive(Debug, Error)]
pub enum GalleryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(#[from] toml_edit::de::Error),

    #[error("photo provider error: {0}")]
    Provider(#[from] ProviderError),
}
