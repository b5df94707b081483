use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{info, warn};
use shared::HomepageContent;

use super::traits::ContentRepository;

/// Reads homepage content exported from the content backend as a JSON file
#[derive(Debug, Clone)]
pub struct JsonContentRepository {
    path: PathBuf,
}

impl JsonContentRepository {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl ContentRepository for JsonContentRepository {
    async fn load_homepage(&self) -> Result<Option<HomepageContent>> {
        let exists = tokio::fs::try_exists(&self.path)
            .await
            .with_context(|| format!("Failed to check for content file {}", self.path.display()))?;
        if !exists {
            warn!("No content file at {}", self.path.display());
            return Ok(None);
        }

        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read content file {}", self.path.display()))?;
        let content: HomepageContent = serde_json::from_str(&raw)
            .with_context(|| format!("Malformed content file {}", self.path.display()))?;

        info!("Loaded homepage content from {}", self.path.display());
        Ok(Some(content))
    }
}
