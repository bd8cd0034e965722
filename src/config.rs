//! Runtime configuration, loaded from JSON. Every field has a default so partial files work.

use std::path::Path;
use std::time::Duration;

use anyhow::Context;

use crate::catalog::model::{DEFAULT_STOREFRONT_URL, PLACEHOLDER_THUMBNAIL};
use crate::compose::compositor::CompositorSettings;
use crate::foundation::error::{PlantfitError, PlantfitResult};
use crate::gesture::controller::GestureConfig;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api/articles";
pub const DEFAULT_INSTAGRAM_URL: &str = "https://www.instagram.com/namu_dw/";

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    /// Catalog API root; plants are listed from `<api_base_url>/plants/`.
    pub api_base_url: String,
    pub storefront_url: String,
    /// Profile link shown next to the purchase button after a capture.
    pub instagram_url: String,
    pub placeholder_thumbnail: String,
    pub gesture: GestureConfig,
    pub compositor: CompositorSettings,
    pub notification_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            storefront_url: DEFAULT_STOREFRONT_URL.to_owned(),
            instagram_url: DEFAULT_INSTAGRAM_URL.to_owned(),
            placeholder_thumbnail: PLACEHOLDER_THUMBNAIL.to_owned(),
            gesture: GestureConfig::default(),
            compositor: CompositorSettings::default(),
            notification_ms: 1500,
        }
    }
}

impl Config {
    pub fn from_json_str(text: &str) -> PlantfitResult<Self> {
        let cfg: Self = serde_json::from_str(text)
            .map_err(|e| PlantfitError::serde(format!("config json: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: impl AsRef<Path>) -> PlantfitResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> PlantfitResult<()> {
        self.compositor.validate()?;
        if self.api_base_url.trim().is_empty() {
            return Err(PlantfitError::validation("api_base_url must not be empty"));
        }
        Ok(())
    }

    pub fn notification_duration(&self) -> Duration {
        Duration::from_millis(self.notification_ms)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config/config.rs"]
mod tests;
