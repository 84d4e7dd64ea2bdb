//! Site configuration

use crate::error::{Result, WebError};
use keepsake_gallery::GalleryConfig;
use keepsake_playback::SessionConfig;
use serde::{Deserialize, Serialize};
use web_sys::Document;

/// Id of the optional inline JSON configuration element
pub const CONFIG_ELEMENT_ID: &str = "keepsake-config";

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub gallery: GalleryConfig,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl SiteConfig {
    /// Read `<script type="application/json" id="keepsake-config">`
    ///
    /// Absence is not an error and yields defaults.
    pub fn load(document: &Document) -> Result<Self> {
        let Some(element) = document.get_element_by_id(CONFIG_ELEMENT_ID) else {
            return Ok(Self::default());
        };
        Self::from_json(&element.text_content().unwrap_or_default())
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| WebError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.session.asset_url.trim().is_empty() {
            return Err(WebError::Config("session.asset_url must not be empty".to_string()));
        }
        if self.session.snapshot_interval_ms == 0 {
            return Err(WebError::Config(
                "session.snapshot_interval_ms must be greater than 0".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.session.default_volume) {
            return Err(WebError::Config(
                "session.default_volume must be within [0, 1]".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
