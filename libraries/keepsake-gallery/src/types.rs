//! Gallery configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Photos shipped with the site, in display order
pub const SITE_PHOTOS: [&str; 16] = [
    "new-photo-top.jpg",
    "ica-drinking.jpg",
    "WhatsApp Image 2025-08-11 at 14.24.21_d50c4272.jpg",
    "WhatsApp Image 2025-08-12 at 00.50.35_978194b6.jpg",
    "bayuganteng.jpg",
    "beachseal.jpg",
    "forbeach1.jpg",
    "icacayangku - Copy.jpg",
    "icacayangku.jpg",
    "icadanbayu.jpg",
    "kita.jpg",
    "sayangku cantik.jpg",
    "widihcantikbanget.jpg",
    "wow.jpg",
    "wowcantik banget.jpg",
    "yoyo.jpg",
];

/// Gallery configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryConfig {
    /// Directory every photo path is built from
    #[serde(default = "default_base_dir")]
    pub base_dir: String,

    /// Ids of elements that display the photo count
    #[serde(default = "default_counter_ids")]
    pub counter_ids: Vec<String>,

    /// Counter animation length (default: 1500ms)
    #[serde(default = "default_count_duration_ms")]
    pub count_duration_ms: u32,

    /// Roster filenames
    #[serde(default = "default_photos")]
    pub photos: Vec<String>,
}

impl GalleryConfig {
    pub fn count_duration(&self) -> Duration {
        Duration::from_millis(u64::from(self.count_duration_ms))
    }
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            base_dir: default_base_dir(),
            counter_ids: default_counter_ids(),
            count_duration_ms: default_count_duration_ms(),
            photos: default_photos(),
        }
    }
}

fn default_base_dir() -> String {
    "assets/images".to_string()
}

fn default_counter_ids() -> Vec<String> {
    vec!["photoCount".to_string(), "photoCountHome".to_string()]
}

fn default_count_duration_ms() -> u32 {
    1500
}

fn default_photos() -> Vec<String> {
    SITE_PHOTOS.iter().map(|p| (*p).to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = GalleryConfig::default();
        assert_eq!(config.base_dir, "assets/images");
        assert_eq!(config.counter_ids, vec!["photoCount", "photoCountHome"]);
        assert_eq!(config.count_duration(), Duration::from_millis(1500));
        assert_eq!(config.photos.len(), 16);
    }

    #[test]
    fn partial_config_keeps_site_roster() {
        let config: GalleryConfig = serde_json::from_str(r#"{"base_dir": "img"}"#).unwrap();
        assert_eq!(config.base_dir, "img");
        assert_eq!(config.photos.len(), SITE_PHOTOS.len());
    }
}
