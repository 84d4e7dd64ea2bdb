//! Keepsake - browser entry point
//!
//! Mounts the background music session and the photo roster on every page
//! of the site. Load the generated module and call `mount()` once the
//! document is parsed:
//!
//! ```js
//! import init, { mount } from "./pkg/keepsake_web.js";
//!
//! await init();
//! window.keepsake = mount();
//! window.toggleMusic = () => window.keepsake.toggleMusic();
//! ```
//!
//! Neither widget is fatal to the page. A player that cannot start is logged
//! and left out; the gallery works without it.

mod audio;
pub mod config;
mod error;
mod events;
mod gallery;
mod logging;
mod page;
mod player;
mod storage;

pub use audio::HtmlAudio;
pub use config::SiteConfig;
pub use error::{Result, WebError};
pub use page::DomPage;
pub use storage::{BrowserStore, StorageArea};

use gallery::Gallery;
use js_sys::Promise;
use player::{Player, PlayerHandle};
use serde::Serialize;
use std::time::Duration;
use tracing::{error, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlImageElement, IntersectionObserver};

#[wasm_bindgen(start)]
pub fn start() {
    // Enable panic hooks for better error messages in console
    console_error_panic_hook::set_once();
}

/// Read the site configuration, then mount the player and the gallery
#[wasm_bindgen]
pub fn mount() -> std::result::Result<SiteHandle, JsValue> {
    let window = web_sys::window().ok_or(WebError::MissingGlobal("window"))?;
    let document = window
        .document()
        .ok_or(WebError::MissingGlobal("document"))?;

    let loaded = SiteConfig::load(&document);
    let config = loaded.as_ref().cloned().unwrap_or_default();
    logging::init(&config.log_level);
    if let Err(e) = &loaded {
        warn!(error = %e, "Ignoring site configuration, using defaults");
    }

    let gallery = Gallery::new(&window, &document, config.gallery);
    gallery.update_counts();

    let player = match Player::mount(&window, &document, config.session) {
        Ok(handle) => Some(handle),
        Err(e) => {
            error!(error = %e, "Music player unavailable");
            None
        }
    };

    info!(player = player.is_some(), "Site mounted");
    Ok(SiteHandle { player, gallery })
}

/// Playback state as seen from JavaScript
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StateView {
    is_playing: bool,
    current_time: f64,
    volume: f64,
}

/// Handle returned by `mount()`
#[wasm_bindgen]
pub struct SiteHandle {
    player: Option<PlayerHandle>,
    gallery: Gallery,
}

#[wasm_bindgen]
impl SiteHandle {
    // ===== Music =====

    /// Toggle playback, as the on-page controls do
    #[wasm_bindgen(js_name = toggleMusic)]
    pub fn toggle_music(&self) {
        match &self.player {
            Some(handle) => handle.player().toggle(),
            None => warn!("toggleMusic called without a music player"),
        }
    }

    #[wasm_bindgen(js_name = isPlaying)]
    pub fn is_playing(&self) -> bool {
        self.player
            .as_ref()
            .is_some_and(|handle| handle.player().state().is_playing)
    }

    /// Set volume in [0, 1]; out-of-range values are clamped
    #[wasm_bindgen(js_name = setVolume)]
    pub fn set_volume(&self, volume: f64) {
        if let Some(handle) = &self.player {
            handle.player().set_volume(volume);
        }
    }

    /// `{ isPlaying, currentTime, volume }`, or `null` without a player
    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> std::result::Result<JsValue, JsValue> {
        let Some(handle) = &self.player else {
            return Ok(JsValue::NULL);
        };
        let state = handle.player().state();
        let view = StateView {
            is_playing: state.is_playing,
            current_time: state.position_secs,
            volume: state.volume,
        };
        serde_wasm_bindgen::to_value(&view).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Rebuild both music controls
    #[wasm_bindgen(js_name = renderControls)]
    pub fn render_controls(&self) -> std::result::Result<(), JsValue> {
        if let Some(handle) = &self.player {
            handle.player().render()?;
        }
        Ok(())
    }

    // ===== Photos =====

    #[wasm_bindgen(js_name = photoCount)]
    pub fn photo_count(&self) -> usize {
        self.gallery.count()
    }

    #[wasm_bindgen(js_name = photoPath)]
    pub fn photo_path(&self, filename: &str) -> String {
        self.gallery.path_of(filename)
    }

    #[wasm_bindgen(js_name = allPhotoPaths)]
    pub fn all_photo_paths(&self) -> Vec<String> {
        self.gallery.all_paths()
    }

    /// Returns `false` if the photo was blank or already listed
    #[wasm_bindgen(js_name = addPhoto)]
    pub fn add_photo(&self, filename: &str) -> bool {
        report(self.gallery.add(filename))
    }

    /// Returns `false` if the photo was not listed
    #[wasm_bindgen(js_name = removePhoto)]
    pub fn remove_photo(&self, filename: &str) -> bool {
        report(self.gallery.remove(filename))
    }

    /// Count `element` up to the number of photos over `durationMs`
    #[wasm_bindgen(js_name = animateCount)]
    pub fn animate_count(&self, element: Element, duration_ms: u32) {
        self.gallery
            .animate_count(element, Duration::from_millis(u64::from(duration_ms)));
    }

    #[wasm_bindgen(js_name = updatePhotoCount)]
    pub fn update_photo_count(&self) {
        self.gallery.update_counts();
    }

    /// Resolves `true` if the image loads
    #[wasm_bindgen(js_name = validateImage)]
    pub fn validate_image(&self, src: &str) -> Promise {
        gallery::validate_exists(src)
    }

    /// Resolves with the filenames whose images load
    #[wasm_bindgen(js_name = getValidPhotos)]
    pub fn get_valid_photos(&self) -> Promise {
        self.gallery.valid_photos()
    }

    #[wasm_bindgen(js_name = createLazyObserver)]
    pub fn create_lazy_observer(&self) -> Option<IntersectionObserver> {
        self.gallery.create_lazy_observer()
    }

    #[wasm_bindgen(js_name = loadImage)]
    pub fn load_image(
        &self,
        src: &str,
        alt: &str,
        class_name: &str,
        observer: Option<IntersectionObserver>,
    ) -> std::result::Result<HtmlImageElement, JsValue> {
        Ok(self
            .gallery
            .load_image(src, alt, class_name, observer.as_ref())?)
    }
}

fn report(outcome: Result<()>) -> bool {
    match outcome {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "Photo roster unchanged");
            false
        }
    }
}
