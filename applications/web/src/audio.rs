//! `<audio>` element backend

use crate::error::describe;
use js_sys::Promise;
use keepsake_playback::{MediaElement, Result, SessionError};
use tracing::warn;
use web_sys::HtmlAudioElement;

/// `HAVE_CURRENT_DATA`: enough data to render the current position
const HAVE_CURRENT_DATA: u16 = 2;

pub struct HtmlAudio {
    element: HtmlAudioElement,
}

impl HtmlAudio {
    /// Create a detached audio element that starts buffering immediately
    pub fn open(url: &str) -> Result<Self> {
        let element =
            HtmlAudioElement::new_with_src(url).map_err(|e| SessionError::Media(describe(&e)))?;
        element.set_preload("auto");
        Ok(Self { element })
    }

    pub fn element(&self) -> &HtmlAudioElement {
        &self.element
    }
}

impl MediaElement for HtmlAudio {
    type Pending = Promise;

    fn set_looping(&mut self, looping: bool) {
        self.element.set_loop(looping);
    }

    fn set_volume(&mut self, volume: f64) {
        self.element.set_volume(volume);
    }

    fn current_time(&self) -> f64 {
        self.element.current_time()
    }

    fn seek(&mut self, position_secs: f64) {
        self.element.set_current_time(position_secs);
    }

    fn is_ready(&self) -> bool {
        self.element.ready_state() >= HAVE_CURRENT_DATA
    }

    fn start(&mut self) -> Promise {
        // A synchronous throw settles like an async rejection
        match self.element.play() {
            Ok(promise) => promise,
            Err(e) => Promise::reject(&e),
        }
    }

    fn pause(&mut self) {
        if let Err(e) = self.element.pause() {
            warn!(error = %describe(&e), "Failed to pause audio");
        }
    }
}
