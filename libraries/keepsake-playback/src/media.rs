//! Platform-agnostic media element trait
//!
//! Abstracts the audio resource the session drives (an `HTMLAudioElement`
//! in the browser, a scripted fake in tests).

/// Single looped audio resource
pub trait MediaElement {
    /// Platform handle for an in-flight play request (e.g. a JS promise)
    type Pending;

    /// Loop the track forever
    fn set_looping(&mut self, looping: bool);

    /// Set output volume in [0, 1]
    fn set_volume(&mut self, volume: f64);

    /// Live playback offset in seconds
    fn current_time(&self) -> f64;

    /// Move the playback offset
    fn seek(&mut self, position_secs: f64);

    /// Whether enough data is buffered to seek and play without stalling
    fn is_ready(&self) -> bool;

    /// Ask the platform to start playback
    ///
    /// Must not block: the outcome is settled later by the host and reported
    /// through [`crate::SessionManager::finish_play`].
    fn start(&mut self) -> Self::Pending;

    /// Stop playback, keeping the offset
    fn pause(&mut self);
}
