//! Playback session manager - core orchestration
//!
//! Owns the single audio resource of a page, mirrors its play/pause/seek
//! state into durable storage and restores it on the next page load.
//!
//! Everything runs on one cooperative timeline. The host drives the manager
//! from timers and DOM events:
//! - `poll_resume()` after `resume_delay`, then on every `Wait` step
//! - `snapshot()` every `snapshot_interval`
//! - `on_time_update()` from the media element's position signal
//! - `on_user_gesture()` from the one-shot pointer/touch listener
//! - `flush()` on page teardown
//! - `finish_play()` when a play request settles

use crate::{
    error::{PlayRejection, Result},
    media::MediaElement,
    record,
    resume::{Poll, ResumeStep, ResumeTracker},
    store::StateStore,
    types::{PlayOrigin, PlayRequest, PlayTicket, PlaybackState, SessionConfig},
};
use tracing::{debug, info, warn};

type StateObserver = Box<dyn FnMut(&PlaybackState)>;

/// Cross-page persistent playback session
///
/// `S` is the durable store, `E` the tab-scoped store that receives the
/// `musicActive` flag.
pub struct SessionManager<M: MediaElement, S: StateStore, E: StateStore = S> {
    config: SessionConfig,
    state: PlaybackState,
    media: M,
    durable: S,
    ephemeral: E,

    /// Present while a restored session waits for the media to become ready
    resume: Option<ResumeTracker>,

    /// The stored offset has been applied to the media element; until then
    /// the element's live position is meaningless
    position_applied: bool,

    /// One-shot retry on the next pointer/touch gesture
    gesture_retry_armed: bool,

    /// Most recent play request that has not settled
    in_flight: Option<PlayTicket>,
    next_ticket: u64,

    on_state_change: Option<StateObserver>,
}

impl<M: MediaElement, S: StateStore, E: StateStore> SessionManager<M, S, E> {
    /// Restore state, open the media element and prepare a pending resume
    ///
    /// A missing or corrupt record never fails initialization; defaults are
    /// substituted field by field. Only a failure to open the media element
    /// is returned.
    pub fn initialize(
        config: SessionConfig,
        durable: S,
        ephemeral: E,
        open_media: impl FnOnce(&str) -> Result<M>,
    ) -> Result<Self> {
        let fallback = config.initial_state();
        let raw = match durable.read(&config.storage_key) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, key = %config.storage_key, "Could not read music state");
                None
            }
        };
        let state = record::restore(raw.as_deref(), fallback);

        let mut media = open_media(&config.asset_url)?;
        media.set_looping(true);
        media.set_volume(state.volume);

        let resume = state
            .is_playing
            .then(|| ResumeTracker::new(config.max_ready_polls));

        info!(
            is_playing = state.is_playing,
            position_secs = state.position_secs,
            volume = state.volume,
            "Music session restored"
        );

        Ok(Self {
            config,
            state,
            media,
            durable,
            ephemeral,
            resume,
            position_applied: false,
            gesture_retry_armed: false,
            in_flight: None,
            next_ticket: 0,
            on_state_change: None,
        })
    }

    // ===== Accessors =====

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn media(&self) -> &M {
        &self.media
    }

    pub fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }

    pub fn durable_store(&self) -> &S {
        &self.durable
    }

    pub fn ephemeral_store(&self) -> &E {
        &self.ephemeral
    }

    /// Whether the stored offset has reached the media element
    pub fn is_position_applied(&self) -> bool {
        self.position_applied
    }

    /// Whether a restored session is still waiting to resume
    pub fn is_resume_pending(&self) -> bool {
        self.resume.is_some()
    }

    pub fn is_gesture_retry_armed(&self) -> bool {
        self.gesture_retry_armed
    }

    /// Ticket of the play request still awaiting its outcome
    pub fn in_flight(&self) -> Option<PlayTicket> {
        self.in_flight
    }

    /// Register the callback run after every change to `is_playing`
    pub fn set_state_observer(&mut self, observer: impl FnMut(&PlaybackState) + 'static) {
        self.on_state_change = Some(Box::new(observer));
    }

    // ===== Playback Control =====

    /// Request playback from the current position
    pub fn play(&mut self) -> PlayRequest<M::Pending> {
        self.request_play(PlayOrigin::User)
    }

    /// Capture the position, stop playback and persist
    ///
    /// Also cancels a pending restore and disarms the gesture retry. A
    /// session whose stored offset never reached the media keeps that offset.
    pub fn pause(&mut self) {
        self.capture_position();
        self.media.pause();
        self.state.is_playing = false;
        self.gesture_retry_armed = false;
        self.resume = None;

        debug!(position_secs = self.state.position_secs, "Music paused");
        self.persist();
        self.notify();
    }

    /// Play when paused, pause when playing
    pub fn toggle(&mut self) -> Option<PlayRequest<M::Pending>> {
        if self.state.is_playing {
            self.pause();
            None
        } else {
            Some(self.play())
        }
    }

    /// Report the outcome of a play request
    ///
    /// Success marks the session playing, persists and notifies. A rejection
    /// leaves `is_playing` untouched and, unless the request was merely
    /// aborted, arms the one-shot gesture retry.
    pub fn finish_play(&mut self, ticket: PlayTicket, outcome: std::result::Result<(), PlayRejection>) {
        if self.in_flight == Some(ticket) {
            self.in_flight = None;
        }

        match outcome {
            Ok(()) => {
                debug!(ticket = ticket.id, origin = ?ticket.origin, "Playback started");
                self.gesture_retry_armed = false;
                self.state.is_playing = true;
                self.persist();
                self.notify();
            }
            Err(rejection) => {
                match &rejection {
                    PlayRejection::NotAllowed => {
                        info!(origin = ?ticket.origin, "Autoplay prevented, waiting for user gesture");
                    }
                    PlayRejection::Aborted => {
                        debug!(origin = ?ticket.origin, "Play request aborted");
                    }
                    other => {
                        warn!(origin = ?ticket.origin, reason = %other, "Play failed");
                    }
                }
                if rejection.is_retryable() {
                    self.gesture_retry_armed = true;
                }
            }
        }
    }

    /// One-shot retry after a pointer/touch gesture
    ///
    /// Disarms on the first call. Returns a play request only if the retry was
    /// armed and no other play is already in flight.
    pub fn on_user_gesture(&mut self) -> Option<PlayRequest<M::Pending>> {
        if !self.gesture_retry_armed {
            return None;
        }
        self.gesture_retry_armed = false;

        if let Some(ticket) = self.in_flight {
            debug!(ticket = ticket.id, "Gesture retry skipped, play already in flight");
            return None;
        }
        Some(self.request_play(PlayOrigin::GestureRetry))
    }

    /// Drive a pending restore one step
    pub fn poll_resume(&mut self) -> ResumeStep<M::Pending> {
        let ready = self.media.is_ready();
        let Some(tracker) = self.resume.as_mut() else {
            return ResumeStep::Idle;
        };

        match tracker.poll(ready) {
            Poll::Retry => ResumeStep::Wait(self.config.ready_poll_interval()),
            Poll::Ready => {
                let polls = tracker.polls();
                self.resume = None;
                info!(polls, position_secs = self.state.position_secs, "Resuming music");
                ResumeStep::Play(self.request_play(PlayOrigin::Restore))
            }
            Poll::Exhausted => {
                let polls = tracker.polls();
                self.resume = None;
                self.gesture_retry_armed = true;
                warn!(polls, "Audio never became ready, waiting for user gesture");
                ResumeStep::GaveUp
            }
        }
    }

    // ===== Position & Volume =====

    /// Periodic snapshot: while playing, copy the live position and persist
    ///
    /// Returns whether anything was written.
    pub fn snapshot(&mut self) -> bool {
        if !self.state.is_playing || !self.position_applied {
            return false;
        }
        self.capture_position();
        self.persist();
        true
    }

    /// Mirror the media element's position signal into state (no write)
    pub fn on_time_update(&mut self) {
        self.capture_position();
    }

    /// Page teardown: persist unconditionally
    pub fn flush(&mut self) {
        if self.state.is_playing {
            self.capture_position();
        }
        self.persist();
    }

    /// Set volume (clamped to [0, 1]) and persist
    pub fn set_volume(&mut self, volume: f64) {
        self.state.volume = PlaybackState::clamp_volume(volume);
        self.media.set_volume(self.state.volume);
        self.persist();
    }

    /// Write the record and the session flag, returning the first failure
    pub fn save(&mut self) -> Result<()> {
        let json = record::encode(&self.state)?;
        self.durable.write(&self.config.storage_key, &json)?;
        self.ephemeral.write(&self.config.active_flag_key, "true")
    }

    // ===== Internal =====

    fn request_play(&mut self, origin: PlayOrigin) -> PlayRequest<M::Pending> {
        if !self.position_applied && self.state.position_secs > 0.0 {
            self.media.seek(self.state.position_secs);
        }
        self.position_applied = true;

        let ticket = PlayTicket {
            id: self.next_ticket,
            origin,
        };
        self.next_ticket += 1;
        self.in_flight = Some(ticket);

        debug!(ticket = ticket.id, origin = ?origin, "Requesting playback");
        PlayRequest {
            ticket,
            pending: self.media.start(),
        }
    }

    /// Copy the live position into state once the stored offset is applied
    fn capture_position(&mut self) {
        if self.position_applied {
            self.state.position_secs = PlaybackState::clamp_position(self.media.current_time());
        }
    }

    fn persist(&mut self) {
        if let Err(e) = self.save() {
            warn!(error = %e, "Failed to save music state");
        }
    }

    fn notify(&mut self) {
        if let Some(observer) = self.on_state_change.as_mut() {
            observer(&self.state);
        }
    }
}
