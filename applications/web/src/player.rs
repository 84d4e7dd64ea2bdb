//! Browser wiring for the music session
//!
//! Connects the session to its DOM signals: control clicks, timers, the
//! audio element's `timeupdate`, one-shot gesture listeners and
//! `beforeunload`. Every callback holds a weak reference, so dropping the
//! handle silences them.

use crate::{
    audio::HtmlAudio,
    error::{describe, Result},
    events::{set_timeout, EventListener, Interval},
    page::DomPage,
    storage::{BrowserStore, StorageArea},
};
use js_sys::Promise;
use keepsake_playback::{
    ControlSurface, PlayRejection, PlayRequest, PlayTicket, PlaybackState, ResumeStep,
    SessionConfig, SessionManager,
};
use std::{
    cell::RefCell,
    rc::{Rc, Weak},
    time::Duration,
};
use tracing::{debug, warn};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Document, DomException, Element, Window};

type WebSession = SessionManager<HtmlAudio, BrowserStore>;

/// Gestures that may unlock audio after an autoplay rejection
const GESTURE_EVENTS: [&str; 2] = ["click", "touchstart"];

pub struct Player {
    window: Window,
    document: Document,
    session: RefCell<WebSession>,
    controls: RefCell<ControlSurface<Element>>,
    page: RefCell<DomPage>,
    /// Attached exactly while a gesture retry is armed
    gesture_listeners: RefCell<Vec<EventListener>>,
}

/// Owns the player and its page-lifetime listeners
pub struct PlayerHandle {
    player: Rc<Player>,
    _snapshot: Interval,
    _listeners: Vec<EventListener>,
}

impl PlayerHandle {
    pub fn player(&self) -> &Rc<Player> {
        &self.player
    }
}

impl Player {
    /// Restore the session, render both controls and start the timers
    pub fn mount(window: &Window, document: &Document, config: SessionConfig) -> Result<PlayerHandle> {
        let session = SessionManager::initialize(
            config,
            BrowserStore::open(window, StorageArea::Local),
            BrowserStore::open(window, StorageArea::Session),
            HtmlAudio::open,
        )?;
        let snapshot_period = session.config().snapshot_interval();
        let resume_delay = session.config().resume_delay();
        let audio = session.media().element().clone();

        let player = Rc::new(Player {
            window: window.clone(),
            document: document.clone(),
            session: RefCell::new(session),
            controls: RefCell::new(ControlSurface::new()),
            page: RefCell::new(DomPage::new(document.clone())),
            gesture_listeners: RefCell::new(Vec::new()),
        });

        let weak = Rc::downgrade(&player);
        player
            .session
            .borrow_mut()
            .set_state_observer(move |state: &PlaybackState| {
                if let Some(player) = weak.upgrade() {
                    player.sync_label(state.is_playing);
                }
            });

        player.render()?;

        let listeners = vec![
            EventListener::new(audio.as_ref(), "timeupdate", {
                let weak = Rc::downgrade(&player);
                move |_| with_player(&weak, |player| player.session.borrow_mut().on_time_update())
            })?,
            EventListener::new(window.as_ref(), "beforeunload", {
                let weak = Rc::downgrade(&player);
                move |_| with_player(&weak, |player| player.session.borrow_mut().flush())
            })?,
        ];

        let snapshot = Interval::new(window, snapshot_period, {
            let weak = Rc::downgrade(&player);
            move || {
                with_player(&weak, |player| {
                    player.session.borrow_mut().snapshot();
                });
            }
        })?;

        if player.session.borrow().is_resume_pending() {
            player.schedule_resume_poll(resume_delay);
        }

        Ok(PlayerHandle {
            player,
            _snapshot: snapshot,
            _listeners: listeners,
        })
    }

    pub fn state(&self) -> PlaybackState {
        self.session.borrow().state()
    }

    /// Shared click handler of both controls
    pub fn toggle(self: &Rc<Self>) {
        let request = self.session.borrow_mut().toggle();
        self.sync_gesture_listeners();
        if let Some(request) = request {
            self.dispatch(request);
        }
    }

    pub fn set_volume(&self, volume: f64) {
        self.session.borrow_mut().set_volume(volume);
    }

    /// Re-mount both controls, e.g. after the page swapped its navigation bar
    pub fn render(self: &Rc<Self>) -> Result<()> {
        let is_playing = self.session.borrow().is_playing();
        let weak = Rc::downgrade(self);
        let on_toggle: Rc<dyn Fn()> = Rc::new(move || with_player(&weak, Player::toggle));
        self.controls
            .borrow_mut()
            .render(&mut *self.page.borrow_mut(), is_playing, on_toggle)?;
        Ok(())
    }

    fn sync_label(&self, is_playing: bool) {
        self.controls
            .borrow()
            .sync_label(&mut *self.page.borrow_mut(), is_playing);
    }

    /// Await a play promise and report its outcome
    fn dispatch(self: &Rc<Self>, request: PlayRequest<Promise>) {
        let PlayRequest { ticket, pending } = request;
        let weak = Rc::downgrade(self);
        spawn_local(async move {
            let outcome = JsFuture::from(pending)
                .await
                .map(|_| ())
                .map_err(|error| classify(&error));
            with_player(&weak, |player| player.finish(ticket, outcome));
        });
    }

    fn finish(self: &Rc<Self>, ticket: PlayTicket, outcome: std::result::Result<(), PlayRejection>) {
        self.session.borrow_mut().finish_play(ticket, outcome);
        self.sync_gesture_listeners();
    }

    fn schedule_resume_poll(self: &Rc<Self>, delay: Duration) {
        let weak = Rc::downgrade(self);
        if let Err(e) = set_timeout(&self.window, delay, move || {
            with_player(&weak, Player::poll_resume);
        }) {
            warn!(error = %e, "Could not schedule music resume");
        }
    }

    fn poll_resume(self: &Rc<Self>) {
        let step = self.session.borrow_mut().poll_resume();
        match step {
            ResumeStep::Idle => {}
            ResumeStep::Wait(delay) => self.schedule_resume_poll(delay),
            ResumeStep::Play(request) => self.dispatch(request),
            ResumeStep::GaveUp => self.sync_gesture_listeners(),
        }
    }

    /// Attach the gesture listeners while a retry is armed, detach otherwise
    fn sync_gesture_listeners(self: &Rc<Self>) {
        let armed = self.session.borrow().is_gesture_retry_armed();
        let mut listeners = self.gesture_listeners.borrow_mut();
        if !armed {
            listeners.clear();
            return;
        }
        if !listeners.is_empty() {
            return;
        }

        for event in GESTURE_EVENTS {
            let weak = Rc::downgrade(self);
            match EventListener::new(self.document.as_ref(), event, move |_| {
                with_player(&weak, Player::on_gesture);
            }) {
                Ok(listener) => listeners.push(listener),
                Err(e) => warn!(event, error = %e, "Could not listen for user gesture"),
            }
        }
    }

    fn on_gesture(self: &Rc<Self>) {
        let request = self.session.borrow_mut().on_user_gesture();
        // The first gesture disarms the retry, so both listeners go
        self.sync_gesture_listeners();
        if let Some(request) = request {
            debug!("Retrying playback after user gesture");
            self.dispatch(request);
        }
    }
}

fn with_player(weak: &Weak<Player>, f: impl FnOnce(&Rc<Player>)) {
    if let Some(player) = weak.upgrade() {
        f(&player);
    }
}

/// Map a `play()` rejection onto the session's rejection kinds
fn classify(error: &JsValue) -> PlayRejection {
    match error.dyn_ref::<DomException>() {
        Some(exception) => PlayRejection::from_name(&exception.name(), &exception.message()),
        None => PlayRejection::Other(describe(error)),
    }
}
