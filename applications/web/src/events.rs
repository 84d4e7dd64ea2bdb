//! Event listener and timer helpers

use crate::error::Result;
use std::time::Duration;
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{Event, EventTarget, Window};

/// Listener that is removed when dropped
pub struct EventListener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl EventListener {
    pub fn new(
        target: &EventTarget,
        event: &'static str,
        callback: impl FnMut(Event) + 'static,
    ) -> Result<Self> {
        let callback = Closure::<dyn FnMut(Event)>::new(callback);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

/// Repeating timer, cleared when dropped
pub struct Interval {
    window: Window,
    id: i32,
    _callback: Closure<dyn FnMut()>,
}

impl Interval {
    pub fn new(window: &Window, period: Duration, callback: impl FnMut() + 'static) -> Result<Self> {
        let callback = Closure::<dyn FnMut()>::new(callback);
        let id = window.set_interval_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            millis(period),
        )?;
        Ok(Self {
            window: window.clone(),
            id,
            _callback: callback,
        })
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        self.window.clear_interval_with_handle(self.id);
    }
}

/// Run `callback` once after `delay`
pub fn set_timeout(window: &Window, delay: Duration, callback: impl FnOnce() + 'static) -> Result<()> {
    let function = Closure::once_into_js(callback);
    window.set_timeout_with_callback_and_timeout_and_arguments_0(
        function.unchecked_ref(),
        millis(delay),
    )?;
    Ok(())
}

fn millis(duration: Duration) -> i32 {
    i32::try_from(duration.as_millis()).unwrap_or(i32::MAX)
}
