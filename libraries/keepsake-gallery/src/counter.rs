//! Count-up animation
//!
//! Frame math for a counter that climbs from 0 to a target over a fixed
//! duration. The host feeds display-frame timestamps (milliseconds, as given
//! to `requestAnimationFrame` callbacks); the first frame fixes the start.

use std::time::Duration;

/// One rendered frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountFrame {
    /// Integer to display
    pub value: u32,

    /// No further frames needed
    pub finished: bool,
}

/// Counter animation from 0 to `target`
#[derive(Debug, Clone)]
pub struct CountAnimation {
    target: u32,
    duration_ms: f64,
    started_at: Option<f64>,
    shown: u32,
}

impl CountAnimation {
    pub fn new(target: u32, duration: Duration) -> Self {
        Self {
            target,
            // Exact for whole milliseconds, unlike `as_secs_f64() * 1000.0`
            duration_ms: duration.as_nanos() as f64 / 1_000_000.0,
            started_at: None,
            shown: 0,
        }
    }

    pub fn target(&self) -> u32 {
        self.target
    }

    /// Value for the frame at `timestamp_ms`
    ///
    /// Never decreases between frames and never exceeds the target, even if
    /// timestamps arrive out of order.
    pub fn frame(&mut self, timestamp_ms: f64) -> CountFrame {
        let start = *self.started_at.get_or_insert(timestamp_ms);
        // Decided on timestamps, not on the rounded quotient
        let finished = timestamp_ms >= start + self.duration_ms;

        let value = if finished {
            self.target
        } else {
            let progress = ((timestamp_ms - start) / self.duration_ms).clamp(0.0, 1.0);
            ((progress * f64::from(self.target)).floor() as u32).min(self.target)
        };
        self.shown = self.shown.max(value);

        CountFrame {
            value: self.shown,
            finished,
        }
    }
}
