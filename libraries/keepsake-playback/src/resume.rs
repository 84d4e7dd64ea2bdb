//! Readiness polling for restored sessions
//!
//! A freshly created media element is usually not seekable yet. A restored
//! session polls readiness on a fixed backoff and only seeks and plays once
//! the element reports ready. Polling is bounded.

use crate::types::PlayRequest;
use std::time::Duration;

/// What the host should do after polling a pending restore
#[derive(Debug)]
pub enum ResumeStep<P> {
    /// Nothing to resume
    Idle,

    /// Not ready yet: poll again after the delay
    Wait(Duration),

    /// Ready: position applied, play requested
    Play(PlayRequest<P>),

    /// Poll budget exhausted; playback waits for a user gesture
    GaveUp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Poll {
    Ready,
    Retry,
    Exhausted,
}

/// Counts readiness polls against a budget
#[derive(Debug, Clone)]
pub(crate) struct ResumeTracker {
    polls: u32,
    max_polls: u32,
}

impl ResumeTracker {
    pub(crate) fn new(max_polls: u32) -> Self {
        Self {
            polls: 0,
            max_polls,
        }
    }

    pub(crate) fn poll(&mut self, ready: bool) -> Poll {
        if ready {
            return Poll::Ready;
        }
        self.polls = self.polls.saturating_add(1);
        if self.polls >= self.max_polls {
            Poll::Exhausted
        } else {
            Poll::Retry
        }
    }

    pub(crate) fn polls(&self) -> u32 {
        self.polls
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ready_immediately() {
        let mut tracker = ResumeTracker::new(3);
        assert_eq!(tracker.poll(true), Poll::Ready);
        assert_eq!(tracker.polls(), 0);
    }

    #[test]
    fn retries_until_budget() {
        let mut tracker = ResumeTracker::new(3);
        assert_eq!(tracker.poll(false), Poll::Retry);
        assert_eq!(tracker.poll(false), Poll::Retry);
        assert_eq!(tracker.poll(false), Poll::Exhausted);
    }

    #[test]
    fn ready_after_retries() {
        let mut tracker = ResumeTracker::new(10);
        tracker.poll(false);
        tracker.poll(false);
        assert_eq!(tracker.poll(true), Poll::Ready);
        assert_eq!(tracker.polls(), 2);
    }

    #[test]
    fn zero_budget_gives_up_on_first_miss() {
        let mut tracker = ResumeTracker::new(0);
        assert_eq!(tracker.poll(false), Poll::Exhausted);
    }
}
