//! Roster validation bookkeeping
//!
//! The host probes every photo path asynchronously (by trying to load it)
//! and records each outcome here. The known-good subset keeps roster order
//! regardless of the order probes settle in.

use crate::roster::PhotoRoster;
use tracing::warn;

/// Outcome collection for one validation pass
#[derive(Debug, Clone)]
pub struct ValidationRun {
    candidates: Vec<(String, String)>,
    outcomes: Vec<Option<bool>>,
}

impl ValidationRun {
    /// Snapshot the roster; later roster edits do not affect this run
    pub fn new(roster: &PhotoRoster) -> Self {
        let candidates: Vec<_> = roster
            .photos()
            .iter()
            .map(|name| (name.clone(), roster.path_of(name)))
            .collect();
        let outcomes = vec![None; candidates.len()];
        Self {
            candidates,
            outcomes,
        }
    }

    /// `(filename, path)` pairs to probe, in roster order
    pub fn candidates(&self) -> impl Iterator<Item = (&str, &str)> {
        self.candidates
            .iter()
            .map(|(name, path)| (name.as_str(), path.as_str()))
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Record the probe result for the candidate at `index`
    ///
    /// Out-of-range indices are ignored; a second result for the same
    /// candidate replaces the first.
    pub fn record(&mut self, index: usize, loaded: bool) {
        let Some(slot) = self.outcomes.get_mut(index) else {
            return;
        };
        if !loaded {
            if let Some((name, _)) = self.candidates.get(index) {
                warn!(photo = %name, "Photo not found");
            }
        }
        *slot = Some(loaded);
    }

    pub fn is_complete(&self) -> bool {
        self.outcomes.iter().all(Option::is_some)
    }

    /// Filenames whose probe succeeded, in roster order
    pub fn valid(&self) -> Vec<String> {
        self.select(true)
    }

    /// Filenames whose probe failed, in roster order
    pub fn missing(&self) -> Vec<String> {
        self.select(false)
    }

    fn select(&self, loaded: bool) -> Vec<String> {
        self.candidates
            .iter()
            .zip(&self.outcomes)
            .filter(|(_, outcome)| **outcome == Some(loaded))
            .map(|((name, _), _)| name.clone())
            .collect()
    }
}
