//! Photo roster
//!
//! An ordered list of unique image filenames under one base directory.
//! Mutations live in memory only.

use crate::error::{Result, RosterError};
use crate::types::GalleryConfig;
use tracing::{debug, warn};

/// Ordered collection of photo filenames
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoRoster {
    base_dir: String,
    photos: Vec<String>,
}

impl PhotoRoster {
    /// Build a roster, dropping blank and repeated filenames
    pub fn new<I, S>(base_dir: impl Into<String>, photos: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut roster = Self {
            base_dir: base_dir.into(),
            photos: Vec::new(),
        };
        for photo in photos {
            let photo = photo.into();
            if let Err(e) = roster.add(&photo) {
                warn!(error = %e, "Skipping roster entry");
            }
        }
        roster
    }

    pub fn from_config(config: &GalleryConfig) -> Self {
        Self::new(config.base_dir.clone(), config.photos.iter().cloned())
    }

    pub fn count(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    pub fn photos(&self) -> &[String] {
        &self.photos
    }

    pub fn base_dir(&self) -> &str {
        &self.base_dir
    }

    pub fn contains(&self, filename: &str) -> bool {
        self.photos.iter().any(|p| p == filename)
    }

    /// Relative path of one filename
    pub fn path_of(&self, filename: &str) -> String {
        let base = self.base_dir.trim_end_matches('/');
        if base.is_empty() {
            filename.to_string()
        } else {
            format!("{base}/{filename}")
        }
    }

    /// Relative path of every photo, in roster order
    pub fn all_paths(&self) -> Vec<String> {
        self.photos.iter().map(|p| self.path_of(p)).collect()
    }

    /// Append a filename; fails if it is already listed
    pub fn add(&mut self, filename: &str) -> Result<()> {
        if filename.trim().is_empty() {
            return Err(RosterError::EmptyFilename);
        }
        if self.contains(filename) {
            return Err(RosterError::AlreadyPresent(filename.to_string()));
        }
        self.photos.push(filename.to_string());
        debug!(filename, count = self.photos.len(), "Photo added");
        Ok(())
    }

    /// Remove a filename; fails if it is not listed
    pub fn remove(&mut self, filename: &str) -> Result<()> {
        let index = self
            .photos
            .iter()
            .position(|p| p == filename)
            .ok_or_else(|| RosterError::NotPresent(filename.to_string()))?;
        self.photos.remove(index);
        debug!(filename, count = self.photos.len(), "Photo removed");
        Ok(())
    }
}

impl Default for PhotoRoster {
    fn default() -> Self {
        Self::from_config(&GalleryConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn site_roster_has_sixteen_photos() {
        let roster = PhotoRoster::default();
        assert_eq!(roster.count(), 16);
        assert_eq!(roster.photos()[0], "new-photo-top.jpg");
    }

    #[test]
    fn paths_join_base_dir() {
        let roster = PhotoRoster::new("assets/images/", ["a.jpg", "b c.jpg"]);
        assert_eq!(
            roster.all_paths(),
            vec!["assets/images/a.jpg", "assets/images/b c.jpg"]
        );
        let flat = PhotoRoster::new("", ["a.jpg"]);
        assert_eq!(flat.all_paths(), vec!["a.jpg"]);
    }

    #[test]
    fn duplicates_and_blanks_dropped_on_build() {
        let roster = PhotoRoster::new("img", ["a.jpg", "a.jpg", " ", "b.jpg"]);
        assert_eq!(roster.photos(), ["a.jpg", "b.jpg"]);
    }

    #[test]
    fn add_and_remove() {
        let mut roster = PhotoRoster::default();
        let original = roster.count();

        assert_eq!(roster.add("x.jpg"), Ok(()));
        assert_eq!(roster.count(), original + 1);
        assert_eq!(
            roster.add("x.jpg"),
            Err(RosterError::AlreadyPresent("x.jpg".into()))
        );
        assert_eq!(roster.count(), original + 1);

        assert_eq!(roster.remove("x.jpg"), Ok(()));
        assert_eq!(roster.count(), original);
        assert_eq!(
            roster.remove("x.jpg"),
            Err(RosterError::NotPresent("x.jpg".into()))
        );
    }

    #[test]
    fn blank_filename_rejected() {
        let mut roster = PhotoRoster::default();
        assert_eq!(roster.add(""), Err(RosterError::EmptyFilename));
    }
}
