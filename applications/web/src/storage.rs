//! Web Storage backed state stores

use crate::error::describe;
use keepsake_playback::{Result, SessionError, StateStore};
use std::fmt;
use tracing::warn;
use web_sys::{Storage, Window};

/// Which Web Storage area a store reads and writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageArea {
    /// `localStorage`, survives navigation and restarts
    Local,
    /// `sessionStorage`, scoped to the tab
    Session,
}

impl fmt::Display for StorageArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => write!(f, "localStorage"),
            Self::Session => write!(f, "sessionStorage"),
        }
    }
}

/// `StateStore` over `localStorage` or `sessionStorage`
///
/// Values are stored verbatim; decoding stays with the session so a corrupt
/// record can still be recovered field by field. Browsers may refuse storage
/// access entirely (blocked cookies, sandboxed frames); the store then
/// reports `SessionError::Storage` on every call instead of throwing.
pub struct BrowserStore {
    area: StorageArea,
    storage: Option<Storage>,
}

impl BrowserStore {
    pub fn open(window: &Window, area: StorageArea) -> Self {
        let handle = match area {
            StorageArea::Local => window.local_storage(),
            StorageArea::Session => window.session_storage(),
        };
        let storage = match handle {
            Ok(Some(storage)) => Some(storage),
            Ok(None) => {
                warn!(%area, "Storage area not provided by this browser");
                None
            }
            Err(e) => {
                warn!(%area, error = %describe(&e), "Storage access denied");
                None
            }
        };
        Self { area, storage }
    }

    /// Store with no backing storage
    pub fn unavailable(area: StorageArea) -> Self {
        Self {
            area,
            storage: None,
        }
    }

    pub fn is_available(&self) -> bool {
        self.storage.is_some()
    }

    fn storage(&self) -> Result<&Storage> {
        self.storage
            .as_ref()
            .ok_or_else(|| SessionError::Storage(format!("{} is unavailable", self.area)))
    }
}

impl StateStore for BrowserStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        self.storage()?
            .get_item(key)
            .map_err(|e| SessionError::Storage(describe(&e)))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| SessionError::Storage(describe(&e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keepsake_playback::{MediaElement, SessionConfig, SessionManager, DEFAULT_VOLUME};

    #[derive(Default)]
    struct IdleMedia {
        time: f64,
    }

    impl MediaElement for IdleMedia {
        type Pending = ();

        fn set_looping(&mut self, _looping: bool) {}
        fn set_volume(&mut self, _volume: f64) {}
        fn current_time(&self) -> f64 {
            self.time
        }
        fn seek(&mut self, position_secs: f64) {
            self.time = position_secs;
        }
        fn is_ready(&self) -> bool {
            true
        }
        fn start(&mut self) {}
        fn pause(&mut self) {}
    }

    #[test]
    fn unavailable_store_reports_storage_errors() {
        let mut store = BrowserStore::unavailable(StorageArea::Local);
        assert!(!store.is_available());
        assert!(matches!(store.read("globalMusicState"), Err(SessionError::Storage(_))));
        assert!(matches!(
            store.write("globalMusicState", "{}"),
            Err(SessionError::Storage(message)) if message == "localStorage is unavailable"
        ));
    }

    #[test]
    fn session_starts_with_defaults_when_storage_is_blocked() {
        let mut session = SessionManager::initialize(
            SessionConfig::default(),
            BrowserStore::unavailable(StorageArea::Local),
            BrowserStore::unavailable(StorageArea::Session),
            |_| Ok(IdleMedia::default()),
        )
        .unwrap();

        assert!(!session.is_playing());
        assert_eq!(session.state().volume, DEFAULT_VOLUME);

        // Saving fails quietly; playback still works
        let request = session.toggle().unwrap();
        session.finish_play(request.ticket, Ok(()));
        assert!(session.is_playing());
        assert!(session.save().is_err());
    }
}
