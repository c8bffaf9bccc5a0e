//! Durable storage for [`PersistedState`].

use crate::codec::{decode_json, encode_json};
use crate::schema::PersistedState;
use crate::PersistenceError;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// A place the save lives. Saving always overwrites the whole record.
pub trait StateStore {
    /// Read the stored state. `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<PersistedState>, PersistenceError>;
    /// Overwrite the stored state.
    fn save(&mut self, state: &PersistedState) -> Result<(), PersistenceError>;
    /// Forget the stored state.
    fn clear(&mut self) -> Result<(), PersistenceError>;
}

/// Load from `store`, degrading to a fresh state when the save is absent or
/// unreadable.
pub fn load_or_default<S: StateStore + ?Sized>(store: &S) -> PersistedState {
    match store.load() {
        Ok(Some(state)) => state,
        Ok(None) => PersistedState::default(),
        Err(e) => {
            warn!(error = %e, "could not load save, starting fresh");
            PersistedState::default()
        }
    }
}

/// JSON file on disk, replaced atomically on save.
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateStore for FileStore {
    fn load(&self) -> Result<Option<PersistedState>, PersistenceError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let state = decode_json(&bytes)?;
        info!(path = %self.path.display(), "loaded save");
        Ok(Some(state))
    }

    fn save(&mut self, state: &PersistedState) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, encode_json(state)?)?;
        fs::rename(&tmp, &self.path)?;
        info!(path = %self.path.display(), "saved game");
        Ok(())
    }

    fn clear(&mut self) -> Result<(), PersistenceError> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

/// In-process store holding the serialized JSON, for tests and embedding.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    raw: Option<Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-filled with raw bytes, which need not be valid.
    pub fn with_raw(raw: impl Into<Vec<u8>>) -> Self {
        Self {
            raw: Some(raw.into()),
        }
    }
}

impl StateStore for MemoryStore {
    fn load(&self) -> Result<Option<PersistedState>, PersistenceError> {
        self.raw.as_deref().map(decode_json).transpose()
    }

    fn save(&mut self, state: &PersistedState) -> Result<(), PersistenceError> {
        self.raw = Some(encode_json(state)?);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), PersistenceError> {
        self.raw = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ResourceState;

    fn sample() -> PersistedState {
        let mut s = PersistedState::default();
        s.resources.insert(
            "energy".into(),
            ResourceState {
                amount: 42.0,
                total_earned: 100.0,
                unlocked: true,
            },
        );
        s.upgrades.insert("solar_panel".into(), 3);
        s.total_clicks = 7;
        s
    }

    #[test]
    fn file_store_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("saves").join("colony.json"));
        assert!(store.load().unwrap().is_none());
        let state = sample();
        store.save(&state).unwrap();
        assert_eq!(store.load().unwrap(), Some(state));
        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
        store.clear().unwrap();
    }

    #[test]
    fn corrupt_file_is_an_error_but_load_or_default_recovers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("colony.json");
        fs::write(&path, b"{ not json").unwrap();
        let store = FileStore::new(&path);
        assert!(matches!(store.load(), Err(PersistenceError::Corrupt(_))));
        let state = load_or_default(&store);
        assert_eq!(state.total_clicks, 0);
        assert_eq!(state.max_space, 10);
    }

    #[test]
    fn memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(load_or_default(&store).achievement_prestige_bonus, 1.0);
        store.save(&sample()).unwrap();
        assert_eq!(store.load().unwrap().unwrap().total_clicks, 7);
        let broken = MemoryStore::with_raw("[]");
        assert!(broken.load().is_err());
    }
}
