#![deny(warnings)]

//! Persistence layer: the save schema, version migration, stores and the
//! export/import string.

pub mod codec;
pub mod migration;
pub mod schema;
pub mod store;

pub use codec::{decode_json, encode_json, export_state, import_state};
pub use schema::{
    now_ms, AchievementState, PersistedState, PrestigeLevel, PrestigeRecord, ResourceState,
    Statistics, DEFAULT_MAX_SPACE, SAVE_VERSION,
};
pub use store::{load_or_default, FileStore, MemoryStore, StateStore};

use thiserror::Error;

/// Errors at the persistence boundary.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Reading or writing the storage medium failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    /// The save is present but not a valid save document.
    #[error("corrupt save data: {0}")]
    Corrupt(#[from] serde_json::Error),
    /// The export string is not valid base64.
    #[error("invalid export string: {0}")]
    Encoding(#[from] base64::DecodeError),
    /// The save top level is not a JSON object.
    #[error("save data is not a JSON object")]
    NotAnObject,
    /// Written by a newer format than this build understands.
    #[error("save version {found} is newer than supported version {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },
    /// A migration step could not interpret the document.
    #[error("migrating save from version {from} failed: {reason}")]
    Migration { from: u32, reason: String },
}
