//! Note collection persistence over a key-value store.
//!
//! # Responsibility
//! - Serialize the whole ordered note collection under one key.
//! - Treat absent or malformed stored data as "no prior state".
//!
//! # Invariants
//! - An empty collection is never written.
//! - Collection order is preserved byte-for-byte through a round trip.

use crate::model::note::Note;
use crate::repo::kv_store::{KeyValueStore, StoreError};
use log::warn;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage key holding the serialized note collection.
pub const NOTES_KEY: &str = "notes";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for note/preference persistence.
#[derive(Debug)]
pub enum RepoError {
    Store(StoreError),
    Serialization(serde_json::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Serialization(err) => write!(f, "failed to serialize notes: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Serialization(err) => Some(err),
        }
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}

/// Outcome of a collection write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Written,
    /// Empty collections are skipped to avoid clobbering stored notes.
    SkippedEmpty,
}

/// Repository interface for the ordered note collection.
pub trait NoteRepository {
    /// Loads the stored collection; unreadable data yields an empty list.
    fn load_notes(&self) -> RepoResult<Vec<Note>>;
    /// Replaces the stored collection with `notes`.
    fn save_notes(&self, notes: &[Note]) -> RepoResult<SaveOutcome>;
}

/// Note repository keyed into a host key-value store.
pub struct KvNoteRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> KvNoteRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: KeyValueStore> NoteRepository for KvNoteRepository<S> {
    fn load_notes(&self) -> RepoResult<Vec<Note>> {
        let Some(raw) = self.store.get(NOTES_KEY)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<Note>>(&raw) {
            Ok(notes) => Ok(notes),
            Err(err) => {
                warn!(
                    "event=notes_load module=repo status=degraded reason=malformed_payload bytes={} error={}",
                    raw.len(),
                    err
                );
                Ok(Vec::new())
            }
        }
    }

    fn save_notes(&self, notes: &[Note]) -> RepoResult<SaveOutcome> {
        if notes.is_empty() {
            return Ok(SaveOutcome::SkippedEmpty);
        }
        let payload = serde_json::to_string(notes)?;
        self.store.set(NOTES_KEY, &payload)?;
        Ok(SaveOutcome::Written)
    }
}
