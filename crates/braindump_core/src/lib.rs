//! Core domain logic for the braindump note widget.
//! This crate owns the note lifecycle invariants; hosts only render.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{derive_title, Note, NoteId, NoteType};
pub use repo::kv_store::{KeyValueStore, MemoryKvStore, SqliteKvStore, StoreError};
pub use repo::note_repo::{KvNoteRepository, NoteRepository, RepoError, RepoResult, SaveOutcome};
pub use repo::preference_repo::PreferenceRepository;
pub use service::clipboard::{copy_note_text, Clipboard, ClipboardError};
pub use service::clock::{Clock, ManualClock, SystemClock};
pub use service::focus_timer::{format_time, FocusTimer, TimerEvent};
pub use service::note_store::{EditBuffer, NoteStore, NoteStoreConfig, NoteStoreError};
pub use service::prompt::{ask_assistant, compose_prompt, launch_url, ExternalLauncher};

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
