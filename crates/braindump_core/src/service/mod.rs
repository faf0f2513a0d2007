//! Note lifecycle and the collaborators around the editor.
//!
//! # Responsibility
//! - Drive the active-note lifecycle over a repository (`note_store`).
//! - Provide polled timers (`autosave`, `focus_timer`) and the clock seam.
//! - Compose assistant prompts and copy note text for the host.

pub mod autosave;
pub mod clipboard;
pub mod clock;
pub mod focus_timer;
pub mod note_store;
pub mod prompt;
