//! Note domain model.
//!
//! # Invariants
//! - Every note carries a stable `NoteId` that is never reused.
//! - `title` is a cache; `Note::display_title()` is the source of truth.

pub mod note;
