//! Persistence layer over the host key-value store.
//!
//! # Responsibility
//! - Define the key-value contract the host provides.
//! - Map the note collection and theme flag onto their storage keys.
//!
//! # Invariants
//! - Reads never fail on malformed stored data; they fall back to defaults.

pub mod kv_store;
pub mod note_repo;
pub mod preference_repo;
