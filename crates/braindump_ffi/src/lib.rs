//! Host-facing bridge for the braindump core.
//!
//! # Responsibility
//! - Expose sync, never-panicking entry points to the UI host.
//! - Own the single process-wide note store.

pub mod api;
