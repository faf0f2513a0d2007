//! SQLite bootstrap for the durable key-value backend.
//!
//! # Responsibility
//! - Open and configure SQLite connections.
//! - Apply schema migrations before any key-value access.
//!
//! # Invariants
//! - Schema version is tracked via `PRAGMA user_version`.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure while opening or migrating the key-value database.
#[derive(Debug)]
pub enum DbError {
    /// Connection setup or a statement outside a migration failed.
    Sqlite(rusqlite::Error),
    /// The migration to `version` could not be applied; the transaction
    /// was rolled back and the file keeps its previous schema.
    Migration {
        version: u32,
        source: rusqlite::Error,
    },
    /// The file was written by a newer build (`found` > `supported`).
    SchemaTooNew { found: u32, supported: u32 },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "sqlite error: {err}"),
            Self::Migration { version, source } => {
                write!(f, "migration to schema {version} failed: {source}")
            }
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "key-value schema {found} was written by a newer build (this build reads up to {supported})"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) | Self::Migration { source: err, .. } => Some(err),
            Self::SchemaTooNew { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
