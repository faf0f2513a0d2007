//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `braindump_core` linkage.
//! - Optionally list the notes stored in a database file (first argument).

use braindump_core::db::open_db;
use braindump_core::{KvNoteRepository, NoteRepository, SqliteKvStore};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("braindump_core ping={}", braindump_core::ping());
    println!("braindump_core version={}", braindump_core::core_version());

    let Some(db_path) = std::env::args().nth(1) else {
        return ExitCode::SUCCESS;
    };

    let conn = match open_db(&db_path) {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("failed to open `{db_path}`: {err}");
            return ExitCode::FAILURE;
        }
    };
    let repo = KvNoteRepository::new(SqliteKvStore::new(conn));
    match repo.load_notes() {
        Ok(notes) => {
            println!("notes={}", notes.len());
            for note in notes {
                println!(
                    "{}\t{}\t{}\t{}",
                    note.id,
                    note.kind.as_str(),
                    note.timestamp,
                    note.display_title()
                );
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("failed to read notes: {err}");
            ExitCode::FAILURE
        }
    }
}
