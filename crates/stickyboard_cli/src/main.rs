//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `stickyboard_core` linkage with deterministic output.
//! - Optionally summarize the boards stored in a database file.

use std::process::ExitCode;
use stickyboard_core::{
    BoardSession, FixedAnswer, NullRenderer, SessionConfig, SessionError, SqliteKeyValueStore,
};

fn main() -> ExitCode {
    println!("stickyboard_core ping={}", stickyboard_core::ping());
    println!("stickyboard_core version={}", stickyboard_core::core_version());

    let Some(db_path) = std::env::args().nth(1) else {
        return ExitCode::SUCCESS;
    };
    match print_summary(&db_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn print_summary(db_path: &str) -> Result<(), SessionError> {
    let store = SqliteKeyValueStore::open(db_path)?;
    let session = BoardSession::open(
        store,
        NullRenderer,
        FixedAnswer(false),
        SessionConfig::default(),
    )?;

    for board in session.boards() {
        let notes = session
            .notes()
            .iter()
            .filter(|note| note.belongs_to(board.board_id))
            .count();
        let marker = if board.active { '*' } else { ' ' };
        println!("{marker} {} notes={notes}", board.board_name);
    }
    println!("orphaned notes={}", session.orphan_count());
    Ok(())
}
