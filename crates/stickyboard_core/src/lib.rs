//! Core state engine for sticky-note boards.
//! This crate is the single source of truth for board/note invariants.

pub mod config;
pub mod confirm;
pub mod db;
pub mod geometry;
pub mod interaction;
pub mod logging;
pub mod model;
pub mod render;
pub mod service;
pub mod store;

pub use config::{ConfigError, SessionConfig};
pub use confirm::{ConfirmPrompt, FixedAnswer, DELETE_NOTE_PROMPT};
pub use geometry::{Point, Position, Size, Surface};
pub use interaction::{DoubleClickTarget, InteractionController, InteractionState};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::board::{Board, BoardId, BoardNameError};
pub use model::note::{Note, NoteField, NoteId, Palette, PaletteColors};
pub use render::{
    NullRenderer, RecordingRenderer, RenderAdapter, RenderCommand, EMPTY_BOARD_MESSAGE,
};
pub use service::board_service::{BoardFilter, BoardManager, BoardServiceError};
pub use service::note_service::{NoteManager, NoteServiceError, ZOrderCounter};
pub use service::session::{
    BoardSession, RenameOutcome, SessionError, SessionResult, BLANK_BOARD_NAME_WARNING,
};
pub use store::memory_store::MemoryKeyValueStore;
pub use store::sqlite_store::SqliteKeyValueStore;
pub use store::{KeyValueStore, StoreError, StoreResult, BOARDS_KEY, NOTES_KEY};

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
