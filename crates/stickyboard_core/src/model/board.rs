//! Board domain model.
//!
//! # Invariants
//! - `board_id` never changes after creation.
//! - `board_name` is never blank after trim.

use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable board identifier.
pub type BoardId = Uuid;

/// Named group of notes. Exactly one board is active while any exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub board_id: BoardId,
    pub board_name: String,
    pub active: bool,
}

impl Board {
    /// Creates an inactive board with a generated id.
    pub fn new(board_name: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), board_name)
    }

    pub fn with_id(board_id: BoardId, board_name: impl Into<String>) -> Self {
        Self {
            board_id,
            board_name: board_name.into(),
            active: false,
        }
    }

    /// Case-insensitive substring match used by board search.
    pub fn matches_query(&self, needle_lowercase: &str) -> bool {
        self.board_name.to_lowercase().contains(needle_lowercase)
    }
}

/// Board name validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardNameError {
    Blank,
}

impl Display for BoardNameError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Blank => write!(f, "board name must not be blank"),
        }
    }
}

impl Error for BoardNameError {}

/// Trims a board name and rejects blank values.
pub fn normalize_board_name(name: &str) -> Result<String, BoardNameError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(BoardNameError::Blank);
    }
    Ok(trimmed.to_string())
}

/// Default name for the board created as the `ordinal`-th board.
pub fn default_board_name(ordinal: usize) -> String {
    format!("board {ordinal}")
}
