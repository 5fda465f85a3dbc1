//! Board entity manager.
//!
//! # Responsibility
//! - Own the ordered board collection and the active-board flag.
//! - Provide create, rename, delete, select and search over boards.
//!
//! # Invariants
//! - While at least one board exists, exactly one is active.
//! - Board order is insertion order; search never re-sorts.
//! - Board names are trimmed and never blank.

use crate::model::board::{default_board_name, normalize_board_name, Board, BoardId, BoardNameError};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from board collection operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardServiceError {
    /// No board is active (the collection is empty).
    NoActiveBoard,
    /// Target board does not exist.
    BoardNotFound(BoardId),
    /// New name is blank after trim.
    InvalidName(BoardNameError),
}

impl Display for BoardServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoActiveBoard => write!(f, "no active board"),
            Self::BoardNotFound(id) => write!(f, "board not found: {id}"),
            Self::InvalidName(err) => write!(f, "{err}"),
        }
    }
}

impl Error for BoardServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidName(err) => Some(err),
            _ => None,
        }
    }
}

impl From<BoardNameError> for BoardServiceError {
    fn from(value: BoardNameError) -> Self {
        Self::InvalidName(value)
    }
}

/// Result of a board search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardFilter {
    /// Matching boards in collection order. An empty query matches all.
    Matches(Vec<Board>),
    /// Non-empty query that matched nothing.
    NotFound,
}

impl BoardFilter {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    pub fn boards(&self) -> &[Board] {
        match self {
            Self::Matches(boards) => boards,
            Self::NotFound => &[],
        }
    }
}

/// Applied rename, reported so dependents can be rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardRename {
    pub board_id: BoardId,
    pub old_name: String,
    pub new_name: String,
}

/// Ordered board collection with single-active selection.
#[derive(Debug, Clone, Default)]
pub struct BoardManager {
    boards: Vec<Board>,
}

impl BoardManager {
    pub fn new(boards: Vec<Board>) -> Self {
        Self { boards }
    }

    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    pub fn len(&self) -> usize {
        self.boards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }

    pub fn get(&self, board_id: BoardId) -> Option<&Board> {
        self.boards.iter().find(|board| board.board_id == board_id)
    }

    pub fn active(&self) -> Option<&Board> {
        self.boards.iter().find(|board| board.active)
    }

    /// Repairs the single-active invariant on loaded data.
    ///
    /// Keeps the first active board, or activates the first board when none
    /// is active. Returns whether anything changed.
    pub fn ensure_single_active(&mut self) -> bool {
        let keep = self
            .boards
            .iter()
            .position(|board| board.active)
            .or(if self.boards.is_empty() { None } else { Some(0) });
        let Some(keep) = keep else {
            return false;
        };

        let mut changed = false;
        for (index, board) in self.boards.iter_mut().enumerate() {
            let should_be_active = index == keep;
            if board.active != should_be_active {
                board.active = should_be_active;
                changed = true;
            }
        }
        changed
    }

    /// Appends `board {count+1}` and makes it the only active board.
    pub fn create(&mut self) -> &Board {
        let mut board = Board::new(default_board_name(self.boards.len() + 1));
        board.active = true;
        self.deactivate_all();
        self.boards.push(board);
        &self.boards[self.boards.len() - 1]
    }

    /// Renames the active board.
    ///
    /// # Errors
    /// - `InvalidName` when `new_name` is blank after trim; nothing changes.
    /// - `NoActiveBoard` when the collection is empty.
    pub fn rename_active(&mut self, new_name: &str) -> Result<BoardRename, BoardServiceError> {
        let normalized = normalize_board_name(new_name)?;
        let board = self
            .boards
            .iter_mut()
            .find(|board| board.active)
            .ok_or(BoardServiceError::NoActiveBoard)?;
        let old_name = std::mem::replace(&mut board.board_name, normalized.clone());
        Ok(BoardRename {
            board_id: board.board_id,
            old_name,
            new_name: normalized,
        })
    }

    /// Removes the active board and activates the first remaining one.
    ///
    /// Returns the removed board.
    pub fn remove_active(&mut self) -> Result<Board, BoardServiceError> {
        let index = self
            .boards
            .iter()
            .position(|board| board.active)
            .ok_or(BoardServiceError::NoActiveBoard)?;
        let removed = self.boards.remove(index);
        if let Some(first) = self.boards.first_mut() {
            first.active = true;
        }
        Ok(removed)
    }

    /// Makes `board_id` the only active board.
    pub fn select(&mut self, board_id: BoardId) -> Result<&Board, BoardServiceError> {
        let index = self
            .boards
            .iter()
            .position(|board| board.board_id == board_id)
            .ok_or(BoardServiceError::BoardNotFound(board_id))?;
        for (current, board) in self.boards.iter_mut().enumerate() {
            board.active = current == index;
        }
        Ok(&self.boards[index])
    }

    /// Case-insensitive substring search over board names.
    ///
    /// The query is matched as typed; surrounding whitespace is significant.
    pub fn filter(&self, query: &str) -> BoardFilter {
        let needle = query.to_lowercase();
        if needle.is_empty() {
            return BoardFilter::Matches(self.boards.clone());
        }

        let matches: Vec<Board> = self
            .boards
            .iter()
            .filter(|board| board.matches_query(&needle))
            .cloned()
            .collect();
        if matches.is_empty() {
            BoardFilter::NotFound
        } else {
            BoardFilter::Matches(matches)
        }
    }

    fn deactivate_all(&mut self) {
        for board in &mut self.boards {
            board.active = false;
        }
    }
}
