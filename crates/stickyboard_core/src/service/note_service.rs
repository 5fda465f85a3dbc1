//! Note entity manager.
//!
//! # Responsibility
//! - Own the note collection in persisted insertion order.
//! - Assign stacking order from the session-wide z-order counter.
//! - Apply per-note mutations (text, geometry, palette) and board re-links.
//!
//! # Invariants
//! - The z-order counter is seeded once from the loaded notes and only moves
//!   forward; no value is handed out twice.
//! - Positions written through `move_to` are clamped to the surface.

use crate::geometry::{clamp_to_surface, Position, Size, Surface};
use crate::model::board::{Board, BoardId};
use crate::model::note::{Note, NoteField, NoteId, Palette};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from note collection operations.
#[derive(Debug, Clone, PartialEq)]
pub enum NoteServiceError {
    /// Target note does not exist.
    NoteNotFound(NoteId),
    /// Observed size is negative or not finite.
    InvalidGeometry { note_id: NoteId, size: Size },
}

impl Display for NoteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoteNotFound(id) => write!(f, "note not found: {id}"),
            Self::InvalidGeometry { note_id, size } => write!(
                f,
                "invalid size {}x{} for note {note_id}",
                size.width, size.height
            ),
        }
    }
}

impl Error for NoteServiceError {}

pub type NoteResult<T> = Result<T, NoteServiceError>;

/// Global stacking counter shared by every board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZOrderCounter {
    next: i64,
}

impl Default for ZOrderCounter {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl ZOrderCounter {
    /// Seeds from the highest stored z-index (values below 1 count as 1).
    pub fn seeded_from(notes: &[Note]) -> Self {
        let next = notes
            .iter()
            .map(|note| note.z_index.max(1))
            .max()
            .map_or(1, |highest| highest + 1);
        Self { next }
    }

    /// Hands out the next stacking value.
    pub fn assign(&mut self) -> i64 {
        let value = self.next;
        self.next += 1;
        value
    }

    /// Value the next `assign` call returns.
    pub fn peek(&self) -> i64 {
        self.next
    }
}

/// Note collection with z-order arbitration.
#[derive(Debug, Clone, Default)]
pub struct NoteManager {
    notes: Vec<Note>,
    z_order: ZOrderCounter,
}

impl NoteManager {
    pub fn new(notes: Vec<Note>) -> Self {
        let z_order = ZOrderCounter::seeded_from(&notes);
        Self { notes, z_order }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn z_order(&self) -> ZOrderCounter {
        self.z_order
    }

    pub fn get(&self, note_id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.note_id == note_id)
    }

    /// Notes shown on `board_id`, in insertion order.
    pub fn on_board(&self, board_id: BoardId) -> impl Iterator<Item = &Note> + '_ {
        self.notes
            .iter()
            .filter(move |note| note.belongs_to(board_id))
    }

    pub fn count_on_board(&self, board_id: BoardId) -> usize {
        self.on_board(board_id).count()
    }

    /// Appends a fresh note on `board` with the next z-index.
    pub fn create(
        &mut self,
        board: &Board,
        position: Position,
        size: Size,
        palette: Palette,
    ) -> &Note {
        let mut note = Note::new(board, position, self.z_order.assign());
        note.size = size;
        note.palette = palette;
        self.notes.push(note);
        &self.notes[self.notes.len() - 1]
    }

    pub fn update_field(
        &mut self,
        note_id: NoteId,
        field: NoteField,
        value: impl Into<String>,
    ) -> NoteResult<&Note> {
        let note = self.get_mut(note_id)?;
        note.set_field(field, value);
        Ok(note)
    }

    /// Moves a note, clamping it to `surface`.
    pub fn move_to(
        &mut self,
        note_id: NoteId,
        position: Position,
        surface: Surface,
    ) -> NoteResult<&Note> {
        let note = self.get_mut(note_id)?;
        note.position = clamp_to_surface(position, note.size, surface);
        Ok(note)
    }

    pub fn resize(&mut self, note_id: NoteId, size: Size) -> NoteResult<&Note> {
        if !size.is_valid() {
            return Err(NoteServiceError::InvalidGeometry { note_id, size });
        }
        let note = self.get_mut(note_id)?;
        note.size = size;
        Ok(note)
    }

    /// Puts a note on top of every other note.
    pub fn raise(&mut self, note_id: NoteId) -> NoteResult<&Note> {
        let index = self.index_of(note_id)?;
        let z_index = self.z_order.assign();
        let note = &mut self.notes[index];
        note.z_index = z_index;
        Ok(note)
    }

    pub fn recolor(&mut self, note_id: NoteId, palette: Palette) -> NoteResult<&Note> {
        let note = self.get_mut(note_id)?;
        note.palette = palette;
        Ok(note)
    }

    pub fn remove(&mut self, note_id: NoteId) -> NoteResult<Note> {
        let index = self.index_of(note_id)?;
        Ok(self.notes.remove(index))
    }

    /// Rewrites the mirrored board name on every note of `board_id`.
    ///
    /// Returns the number of notes touched.
    pub fn rename_board(&mut self, board_id: BoardId, new_name: &str) -> usize {
        let mut touched = 0;
        for note in self.notes.iter_mut().filter(|note| note.belongs_to(board_id)) {
            note.board_name = new_name.to_string();
            touched += 1;
        }
        touched
    }

    /// Re-links notes whose board no longer exists to the first board with
    /// the same name. Notes with a blank board name are left alone.
    ///
    /// Returns the number of notes re-linked.
    pub fn reattach_orphans(&mut self, boards: &[Board]) -> usize {
        let mut reattached = 0;
        for note in &mut self.notes {
            if note.board_name.is_empty() || boards.iter().any(|b| note.belongs_to(b.board_id)) {
                continue;
            }
            if let Some(board) = boards.iter().find(|b| b.board_name == note.board_name) {
                note.attach_to(board);
                reattached += 1;
            }
        }
        reattached
    }

    /// Attaches notes written without any board name to `board`.
    ///
    /// Returns the number of notes adopted.
    pub fn adopt_unassigned(&mut self, board: &Board) -> usize {
        let mut adopted = 0;
        for note in self
            .notes
            .iter_mut()
            .filter(|note| note.board_name.is_empty())
        {
            note.attach_to(board);
            adopted += 1;
        }
        adopted
    }

    /// Notes whose board reference resolves to none of `boards`.
    pub fn orphan_count(&self, boards: &[Board]) -> usize {
        self.notes
            .iter()
            .filter(|note| !boards.iter().any(|b| note.belongs_to(b.board_id)))
            .count()
    }

    fn index_of(&self, note_id: NoteId) -> NoteResult<usize> {
        self.notes
            .iter()
            .position(|note| note.note_id == note_id)
            .ok_or(NoteServiceError::NoteNotFound(note_id))
    }

    fn get_mut(&mut self, note_id: NoteId) -> NoteResult<&mut Note> {
        self.notes
            .iter_mut()
            .find(|note| note.note_id == note_id)
            .ok_or(NoteServiceError::NoteNotFound(note_id))
    }
}
