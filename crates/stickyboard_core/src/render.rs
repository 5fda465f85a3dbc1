//! Render Adapter contract.
//!
//! # Responsibility
//! - Describe presentation changes as commands the host applies.
//! - Keep the core free of any DOM/widget knowledge.
//!
//! # Invariants
//! - The renderer never owns board or note data; every command carries a
//!   snapshot of the state it should reflect.
//! - Size-change observations flow back through the interaction controller.

use crate::model::board::Board;
use crate::model::note::{Note, NoteId};

/// Placeholder text shown when the active board has no notes.
pub const EMPTY_BOARD_MESSAGE: &str = "Double click to add a note";

/// Presentation change emitted by the session.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Replace the surface with `board` and its notes, in insertion order.
    ShowBoard { board: Board, notes: Vec<Note> },
    /// Clear the surface; no board exists.
    ClearSurface,
    /// Append one newly created note.
    AddNote(Note),
    /// Restyle an existing note (position, size, z-index, palette, text).
    UpdateNote(Note),
    /// Drop the visual element of a deleted note.
    RemoveNote(NoteId),
    /// Show or hide the empty-board placeholder.
    Placeholder { visible: bool },
    /// Render the board list; `not_found` marks a search with no match.
    BoardList { boards: Vec<Board>, not_found: bool },
    /// Reset the board search box.
    ClearBoardSearch,
    /// Set the editable board-name field (used to revert rejected renames).
    BoardNameField(String),
    /// Surface a user-facing warning.
    Warn(String),
}

/// Host-side presentation sink.
pub trait RenderAdapter {
    fn apply(&mut self, command: RenderCommand);
}

/// Renderer that discards every command; used by headless tools.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl RenderAdapter for NullRenderer {
    fn apply(&mut self, _command: RenderCommand) {}
}

/// Renderer that keeps every command for later inspection.
#[derive(Debug, Default, Clone)]
pub struct RecordingRenderer {
    commands: Vec<RenderCommand>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    pub fn last(&self) -> Option<&RenderCommand> {
        self.commands.last()
    }

    /// Returns and forgets all recorded commands.
    pub fn take(&mut self) -> Vec<RenderCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl RenderAdapter for RecordingRenderer {
    fn apply(&mut self, command: RenderCommand) {
        self.commands.push(command);
    }
}
