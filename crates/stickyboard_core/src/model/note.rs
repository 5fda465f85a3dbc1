//! Note card domain model.
//!
//! # Responsibility
//! - Define the note record with geometry, text, palette and stacking order.
//! - Map palettes to the colors hosts paint.
//!
//! # Invariants
//! - `note_id` and `created_at` never change after creation.
//! - `board_name` mirrors the owning board's name while `board_id` resolves.
//! - `z_index` values come from the session-wide counter only.

use crate::geometry::{Position, Size};
use crate::model::board::{Board, BoardId};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Stable note identifier.
pub type NoteId = Uuid;

/// Card color scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Palette {
    Blue,
    #[default]
    Green,
    Orange,
}

/// Colors a host uses to paint one palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteColors {
    /// Card background.
    pub background: &'static str,
    /// Accent used by the drag handle.
    pub drag_bar: &'static str,
}

impl Palette {
    pub const ALL: [Palette; 3] = [Palette::Blue, Palette::Green, Palette::Orange];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Orange => "orange",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "blue" => Some(Self::Blue),
            "green" => Some(Self::Green),
            "orange" => Some(Self::Orange),
            _ => None,
        }
    }

    pub fn colors(self) -> PaletteColors {
        match self {
            Self::Blue => PaletteColors {
                background: "lightblue",
                drag_bar: "blue",
            },
            Self::Green => PaletteColors {
                background: "lightgreen",
                drag_bar: "green",
            },
            Self::Orange => PaletteColors {
                background: "lightcoral",
                drag_bar: "coral",
            },
        }
    }
}

/// Editable text field of a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteField {
    Title,
    Body,
}

/// One sticky note card.
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    pub note_id: NoteId,
    pub board_id: BoardId,
    pub board_name: String,
    pub position: Position,
    pub size: Size,
    pub title: String,
    pub body: String,
    pub z_index: i64,
    pub palette: Palette,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

impl Note {
    /// Creates an empty note on `board` with a generated id and current time.
    pub fn new(board: &Board, position: Position, z_index: i64) -> Self {
        Self {
            note_id: Uuid::new_v4(),
            board_id: board.board_id,
            board_name: board.board_name.clone(),
            position,
            size: Size::default(),
            title: String::new(),
            body: String::new(),
            z_index,
            palette: Palette::default(),
            created_at: now_epoch_ms(),
        }
    }

    /// Returns whether this note is shown on `board`.
    pub fn belongs_to(&self, board_id: BoardId) -> bool {
        self.board_id == board_id
    }

    /// Points this note at `board`, keeping the mirrored name in sync.
    pub fn attach_to(&mut self, board: &Board) {
        self.board_id = board.board_id;
        self.board_name = board.board_name.clone();
    }

    pub fn set_field(&mut self, field: NoteField, value: impl Into<String>) {
        match field {
            NoteField::Title => self.title = value.into(),
            NoteField::Body => self.body = value.into(),
        }
    }
}

pub(crate) fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}
