//! Persisted record layout for boards and notes.
//!
//! Field names follow the browser app's storage layout (`boardName`,
//! `cardTop`, `zIndex`, ...), so collections written by either side stay
//! readable. Missing fields fall back to the values the browser app used.
//!
//! # Invariants
//! - A note record without `boardId` loads with `Uuid::nil()` as board
//!   reference; the session attaches it by name.
//! - Numeric ids written by the browser app map to a fixed UUID and are
//!   written back as the same number.

use crate::geometry::{format_px, parse_px, Position, Size, DEFAULT_NOTE_EDGE_PX};
use crate::model::board::Board;
use crate::model::note::{Note, Palette};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// High half of every UUID that stands for a numeric id. Its version nibble is
// 0, so it never collides with generated v4 ids.
const NUMERIC_ID_TAG: u64 = 0x5354_4b42_0000_0000;
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Board or note id as stored: a browser-era number or a UUID string.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredId {
    Integer(i64),
    Number(f64),
    Uuid(Uuid),
}

impl StoredId {
    fn from_number(value: f64) -> Self {
        if value.fract() == 0.0 && value.abs() < MAX_EXACT_INTEGER {
            Self::Integer(value as i64)
        } else {
            Self::Number(value)
        }
    }
}

impl From<StoredId> for Uuid {
    fn from(id: StoredId) -> Self {
        match id {
            StoredId::Integer(value) => {
                Uuid::from_u64_pair(NUMERIC_ID_TAG, (value as f64).to_bits())
            }
            StoredId::Number(value) => Uuid::from_u64_pair(NUMERIC_ID_TAG, value.to_bits()),
            StoredId::Uuid(uuid) => uuid,
        }
    }
}

impl From<Uuid> for StoredId {
    fn from(id: Uuid) -> Self {
        let (high, low) = id.as_u64_pair();
        if high == NUMERIC_ID_TAG {
            Self::from_number(f64::from_bits(low))
        } else {
            Self::Uuid(id)
        }
    }
}

/// Stored shape of one board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardRecord {
    pub board_id: StoredId,
    pub board_name: String,
    #[serde(default)]
    pub active_board: bool,
}

impl From<&Board> for BoardRecord {
    fn from(board: &Board) -> Self {
        Self {
            board_id: board.board_id.into(),
            board_name: board.board_name.clone(),
            active_board: board.active,
        }
    }
}

impl From<BoardRecord> for Board {
    fn from(record: BoardRecord) -> Self {
        Self {
            board_id: record.board_id.into(),
            board_name: record.board_name,
            active: record.active_board,
        }
    }
}

/// Stored shape of one note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteRecord {
    pub note_id: StoredId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub board_id: Option<StoredId>,
    #[serde(default)]
    pub board_name: String,
    #[serde(default = "zero_px")]
    pub card_top: String,
    #[serde(default = "zero_px")]
    pub card_left: String,
    #[serde(default)]
    pub note_title: String,
    #[serde(default)]
    pub note_body: String,
    #[serde(default = "default_z_index")]
    pub z_index: i64,
    #[serde(default)]
    pub card_palette: Palette,
    #[serde(default = "default_edge_px")]
    pub note_height: String,
    #[serde(default = "default_edge_px")]
    pub note_width: String,
    #[serde(default)]
    pub date: i64,
}

fn zero_px() -> String {
    format_px(0.0)
}

fn default_edge_px() -> String {
    format_px(DEFAULT_NOTE_EDGE_PX)
}

fn default_z_index() -> i64 {
    1
}

impl From<&Note> for NoteRecord {
    fn from(note: &Note) -> Self {
        Self {
            note_id: note.note_id.into(),
            board_id: Some(note.board_id.into()),
            board_name: note.board_name.clone(),
            card_top: format_px(note.position.top),
            card_left: format_px(note.position.left),
            note_title: note.title.clone(),
            note_body: note.body.clone(),
            z_index: note.z_index,
            card_palette: note.palette,
            note_height: format_px(note.size.height),
            note_width: format_px(note.size.width),
            date: note.created_at,
        }
    }
}

impl From<NoteRecord> for Note {
    fn from(record: NoteRecord) -> Self {
        Self {
            note_id: record.note_id.into(),
            board_id: record.board_id.map_or_else(Uuid::nil, Uuid::from),
            board_name: record.board_name,
            position: Position {
                top: parse_px(&record.card_top).unwrap_or(0.0),
                left: parse_px(&record.card_left).unwrap_or(0.0),
            },
            size: Size {
                height: parse_px(&record.note_height).unwrap_or(DEFAULT_NOTE_EDGE_PX),
                width: parse_px(&record.note_width).unwrap_or(DEFAULT_NOTE_EDGE_PX),
            },
            title: record.note_title,
            body: record.note_body,
            z_index: record.z_index,
            palette: record.card_palette,
            created_at: record.date,
        }
    }
}
