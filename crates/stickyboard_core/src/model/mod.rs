//! Board and note domain model.
//!
//! # Responsibility
//! - Define the canonical in-memory records for boards and notes.
//! - Keep validation rules next to the data they protect.
//!
//! # Invariants
//! - Every board and note is identified by a stable UUID.
//! - Notes reference their owning board by `BoardId`, with the board name
//!   mirrored for persisted layout compatibility.

pub mod board;
pub mod note;
