//! Board and note use-cases.
//!
//! # Responsibility
//! - `board_service` / `note_service` own the in-memory collections and
//!   their rules.
//! - `session` orchestrates them with persistence, rendering and
//!   confirmation.

pub mod board_service;
pub mod note_service;
pub mod session;
