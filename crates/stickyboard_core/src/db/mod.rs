//! SQLite bootstrap for the durable board store.
//!
//! # Responsibility
//! - Open SQLite connections backing `SqliteKeyValueStore`.
//! - Apply schema migrations in deterministic order.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - Boards and notes are never read before migrations succeed.
//!
//! Failures surface as `StoreError`; the store is the only consumer.

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};
