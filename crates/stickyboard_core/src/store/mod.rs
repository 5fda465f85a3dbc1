//! Durable key-value persistence for board and note collections.
//!
//! # Responsibility
//! - Define the `KeyValueStore` contract the session writes through.
//! - Serialize whole collections as JSON arrays under fixed keys.
//!
//! # Invariants
//! - An absent key loads as an empty collection.
//! - `set_many` is all-or-nothing.
//! - Stored values are always complete JSON documents, never partial writes.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod memory_store;
pub mod records;
pub mod sqlite_store;

/// Key holding the serialized board collection.
pub const BOARDS_KEY: &str = "boards";
/// Key holding the serialized note collection.
pub const NOTES_KEY: &str = "notes";

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence failure surfaced to the session and UI layer.
#[derive(Debug)]
pub enum StoreError {
    Sqlite(rusqlite::Error),
    /// Board database was written by a newer build.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    Encode {
        key: String,
        source: serde_json::Error,
    },
    Decode {
        key: String,
        source: serde_json::Error,
    },
    QuotaExceeded {
        key: String,
        limit_bytes: usize,
    },
    MissingRequiredTable(&'static str),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "board store schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::Encode { key, source } => {
                write!(f, "failed to serialize collection `{key}`: {source}")
            }
            Self::Decode { key, source } => {
                write!(f, "stored collection `{key}` is malformed: {source}")
            }
            Self::QuotaExceeded { key, limit_bytes } => write!(
                f,
                "storage quota of {limit_bytes} bytes exceeded while writing `{key}`"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing; run migrations first")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Encode { source, .. } | Self::Decode { source, .. } => Some(source),
            Self::UnsupportedSchemaVersion { .. }
            | Self::QuotaExceeded { .. }
            | Self::MissingRequiredTable(_) => None,
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Synchronous string key-value storage.
pub trait KeyValueStore {
    /// Returns the raw value stored under `key`, if any.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    /// Replaces the value stored under `key`.
    fn set(&mut self, key: &str, value: &str) -> StoreResult<()>;
    /// Replaces several keys atomically.
    fn set_many(&mut self, entries: &[(&str, String)]) -> StoreResult<()>;
}

/// Loads and decodes the collection stored under `key`.
pub fn load_collection<T, S>(store: &S, key: &str) -> StoreResult<Vec<T>>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    match store.get(key)? {
        Some(raw) if !raw.trim().is_empty() => {
            serde_json::from_str(&raw).map_err(|source| StoreError::Decode {
                key: key.to_string(),
                source,
            })
        }
        _ => Ok(Vec::new()),
    }
}

/// Encodes a collection as the JSON array stored under `key`.
pub fn encode_collection<T: Serialize>(key: &str, items: &[T]) -> StoreResult<String> {
    serde_json::to_string(items).map_err(|source| StoreError::Encode {
        key: key.to_string(),
        source,
    })
}

/// Encodes and writes one collection.
pub fn save_collection<T, S>(store: &mut S, key: &str, items: &[T]) -> StoreResult<()>
where
    T: Serialize,
    S: KeyValueStore + ?Sized,
{
    let encoded = encode_collection(key, items)?;
    store.set(key, &encoded)
}
