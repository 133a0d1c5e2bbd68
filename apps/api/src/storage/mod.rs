//! Record store: append-only create/get keyed by a numeric identifier.
//!
//! One identifier sequence is shared by every record kind. Backends:
//! `MemoryRecordStore` (default, lost on restart) and `PgRecordStore`
//! (selected when `DATABASE_URL` is set). `AppState` holds an
//! `Arc<dyn RecordStore>` so handlers never know which one is live.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Record, RecordData, RecordKind};

pub mod memory;
pub mod postgres;

pub use memory::MemoryRecordStore;
pub use postgres::PgRecordStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Record payload could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Stored record {id} is corrupt: {reason}")]
    Corrupt { id: i64, reason: String },

    #[error("Record store lock poisoned")]
    Poisoned,
}

/// Append-only record storage: no update, no delete.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Assigns the next identifier, stamps the creation time and stores the record.
    async fn create(&self, data: RecordData) -> Result<Record, StoreError>;

    /// Returns the record of the given kind, or `None` if no such record exists.
    async fn get(&self, kind: RecordKind, id: i64) -> Result<Option<Record>, StoreError>;
}

/// Source of record identifiers.
pub trait IdSequence: Send + Sync {
    fn next_id(&self) -> i64;
}

/// Process-local sequence starting at 1.
#[derive(Debug)]
pub struct AtomicSequence {
    next: AtomicI64,
}

impl AtomicSequence {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(first: i64) -> Self {
        Self {
            next: AtomicI64::new(first),
        }
    }
}

impl Default for AtomicSequence {
    fn default() -> Self {
        Self::new()
    }
}

impl IdSequence for AtomicSequence {
    fn next_id(&self) -> i64 {
        self.next.fetch_add(1, Ordering::SeqCst)
    }
}
