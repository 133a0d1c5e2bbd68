use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

use super::{AtomicSequence, IdSequence, RecordStore, StoreError};
use crate::models::{Record, RecordData, RecordKind};

/// In-process record store. Contents are lost when the process exits.
pub struct MemoryRecordStore {
    sequence: Arc<dyn IdSequence>,
    collections: RwLock<HashMap<RecordKind, HashMap<i64, Record>>>,
}

impl MemoryRecordStore {
    pub fn new(sequence: Arc<dyn IdSequence>) -> Self {
        Self {
            sequence,
            collections: RwLock::new(HashMap::new()),
        }
    }

    /// Number of records currently held for `kind`.
    #[cfg(test)]
    pub fn len(&self, kind: RecordKind) -> usize {
        self.collections
            .read()
            .map(|c| c.get(&kind).map_or(0, HashMap::len))
            .unwrap_or(0)
    }
}

impl Default for MemoryRecordStore {
    fn default() -> Self {
        Self::new(Arc::new(AtomicSequence::new()))
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn create(&self, data: RecordData) -> Result<Record, StoreError> {
        let record = Record {
            id: self.sequence.next_id(),
            data,
            created_at: Utc::now(),
        };

        let mut collections = self.collections.write().map_err(|_| StoreError::Poisoned)?;
        collections
            .entry(record.kind())
            .or_default()
            .insert(record.id, record.clone());

        debug!(id = record.id, kind = record.kind().as_str(), "record stored in memory");
        Ok(record)
    }

    async fn get(&self, kind: RecordKind, id: i64) -> Result<Option<Record>, StoreError> {
        let collections = self.collections.read().map_err(|_| StoreError::Poisoned)?;
        Ok(collections.get(&kind).and_then(|c| c.get(&id)).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EmailInput, EmailRecord, TextCorrectionRecord};

    fn correction(text: &str) -> RecordData {
        RecordData::TextCorrection(TextCorrectionRecord {
            original_text: text.to_string(),
            corrected_text: text.to_string(),
            errors_found: 0,
            words_improved: 0,
            readability_score: 0,
        })
    }

    fn email() -> RecordData {
        RecordData::Email(EmailRecord {
            input: EmailInput {
                email_type: "request".to_string(),
                subject: "meeting".to_string(),
                recipient_name: "Sara".to_string(),
                key_points: "agenda".to_string(),
                tone: "formal".to_string(),
            },
            generated_content: "<p>مرحبا</p>".to_string(),
        })
    }

    #[tokio::test]
    async fn test_create_assigns_ids_from_one_shared_sequence() {
        let store = MemoryRecordStore::default();
        let first = store.create(correction("نص")).await.unwrap();
        let second = store.create(email()).await.unwrap();
        let third = store.create(correction("نص آخر")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(third.id, 3);
        assert_eq!(store.len(RecordKind::TextCorrection), 2);
        assert_eq!(store.len(RecordKind::Email), 1);
    }

    #[tokio::test]
    async fn test_get_returns_stored_copy() {
        let store = MemoryRecordStore::default();
        let created = store.create(email()).await.unwrap();

        let fetched = store.get(RecordKind::Email, created.id).await.unwrap();
        assert_eq!(fetched, Some(created));
    }

    #[tokio::test]
    async fn test_get_is_partitioned_by_kind() {
        let store = MemoryRecordStore::default();
        let created = store.create(email()).await.unwrap();

        assert!(store
            .get(RecordKind::Resume, created.id)
            .await
            .unwrap()
            .is_none());
        assert!(store.get(RecordKind::Email, 999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_injected_sequence_is_used() {
        let store = MemoryRecordStore::new(Arc::new(AtomicSequence::starting_at(41)));
        let record = store.create(email()).await.unwrap();
        assert_eq!(record.id, 41);
    }

    #[tokio::test]
    async fn test_concurrent_creates_never_collide() {
        let store = Arc::new(MemoryRecordStore::default());
        let tasks: Vec<_> = (0..64)
            .map(|i| {
                let store = Arc::clone(&store);
                tokio::spawn(async move {
                    let data = if i % 2 == 0 { email() } else { correction("نص") };
                    store.create(data).await.unwrap().id
                })
            })
            .collect();

        let mut ids = Vec::new();
        for task in tasks {
            ids.push(task.await.unwrap());
        }
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids, (1..=64).collect::<Vec<i64>>());
        assert_eq!(
            store.len(RecordKind::Email) + store.len(RecordKind::TextCorrection),
            64
        );
    }
}
