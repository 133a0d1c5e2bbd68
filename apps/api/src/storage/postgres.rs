use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{FromRow, PgPool};
use tracing::debug;

use super::{RecordStore, StoreError};
use crate::models::{Record, RecordData, RecordKind};

/// Durable record store. Identifiers come from the `BIGSERIAL` column shared
/// by every kind, so the single-sequence guarantee holds across restarts and
/// across processes.
#[derive(Clone)]
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct RecordRow {
    id: i64,
    kind: String,
    payload: Value,
    created_at: DateTime<Utc>,
}

impl RecordRow {
    fn into_record(self) -> Result<Record, StoreError> {
        let kind = RecordKind::from_tag(&self.kind).ok_or_else(|| StoreError::Corrupt {
            id: self.id,
            reason: format!("unknown kind '{}'", self.kind),
        })?;
        let data = RecordData::from_json(kind, self.payload).map_err(|e| StoreError::Corrupt {
            id: self.id,
            reason: e.to_string(),
        })?;

        Ok(Record {
            id: self.id,
            data,
            created_at: self.created_at,
        })
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn create(&self, data: RecordData) -> Result<Record, StoreError> {
        let kind = data.kind();
        let payload = serde_json::to_value(&data)?;

        let row: RecordRow = sqlx::query_as(
            r#"
            INSERT INTO generation_records (kind, payload)
            VALUES ($1, $2)
            RETURNING id, kind, payload, created_at
            "#,
        )
        .bind(kind.as_str())
        .bind(sqlx::types::Json(&payload))
        .fetch_one(&self.pool)
        .await?;

        debug!(id = row.id, kind = kind.as_str(), "record stored in postgres");

        Ok(Record {
            id: row.id,
            data,
            created_at: row.created_at,
        })
    }

    async fn get(&self, kind: RecordKind, id: i64) -> Result<Option<Record>, StoreError> {
        let row: Option<RecordRow> = sqlx::query_as(
            "SELECT id, kind, payload, created_at FROM generation_records WHERE id = $1 AND kind = $2",
        )
        .bind(id)
        .bind(kind.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(RecordRow::into_record).transpose()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_row_converts_to_record() {
        let row = RecordRow {
            id: 12,
            kind: "text_correction".to_string(),
            payload: json!({
                "originalText": "النص",
                "correctedText": "النصّ",
                "errorsFound": 1,
                "wordsImproved": 1,
                "readabilityScore": 80
            }),
            created_at: Utc::now(),
        };

        let record = row.into_record().unwrap();
        assert_eq!(record.id, 12);
        assert_eq!(record.kind(), RecordKind::TextCorrection);
        match record.data {
            RecordData::TextCorrection(c) => assert_eq!(c.readability_score, 80),
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[test]
    fn test_row_with_unknown_kind_is_corrupt() {
        let row = RecordRow {
            id: 3,
            kind: "user".to_string(),
            payload: json!({}),
            created_at: Utc::now(),
        };
        assert!(matches!(
            row.into_record(),
            Err(StoreError::Corrupt { id: 3, .. })
        ));
    }

    #[test]
    fn test_row_with_mismatched_payload_is_corrupt() {
        let row = RecordRow {
            id: 4,
            kind: "resume".to_string(),
            payload: json!({"originalText": "x"}),
            created_at: Utc::now(),
        };
        assert!(matches!(
            row.into_record(),
            Err(StoreError::Corrupt { id: 4, .. })
        ));
    }
}
