//! # Key/Value Storage Repository
//!
//! Origin-scoped string storage, one row per key.
//!
//! ```text
//! local_storage
//! ┌──────────┬───────────────────────────────┬──────────────────────────┐
//! │ key (PK) │ value                          │ updated_at               │
//! ├──────────┼───────────────────────────────┼──────────────────────────┤
//! │ cart     │ [{"id":1,...,"qty":2}]         │ 2026-01-01T10:00:00Z     │
//! └──────────┴───────────────────────────────┴──────────────────────────┘
//! ```
//!
//! Writes replace the whole value. Two processes sharing a file resolve to
//! last-writer-wins.

use chrono::Utc;
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};

/// Repository for the `local_storage` table.
#[derive(Debug, Clone)]
pub struct StorageRepository {
    pool: SqlitePool,
}

impl StorageRepository {
    pub fn new(pool: SqlitePool) -> Self {
        StorageRepository { pool }
    }

    /// Reads the raw value under `key`.
    pub async fn get(&self, key: &str) -> DbResult<Option<String>> {
        let value = sqlx::query_scalar::<_, String>("SELECT value FROM local_storage WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(value)
    }

    /// Writes `value` under `key`, replacing any previous value.
    pub async fn set(&self, key: &str, value: &str) -> DbResult<()> {
        let now = Utc::now();

        debug!(key = %key, bytes = value.len(), "Writing stored value");

        sqlx::query(
            r#"
            INSERT INTO local_storage (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Serializes `value` to JSON and stores it under `key`.
    pub async fn set_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> DbResult<()> {
        let json = serde_json::to_string(value).map_err(|e| DbError::serialization(key, e))?;
        self.set(key, &json).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
