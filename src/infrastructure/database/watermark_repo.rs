use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::domain::ports::{WatermarkStore, WatermarkStoreError};

/// SQLite implementation of [`WatermarkStore`]
///
/// One row per source key, replace semantics on write. All statements are
/// parameterized; key and value strings are never interpolated into SQL.
pub struct SqliteWatermarkStore {
    pool: SqlitePool,
}

impl SqliteWatermarkStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WatermarkStore for SqliteWatermarkStore {
    async fn set(&self, source: &str, lastseen: &str) -> Result<(), WatermarkStoreError> {
        sqlx::query(
            r#"
            INSERT INTO lastseen (source, lastseen)
            VALUES (?, ?)
            ON CONFLICT(source) DO UPDATE SET lastseen = excluded.lastseen
            "#,
        )
        .bind(source)
        .bind(lastseen)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get(&self, source: &str) -> Result<String, WatermarkStoreError> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT lastseen FROM lastseen WHERE source = ?")
                .bind(source)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(|(lastseen,)| lastseen).unwrap_or_default())
    }
}
