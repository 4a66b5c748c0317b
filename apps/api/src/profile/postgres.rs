use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::{debug, info};

use super::{Document, ProfileStore, StoreError};

/// Postgres-backed profile store.
///
/// Expects one row per document:
///
/// ```sql
/// CREATE TABLE profile_documents (
///     collection  TEXT NOT NULL,
///     document_id TEXT NOT NULL,
///     data        JSON NOT NULL,
///     PRIMARY KEY (collection, document_id)
/// );
/// ```
///
/// `data` is `JSON` rather than `JSONB` and is read back as text so the
/// stored key order survives.
#[derive(Clone)]
pub struct PgProfileStore {
    pool: PgPool,
}

impl PgProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a small pool; the service only ever reads.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        info!("Connecting to PostgreSQL profile store...");
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        info!("PostgreSQL connection pool established");
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn get(
        &self,
        collection: &str,
        document: &str,
    ) -> Result<Option<Document>, StoreError> {
        let raw: Option<String> = sqlx::query_scalar(
            "SELECT data::text FROM profile_documents WHERE collection = $1 AND document_id = $2",
        )
        .bind(collection)
        .bind(document)
        .fetch_optional(&self.pool)
        .await?;

        let Some(raw) = raw else {
            debug!("No row for {collection}/{document}");
            return Ok(None);
        };

        parse_document(collection, document, &raw).map(Some)
    }
}

fn parse_document(collection: &str, document: &str, raw: &str) -> Result<Document, StoreError> {
    let value: Value = serde_json::from_str(raw).map_err(|e| {
        StoreError::Malformed(format!("{collection}/{document} is not valid JSON: {e}"))
    })?;
    match value {
        Value::Object(map) => Ok(Document::from_json_object(&map)),
        Value::Null => Ok(Document::default()),
        _ => Err(StoreError::Malformed(format!(
            "{collection}/{document} must be a JSON object"
        ))),
    }
}
