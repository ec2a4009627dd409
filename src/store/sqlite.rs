use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqlitePoolOptions, SqliteRow};
use sqlx::{migrate::MigrateDatabase, Row, SqlitePool};
use tracing::info;

use super::DocumentStore;
use crate::config::DatabaseConfig;
use crate::documents::{Document, DocumentId, DocumentStatus, NewDocument, Signer};
use crate::error::StoreError;

/// SQLite-backed document store
pub struct SqliteDocumentStore {
    pool: SqlitePool,
}

impl SqliteDocumentStore {
    /// Open (creating if needed) the database and optionally run migrations
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        if !sqlx::Sqlite::database_exists(&config.url).await? {
            info!("Creating database at {}", config.url);
            sqlx::Sqlite::create_database(&config.url).await?;
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.url)
            .await?;

        if config.auto_migrate {
            info!("Running database migrations...");
            sqlx::migrate!("./migrations").run(&pool).await?;
            info!("Database migrations completed");
        }

        Ok(Self { pool })
    }

    /// Close database connections gracefully
    pub async fn shutdown(&self) {
        info!("Shutting down database connections...");
        self.pool.close().await;
        info!("Database connections closed");
    }

    fn document_from_row(row: &SqliteRow) -> Result<Document, StoreError> {
        let id: String = row.try_get("id")?;
        let status: String = row.try_get("status")?;
        let signers: String = row.try_get("signers")?;
        let size: i64 = row.try_get("size")?;

        Ok(Document {
            id: id.parse::<DocumentId>().map_err(|e| StoreError::Corrupt {
                reason: e.to_string(),
            })?,
            hash: row.try_get("hash")?,
            name: row.try_get("name")?,
            size: size as u64,
            extension: row.try_get("extension")?,
            owner: row.try_get("owner")?,
            status: status
                .parse::<DocumentStatus>()
                .map_err(|e| StoreError::Corrupt {
                    reason: e.to_string(),
                })?,
            expiration_time: row.try_get::<DateTime<Utc>, _>("expiration_time")?,
            signers: serde_json::from_str::<Vec<Signer>>(&signers)?,
            created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
            updated_at: row.try_get::<DateTime<Utc>, _>("updated_at")?,
        })
    }
}

#[async_trait]
impl DocumentStore for SqliteDocumentStore {
    async fn find_by_owner(&self, owner: &str) -> Result<Vec<Document>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, hash, name, size, extension, owner, status,
                   expiration_time, signers, created_at, updated_at
            FROM documents
            WHERE owner = ?1
            ORDER BY created_at DESC, rowid DESC
            "#,
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::document_from_row).collect()
    }

    async fn find_by_id(&self, id: &DocumentId) -> Result<Option<Document>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, hash, name, size, extension, owner, status,
                   expiration_time, signers, created_at, updated_at
            FROM documents
            WHERE id = ?1
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::document_from_row).transpose()
    }

    async fn create(&self, draft: NewDocument) -> Result<Document, StoreError> {
        let now = Utc::now();
        let document = draft.into_document(DocumentId::generate_at(now), now);

        sqlx::query(
            r#"
            INSERT INTO documents (id, hash, name, size, extension, owner, status,
                                   expiration_time, signers, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
        )
        .bind(document.id.to_string())
        .bind(&document.hash)
        .bind(&document.name)
        .bind(document.size as i64)
        .bind(&document.extension)
        .bind(&document.owner)
        .bind(document.status.as_str())
        .bind(document.expiration_time)
        .bind(serde_json::to_string(&document.signers)?)
        .bind(document.created_at)
        .bind(document.updated_at)
        .execute(&self.pool)
        .await?;

        info!(document_id = %document.id, "Document row inserted");
        Ok(document)
    }

    async fn save(&self, document: &Document) -> Result<Document, StoreError> {
        let mut updated = document.clone();
        updated.updated_at = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE documents
            SET hash = ?2, name = ?3, size = ?4, extension = ?5, owner = ?6,
                status = ?7, expiration_time = ?8, signers = ?9, updated_at = ?10
            WHERE id = ?1
            "#,
        )
        .bind(updated.id.to_string())
        .bind(&updated.hash)
        .bind(&updated.name)
        .bind(updated.size as i64)
        .bind(&updated.extension)
        .bind(&updated.owner)
        .bind(updated.status.as_str())
        .bind(updated.expiration_time)
        .bind(serde_json::to_string(&updated.signers)?)
        .bind(updated.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::Missing(updated.id.to_string()));
        }
        Ok(updated)
    }
}
