//! SQLite-backed schema store
//!
//! Each collection kind is persisted as one JSON array in the
//! `collections` table, keyed by kind: the unit of durability is the
//! whole collection set, matching the engine's load-modify-save cycles.
//! Submissions are append-only rows in their own table.

use std::path::Path;
use std::str::FromStr;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Row;

use crate::schema::{CustomFieldTemplate, Form, FormSubmission};

use super::{CollectionKind, SchemaStore, StoreError};

pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (creating if missing) the database at `path` and ensure the
    /// schema exists.
    pub async fn connect(path: &Path) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new().connect_with(options).await?;
        let store = SqliteStore { pool };
        store.init_schema().await?;
        Ok(store)
    }

    /// In-memory database, used by tests.
    pub async fn in_memory() -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;
        let store = SqliteStore { pool };
        store.init_schema().await?;
        Ok(store)
    }

    async fn init_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS collections (
                kind TEXT PRIMARY KEY,
                body TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS submissions (
                id TEXT PRIMARY KEY,
                form_id TEXT NOT NULL,
                body TEXT NOT NULL,
                submitted_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_submissions_form_id ON submissions (form_id)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn load_kind<T: DeserializeOwned>(
        &self,
        kind: CollectionKind,
    ) -> Result<Vec<T>, StoreError> {
        let row = sqlx::query("SELECT body FROM collections WHERE kind = ?")
            .bind(kind.key())
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                let body: String = row.try_get("body")?;
                Ok(serde_json::from_str(&body)?)
            }
            None => Ok(Vec::new()),
        }
    }

    async fn save_kind<T: Serialize>(
        &self,
        kind: CollectionKind,
        entities: &[T],
    ) -> Result<(), StoreError> {
        let body = serde_json::to_string(entities)?;

        sqlx::query(
            r#"
            INSERT INTO collections (kind, body) VALUES (?, ?)
            ON CONFLICT(kind) DO UPDATE SET body = excluded.body
            "#,
        )
        .bind(kind.key())
        .bind(&body)
        .execute(&self.pool)
        .await?;

        log::debug!("saved {} {} entities", entities.len(), kind.key());
        Ok(())
    }
}

#[async_trait]
impl SchemaStore for SqliteStore {
    async fn load_forms(&self) -> Result<Vec<Form>, StoreError> {
        self.load_kind(CollectionKind::Forms).await
    }

    async fn save_forms(&self, forms: &[Form]) -> Result<(), StoreError> {
        self.save_kind(CollectionKind::Forms, forms).await
    }

    async fn load_templates(&self) -> Result<Vec<CustomFieldTemplate>, StoreError> {
        self.load_kind(CollectionKind::Templates).await
    }

    async fn save_templates(&self, templates: &[CustomFieldTemplate]) -> Result<(), StoreError> {
        self.save_kind(CollectionKind::Templates, templates).await
    }

    async fn append_submission(&self, submission: &FormSubmission) -> Result<(), StoreError> {
        let body = serde_json::to_string(submission)?;

        sqlx::query(
            "INSERT INTO submissions (id, form_id, body, submitted_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&submission.id)
        .bind(&submission.form_id)
        .bind(&body)
        .bind(submission.submitted_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn load_submissions(&self, form_id: &str) -> Result<Vec<FormSubmission>, StoreError> {
        let rows = sqlx::query(
            "SELECT body FROM submissions WHERE form_id = ? ORDER BY submitted_at, id",
        )
        .bind(form_id)
        .fetch_all(&self.pool)
        .await?;

        let mut submissions = Vec::with_capacity(rows.len());
        for row in rows {
            let body: String = row.try_get("body")?;
            submissions.push(serde_json::from_str(&body)?);
        }
        Ok(submissions)
    }
}
