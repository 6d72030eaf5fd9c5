//! Persistence gateway
//!
//! The durability boundary of the engine. A [`SchemaStore`] loads and
//! saves one whole collection set per entity kind; every mutation is a
//! load-modify-save cycle against it. The trait is the sole point where
//! the storage technology can be swapped (embedded SQLite today, a
//! networked API later); the engine assumes nothing beyond it.

#[cfg(test)]
pub mod memory;
pub mod sqlite;

use async_trait::async_trait;
use thiserror::Error;

use crate::schema::{CustomFieldTemplate, Form, FormSubmission};

#[cfg(test)]
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// The two independently-addressed collection kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionKind {
    Forms,
    Templates,
}

impl CollectionKind {
    /// Storage partition key for this kind.
    pub fn key(&self) -> &'static str {
        match self {
            CollectionKind::Forms => "forms",
            CollectionKind::Templates => "custom_field_templates",
        }
    }
}

/// Failures at the storage boundary. A failed call leaves previously
/// persisted state untouched; callers keep their in-memory entity and may
/// retry.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend failure: {0}")]
    Backend(#[from] sqlx::Error),
    #[error("corrupt collection payload: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Durable store for the schema collections and the submission log.
///
/// All calls are asynchronous and non-blocking; collection saves replace
/// the whole set for that kind in one write.
#[async_trait]
pub trait SchemaStore: Send + Sync {
    async fn load_forms(&self) -> Result<Vec<Form>, StoreError>;

    async fn save_forms(&self, forms: &[Form]) -> Result<(), StoreError>;

    async fn load_templates(&self) -> Result<Vec<CustomFieldTemplate>, StoreError>;

    async fn save_templates(&self, templates: &[CustomFieldTemplate]) -> Result<(), StoreError>;

    /// Append one write-once submission to the log.
    async fn append_submission(&self, submission: &FormSubmission) -> Result<(), StoreError>;

    /// Submissions recorded against one form, oldest first.
    async fn load_submissions(&self, form_id: &str) -> Result<Vec<FormSubmission>, StoreError>;
}
