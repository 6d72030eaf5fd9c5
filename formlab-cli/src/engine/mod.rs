//! Schema mutation engine
//!
//! Every operation is a load-modify-save cycle against the injected
//! [`SchemaStore`]: read the whole collection set for the kind, locate the
//! target entity by id, apply the change, refresh `updated_at`, write the
//! whole set back. Each operation is atomic with respect to its entity;
//! concurrent writers of the same kind race at whole-set granularity
//! (single active editor assumed).

mod fields;
pub mod forms;
pub mod templates;

use thiserror::Error;

use crate::store::{SchemaStore, StoreError};

pub use templates::TemplateDraft;

/// Operation failures surfaced to the caller.
///
/// Invalid option input (blank label/value) is not an error: the engine
/// declines the edit and returns the unchanged entity.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("{entity} '{id}' not found")]
    NotFound { entity: &'static str, id: String },
    /// The store was unreachable or rejected the write; previously
    /// persisted state is untouched and the caller may retry.
    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl EngineError {
    pub(crate) fn not_found(entity: &'static str, id: &str) -> Self {
        EngineError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, EngineError::NotFound { .. })
    }
}

/// The mutation engine over an injected store handle.
pub struct SchemaEngine<S> {
    store: S,
}

impl<S: SchemaStore> SchemaEngine<S> {
    pub fn new(store: S) -> Self {
        SchemaEngine { store }
    }
}
