//! In-memory schema store
//!
//! Same whole-collection semantics as the SQLite store, backed by a
//! mutex-guarded state. Used by engine tests and as the smallest possible
//! reference implementation of the gateway contract.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::schema::{CustomFieldTemplate, Form, FormSubmission};

use super::{SchemaStore, StoreError};

#[derive(Default)]
struct State {
    forms: Vec<Form>,
    templates: Vec<CustomFieldTemplate>,
    submissions: Vec<FormSubmission>,
}

#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SchemaStore for MemoryStore {
    async fn load_forms(&self) -> Result<Vec<Form>, StoreError> {
        Ok(self.state.lock().unwrap().forms.clone())
    }

    async fn save_forms(&self, forms: &[Form]) -> Result<(), StoreError> {
        self.state.lock().unwrap().forms = forms.to_vec();
        Ok(())
    }

    async fn load_templates(&self) -> Result<Vec<CustomFieldTemplate>, StoreError> {
        Ok(self.state.lock().unwrap().templates.clone())
    }

    async fn save_templates(&self, templates: &[CustomFieldTemplate]) -> Result<(), StoreError> {
        self.state.lock().unwrap().templates = templates.to_vec();
        Ok(())
    }

    async fn append_submission(&self, submission: &FormSubmission) -> Result<(), StoreError> {
        self.state.lock().unwrap().submissions.push(submission.clone());
        Ok(())
    }

    async fn load_submissions(&self, form_id: &str) -> Result<Vec<FormSubmission>, StoreError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .submissions
            .iter()
            .filter(|s| s.form_id == form_id)
            .cloned()
            .collect())
    }
}
