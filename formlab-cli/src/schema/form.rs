//! Form, template and submission entity models
//!
//! A [`Form`] exclusively owns its ordered field sequence; a
//! [`CustomFieldTemplate`] is the same field collection shape addressed in
//! its own identity space, without a publish flag. A [`FormSubmission`]
//! holds a non-owning back-reference to the form it was captured against
//! and is never mutated after creation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::field::FormField;

/// A user-assembled data-entry schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Form {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub fields: Vec<FormField>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_published: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submit_message: Option<String>,
}

impl Form {
    /// Create a new form with no fields and matching timestamps.
    pub fn new(id: impl Into<String>, draft: FormDraft, now: DateTime<Utc>) -> Self {
        Form {
            id: id.into(),
            name: draft.name,
            description: draft.description,
            fields: Vec::new(),
            created_at: now,
            updated_at: now,
            is_published: draft.is_published,
            submit_message: draft.submit_message,
        }
    }

    pub fn find_field(&self, field_id: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.id == field_id)
    }

    pub fn contains_field(&self, field_id: &str) -> bool {
        self.fields.iter().any(|f| f.id == field_id)
    }

    /// Refresh `updated_at`; part of every successful mutation.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    /// Merge form-level metadata from a patch.
    pub fn apply(&mut self, patch: FormPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(is_published) = patch.is_published {
            self.is_published = is_published;
        }
        if let Some(submit_message) = patch.submit_message {
            self.submit_message = Some(submit_message);
        }
    }
}

/// Input for creating a form. Fields always start empty; they are added
/// through the mutation engine so identifiers stay engine-assigned.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormDraft {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submit_message: Option<String>,
}

impl FormDraft {
    pub fn new(name: impl Into<String>) -> Self {
        FormDraft {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Shallow merge of form-level metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_published: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submit_message: Option<String>,
}

/// A named, reusable field collection independent of any single form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomFieldTemplate {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub fields: Vec<FormField>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CustomFieldTemplate {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: Option<String>,
        fields: Vec<FormField>,
        now: DateTime<Utc>,
    ) -> Self {
        CustomFieldTemplate {
            id: id.into(),
            name: name.into(),
            description,
            fields,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn contains_field(&self, field_id: &str) -> bool {
        self.fields.iter().any(|f| f.id == field_id)
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    pub fn apply(&mut self, patch: TemplatePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
    }
}

/// Shallow merge of template metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplatePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A captured form submission. Write-once: never mutated after creation,
/// and deliberately kept when the referenced form is deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSubmission {
    pub id: String,
    pub form_id: String,
    pub data: Map<String, Value>,
    pub submitted_at: DateTime<Utc>,
}
