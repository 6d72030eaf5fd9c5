//! Custom field template operations
//!
//! Templates are named, reusable field collections addressed in their own
//! identity space and storage partition, mutated under the identical
//! contract as forms. Richer scopes reference a template id from a form
//! field definition; resolving/inlining that reference is not part of
//! this core.

use chrono::Utc;

use crate::id::generate_id;
use crate::schema::{
    CustomFieldTemplate, FieldOption, FieldPatch, FieldSpec, FormField, SubFieldKey, TemplatePatch,
};
use crate::store::SchemaStore;

use super::{EngineError, SchemaEngine, fields};

/// Input for creating a template. Initial fields are supplied as specs so
/// their ids stay engine-assigned.
#[derive(Debug, Clone, Default)]
pub struct TemplateDraft {
    pub name: String,
    pub description: Option<String>,
    pub fields: Vec<FieldSpec>,
}

impl TemplateDraft {
    pub fn new(name: impl Into<String>) -> Self {
        TemplateDraft {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_field(mut self, spec: FieldSpec) -> Self {
        self.fields.push(spec);
        self
    }
}

impl<S: SchemaStore> SchemaEngine<S> {
    pub async fn list_templates(&self) -> Result<Vec<CustomFieldTemplate>, EngineError> {
        Ok(self.store.load_templates().await?)
    }

    pub async fn get_template(&self, id: &str) -> Result<Option<CustomFieldTemplate>, EngineError> {
        let templates = self.store.load_templates().await?;
        Ok(templates.into_iter().find(|t| t.id == id))
    }

    pub async fn create_template(
        &self,
        draft: TemplateDraft,
    ) -> Result<CustomFieldTemplate, EngineError> {
        let mut templates = self.store.load_templates().await?;
        let fields: Vec<FormField> = draft
            .fields
            .into_iter()
            .map(|spec| FormField::from_spec(generate_id(), spec))
            .collect();
        let template = CustomFieldTemplate::new(
            generate_id(),
            draft.name,
            draft.description,
            fields,
            Utc::now(),
        );
        templates.push(template.clone());
        self.store.save_templates(&templates).await?;
        log::info!("created template '{}' ({})", template.name, template.id);
        Ok(template)
    }

    pub async fn update_template(
        &self,
        id: &str,
        patch: TemplatePatch,
    ) -> Result<CustomFieldTemplate, EngineError> {
        self.with_template(id, |template| {
            template.apply(patch);
            Ok(true)
        })
        .await
    }

    /// Delete a template. Returns false when no template carries the id.
    pub async fn delete_template(&self, id: &str) -> Result<bool, EngineError> {
        let mut templates = self.store.load_templates().await?;
        let before = templates.len();
        templates.retain(|t| t.id != id);
        if templates.len() == before {
            return Ok(false);
        }
        self.store.save_templates(&templates).await?;
        log::info!("deleted template {id}");
        Ok(true)
    }

    pub async fn add_template_field(
        &self,
        template_id: &str,
        spec: FieldSpec,
    ) -> Result<CustomFieldTemplate, EngineError> {
        self.with_template(template_id, |template| {
            fields::append_field(&mut template.fields, generate_id(), spec);
            Ok(true)
        })
        .await
    }

    pub async fn update_template_field(
        &self,
        template_id: &str,
        field_id: &str,
        patch: FieldPatch,
    ) -> Result<CustomFieldTemplate, EngineError> {
        self.with_template(template_id, |template| {
            if !fields::patch_field(&mut template.fields, field_id, patch) {
                return Err(EngineError::not_found("field", field_id));
            }
            Ok(true)
        })
        .await
    }

    /// Deleting an unknown field id is an idempotent no-op that still
    /// refreshes `updated_at`, as for forms.
    pub async fn delete_template_field(
        &self,
        template_id: &str,
        field_id: &str,
    ) -> Result<CustomFieldTemplate, EngineError> {
        self.with_template(template_id, |template| {
            fields::remove_field(&mut template.fields, field_id);
            Ok(true)
        })
        .await
    }

    pub async fn reorder_template_fields(
        &self,
        template_id: &str,
        ordered_ids: &[String],
    ) -> Result<CustomFieldTemplate, EngineError> {
        self.with_template(template_id, |template| {
            fields::reorder_fields(&mut template.fields, ordered_ids);
            Ok(true)
        })
        .await
    }

    pub async fn add_template_option(
        &self,
        field_id: &str,
        option: FieldOption,
    ) -> Result<CustomFieldTemplate, EngineError> {
        self.with_template_owning_field(field_id, |field| fields::push_option(field, option))
            .await
    }

    pub async fn remove_template_option(
        &self,
        field_id: &str,
        index: usize,
    ) -> Result<CustomFieldTemplate, EngineError> {
        self.with_template_owning_field(field_id, |field| {
            fields::remove_option_at(field, index);
            true
        })
        .await
    }

    pub async fn add_template_sub_field_option(
        &self,
        field_id: &str,
        key: SubFieldKey,
        option: FieldOption,
    ) -> Result<CustomFieldTemplate, EngineError> {
        self.with_template_owning_field(field_id, |field| {
            fields::push_sub_option(field, key, option)
        })
        .await
    }

    pub async fn remove_template_sub_field_option(
        &self,
        field_id: &str,
        key: SubFieldKey,
        index: usize,
    ) -> Result<CustomFieldTemplate, EngineError> {
        self.with_template_owning_field(field_id, |field| {
            fields::remove_sub_option_at(field, key, index)
        })
        .await
    }

    async fn with_template<F>(&self, id: &str, mutate: F) -> Result<CustomFieldTemplate, EngineError>
    where
        F: FnOnce(&mut CustomFieldTemplate) -> Result<bool, EngineError>,
    {
        let mut templates = self.store.load_templates().await?;
        let Some(index) = templates.iter().position(|t| t.id == id) else {
            return Err(EngineError::not_found("template", id));
        };

        if mutate(&mut templates[index])? {
            templates[index].touch(Utc::now());
            self.store.save_templates(&templates).await?;
        }
        Ok(templates[index].clone())
    }

    async fn with_template_owning_field<F>(
        &self,
        field_id: &str,
        mutate: F,
    ) -> Result<CustomFieldTemplate, EngineError>
    where
        F: FnOnce(&mut FormField) -> bool,
    {
        let mut templates = self.store.load_templates().await?;
        let Some(index) = templates.iter().position(|t| t.contains_field(field_id)) else {
            return Err(EngineError::not_found("field", field_id));
        };

        let persist = {
            let field = templates[index]
                .fields
                .iter_mut()
                .find(|f| f.id == field_id)
                .expect("owner located above");
            mutate(field)
        };
        if persist {
            templates[index].touch(Utc::now());
            self.store.save_templates(&templates).await?;
        }
        Ok(templates[index].clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldType;
    use crate::store::MemoryStore;

    fn engine() -> SchemaEngine<MemoryStore> {
        SchemaEngine::new(MemoryStore::new())
    }

    #[tokio::test]
    async fn test_create_template_assigns_field_ids() {
        let engine = engine();
        let template = engine
            .create_template(
                TemplateDraft::new("Energy block")
                    .with_field(FieldSpec::new(FieldType::NaturalGasInput))
                    .with_field(FieldSpec::new(FieldType::Text).with_label("Notes")),
            )
            .await
            .unwrap();

        assert_eq!(template.fields.len(), 2);
        assert!(!template.fields[0].id.is_empty());
        assert_ne!(template.fields[0].id, template.fields[1].id);
        assert_eq!(template.created_at, template.updated_at);
        assert!(
            template.fields[0]
                .sub_field_options
                .as_ref()
                .is_some_and(|g| g.stages.len() == 3)
        );
    }

    #[tokio::test]
    async fn test_template_field_mutations_under_form_contract() {
        let engine = engine();
        let template = engine
            .create_template(TemplateDraft::new("Block"))
            .await
            .unwrap();

        let template = engine
            .add_template_field(&template.id, FieldSpec::new(FieldType::Select))
            .await
            .unwrap();
        let field_id = template.fields[0].id.clone();
        assert_eq!(template.fields[0].options, Some(vec![]));

        let template = engine
            .add_template_option(&field_id, FieldOption::new("Gas", "gas"))
            .await
            .unwrap();
        assert_eq!(
            template.fields[0].options.as_ref().unwrap().len(),
            1
        );

        let template = engine
            .update_template_field(
                &template.id,
                &field_id,
                FieldPatch {
                    field_type: Some(FieldType::Number),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(template.fields[0].options.is_none());

        let template = engine
            .delete_template_field(&template.id, &field_id)
            .await
            .unwrap();
        assert!(template.fields.is_empty());
    }

    #[tokio::test]
    async fn test_template_identity_space_is_separate_from_forms() {
        let engine = engine();
        let template = engine
            .create_template(TemplateDraft::new("Block"))
            .await
            .unwrap();

        assert!(engine.get_form(&template.id).await.unwrap().is_none());
        assert!(engine.list_forms().await.unwrap().is_empty());

        let err = engine
            .add_field(&template.id, FieldSpec::new(FieldType::Text))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_update_template_metadata() {
        let engine = engine();
        let template = engine
            .create_template(TemplateDraft::new("Block"))
            .await
            .unwrap();
        let updated = engine
            .update_template(
                &template.id,
                TemplatePatch {
                    description: Some("Reusable energy inputs".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(
            updated.description.as_deref(),
            Some("Reusable energy inputs")
        );
        assert!(updated.updated_at > template.updated_at);
    }

    #[tokio::test]
    async fn test_delete_template() {
        let engine = engine();
        let template = engine
            .create_template(TemplateDraft::new("Block"))
            .await
            .unwrap();
        assert!(engine.delete_template(&template.id).await.unwrap());
        assert!(!engine.delete_template(&template.id).await.unwrap());
    }
}
