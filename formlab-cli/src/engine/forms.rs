//! Form collection operations
//!
//! Lifecycle (create/update/delete), field mutations, option edits located
//! by owning field id, and submission capture.

use chrono::Utc;
use serde_json::{Map, Value};

use crate::id::generate_id;
use crate::schema::{
    FieldOption, FieldPatch, FieldSpec, Form, FormDraft, FormField, FormPatch, FormSubmission,
    SubFieldKey,
};
use crate::store::SchemaStore;

use super::{EngineError, SchemaEngine, fields};

impl<S: SchemaStore> SchemaEngine<S> {
    pub async fn list_forms(&self) -> Result<Vec<Form>, EngineError> {
        Ok(self.store.load_forms().await?)
    }

    pub async fn get_form(&self, id: &str) -> Result<Option<Form>, EngineError> {
        let forms = self.store.load_forms().await?;
        Ok(forms.into_iter().find(|f| f.id == id))
    }

    /// Create a form with no fields and a fresh id.
    pub async fn create_form(&self, draft: FormDraft) -> Result<Form, EngineError> {
        let mut forms = self.store.load_forms().await?;
        let form = Form::new(generate_id(), draft, Utc::now());
        forms.push(form.clone());
        self.store.save_forms(&forms).await?;
        log::info!("created form '{}' ({})", form.name, form.id);
        Ok(form)
    }

    /// Merge form-level metadata.
    pub async fn update_form(&self, id: &str, patch: FormPatch) -> Result<Form, EngineError> {
        self.with_form(id, |form| {
            form.apply(patch);
            Ok(true)
        })
        .await
    }

    /// Delete a form. Returns false when no form carries the id.
    pub async fn delete_form(&self, id: &str) -> Result<bool, EngineError> {
        let mut forms = self.store.load_forms().await?;
        let before = forms.len();
        forms.retain(|f| f.id != id);
        if forms.len() == before {
            return Ok(false);
        }
        self.store.save_forms(&forms).await?;
        log::info!("deleted form {id}");
        Ok(true)
    }

    /// Append a new field built from `spec` to the end of the sequence.
    pub async fn add_field(&self, form_id: &str, spec: FieldSpec) -> Result<Form, EngineError> {
        self.with_form(form_id, |form| {
            fields::append_field(&mut form.fields, generate_id(), spec);
            Ok(true)
        })
        .await
    }

    /// Shallow-merge `patch` into one field.
    pub async fn update_field(
        &self,
        form_id: &str,
        field_id: &str,
        patch: FieldPatch,
    ) -> Result<Form, EngineError> {
        self.with_form(form_id, |form| {
            if !fields::patch_field(&mut form.fields, field_id, patch) {
                return Err(EngineError::not_found("field", field_id));
            }
            Ok(true)
        })
        .await
    }

    /// Remove one field. Deleting an unknown field id is an idempotent
    /// no-op that still refreshes `updated_at`.
    pub async fn delete_field(&self, form_id: &str, field_id: &str) -> Result<Form, EngineError> {
        self.with_form(form_id, |form| {
            fields::remove_field(&mut form.fields, field_id);
            Ok(true)
        })
        .await
    }

    /// Set the field sequence to exactly `ordered_ids`, in that order.
    /// Callers supply the complete id list; omissions drop fields.
    pub async fn reorder_fields(
        &self,
        form_id: &str,
        ordered_ids: &[String],
    ) -> Result<Form, EngineError> {
        self.with_form(form_id, |form| {
            fields::reorder_fields(&mut form.fields, ordered_ids);
            Ok(true)
        })
        .await
    }

    /// Add an option to the choice-like field owning `field_id`.
    pub async fn add_option(
        &self,
        field_id: &str,
        option: FieldOption,
    ) -> Result<Form, EngineError> {
        self.with_form_owning_field(field_id, |field| fields::push_option(field, option))
            .await
    }

    /// Remove an option by position; out-of-range is a persisted no-op.
    pub async fn remove_option(&self, field_id: &str, index: usize) -> Result<Form, EngineError> {
        self.with_form_owning_field(field_id, |field| {
            fields::remove_option_at(field, index);
            true
        })
        .await
    }

    /// Add an option to one sub-option group of a composite field.
    pub async fn add_sub_field_option(
        &self,
        field_id: &str,
        key: SubFieldKey,
        option: FieldOption,
    ) -> Result<Form, EngineError> {
        self.with_form_owning_field(field_id, |field| fields::push_sub_option(field, key, option))
            .await
    }

    /// Remove a sub-option by position within its group.
    pub async fn remove_sub_field_option(
        &self,
        field_id: &str,
        key: SubFieldKey,
        index: usize,
    ) -> Result<Form, EngineError> {
        self.with_form_owning_field(field_id, |field| {
            fields::remove_sub_option_at(field, key, index)
        })
        .await
    }

    /// Capture a write-once submission against a form. The form reference
    /// is non-owning; no declared-constraint validation happens here.
    pub async fn submit_form(
        &self,
        form_id: &str,
        data: Map<String, Value>,
    ) -> Result<FormSubmission, EngineError> {
        let submission = FormSubmission {
            id: generate_id(),
            form_id: form_id.to_string(),
            data,
            submitted_at: Utc::now(),
        };
        self.store.append_submission(&submission).await?;
        log::info!("recorded submission {} for form {form_id}", submission.id);
        Ok(submission)
    }

    pub async fn list_submissions(
        &self,
        form_id: &str,
    ) -> Result<Vec<FormSubmission>, EngineError> {
        Ok(self.store.load_submissions(form_id).await?)
    }

    /// Load-modify-save cycle for one form. `mutate` returns whether the
    /// change should be persisted; persisted changes refresh `updated_at`
    /// in the same step.
    async fn with_form<F>(&self, id: &str, mutate: F) -> Result<Form, EngineError>
    where
        F: FnOnce(&mut Form) -> Result<bool, EngineError>,
    {
        let mut forms = self.store.load_forms().await?;
        let Some(index) = forms.iter().position(|f| f.id == id) else {
            return Err(EngineError::not_found("form", id));
        };

        if mutate(&mut forms[index])? {
            forms[index].touch(Utc::now());
            self.store.save_forms(&forms).await?;
        }
        Ok(forms[index].clone())
    }

    /// Same cycle, addressed by the globally-unique id of an owned field.
    async fn with_form_owning_field<F>(&self, field_id: &str, mutate: F) -> Result<Form, EngineError>
    where
        F: FnOnce(&mut FormField) -> bool,
    {
        let mut forms = self.store.load_forms().await?;
        let Some(index) = forms.iter().position(|f| f.contains_field(field_id)) else {
            return Err(EngineError::not_found("field", field_id));
        };

        let persist = {
            let field = forms[index]
                .fields
                .iter_mut()
                .find(|f| f.id == field_id)
                .expect("owner located above");
            mutate(field)
        };
        if persist {
            forms[index].touch(Utc::now());
            self.store.save_forms(&forms).await?;
        }
        Ok(forms[index].clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldType;
    use crate::store::MemoryStore;
    use serde_json::json;

    fn engine() -> SchemaEngine<MemoryStore> {
        SchemaEngine::new(MemoryStore::new())
    }

    async fn fresh_form(engine: &SchemaEngine<MemoryStore>) -> Form {
        engine.create_form(FormDraft::new("Survey")).await.unwrap()
    }

    #[tokio::test]
    async fn test_added_fields_have_distinct_ids_in_order() {
        let engine = engine();
        let form = fresh_form(&engine).await;

        for i in 0..5 {
            engine
                .add_field(
                    &form.id,
                    FieldSpec::new(FieldType::Text).with_label(format!("Field {i}")),
                )
                .await
                .unwrap();
        }

        let form = engine.get_form(&form.id).await.unwrap().unwrap();
        assert_eq!(form.fields.len(), 5);
        let mut ids: Vec<&str> = form.fields.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(form.fields[3].label, "Field 3");
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 5);
    }

    #[tokio::test]
    async fn test_add_field_to_missing_form_is_not_found() {
        let engine = engine();
        let err = engine
            .add_field("ghost", FieldSpec::new(FieldType::Text))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_builder_scenario() {
        // Text field, select field, option add, reorder.
        let engine = engine();
        let form = fresh_form(&engine).await;

        let form = engine
            .add_field(
                &form.id,
                FieldSpec::new(FieldType::Text).with_label("Name"),
            )
            .await
            .unwrap();
        let name_id = form.fields[0].id.clone();
        assert_eq!(form.fields[0].label, "Name");
        assert!(!form.fields[0].required);

        let form = engine
            .add_field(
                &form.id,
                FieldSpec::new(FieldType::Select).with_label("Color"),
            )
            .await
            .unwrap();
        assert_eq!(form.fields.len(), 2);
        let color_id = form.fields[1].id.clone();
        assert_eq!(form.fields[1].options, Some(vec![]));

        let form = engine
            .add_option(&color_id, FieldOption::new("Red", "red"))
            .await
            .unwrap();
        assert_eq!(
            form.fields[1].options,
            Some(vec![FieldOption::new("Red", "red")])
        );

        let form = engine
            .reorder_fields(&form.id, &[color_id.clone(), name_id.clone()])
            .await
            .unwrap();
        let labels: Vec<&str> = form.fields.iter().map(|f| f.label.as_str()).collect();
        assert_eq!(labels, ["Color", "Name"]);
    }

    #[tokio::test]
    async fn test_update_field_type_change_clears_options() {
        let engine = engine();
        let form = fresh_form(&engine).await;
        let form = engine
            .add_field(&form.id, FieldSpec::new(FieldType::Select))
            .await
            .unwrap();
        let field_id = form.fields[0].id.clone();
        engine
            .add_option(&field_id, FieldOption::new("Red", "red"))
            .await
            .unwrap();

        let form = engine
            .update_field(
                &form.id,
                &field_id,
                FieldPatch {
                    field_type: Some(FieldType::Textarea),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(form.fields[0].field_type, FieldType::Textarea);
        assert!(form.fields[0].options.is_none());
    }

    #[tokio::test]
    async fn test_update_missing_field_is_not_found_and_unpersisted() {
        let engine = engine();
        let form = fresh_form(&engine).await;
        let err = engine
            .update_field(&form.id, "ghost", FieldPatch::default())
            .await
            .unwrap_err();
        assert!(err.is_not_found());

        let stored = engine.get_form(&form.id).await.unwrap().unwrap();
        assert_eq!(stored.updated_at, form.updated_at);
    }

    #[tokio::test]
    async fn test_delete_missing_field_keeps_fields_but_touches() {
        let engine = engine();
        let form = fresh_form(&engine).await;
        let form = engine
            .add_field(&form.id, FieldSpec::new(FieldType::Text))
            .await
            .unwrap();

        let after = engine.delete_field(&form.id, "ghost").await.unwrap();
        assert_eq!(after.fields, form.fields);
        assert!(after.updated_at > form.updated_at);
    }

    #[tokio::test]
    async fn test_reorder_twice_matches_once() {
        let engine = engine();
        let form = fresh_form(&engine).await;
        engine
            .add_field(&form.id, FieldSpec::new(FieldType::Text))
            .await
            .unwrap();
        let form = engine
            .add_field(&form.id, FieldSpec::new(FieldType::Date))
            .await
            .unwrap();

        let order: Vec<String> = form.fields.iter().rev().map(|f| f.id.clone()).collect();
        let once = engine.reorder_fields(&form.id, &order).await.unwrap();
        let twice = engine.reorder_fields(&form.id, &order).await.unwrap();
        assert_eq!(once.fields, twice.fields);
    }

    #[tokio::test]
    async fn test_blank_option_is_declined_without_persisting() {
        let engine = engine();
        let form = fresh_form(&engine).await;
        let form = engine
            .add_field(&form.id, FieldSpec::new(FieldType::Select))
            .await
            .unwrap();
        let field_id = form.fields[0].id.clone();

        let after = engine
            .add_option(&field_id, FieldOption::new("   ", ""))
            .await
            .unwrap();
        assert_eq!(after.fields[0].options, Some(vec![]));
        assert_eq!(after.updated_at, form.updated_at);
    }

    #[tokio::test]
    async fn test_out_of_range_option_remove_persists_noop() {
        let engine = engine();
        let form = fresh_form(&engine).await;
        let form = engine
            .add_field(&form.id, FieldSpec::new(FieldType::Select))
            .await
            .unwrap();
        let field_id = form.fields[0].id.clone();

        let after = engine.remove_option(&field_id, 7).await.unwrap();
        assert_eq!(after.fields[0].options, Some(vec![]));
        assert!(after.updated_at > form.updated_at);
    }

    #[tokio::test]
    async fn test_composite_field_gets_default_groups_and_sub_option_ops() {
        let engine = engine();
        let form = fresh_form(&engine).await;
        let form = engine
            .add_field(&form.id, FieldSpec::new(FieldType::NaturalGasInput))
            .await
            .unwrap();
        let field_id = form.fields[0].id.clone();

        let groups = form.fields[0].sub_field_options.as_ref().unwrap();
        assert_eq!(groups.units.len(), 3);
        assert_eq!(groups.types.len(), 3);
        assert_eq!(groups.stages.len(), 3);
        assert_eq!(groups.uses.len(), 3);

        let form = engine
            .add_sub_field_option(&field_id, SubFieldKey::Uses, FieldOption::new("Steam", "steam"))
            .await
            .unwrap();
        assert_eq!(form.fields[0].sub_field_options.as_ref().unwrap().uses.len(), 4);

        let form = engine
            .remove_sub_field_option(&field_id, SubFieldKey::Uses, 0)
            .await
            .unwrap();
        let uses = &form.fields[0].sub_field_options.as_ref().unwrap().uses;
        assert_eq!(uses.len(), 3);
        assert_eq!(uses[0], FieldOption::new("Heat", "heat"));
    }

    #[tokio::test]
    async fn test_option_ops_on_unknown_field_are_not_found() {
        let engine = engine();
        fresh_form(&engine).await;
        let err = engine
            .add_option("ghost", FieldOption::new("Red", "red"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_update_form_metadata_touches() {
        let engine = engine();
        let form = fresh_form(&engine).await;
        let updated = engine
            .update_form(
                &form.id,
                FormPatch {
                    is_published: Some(true),
                    submit_message: Some("Thanks!".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(updated.is_published);
        assert_eq!(updated.submit_message.as_deref(), Some("Thanks!"));
        assert!(updated.updated_at > form.updated_at);
    }

    #[tokio::test]
    async fn test_delete_form() {
        let engine = engine();
        let form = fresh_form(&engine).await;
        assert!(engine.delete_form(&form.id).await.unwrap());
        assert!(!engine.delete_form(&form.id).await.unwrap());
        assert!(engine.get_form(&form.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_submissions_survive_form_deletion() {
        let engine = engine();
        let form = fresh_form(&engine).await;

        let mut data = Map::new();
        data.insert("name".into(), json!("Ada"));
        let submission = engine.submit_form(&form.id, data).await.unwrap();

        engine.delete_form(&form.id).await.unwrap();
        let listed = engine.list_submissions(&form.id).await.unwrap();
        assert_eq!(listed, vec![submission]);
    }

    #[tokio::test]
    async fn test_sequential_operations_all_land() {
        let engine = engine();
        let form = fresh_form(&engine).await;
        for ty in [FieldType::Text, FieldType::Number, FieldType::Checkbox] {
            engine.add_field(&form.id, FieldSpec::new(ty)).await.unwrap();
        }
        let form = engine.get_form(&form.id).await.unwrap().unwrap();
        let types: Vec<FieldType> = form.fields.iter().map(|f| f.field_type).collect();
        assert_eq!(
            types,
            [FieldType::Text, FieldType::Number, FieldType::Checkbox]
        );
    }
}
