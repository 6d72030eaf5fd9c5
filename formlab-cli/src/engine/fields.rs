//! Pure field-sequence operations
//!
//! The invariant-preserving core of the mutation engine, factored out of
//! the collection plumbing so it can be unit tested directly: append,
//! shallow patch merge with type reconciliation, order-preserving removal,
//! full-replace reorder, and the option/sub-option edits.

use crate::schema::{FieldOption, FieldPatch, FieldSpec, FieldType, FormField, SubFieldKey};

/// Append a newly-identified field built from `spec`.
pub(crate) fn append_field(fields: &mut Vec<FormField>, id: String, spec: FieldSpec) {
    fields.push(FormField::from_spec(id, spec));
}

/// Shallow-merge `patch` into the field with `field_id`.
///
/// Returns false when no field matches. A type change reconciles the
/// structural extras in the same step: leaving the choice family clears
/// `options`, entering it initializes an empty list, and entering the
/// composite family default-populates the sub-option groups exactly once.
pub(crate) fn patch_field(fields: &mut [FormField], field_id: &str, patch: FieldPatch) -> bool {
    let Some(field) = fields.iter_mut().find(|f| f.id == field_id) else {
        return false;
    };

    if let Some(label) = patch.label {
        field.label = label;
    }
    if let Some(required) = patch.required {
        field.required = required;
    }
    if let Some(placeholder) = patch.placeholder {
        field.placeholder = Some(placeholder);
    }
    if let Some(description) = patch.description {
        field.description = Some(description);
    }
    if let Some(default_value) = patch.default_value {
        field.default_value = Some(default_value);
    }
    if let Some(options) = patch.options {
        field.options = Some(options);
    }
    if let Some(sub_field_options) = patch.sub_field_options {
        field.sub_field_options = Some(sub_field_options);
    }
    if let Some(validations) = patch.validations {
        field.validations = Some(validations);
    }
    if let Some(field_type) = patch.field_type {
        change_type(field, field_type);
    }

    true
}

/// Change a field's type, reconciling the structural extras the catalog
/// ties to the type tag.
fn change_type(field: &mut FormField, field_type: FieldType) {
    field.field_type = field_type;

    if field_type.has_options() {
        if field.options.is_none() {
            field.options = Some(Vec::new());
        }
    } else if field.options.is_some() {
        log::debug!("field {} left the choice family, clearing options", field.id);
        field.options = None;
    }

    // Sub-option groups are initialized on first observation only.
    if field_type.has_sub_field_options() && field.sub_field_options.is_none() {
        field.sub_field_options = Some(FieldType::default_sub_field_options());
    }
}

/// Remove the field with `field_id`, preserving the order of the rest.
/// Removing an unknown id is a no-op; returns whether anything changed.
pub(crate) fn remove_field(fields: &mut Vec<FormField>, field_id: &str) -> bool {
    let before = fields.len();
    fields.retain(|f| f.id != field_id);
    fields.len() != before
}

/// Replace the sequence with exactly the fields named by `ordered_ids`,
/// in that order. Unknown ids are skipped; fields omitted from the list
/// are dropped.
pub(crate) fn reorder_fields(fields: &mut Vec<FormField>, ordered_ids: &[String]) {
    let current = std::mem::take(fields);
    let mut remaining: Vec<Option<FormField>> = current.into_iter().map(Some).collect();

    for id in ordered_ids {
        if let Some(slot) = remaining
            .iter_mut()
            .find(|f| f.as_ref().is_some_and(|f| &f.id == id))
        {
            fields.push(slot.take().expect("slot matched above"));
        }
    }
}

/// Add an option to a choice-like field's flat list. Blank input and
/// non-choice targets are declined; returns whether the option was added.
pub(crate) fn push_option(field: &mut FormField, option: FieldOption) -> bool {
    if option.is_blank() {
        log::warn!("skipping blank option on field {}", field.id);
        return false;
    }
    if !field.field_type.has_options() {
        log::warn!(
            "skipping option on non-choice field {} ({})",
            field.id,
            field.field_type
        );
        return false;
    }

    field.options.get_or_insert_with(Vec::new).push(option);
    true
}

/// Remove an option by position. Out-of-range indexes are a no-op.
pub(crate) fn remove_option_at(field: &mut FormField, index: usize) {
    if let Some(options) = field.options.as_mut()
        && index < options.len()
    {
        options.remove(index);
    }
}

/// Add an option to one sub-option group of a composite field. Groups are
/// default-populated first when absent. Blank input and non-composite
/// targets are declined; returns whether the option was added.
pub(crate) fn push_sub_option(field: &mut FormField, key: SubFieldKey, option: FieldOption) -> bool {
    if option.is_blank() {
        log::warn!("skipping blank {key} option on field {}", field.id);
        return false;
    }
    if !field.field_type.has_sub_field_options() {
        log::warn!(
            "skipping {key} option on non-composite field {} ({})",
            field.id,
            field.field_type
        );
        return false;
    }

    field
        .sub_field_options
        .get_or_insert_with(FieldType::default_sub_field_options)
        .group_mut(key)
        .push(option);
    true
}

/// Remove a sub-option by position within its group. Out-of-range indexes
/// are a no-op; returns whether the field is a composite target at all.
pub(crate) fn remove_sub_option_at(field: &mut FormField, key: SubFieldKey, index: usize) -> bool {
    if !field.field_type.has_sub_field_options() {
        return false;
    }

    let groups = field
        .sub_field_options
        .get_or_insert_with(FieldType::default_sub_field_options);
    let group = groups.group_mut(key);
    if index < group.len() {
        group.remove(index);
    }
    true
}
