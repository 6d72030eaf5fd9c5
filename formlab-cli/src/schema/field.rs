//! Form field entity model
//!
//! A [`FormField`] is one labeled, typed input declaration within a form or
//! template. Which structural extras it carries (`options`,
//! `sub_field_options`, `validations`) is governed by the
//! [`FieldType`](super::FieldType) catalog.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use super::types::FieldType;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Derive an option value slug from its label: lowercase, whitespace runs
/// collapsed to underscores.
pub fn slugify(label: &str) -> String {
    WHITESPACE
        .replace_all(label.to_lowercase().trim(), "_")
        .into_owned()
}

/// One selectable choice of a choice-like field or sub-option group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    pub label: String,
    pub value: String,
}

impl FieldOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    /// Build an option whose value is the normalized slug of its label.
    pub fn from_label(label: impl Into<String>) -> Self {
        let label = label.into();
        let value = slugify(&label);
        Self { label, value }
    }

    /// Blank options are declined by the mutation engine rather than added.
    pub fn is_blank(&self) -> bool {
        self.label.trim().is_empty() || self.value.trim().is_empty()
    }
}

/// The four sub-option groups of a composite field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubFieldKey {
    Units,
    Types,
    Stages,
    Uses,
}

impl SubFieldKey {
    pub fn all_variants() -> &'static [SubFieldKey] {
        &[
            SubFieldKey::Units,
            SubFieldKey::Types,
            SubFieldKey::Stages,
            SubFieldKey::Uses,
        ]
    }

    pub fn key(&self) -> &'static str {
        match self {
            SubFieldKey::Units => "units",
            SubFieldKey::Types => "types",
            SubFieldKey::Stages => "stages",
            SubFieldKey::Uses => "uses",
        }
    }
}

impl fmt::Display for SubFieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for SubFieldKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SubFieldKey::all_variants()
            .iter()
            .find(|k| k.key().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| format!("unknown sub-option group '{s}' (units|types|stages|uses)"))
    }
}

/// Grouped option sets for composite ("natural gas input") fields.
///
/// Once initialized a composite field carries all four groups; emptying a
/// group does not trigger re-initialization.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SubFieldOptions {
    #[serde(default)]
    pub units: Vec<FieldOption>,
    #[serde(default)]
    pub types: Vec<FieldOption>,
    #[serde(default)]
    pub stages: Vec<FieldOption>,
    #[serde(default)]
    pub uses: Vec<FieldOption>,
}

impl SubFieldOptions {
    pub fn group(&self, key: SubFieldKey) -> &Vec<FieldOption> {
        match key {
            SubFieldKey::Units => &self.units,
            SubFieldKey::Types => &self.types,
            SubFieldKey::Stages => &self.stages,
            SubFieldKey::Uses => &self.uses,
        }
    }

    pub fn group_mut(&mut self, key: SubFieldKey) -> &mut Vec<FieldOption> {
        match key {
            SubFieldKey::Units => &mut self.units,
            SubFieldKey::Types => &mut self.types,
            SubFieldKey::Stages => &mut self.stages,
            SubFieldKey::Uses => &mut self.uses,
        }
    }
}

/// Declared constraints, stored but not enforced at submission time.
///
/// Which sub-keys are meaningful depends on the field type: length bounds
/// for text-like fields, numeric bounds for numbers, item bounds for
/// array-like fields.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldValidations {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_items: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_items: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

impl FieldValidations {
    pub fn is_empty(&self) -> bool {
        *self == FieldValidations::default()
    }
}

/// One field declaration within a form or custom field template.
///
/// Identity is engine-assigned and never reused. Absent optional
/// attributes are omitted from the persisted representation rather than
/// serialized as null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    pub id: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: String,
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<FieldOption>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_field_options: Option<SubFieldOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validations: Option<FieldValidations>,
}

impl FormField {
    /// Build a field from a creation spec, filling type-appropriate
    /// defaults from the catalog.
    pub fn from_spec(id: impl Into<String>, spec: FieldSpec) -> Self {
        let field_type = spec.field_type;
        FormField {
            id: id.into(),
            field_type,
            label: spec.label.unwrap_or_else(|| field_type.default_label()),
            required: spec.required,
            placeholder: spec.placeholder,
            description: spec.description,
            default_value: spec.default_value,
            options: field_type.has_options().then(Vec::new),
            sub_field_options: field_type
                .has_sub_field_options()
                .then(FieldType::default_sub_field_options),
            validations: spec.validations,
        }
    }
}

/// Input for creating a field: type plus optional overrides. Anything not
/// supplied falls back to the catalog defaults for the type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validations: Option<FieldValidations>,
}

impl FieldSpec {
    pub fn new(field_type: FieldType) -> Self {
        FieldSpec {
            field_type,
            label: None,
            required: false,
            placeholder: None,
            description: None,
            default_value: None,
            validations: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }
}

/// Shallow attribute merge for field updates. Supplied attributes replace
/// the stored ones; omitted attributes are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldPatch {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub field_type: Option<FieldType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<FieldOption>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_field_options: Option<SubFieldOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validations: Option<FieldValidations>,
}
