//! Field type catalog
//!
//! Static enumeration of the supported field type tags and the structural
//! extras each tag activates (choice options, composite sub-option groups,
//! numeric/length/item-count constraints). Pure lookup, no mutable state;
//! unknown tags are rejected at the parsing boundary since [`FieldType`]
//! is a closed enum.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::field::{FieldOption, SubFieldOptions};

/// Field types a form field can be declared with.
///
/// Serialized with the original camelCase wire tags (`multiSelect`,
/// `naturalGasInput`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldType {
    Text,
    Number,
    Select,
    MultiSelect,
    Checkbox,
    TextArray,
    NaturalGasInput,
    Email,
    Password,
    Date,
    Textarea,
}

impl FieldType {
    /// All catalog entries, in editor display order.
    pub fn all_variants() -> &'static [FieldType] {
        &[
            FieldType::Text,
            FieldType::Number,
            FieldType::Textarea,
            FieldType::Select,
            FieldType::MultiSelect,
            FieldType::Checkbox,
            FieldType::TextArray,
            FieldType::NaturalGasInput,
            FieldType::Email,
            FieldType::Password,
            FieldType::Date,
        ]
    }

    /// The wire tag for this type (matches the serde representation).
    pub fn tag(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Number => "number",
            FieldType::Select => "select",
            FieldType::MultiSelect => "multiSelect",
            FieldType::Checkbox => "checkbox",
            FieldType::TextArray => "textArray",
            FieldType::NaturalGasInput => "naturalGasInput",
            FieldType::Email => "email",
            FieldType::Password => "password",
            FieldType::Date => "date",
            FieldType::Textarea => "textarea",
        }
    }

    /// Get display label for UI
    pub fn label(&self) -> &'static str {
        match self {
            FieldType::Text => "Text",
            FieldType::Number => "Number",
            FieldType::Select => "Select",
            FieldType::MultiSelect => "Multi Select",
            FieldType::Checkbox => "Checkbox",
            FieldType::TextArray => "Text Array",
            FieldType::NaturalGasInput => "Natural Gas Input",
            FieldType::Email => "Email",
            FieldType::Password => "Password",
            FieldType::Date => "Date",
            FieldType::Textarea => "Text Area",
        }
    }

    /// Whether fields of this type carry a flat `options` list.
    pub fn has_options(&self) -> bool {
        matches!(self, FieldType::Select | FieldType::MultiSelect)
    }

    /// Whether fields of this type carry the grouped sub-option sets.
    pub fn has_sub_field_options(&self) -> bool {
        matches!(self, FieldType::NaturalGasInput)
    }

    /// Whether fields of this type hold a sequence of values.
    pub fn is_array(&self) -> bool {
        matches!(self, FieldType::TextArray)
    }

    /// Whether min/max length constraints are meaningful for this type.
    pub fn has_length_bounds(&self) -> bool {
        matches!(self, FieldType::Text | FieldType::Textarea)
    }

    /// Whether min/max value constraints are meaningful for this type.
    pub fn has_numeric_bounds(&self) -> bool {
        matches!(self, FieldType::Number)
    }

    /// Default label template for a newly created field of this type.
    pub fn default_label(&self) -> String {
        format!("New {} field", self.tag())
    }

    /// Default sub-option groups for composite fields.
    ///
    /// Applied exactly once, when a composite field is first observed
    /// without `sub_field_options`.
    pub fn default_sub_field_options() -> SubFieldOptions {
        SubFieldOptions {
            units: vec![
                FieldOption::new("kWh", "kwh"),
                FieldOption::new("MJ/kg product", "mj_kg_product"),
                FieldOption::new("m³", "m3"),
            ],
            types: vec![
                FieldOption::new("Conventional", "conventional"),
                FieldOption::new("Standard grid", "standard_grid"),
                FieldOption::new("PV", "pv"),
            ],
            stages: vec![
                FieldOption::new("Mixing", "mixing"),
                FieldOption::new("Processing", "processing"),
                FieldOption::new("Packaging", "packaging"),
            ],
            uses: vec![
                FieldOption::new("Cooling", "cooling"),
                FieldOption::new("Heat", "heat"),
                FieldOption::new("Power", "power"),
            ],
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for FieldType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldType::all_variants()
            .iter()
            .find(|t| t.tag().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| format!("unknown field type '{s}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_tags_round_trip() {
        for ty in FieldType::all_variants() {
            let json = serde_json::to_string(ty).unwrap();
            assert_eq!(json, format!("\"{}\"", ty.tag()));
            let back: FieldType = serde_json::from_str(&json).unwrap();
            assert_eq!(back, *ty);
        }
    }

    #[test]
    fn test_unknown_tag_is_rejected() {
        assert!(serde_json::from_str::<FieldType>("\"numberArray\"").is_err());
        assert!("geoPoint".parse::<FieldType>().is_err());
    }

    #[test]
    fn test_structural_extras() {
        assert!(FieldType::Select.has_options());
        assert!(FieldType::MultiSelect.has_options());
        assert!(!FieldType::Text.has_options());
        assert!(FieldType::NaturalGasInput.has_sub_field_options());
        assert!(!FieldType::Select.has_sub_field_options());
        assert!(FieldType::TextArray.is_array());
        assert!(FieldType::Textarea.has_length_bounds());
        assert!(!FieldType::Email.has_length_bounds());
        assert!(FieldType::Number.has_numeric_bounds());
    }

    #[test]
    fn test_default_label_uses_wire_tag() {
        assert_eq!(FieldType::Text.default_label(), "New text field");
        assert_eq!(
            FieldType::MultiSelect.default_label(),
            "New multiSelect field"
        );
    }

    #[test]
    fn test_default_sub_field_options_groups() {
        let defaults = FieldType::default_sub_field_options();
        assert_eq!(defaults.units.len(), 3);
        assert_eq!(defaults.types.len(), 3);
        assert_eq!(defaults.stages.len(), 3);
        assert_eq!(defaults.uses.len(), 3);
        assert_eq!(defaults.units[0].value, "kwh");
        assert_eq!(defaults.types[1].value, "standard_grid");
    }
}
