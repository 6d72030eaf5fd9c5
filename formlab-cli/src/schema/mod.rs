//! Form schema entity models
//!
//! The field type catalog, the field entity model (including the composite
//! natural-gas-input type with its grouped sub-option sets), and the
//! form/template/submission collection models.

pub mod field;
pub mod form;
pub mod types;

pub use field::{
    FieldOption, FieldPatch, FieldSpec, FieldValidations, FormField, SubFieldKey, SubFieldOptions,
};
pub use form::{
    CustomFieldTemplate, Form, FormDraft, FormPatch, FormSubmission, TemplatePatch,
};
pub use types::FieldType;
