//! Field and option command handlers
//!
//! Every subcommand targets a form by default; `--template` switches the
//! same operation to the template collection kind.

use anyhow::Result;
use clap::Subcommand;
use colored::*;

use crate::engine::SchemaEngine;
use crate::schema::{FieldOption, FieldPatch, FieldSpec, FieldType, SubFieldKey};
use crate::store::SchemaStore;

use super::{print_form, print_template};

#[derive(Debug, Subcommand)]
pub enum FieldCommands {
    /// List the supported field types and their structural extras
    Types,
    /// Append a field to a form (or template)
    Add {
        /// Owning form (or template) id
        collection_id: String,
        #[arg(long = "type")]
        field_type: FieldType,
        /// Field label; defaults to the catalog label for the type
        #[arg(long)]
        label: Option<String>,
        #[arg(long)]
        required: bool,
        #[arg(long)]
        placeholder: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Target a custom field template instead of a form
        #[arg(long)]
        template: bool,
    },
    /// Update a field (shallow merge of the supplied attributes)
    Update {
        collection_id: String,
        field_id: String,
        #[arg(long = "type")]
        field_type: Option<FieldType>,
        #[arg(long)]
        label: Option<String>,
        #[arg(long)]
        required: Option<bool>,
        #[arg(long)]
        placeholder: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        template: bool,
    },
    /// Remove a field (removing an unknown id is a no-op)
    Remove {
        collection_id: String,
        field_id: String,
        #[arg(long)]
        template: bool,
    },
    /// Set the field order to exactly the given id list (omitted fields
    /// are dropped)
    Reorder {
        collection_id: String,
        #[arg(required = true)]
        field_ids: Vec<String>,
        #[arg(long)]
        template: bool,
    },
    /// Add an option to a choice-like field
    AddOption {
        field_id: String,
        #[arg(long)]
        label: String,
        /// Option value; defaults to the slug of the label
        #[arg(long)]
        value: Option<String>,
        #[arg(long)]
        template: bool,
    },
    /// Remove an option by position (0-based)
    RemoveOption {
        field_id: String,
        index: usize,
        #[arg(long)]
        template: bool,
    },
    /// Add an option to one sub-option group of a composite field
    AddSubOption {
        field_id: String,
        /// Group: units, types, stages or uses
        group: SubFieldKey,
        #[arg(long)]
        label: String,
        #[arg(long)]
        value: Option<String>,
        #[arg(long)]
        template: bool,
    },
    /// Remove a sub-option by position within its group (0-based)
    RemoveSubOption {
        field_id: String,
        group: SubFieldKey,
        index: usize,
        #[arg(long)]
        template: bool,
    },
}

fn build_option(label: String, value: Option<String>) -> FieldOption {
    match value {
        Some(value) => FieldOption::new(label, value),
        None => FieldOption::from_label(label),
    }
}

pub async fn handle<S: SchemaStore>(
    engine: &SchemaEngine<S>,
    command: FieldCommands,
) -> Result<()> {
    match command {
        FieldCommands::Types => {
            for field_type in FieldType::all_variants() {
                let mut extras = Vec::new();
                if field_type.has_options() {
                    extras.push("choice options");
                }
                if field_type.has_sub_field_options() {
                    extras.push("sub-option groups");
                }
                if field_type.has_length_bounds() {
                    extras.push("length bounds");
                }
                if field_type.has_numeric_bounds() {
                    extras.push("numeric bounds");
                }
                if field_type.is_array() {
                    extras.push("item bounds");
                }
                let extras = if extras.is_empty() {
                    String::new()
                } else {
                    format!(" - {}", extras.join(", ")).dimmed().to_string()
                };
                println!(
                    "{:<16} {}{}",
                    field_type.tag().cyan(),
                    field_type.label(),
                    extras
                );
            }
        }
        FieldCommands::Add {
            collection_id,
            field_type,
            label,
            required,
            placeholder,
            description,
            template,
        } => {
            let spec = FieldSpec {
                field_type,
                label,
                required,
                placeholder,
                description,
                default_value: None,
                validations: None,
            };
            if template {
                let result = engine.add_template_field(&collection_id, spec).await?;
                print_template(&result);
            } else {
                let result = engine.add_field(&collection_id, spec).await?;
                print_form(&result);
            }
        }
        FieldCommands::Update {
            collection_id,
            field_id,
            field_type,
            label,
            required,
            placeholder,
            description,
            template,
        } => {
            let patch = FieldPatch {
                field_type,
                label,
                required,
                placeholder,
                description,
                ..Default::default()
            };
            let result = if template {
                engine
                    .update_template_field(&collection_id, &field_id, patch)
                    .await
                    .map(|t| {
                        print_template(&t);
                    })
            } else {
                engine
                    .update_field(&collection_id, &field_id, patch)
                    .await
                    .map(|f| {
                        print_form(&f);
                    })
            };
            match result {
                Err(err) if err.is_not_found() => {
                    anyhow::bail!("{err}: check the collection and field ids")
                }
                other => other?,
            }
        }
        FieldCommands::Remove {
            collection_id,
            field_id,
            template,
        } => {
            if template {
                let result = engine
                    .delete_template_field(&collection_id, &field_id)
                    .await?;
                print_template(&result);
            } else {
                let result = engine.delete_field(&collection_id, &field_id).await?;
                print_form(&result);
            }
        }
        FieldCommands::Reorder {
            collection_id,
            field_ids,
            template,
        } => {
            if template {
                let result = engine
                    .reorder_template_fields(&collection_id, &field_ids)
                    .await?;
                print_template(&result);
            } else {
                let result = engine.reorder_fields(&collection_id, &field_ids).await?;
                print_form(&result);
            }
        }
        FieldCommands::AddOption {
            field_id,
            label,
            value,
            template,
        } => {
            let option = build_option(label, value);
            if template {
                let result = engine.add_template_option(&field_id, option).await?;
                print_template(&result);
            } else {
                let result = engine.add_option(&field_id, option).await?;
                if let Some(field) = result.find_field(&field_id)
                    && let Some(options) = &field.options
                {
                    for option in options {
                        println!("  {} = {}", option.label, option.value.dimmed());
                    }
                }
            }
        }
        FieldCommands::RemoveOption {
            field_id,
            index,
            template,
        } => {
            if template {
                let result = engine.remove_template_option(&field_id, index).await?;
                print_template(&result);
            } else {
                let result = engine.remove_option(&field_id, index).await?;
                print_form(&result);
            }
        }
        FieldCommands::AddSubOption {
            field_id,
            group,
            label,
            value,
            template,
        } => {
            let option = build_option(label, value);
            if template {
                let result = engine
                    .add_template_sub_field_option(&field_id, group, option)
                    .await?;
                print_template(&result);
            } else {
                let result = engine
                    .add_sub_field_option(&field_id, group, option)
                    .await?;
                if let Some(field) = result.find_field(&field_id)
                    && let Some(groups) = &field.sub_field_options
                {
                    println!("{}:", group.key().cyan());
                    for option in groups.group(group) {
                        println!("  {} = {}", option.label, option.value.dimmed());
                    }
                }
            }
        }
        FieldCommands::RemoveSubOption {
            field_id,
            group,
            index,
            template,
        } => {
            if template {
                let result = engine
                    .remove_template_sub_field_option(&field_id, group, index)
                    .await?;
                print_template(&result);
            } else {
                let result = engine
                    .remove_sub_field_option(&field_id, group, index)
                    .await?;
                print_form(&result);
            }
        }
    }
    Ok(())
}
