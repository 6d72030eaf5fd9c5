//! Custom field template command handlers

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use dialoguer::Confirm;

use crate::engine::{SchemaEngine, TemplateDraft};
use crate::schema::{FieldSpec, FieldType, TemplatePatch};
use crate::store::SchemaStore;

use super::print_template;

#[derive(Debug, Subcommand)]
pub enum TemplateCommands {
    /// List all custom field templates
    List,
    /// Show one template with its fields
    Show {
        /// Template id
        id: String,
    },
    /// Create a template, optionally seeding fields by type
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
        /// Seed a field of this type (repeatable)
        #[arg(long = "field", value_name = "TYPE")]
        fields: Vec<FieldType>,
    },
    /// Update template metadata
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a template
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

pub async fn handle<S: SchemaStore>(
    engine: &SchemaEngine<S>,
    command: TemplateCommands,
) -> Result<()> {
    match command {
        TemplateCommands::List => {
            let templates = engine.list_templates().await?;
            if templates.is_empty() {
                println!("No custom field templates yet.");
                return Ok(());
            }
            for template in &templates {
                println!(
                    "{} {} - {} fields",
                    template.name.bold(),
                    format!("({})", template.id).dimmed(),
                    template.fields.len()
                );
            }
        }
        TemplateCommands::Show { id } => match engine.get_template(&id).await? {
            Some(template) => print_template(&template),
            None => anyhow::bail!("No template with id '{id}'"),
        },
        TemplateCommands::Create {
            name,
            description,
            fields,
        } => {
            let mut draft = TemplateDraft::new(name);
            draft.description = description;
            draft.fields = fields.into_iter().map(FieldSpec::new).collect();
            let template = engine.create_template(draft).await?;
            println!("Created template {}", format!("({})", template.id).dimmed());
            print_template(&template);
        }
        TemplateCommands::Update {
            id,
            name,
            description,
        } => {
            let template = engine
                .update_template(&id, TemplatePatch { name, description })
                .await?;
            print_template(&template);
        }
        TemplateCommands::Delete { id, yes } => {
            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt(format!("Delete template '{id}'?"))
                    .default(false)
                    .interact()?;
                if !confirmed {
                    println!("Aborted");
                    return Ok(());
                }
            }
            if engine.delete_template(&id).await? {
                println!("Deleted template {id}");
            } else {
                println!("{}", format!("No template with id '{id}'").yellow());
            }
        }
    }
    Ok(())
}
