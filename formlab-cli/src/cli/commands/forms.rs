//! Form command handlers

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use dialoguer::Confirm;

use crate::engine::SchemaEngine;
use crate::schema::{FormDraft, FormPatch};
use crate::store::SchemaStore;

use super::print_form;

#[derive(Debug, Subcommand)]
pub enum FormCommands {
    /// List all forms
    List,
    /// Show one form with its fields
    Show {
        /// Form id
        id: String,
    },
    /// Create a new, empty form
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
        /// Message shown to respondents after submitting
        #[arg(long)]
        submit_message: Option<String>,
        /// Create in the published state
        #[arg(long)]
        published: bool,
    },
    /// Update form metadata (only the supplied attributes change)
    Update {
        /// Form id
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        published: Option<bool>,
        #[arg(long)]
        submit_message: Option<String>,
    },
    /// Delete a form (its submissions are kept)
    Delete {
        /// Form id
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

pub async fn handle<S: SchemaStore>(engine: &SchemaEngine<S>, command: FormCommands) -> Result<()> {
    match command {
        FormCommands::List => {
            let forms = engine.list_forms().await?;
            if forms.is_empty() {
                println!("No forms yet. Create one with 'formlab-cli form create --name ...'");
                return Ok(());
            }
            for form in &forms {
                let status = if form.is_published {
                    "published".green()
                } else {
                    "draft".yellow()
                };
                println!(
                    "{} {} [{}] - {} fields",
                    form.name.bold(),
                    format!("({})", form.id).dimmed(),
                    status,
                    form.fields.len()
                );
            }
        }
        FormCommands::Show { id } => {
            match engine.get_form(&id).await? {
                Some(form) => print_form(&form),
                None => anyhow::bail!("No form with id '{id}'"),
            }
        }
        FormCommands::Create {
            name,
            description,
            submit_message,
            published,
        } => {
            let form = engine
                .create_form(FormDraft {
                    name,
                    description,
                    is_published: published,
                    submit_message,
                })
                .await?;
            println!("Created form {}", format!("({})", form.id).dimmed());
            print_form(&form);
        }
        FormCommands::Update {
            id,
            name,
            description,
            published,
            submit_message,
        } => {
            let form = engine
                .update_form(
                    &id,
                    FormPatch {
                        name,
                        description,
                        is_published: published,
                        submit_message,
                    },
                )
                .await?;
            print_form(&form);
        }
        FormCommands::Delete { id, yes } => {
            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt(format!("Delete form '{id}'? Existing submissions are kept."))
                    .default(false)
                    .interact()?;
                if !confirmed {
                    println!("Aborted");
                    return Ok(());
                }
            }
            if engine.delete_form(&id).await? {
                println!("Deleted form {id}");
            } else {
                println!("{}", format!("No form with id '{id}'").yellow());
            }
        }
    }
    Ok(())
}
