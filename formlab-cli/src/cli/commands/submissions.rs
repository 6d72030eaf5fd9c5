//! Submission command handlers

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use serde_json::Value;

use crate::engine::SchemaEngine;
use crate::store::SchemaStore;

#[derive(Debug, Subcommand)]
pub enum SubmissionCommands {
    /// Record a submission against a form
    Submit {
        /// Form id
        form_id: String,
        /// Submission payload as a JSON object, e.g. '{"name": "Ada"}'
        #[arg(long)]
        data: String,
    },
    /// List the submissions recorded against a form
    List {
        /// Form id
        form_id: String,
    },
}

pub async fn handle<S: SchemaStore>(
    engine: &SchemaEngine<S>,
    command: SubmissionCommands,
) -> Result<()> {
    match command {
        SubmissionCommands::Submit { form_id, data } => {
            let value: Value =
                serde_json::from_str(&data).context("Failed to parse --data as JSON")?;
            let Value::Object(data) = value else {
                anyhow::bail!("--data must be a JSON object");
            };

            if engine.get_form(&form_id).await?.is_none() {
                // Submissions keep a non-owning reference; recording
                // against an unknown form is allowed but worth flagging.
                println!(
                    "{}",
                    format!("Warning: no form with id '{form_id}'").yellow()
                );
            }

            let submission = engine.submit_form(&form_id, data).await?;
            println!(
                "Recorded submission {} at {}",
                submission.id.bold(),
                submission.submitted_at.to_rfc3339().dimmed()
            );
        }
        SubmissionCommands::List { form_id } => {
            let submissions = engine.list_submissions(&form_id).await?;
            if submissions.is_empty() {
                println!("No submissions for form {form_id}");
                return Ok(());
            }
            for submission in &submissions {
                println!(
                    "{} {}",
                    submission.id.bold(),
                    submission.submitted_at.to_rfc3339().dimmed()
                );
                println!("  {}", serde_json::to_string(&submission.data)?);
            }
        }
    }
    Ok(())
}
