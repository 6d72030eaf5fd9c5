//! Command-line interface
//!
//! Thin surface over the mutation engine: every subcommand maps to one
//! engine operation and re-renders from the entity the engine returns.

pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use commands::{fields, forms, submissions, templates};

#[derive(Parser)]
#[command(
    name = "formlab-cli",
    about = "Assemble and manage dynamic form schemas from the terminal",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the schema database (overrides config and FORMLAB_DB)
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage forms
    #[command(subcommand)]
    Form(forms::FormCommands),
    /// Manage fields and their options
    #[command(subcommand)]
    Field(fields::FieldCommands),
    /// Manage custom field templates
    #[command(subcommand)]
    Template(templates::TemplateCommands),
    /// Record and inspect submissions
    #[command(subcommand)]
    Submission(submissions::SubmissionCommands),
}
