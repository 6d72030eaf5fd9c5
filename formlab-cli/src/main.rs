mod cli;
mod config;
mod engine;
mod id;
mod schema;
mod store;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};
use config::Config;
use engine::SchemaEngine;
use store::SqliteStore;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let database_path = match &cli.db {
        Some(path) => path.clone(),
        None => Config::load()?.database_path,
    };
    log::debug!("using schema database at {}", database_path.display());

    let store = SqliteStore::connect(&database_path).await?;
    let engine = SchemaEngine::new(store);

    match cli.command {
        Commands::Form(command) => cli::commands::forms::handle(&engine, command).await,
        Commands::Field(command) => cli::commands::fields::handle(&engine, command).await,
        Commands::Template(command) => cli::commands::templates::handle(&engine, command).await,
        Commands::Submission(command) => cli::commands::submissions::handle(&engine, command).await,
    }
}
