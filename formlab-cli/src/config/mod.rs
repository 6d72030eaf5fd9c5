//! CLI configuration
//!
//! Resolves where the schema database lives. Precedence: the `--db` flag
//! (handled by the caller), the `FORMLAB_DB` environment variable, the
//! `database_path` key in `~/.config/formlab/config.toml`, then the
//! platform data directory.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

const ENV_DB: &str = "FORMLAB_DB";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: PathBuf,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    database_path: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Result<Self> {
        if let Ok(path) = std::env::var(ENV_DB) {
            return Ok(Config {
                database_path: PathBuf::from(path),
            });
        }

        let file = read_config_file()?;
        let database_path = match file.database_path {
            Some(path) => path,
            None => default_database_path()?,
        };
        Ok(Config { database_path })
    }
}

fn read_config_file() -> Result<ConfigFile> {
    let Some(config_dir) = dirs::config_dir() else {
        return Ok(ConfigFile::default());
    };
    let path = config_dir.join("formlab").join("config.toml");
    if !path.exists() {
        return Ok(ConfigFile::default());
    }

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

fn default_database_path() -> Result<PathBuf> {
    let data_dir = dirs::data_dir().context("Could not determine the platform data directory")?;
    let dir = data_dir.join("formlab");
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create data directory: {}", dir.display()))?;
    Ok(dir.join("formlab.db"))
}
