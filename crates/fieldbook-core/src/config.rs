//! Host configuration.
//!
//! Embedding hosts point the core at a database location through a small
//! TOML file; everything else the core needs is carried in the store
//! itself.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{FieldbookError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: DatabaseSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseSection {
    /// Path to the SQLite store file
    pub path: String,
}

impl Config {
    pub fn database_path(&self) -> PathBuf {
        PathBuf::from(&self.database.path)
    }
}

pub fn default_config_path() -> Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn default_database_path() -> Result<PathBuf> {
    Ok(xdg_data_dir()?.join("fieldbook.db"))
}

pub fn read_config(path: &Path) -> Result<Config> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| FieldbookError::Config(format!("Failed to read {}: {}", path.display(), e)))?;
    toml::from_str(&contents)
        .map_err(|e| FieldbookError::Config(format!("Failed to parse {}: {}", path.display(), e)))
}

pub fn xdg_config_dir() -> Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("fieldbook"));
        }
    }
    Ok(home_dir()?.join(".config").join("fieldbook"))
}

pub fn xdg_data_dir() -> Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_DATA_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("fieldbook"));
        }
    }
    Ok(home_dir()?.join(".local").join("share").join("fieldbook"))
}

fn home_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").map_err(|_| {
        FieldbookError::Config("HOME is not set; cannot resolve default paths".to_string())
    })?;
    Ok(PathBuf::from(home))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[database]\npath = \"/tmp/fieldbook.db\"").unwrap();

        let config = read_config(&path).unwrap();
        assert_eq!(config.database_path(), PathBuf::from("/tmp/fieldbook.db"));
    }

    #[test]
    fn test_missing_config_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_config(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(FieldbookError::Config(_))));
    }

    #[test]
    fn test_malformed_config_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "database = 5").unwrap();
        assert!(matches!(
            read_config(&path),
            Err(FieldbookError::Config(_))
        ));
    }
}
