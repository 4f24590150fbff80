// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Configuration management for the capability engine and its CLI

pub mod fitness_config;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::constants::env_config;

pub use fitness_config::FitnessConfig;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub fitness: FitnessConfig,
    #[serde(default)]
    pub media_cache: MediaCacheConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MediaCacheConfig {
    /// SQLite URL of the approved media cache
    pub database_url: String,
}

impl Default for MediaCacheConfig {
    fn default() -> Self {
        Self {
            database_url: env_config::media_cache_database_url(),
        }
    }
}

fn default_config_path() -> String {
    dirs::config_dir()
        .map(|p| p.join("strength-capabilities/config.toml"))
        .unwrap_or_else(|| "config.toml".into())
        .to_string_lossy()
        .to_string()
}

impl Config {
    pub fn load(path: Option<String>) -> Result<Self> {
        let config_path = path.unwrap_or_else(default_config_path);

        if Path::new(&config_path).exists() {
            debug!(path = %config_path, "Loading config file");
            let content = fs::read_to_string(&config_path).context("Failed to read config file")?;
            let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
            config
                .fitness
                .validate()
                .context("Invalid fitness thresholds in config file")?;
            Ok(config)
        } else {
            dotenv::dotenv().ok();

            let fitness = FitnessConfig::load(env_config::fitness_config_path())?;

            Ok(Config {
                fitness,
                media_cache: MediaCacheConfig {
                    database_url: env_config::media_cache_database_url(),
                },
            })
        }
    }

    pub fn save(&self, path: Option<String>) -> Result<()> {
        let config_path = path.unwrap_or_else(default_config_path);

        let parent = Path::new(&config_path)
            .parent()
            .context("Invalid config path")?;
        fs::create_dir_all(parent)?;

        let content = toml::to_string_pretty(self)?;
        fs::write(&config_path, content)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_temp_config_file(content: &str) -> (TempDir, String) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, content).expect("Failed to write temp config");
        (temp_dir, config_path.to_string_lossy().to_string())
    }

    #[test]
    fn test_config_load_from_file() {
        let config_content = r#"
[media_cache]
database_url = "sqlite::memory:"

[fitness.intelligence.snapshot]
recent_log_window = 4
"#;

        let (_temp_dir, config_path) = create_temp_config_file(config_content);
        let config = Config::load(Some(config_path)).expect("Failed to load config");

        assert_eq!(config.media_cache.database_url, "sqlite::memory:");
        assert_eq!(config.fitness.intelligence.snapshot.recent_log_window, 4);
        assert_eq!(config.fitness.canonical_exercise_name("OHP"), "overhead press");
    }

    #[test]
    fn test_config_load_invalid_toml() {
        let (_temp_dir, config_path) = create_temp_config_file("this is not valid toml [[[");

        let result = Config::load(Some(config_path));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_config_load_rejects_invalid_thresholds() {
        let config_content = r#"
[fitness.intelligence.volume]
under_percent = 140.0
over_percent = 130.0
"#;
        let (_temp_dir, config_path) = create_temp_config_file(config_content);
        assert!(Config::load(Some(config_path)).is_err());
    }

    #[test]
    fn test_config_save_creates_directory() {
        let config = Config {
            fitness: FitnessConfig::default(),
            media_cache: MediaCacheConfig {
                database_url: "sqlite:./cache.db".to_string(),
            },
        };
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let nested_path = temp_dir.path().join("nested").join("config.toml");
        let nested_path_str = nested_path.to_string_lossy().to_string();

        config
            .save(Some(nested_path_str.clone()))
            .expect("Failed to save config with nested path");
        assert!(nested_path.exists());

        let loaded = Config::load(Some(nested_path_str)).expect("Failed to load saved config");
        assert_eq!(loaded.media_cache.database_url, "sqlite:./cache.db");
        assert_eq!(
            loaded.fitness.intelligence.volume.optimal_sets.intermediate,
            config.fitness.intelligence.volume.optimal_sets.intermediate
        );
    }
}
