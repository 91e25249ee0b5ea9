//! # Application Config
//!
//! Settings live in a single YAML file `config.yaml` at the root of the data
//! directory. A missing file is created with defaults; missing keys fall back
//! to their defaults.
//!
//! ```yaml
//! storage_key: donations
//! seed_sample_data: true
//! log_level: info
//! ```

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{StoreOptions, DEFAULT_STORAGE_KEY};

pub const CONFIG_FILE_NAME: &str = "config.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Key the donation collection is stored under
    pub storage_key: String,
    /// Populate a brand new store with demo donations
    pub seed_sample_data: bool,
    /// Log filter used when RUST_LOG is not set
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            seed_sample_data: true,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn store_options(&self) -> StoreOptions {
        StoreOptions {
            storage_key: self.storage_key.clone(),
            seed_sample_data: self.seed_sample_data,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigRepository {
    base_directory: PathBuf,
}

impl ConfigRepository {
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Self {
        Self {
            base_directory: base_directory.as_ref().to_path_buf(),
        }
    }

    pub fn config_path(&self) -> PathBuf {
        self.base_directory.join(CONFIG_FILE_NAME)
    }

    /// Load config from file, creating the default if it doesn't exist
    pub fn load_or_create(&self) -> Result<AppConfig> {
        let config_path = self.config_path();

        if config_path.exists() {
            let yaml_content = fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read {:?}", config_path))?;
            let config: AppConfig = serde_yaml::from_str(&yaml_content)
                .with_context(|| format!("Failed to parse {:?}", config_path))?;
            debug!("Loaded config from {:?}", config_path);
            Ok(config)
        } else {
            let config = AppConfig::default();
            self.save(&config)?;
            info!("Created default config at {:?}", config_path);
            Ok(config)
        }
    }

    pub fn save(&self, config: &AppConfig) -> Result<()> {
        let config_path = self.config_path();

        if !self.base_directory.exists() {
            fs::create_dir_all(&self.base_directory)
                .with_context(|| format!("Failed to create {:?}", self.base_directory))?;
        }

        let yaml_content = serde_yaml::to_string(config)?;

        // Write to a temp file, then rename over the real one
        let temp_path = config_path.with_extension("yaml.tmp");
        fs::write(&temp_path, yaml_content)?;
        fs::rename(&temp_path, &config_path)?;

        debug!("Saved config to {:?}", config_path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_utils::TestEnvironment;

    #[test]
    fn test_missing_config_is_created_with_defaults() {
        let env = TestEnvironment::new().unwrap();
        let repo = ConfigRepository::new(env.base_directory());

        let config = repo.load_or_create().unwrap();

        assert_eq!(config, AppConfig::default());
        assert!(repo.config_path().exists());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let env = TestEnvironment::new().unwrap();
        let repo = ConfigRepository::new(env.base_directory());
        fs::write(repo.config_path(), "seed_sample_data: false\n").unwrap();

        let config = repo.load_or_create().unwrap();

        assert!(!config.seed_sample_data);
        assert_eq!(config.storage_key, "donations");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_save_then_load() {
        let env = TestEnvironment::new().unwrap();
        let repo = ConfigRepository::new(env.base_directory());
        let config = AppConfig {
            storage_key: "clothing".to_string(),
            seed_sample_data: false,
            log_level: "debug".to_string(),
        };

        repo.save(&config).unwrap();

        assert_eq!(repo.load_or_create().unwrap(), config);
        assert_eq!(
            config.store_options(),
            StoreOptions {
                storage_key: "clothing".to_string(),
                seed_sample_data: false,
            }
        );
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let env = TestEnvironment::new().unwrap();
        let repo = ConfigRepository::new(env.base_directory());
        fs::write(repo.config_path(), "seed_sample_data: [not, a, bool]\n").unwrap();

        assert!(repo.load_or_create().is_err());
    }
}
