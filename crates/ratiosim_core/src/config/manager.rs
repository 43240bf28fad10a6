//! Config manager for loading and saving the global configuration.
//!
//! Key features:
//! - Atomic writes (write to temp file, then rename)
//! - Defaults for missing fields on load
//! - The whole document is rewritten on each save; the session portion is
//!   never partially patched

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::settings::AppConfig;

/// Errors that can occur during config operations.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Config file not found: {0}")]
    NotFound(PathBuf),
}

/// Result type for config operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Manages the on-disk global configuration.
pub struct ConfigManager {
    /// Path to the config file.
    config_path: PathBuf,
    /// Current configuration loaded in memory.
    config: AppConfig,
}

impl ConfigManager {
    /// Create a new config manager with the given config file path.
    ///
    /// Does not load the config - call `load()` or `load_or_create()` after.
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
            config: AppConfig::default(),
        }
    }

    /// Get the config file path.
    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Get a reference to the current configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get a mutable reference to the current configuration.
    ///
    /// Note: changes made here are only in memory until `save()` is called.
    pub fn config_mut(&mut self) -> &mut AppConfig {
        &mut self.config
    }

    /// Load config from file.
    ///
    /// Returns an error if the file doesn't exist.
    pub fn load(&mut self) -> ConfigResult<()> {
        if !self.config_path.exists() {
            return Err(ConfigError::NotFound(self.config_path.clone()));
        }

        let content = fs::read_to_string(&self.config_path)?;
        self.config = toml::from_str(&content)?;
        tracing::debug!(
            instances = self.config.instances.len(),
            "loaded configuration from {}",
            self.config_path.display()
        );
        Ok(())
    }

    /// Load config from file, creating it with defaults if it doesn't exist.
    pub fn load_or_create(&mut self) -> ConfigResult<()> {
        if self.config_path.exists() {
            self.load()
        } else {
            self.config = AppConfig::default();
            self.save()
        }
    }

    /// Save the entire config atomically.
    ///
    /// Writes to a temp file first, then renames to ensure an atomic write.
    pub fn save(&self) -> ConfigResult<()> {
        let mut content = String::from("# ratiosim configuration\n# This file is auto-generated.\n\n");
        content.push_str(&toml::to_string_pretty(&self.config)?);
        self.atomic_write(&content)?;
        tracing::debug!(
            instances = self.config.instances.len(),
            "saved configuration to {}",
            self.config_path.display()
        );
        Ok(())
    }

    /// Write content to the config file atomically.
    fn atomic_write(&self, content: &str) -> io::Result<()> {
        // Create parent directory if needed
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Write to temp file in same directory (for atomic rename)
        let temp_path = self.config_path.with_extension("toml.tmp");

        {
            let mut file = fs::File::create(&temp_path)?;
            file.write_all(content.as_bytes())?;
            file.sync_all()?;
        }

        fs::rename(&temp_path, &self.config_path)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ClientKind;
    use tempfile::tempdir;

    #[test]
    fn load_or_create_creates_default() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(".config").join("ratiosim.toml");

        let mut manager = ConfigManager::new(&config_path);
        manager.load_or_create().unwrap();

        assert!(config_path.exists());
        let content = fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("[client]"));
        assert!(content.contains("[faker]"));
    }

    #[test]
    fn load_or_create_preserves_existing() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("ratiosim.toml");

        fs::write(&config_path, "[client]\ndefault_type = \"deluge\"\n").unwrap();

        let mut manager = ConfigManager::new(&config_path);
        manager.load_or_create().unwrap();

        assert_eq!(manager.config().client.default_type, ClientKind::Deluge);
        // Unspecified fields filled from defaults
        assert_eq!(manager.config().faker.update_interval, 5);
    }

    #[test]
    fn load_of_missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let mut manager = ConfigManager::new(dir.path().join("missing.toml"));
        assert!(matches!(manager.load(), Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn save_round_trips_the_session_document() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("ratiosim.toml");

        let mut manager = ConfigManager::new(&config_path);
        manager.load_or_create().unwrap();
        manager.config_mut().active_instance_id = Some(0);
        manager
            .config_mut()
            .instances
            .push(crate::session::mapper::PersistedInstance::default());
        manager.save().unwrap();

        let mut reloaded = ConfigManager::new(&config_path);
        reloaded.load().unwrap();
        assert_eq!(reloaded.config().active_instance_id, Some(0));
        assert_eq!(reloaded.config().instances.len(), 1);
    }

    #[test]
    fn atomic_write_leaves_no_temp_on_success() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("ratiosim.toml");

        let mut manager = ConfigManager::new(&config_path);
        manager.load_or_create().unwrap();

        let temp_path = config_path.with_extension("toml.tmp");
        assert!(!temp_path.exists());
    }
}
