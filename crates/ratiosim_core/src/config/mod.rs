//! Configuration management.
//!
//! This module provides:
//! - The TOML-backed global configuration (`AppConfig`), which embeds the
//!   persisted session document alongside application defaults
//! - Atomic file writes (write to temp, then rename)
//! - Validation on load with automatic defaults for missing fields
//!
//! # Example
//!
//! ```no_run
//! use ratiosim_core::config::ConfigManager;
//!
//! // Create manager and load (or create default) config
//! let mut config = ConfigManager::new(".config/ratiosim.toml");
//! config.load_or_create().unwrap();
//!
//! println!("Default port: {}", config.config().client.default_port);
//! ```

mod manager;
mod settings;

pub use manager::{ConfigError, ConfigManager, ConfigResult};
pub use settings::{AppConfig, ClientSettings, FakerSettings};
