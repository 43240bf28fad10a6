//! ratiosim core - session management for simulated torrent client instances.
//!
//! This crate contains all business logic with zero UI dependencies.
//! It can be used by a GUI application or a CLI tool.
//!
//! The main pieces:
//! - [`session::SessionManager`] - the lifecycle controller for instances
//! - [`session::SessionStore`] - the in-memory source of truth
//! - [`backend::Backend`] - the trait the manager drives sessions through
//! - [`config::ConfigManager`] - TOML configuration with atomic writes

pub mod backend;
pub mod config;
pub mod logging;
pub mod models;
pub mod session;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
