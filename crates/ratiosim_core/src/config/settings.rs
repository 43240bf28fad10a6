//! Global configuration structure with TOML-based sections.
//!
//! The `[client]` and `[faker]` tables hold application defaults consumed
//! when new instances are created. The `instances` array plus
//! `active_instance_id` form the persisted session document; they are
//! rewritten wholesale on every session save.

use serde::{Deserialize, Serialize};

use crate::models::ClientKind;
use crate::session::mapper::PersistedInstance;
use crate::session::params::defaults;

/// Root configuration document.
///
/// Field order matters for TOML serialization: plain values must precede
/// the tables.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Zero-based index of the active instance within `instances`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_instance_id: Option<usize>,

    /// Client impersonation defaults.
    #[serde(default)]
    pub client: ClientSettings,

    /// Faker behavior defaults.
    #[serde(default)]
    pub faker: FakerSettings,

    /// Persisted session: one entry per instance, in display order.
    #[serde(default)]
    pub instances: Vec<PersistedInstance>,
}

/// Defaults for the impersonated client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientSettings {
    /// Client type new instances impersonate.
    #[serde(default)]
    pub default_type: ClientKind,

    /// Pinned client version for new instances.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_version: Option<String>,

    /// Listen port new instances report.
    #[serde(default = "default_port")]
    pub default_port: u16,
}

fn default_port() -> u16 {
    defaults::PORT
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            default_type: ClientKind::default(),
            default_version: None,
            default_port: default_port(),
        }
    }
}

/// Defaults for the faking behavior of new instances.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FakerSettings {
    /// Upload rate for new instances.
    #[serde(default = "default_upload_rate")]
    pub default_upload_rate: f64,

    /// Download rate for new instances.
    #[serde(default = "default_download_rate")]
    pub default_download_rate: f64,

    /// Seconds between announce updates for new instances.
    #[serde(default = "default_update_interval")]
    pub update_interval: u32,
}

fn default_upload_rate() -> f64 {
    defaults::UPLOAD_RATE
}

fn default_download_rate() -> f64 {
    defaults::DOWNLOAD_RATE
}

fn default_update_interval() -> u32 {
    defaults::UPDATE_INTERVAL_SECONDS
}

impl Default for FakerSettings {
    fn default() -> Self {
        Self {
            default_upload_rate: default_upload_rate(),
            default_download_rate: default_download_rate(),
            update_interval: default_update_interval(),
        }
    }
}
