//! Bidirectional mapping between instance records and the session document.
//!
//! `PersistedInstance` is the stable on-disk shape (snake_case TOML keys).
//! Fields map 1:1 to the record parameters, except for the initial transfer
//! amounts: the record holds megabytes, the document holds bytes. On the
//! write path the megabyte value is truncated to a whole number before the
//! conversion, so the round trip is exact for any integral megabyte value
//! and lossy below that.

use serde::{Deserialize, Serialize};

use crate::models::ClientKind;

use super::params::{defaults, InstanceDefaults};
use super::record::InstanceRecord;

/// Bytes per megabyte for the persisted conversion.
const BYTES_PER_MB: u64 = 1024 * 1024;

/// One instance as stored in the session document.
///
/// Field names are a stable contract; every field defaults so documents
/// written by older versions still parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedInstance {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub torrent_path: Option<String>,
    #[serde(default)]
    pub selected_client: ClientKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_client_version: Option<String>,
    #[serde(default = "default_upload_rate")]
    pub upload_rate: f64,
    #[serde(default = "default_download_rate")]
    pub download_rate: f64,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub completion_percent: f64,
    /// Initial uploaded amount in bytes.
    #[serde(default)]
    pub initial_uploaded: u64,
    /// Initial downloaded amount in bytes.
    #[serde(default)]
    pub initial_downloaded: u64,
    #[serde(default = "default_true")]
    pub randomize_rates: bool,
    #[serde(default = "default_random_range")]
    pub random_range_percent: f64,
    #[serde(default = "default_update_interval")]
    pub update_interval_seconds: u32,
    #[serde(default)]
    pub stop_at_ratio_enabled: bool,
    #[serde(default = "default_stop_at_ratio")]
    pub stop_at_ratio: f64,
    #[serde(default)]
    pub stop_at_uploaded_enabled: bool,
    #[serde(default = "default_stop_at_uploaded_gb")]
    pub stop_at_uploaded_gb: f64,
    #[serde(default)]
    pub stop_at_downloaded_enabled: bool,
    #[serde(default = "default_stop_at_downloaded_gb")]
    pub stop_at_downloaded_gb: f64,
    #[serde(default)]
    pub stop_at_seed_time_enabled: bool,
    #[serde(default = "default_stop_at_seed_time_hours")]
    pub stop_at_seed_time_hours: f64,
    #[serde(default)]
    pub progressive_rates_enabled: bool,
    #[serde(default = "default_target_upload_rate")]
    pub target_upload_rate: f64,
    #[serde(default = "default_target_download_rate")]
    pub target_download_rate: f64,
    #[serde(default = "default_progressive_duration_hours")]
    pub progressive_duration_hours: f64,
}

fn default_upload_rate() -> f64 {
    defaults::UPLOAD_RATE
}

fn default_download_rate() -> f64 {
    defaults::DOWNLOAD_RATE
}

fn default_port() -> u16 {
    defaults::PORT
}

fn default_true() -> bool {
    true
}

fn default_random_range() -> f64 {
    defaults::RANDOM_RANGE_PERCENT
}

fn default_update_interval() -> u32 {
    defaults::UPDATE_INTERVAL_SECONDS
}

fn default_stop_at_ratio() -> f64 {
    defaults::STOP_AT_RATIO
}

fn default_stop_at_uploaded_gb() -> f64 {
    defaults::STOP_AT_UPLOADED_GB
}

fn default_stop_at_downloaded_gb() -> f64 {
    defaults::STOP_AT_DOWNLOADED_GB
}

fn default_stop_at_seed_time_hours() -> f64 {
    defaults::STOP_AT_SEED_TIME_HOURS
}

fn default_target_upload_rate() -> f64 {
    defaults::TARGET_UPLOAD_RATE
}

fn default_target_download_rate() -> f64 {
    defaults::TARGET_DOWNLOAD_RATE
}

fn default_progressive_duration_hours() -> f64 {
    defaults::PROGRESSIVE_DURATION_HOURS
}

impl Default for PersistedInstance {
    fn default() -> Self {
        to_persisted(&InstanceRecord::with_defaults(
            crate::models::InstanceId::new(0),
            &InstanceDefaults::default(),
        ))
    }
}

/// Map a record to its persisted shape.
pub fn to_persisted(record: &InstanceRecord) -> PersistedInstance {
    let p = &record.params;
    PersistedInstance {
        torrent_path: record.torrent_path.clone(),
        selected_client: p.selected_client,
        selected_client_version: p.selected_client_version.clone(),
        upload_rate: p.upload_rate,
        download_rate: p.download_rate,
        port: p.port,
        completion_percent: p.completion_percent,
        initial_uploaded: mb_to_bytes(p.initial_uploaded_mb),
        initial_downloaded: mb_to_bytes(p.initial_downloaded_mb),
        randomize_rates: p.randomize_rates,
        random_range_percent: p.random_range_percent,
        update_interval_seconds: p.update_interval_seconds,
        stop_at_ratio_enabled: p.stop_at_ratio_enabled,
        stop_at_ratio: p.stop_at_ratio,
        stop_at_uploaded_enabled: p.stop_at_uploaded_enabled,
        stop_at_uploaded_gb: p.stop_at_uploaded_gb,
        stop_at_downloaded_enabled: p.stop_at_downloaded_enabled,
        stop_at_downloaded_gb: p.stop_at_downloaded_gb,
        stop_at_seed_time_enabled: p.stop_at_seed_time_enabled,
        stop_at_seed_time_hours: p.stop_at_seed_time_hours,
        progressive_rates_enabled: p.progressive_rates_enabled,
        target_upload_rate: p.target_upload_rate,
        target_download_rate: p.target_download_rate,
        progressive_duration_hours: p.progressive_duration_hours,
    }
}

/// Map a persisted instance back to a defaults overlay.
///
/// Restoration seeds the record factory with this overlay, so restored
/// instances go through the same construction path as fresh ones (and get
/// the same status reset). The torrent path is not part of the overlay;
/// the restore path rebinds it only after a successful reload.
pub fn restored_defaults(persisted: &PersistedInstance) -> InstanceDefaults {
    InstanceDefaults {
        selected_client: Some(persisted.selected_client),
        selected_client_version: persisted.selected_client_version.clone(),
        upload_rate: Some(persisted.upload_rate),
        download_rate: Some(persisted.download_rate),
        port: Some(persisted.port),
        completion_percent: Some(persisted.completion_percent),
        initial_uploaded_mb: Some(bytes_to_mb(persisted.initial_uploaded)),
        initial_downloaded_mb: Some(bytes_to_mb(persisted.initial_downloaded)),
        randomize_rates: Some(persisted.randomize_rates),
        random_range_percent: Some(persisted.random_range_percent),
        update_interval_seconds: Some(persisted.update_interval_seconds),
        stop_at_ratio_enabled: Some(persisted.stop_at_ratio_enabled),
        stop_at_ratio: Some(persisted.stop_at_ratio),
        stop_at_uploaded_enabled: Some(persisted.stop_at_uploaded_enabled),
        stop_at_uploaded_gb: Some(persisted.stop_at_uploaded_gb),
        stop_at_downloaded_enabled: Some(persisted.stop_at_downloaded_enabled),
        stop_at_downloaded_gb: Some(persisted.stop_at_downloaded_gb),
        stop_at_seed_time_enabled: Some(persisted.stop_at_seed_time_enabled),
        stop_at_seed_time_hours: Some(persisted.stop_at_seed_time_hours),
        progressive_rates_enabled: Some(persisted.progressive_rates_enabled),
        target_upload_rate: Some(persisted.target_upload_rate),
        target_download_rate: Some(persisted.target_download_rate),
        progressive_duration_hours: Some(persisted.progressive_duration_hours),
    }
}

/// Megabytes to bytes, truncating the megabyte value to a whole number.
fn mb_to_bytes(mb: f64) -> u64 {
    if mb <= 0.0 {
        return 0;
    }
    (mb.trunc() as u64) * BYTES_PER_MB
}

/// Bytes back to (possibly fractional) megabytes.
fn bytes_to_mb(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_MB as f64
}
