//! Instance parameters and the defaults overlay.
//!
//! `InstanceParams` holds every persisted form parameter with its built-in
//! default. `InstanceDefaults` is a per-field optional overlay used both for
//! caller-supplied defaults (new instances) and restored values (instances
//! rebuilt from the session document).

use crate::models::ClientKind;

/// Built-in parameter defaults.
///
/// These are the values a fresh instance gets for any field the caller
/// does not override.
pub mod defaults {
    pub const UPLOAD_RATE: f64 = 50.0;
    pub const DOWNLOAD_RATE: f64 = 100.0;
    pub const PORT: u16 = 6881;
    pub const COMPLETION_PERCENT: f64 = 0.0;
    pub const INITIAL_UPLOADED_MB: f64 = 0.0;
    pub const INITIAL_DOWNLOADED_MB: f64 = 0.0;
    pub const RANDOMIZE_RATES: bool = true;
    pub const RANDOM_RANGE_PERCENT: f64 = 20.0;
    pub const UPDATE_INTERVAL_SECONDS: u32 = 5;
    pub const STOP_AT_RATIO: f64 = 2.0;
    pub const STOP_AT_UPLOADED_GB: f64 = 10.0;
    pub const STOP_AT_DOWNLOADED_GB: f64 = 10.0;
    pub const STOP_AT_SEED_TIME_HOURS: f64 = 24.0;
    pub const TARGET_UPLOAD_RATE: f64 = 100.0;
    pub const TARGET_DOWNLOAD_RATE: f64 = 200.0;
    pub const PROGRESSIVE_DURATION_HOURS: f64 = 1.0;
}

/// Form parameters of a simulated client instance.
///
/// Every field here is persisted in the session document. Rates are in
/// KiB/s, the initial transfer amounts are in megabytes (converted to
/// bytes on the persistence path).
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceParams {
    /// Client the instance impersonates.
    pub selected_client: ClientKind,
    /// Specific client version string, if pinned.
    pub selected_client_version: Option<String>,
    /// Reported upload rate.
    pub upload_rate: f64,
    /// Reported download rate.
    pub download_rate: f64,
    /// Listen port reported to trackers.
    pub port: u16,
    /// Starting completion percentage.
    pub completion_percent: f64,
    /// Uploaded amount at session start, in megabytes.
    pub initial_uploaded_mb: f64,
    /// Downloaded amount at session start, in megabytes.
    pub initial_downloaded_mb: f64,
    /// Jitter the reported rates each update.
    pub randomize_rates: bool,
    /// Jitter range as a percentage of the base rate.
    pub random_range_percent: f64,
    /// Seconds between announce updates.
    pub update_interval_seconds: u32,

    /// Stop when the share ratio reaches `stop_at_ratio`.
    pub stop_at_ratio_enabled: bool,
    pub stop_at_ratio: f64,
    /// Stop when the uploaded amount reaches `stop_at_uploaded_gb`.
    pub stop_at_uploaded_enabled: bool,
    pub stop_at_uploaded_gb: f64,
    /// Stop when the downloaded amount reaches `stop_at_downloaded_gb`.
    pub stop_at_downloaded_enabled: bool,
    pub stop_at_downloaded_gb: f64,
    /// Stop after seeding for `stop_at_seed_time_hours`.
    pub stop_at_seed_time_enabled: bool,
    pub stop_at_seed_time_hours: f64,

    /// Ramp rates toward the targets over the configured duration.
    pub progressive_rates_enabled: bool,
    pub target_upload_rate: f64,
    pub target_download_rate: f64,
    pub progressive_duration_hours: f64,
}

impl Default for InstanceParams {
    fn default() -> Self {
        Self {
            selected_client: ClientKind::default(),
            selected_client_version: None,
            upload_rate: defaults::UPLOAD_RATE,
            download_rate: defaults::DOWNLOAD_RATE,
            port: defaults::PORT,
            completion_percent: defaults::COMPLETION_PERCENT,
            initial_uploaded_mb: defaults::INITIAL_UPLOADED_MB,
            initial_downloaded_mb: defaults::INITIAL_DOWNLOADED_MB,
            randomize_rates: defaults::RANDOMIZE_RATES,
            random_range_percent: defaults::RANDOM_RANGE_PERCENT,
            update_interval_seconds: defaults::UPDATE_INTERVAL_SECONDS,
            stop_at_ratio_enabled: false,
            stop_at_ratio: defaults::STOP_AT_RATIO,
            stop_at_uploaded_enabled: false,
            stop_at_uploaded_gb: defaults::STOP_AT_UPLOADED_GB,
            stop_at_downloaded_enabled: false,
            stop_at_downloaded_gb: defaults::STOP_AT_DOWNLOADED_GB,
            stop_at_seed_time_enabled: false,
            stop_at_seed_time_hours: defaults::STOP_AT_SEED_TIME_HOURS,
            progressive_rates_enabled: false,
            target_upload_rate: defaults::TARGET_UPLOAD_RATE,
            target_download_rate: defaults::TARGET_DOWNLOAD_RATE,
            progressive_duration_hours: defaults::PROGRESSIVE_DURATION_HOURS,
        }
    }
}

impl InstanceParams {
    /// Build a complete parameter set from a partial overlay.
    ///
    /// Every field present in `overlay` wins; everything else falls back to
    /// the built-in default. Pure construction, no side effects.
    pub fn from_defaults(overlay: &InstanceDefaults) -> Self {
        let mut params = Self::default();
        overlay.apply_to(&mut params);
        params
    }
}

/// Per-field optional overlay over [`InstanceParams`].
///
/// A `None` field means "use the current/default value"; setting a field to
/// the value it already has is not a change.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InstanceDefaults {
    pub selected_client: Option<ClientKind>,
    pub selected_client_version: Option<String>,
    pub upload_rate: Option<f64>,
    pub download_rate: Option<f64>,
    pub port: Option<u16>,
    pub completion_percent: Option<f64>,
    pub initial_uploaded_mb: Option<f64>,
    pub initial_downloaded_mb: Option<f64>,
    pub randomize_rates: Option<bool>,
    pub random_range_percent: Option<f64>,
    pub update_interval_seconds: Option<u32>,
    pub stop_at_ratio_enabled: Option<bool>,
    pub stop_at_ratio: Option<f64>,
    pub stop_at_uploaded_enabled: Option<bool>,
    pub stop_at_uploaded_gb: Option<f64>,
    pub stop_at_downloaded_enabled: Option<bool>,
    pub stop_at_downloaded_gb: Option<f64>,
    pub stop_at_seed_time_enabled: Option<bool>,
    pub stop_at_seed_time_hours: Option<f64>,
    pub progressive_rates_enabled: Option<bool>,
    pub target_upload_rate: Option<f64>,
    pub target_download_rate: Option<f64>,
    pub progressive_duration_hours: Option<f64>,
}

impl InstanceDefaults {
    /// Write every present field into `params`.
    pub fn apply_to(&self, params: &mut InstanceParams) {
        if let Some(v) = self.selected_client {
            params.selected_client = v;
        }
        if let Some(v) = &self.selected_client_version {
            params.selected_client_version = Some(v.clone());
        }
        if let Some(v) = self.upload_rate {
            params.upload_rate = v;
        }
        if let Some(v) = self.download_rate {
            params.download_rate = v;
        }
        if let Some(v) = self.port {
            params.port = v;
        }
        if let Some(v) = self.completion_percent {
            params.completion_percent = v;
        }
        if let Some(v) = self.initial_uploaded_mb {
            params.initial_uploaded_mb = v;
        }
        if let Some(v) = self.initial_downloaded_mb {
            params.initial_downloaded_mb = v;
        }
        if let Some(v) = self.randomize_rates {
            params.randomize_rates = v;
        }
        if let Some(v) = self.random_range_percent {
            params.random_range_percent = v;
        }
        if let Some(v) = self.update_interval_seconds {
            params.update_interval_seconds = v;
        }
        if let Some(v) = self.stop_at_ratio_enabled {
            params.stop_at_ratio_enabled = v;
        }
        if let Some(v) = self.stop_at_ratio {
            params.stop_at_ratio = v;
        }
        if let Some(v) = self.stop_at_uploaded_enabled {
            params.stop_at_uploaded_enabled = v;
        }
        if let Some(v) = self.stop_at_uploaded_gb {
            params.stop_at_uploaded_gb = v;
        }
        if let Some(v) = self.stop_at_downloaded_enabled {
            params.stop_at_downloaded_enabled = v;
        }
        if let Some(v) = self.stop_at_downloaded_gb {
            params.stop_at_downloaded_gb = v;
        }
        if let Some(v) = self.stop_at_seed_time_enabled {
            params.stop_at_seed_time_enabled = v;
        }
        if let Some(v) = self.stop_at_seed_time_hours {
            params.stop_at_seed_time_hours = v;
        }
        if let Some(v) = self.progressive_rates_enabled {
            params.progressive_rates_enabled = v;
        }
        if let Some(v) = self.target_upload_rate {
            params.target_upload_rate = v;
        }
        if let Some(v) = self.target_download_rate {
            params.target_download_rate = v;
        }
        if let Some(v) = self.progressive_duration_hours {
            params.progressive_duration_hours = v;
        }
    }

    /// Check whether applying this overlay would change `params`.
    ///
    /// Shallow per-field value comparison; absent fields never count.
    pub fn would_change(&self, params: &InstanceParams) -> bool {
        let mut merged = params.clone();
        self.apply_to(&mut merged);
        merged != *params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_overlay_yields_builtin_defaults() {
        let params = InstanceParams::from_defaults(&InstanceDefaults::default());
        assert_eq!(params, InstanceParams::default());
        assert_eq!(params.selected_client, ClientKind::QBittorrent);
        assert_eq!(params.upload_rate, 50.0);
        assert_eq!(params.download_rate, 100.0);
        assert_eq!(params.port, 6881);
        assert_eq!(params.completion_percent, 0.0);
        assert!(params.randomize_rates);
        assert_eq!(params.random_range_percent, 20.0);
        assert_eq!(params.update_interval_seconds, 5);
        assert!(!params.stop_at_ratio_enabled);
        assert_eq!(params.stop_at_ratio, 2.0);
        assert_eq!(params.stop_at_uploaded_gb, 10.0);
        assert_eq!(params.stop_at_downloaded_gb, 10.0);
        assert_eq!(params.stop_at_seed_time_hours, 24.0);
        assert!(!params.progressive_rates_enabled);
        assert_eq!(params.target_upload_rate, 100.0);
        assert_eq!(params.target_download_rate, 200.0);
        assert_eq!(params.progressive_duration_hours, 1.0);
    }

    #[test]
    fn overlay_fields_win_over_builtins() {
        let overlay = InstanceDefaults {
            selected_client: Some(ClientKind::Transmission),
            upload_rate: Some(250.0),
            port: Some(51413),
            stop_at_ratio_enabled: Some(true),
            ..Default::default()
        };
        let params = InstanceParams::from_defaults(&overlay);
        assert_eq!(params.selected_client, ClientKind::Transmission);
        assert_eq!(params.upload_rate, 250.0);
        assert_eq!(params.port, 51413);
        assert!(params.stop_at_ratio_enabled);
        // Untouched fields keep the built-in default
        assert_eq!(params.download_rate, 100.0);
        assert_eq!(params.stop_at_ratio, 2.0);
    }

    #[test]
    fn zero_is_a_present_value_not_an_absence() {
        let overlay = InstanceDefaults {
            upload_rate: Some(0.0),
            ..Default::default()
        };
        let params = InstanceParams::from_defaults(&overlay);
        assert_eq!(params.upload_rate, 0.0);
    }

    #[test]
    fn would_change_detects_no_op_overlays() {
        let params = InstanceParams::default();
        let same = InstanceDefaults {
            upload_rate: Some(50.0),
            ..Default::default()
        };
        assert!(!same.would_change(&params));

        let different = InstanceDefaults {
            upload_rate: Some(51.0),
            ..Default::default()
        };
        assert!(different.would_change(&params));
    }
}
