//! The instance record and the update patch applied to it.

use crate::models::{InstanceId, StatusKind, TimerHandles, TorrentMeta, TransferStats};

use super::params::{InstanceDefaults, InstanceParams};

/// Status shown for a freshly created instance.
pub const STATUS_SELECT_TORRENT: &str = "Select a torrent file to begin";
/// Status shown once a torrent is loaded and the instance can start.
pub const STATUS_READY: &str = "Ready to start faking";
/// Status shown when a previously recorded torrent file cannot be reloaded.
pub const STATUS_TORRENT_MISSING: &str = "Torrent file not found - please select again";

/// One simulated client configuration plus its runtime state.
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceRecord {
    /// Backend-assigned identity, unique within the store.
    pub id: InstanceId,

    /// Path of the loaded torrent file, if any.
    pub torrent_path: Option<String>,
    /// Metadata for the loaded torrent, if any.
    pub torrent: Option<TorrentMeta>,

    /// Whether the instance is currently faking.
    pub is_running: bool,
    /// Whether the instance is paused.
    pub is_paused: bool,
    /// Latest stats reported by the backend.
    pub stats: Option<TransferStats>,
    /// UI-owned periodic-task handles. Never persisted.
    pub timers: TimerHandles,

    /// Form parameters (the persisted portion of the record).
    pub params: InstanceParams,

    /// Human-readable status line.
    pub status_message: String,
    /// Status class for UI styling.
    pub status_kind: StatusKind,
    /// Seconds until the next announce update. Never persisted.
    pub next_update_in: u32,
}

impl InstanceRecord {
    /// Build a complete record from a partial defaults overlay.
    ///
    /// Parameter fields come from `defaults` where present, the built-in
    /// defaults otherwise. Status fields are always reset to the initial
    /// "select a torrent" state regardless of the overlay.
    pub fn with_defaults(id: InstanceId, defaults: &InstanceDefaults) -> Self {
        Self {
            id,
            torrent_path: None,
            torrent: None,
            is_running: false,
            is_paused: false,
            stats: None,
            timers: TimerHandles::default(),
            params: InstanceParams::from_defaults(defaults),
            status_message: STATUS_SELECT_TORRENT.to_string(),
            status_kind: StatusKind::Warning,
            next_update_in: 0,
        }
    }
}

/// Partial update applied to an [`InstanceRecord`].
///
/// Parameter changes go through the `params` overlay; runtime and
/// presentation fields have their own optional slots. Absent fields leave
/// the record untouched. Fields can only be set through a patch, not
/// cleared; clearing the torrent binding happens on the removal/reload
/// paths of the manager.
#[derive(Debug, Clone, Default)]
pub struct InstancePatch {
    /// Parameter overlay.
    pub params: InstanceDefaults,
    /// Bind a torrent path.
    pub torrent_path: Option<String>,
    /// Bind loaded torrent metadata.
    pub torrent: Option<TorrentMeta>,
    /// Replace the latest stats snapshot.
    pub stats: Option<TransferStats>,
    pub is_running: Option<bool>,
    pub is_paused: Option<bool>,
    pub status_message: Option<String>,
    pub status_kind: Option<StatusKind>,
    pub next_update_in: Option<u32>,
}

impl InstancePatch {
    /// Check whether applying this patch would change `record`.
    ///
    /// Shallow per-field value comparison, mirroring the parameter overlay.
    pub fn would_change(&self, record: &InstanceRecord) -> bool {
        let mut merged = record.clone();
        self.apply_to(&mut merged);
        merged != *record
    }

    /// Merge every present field into `record`.
    pub fn apply_to(&self, record: &mut InstanceRecord) {
        self.params.apply_to(&mut record.params);
        if let Some(v) = &self.torrent_path {
            record.torrent_path = Some(v.clone());
        }
        if let Some(v) = &self.torrent {
            record.torrent = Some(v.clone());
        }
        if let Some(v) = self.stats {
            record.stats = Some(v);
        }
        if let Some(v) = self.is_running {
            record.is_running = v;
        }
        if let Some(v) = self.is_paused {
            record.is_paused = v;
        }
        if let Some(v) = &self.status_message {
            record.status_message = v.clone();
        }
        if let Some(v) = self.status_kind {
            record.status_kind = v;
        }
        if let Some(v) = self.next_update_in {
            record.next_update_in = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_record_has_initial_status() {
        let record = InstanceRecord::with_defaults(InstanceId::new(1), &InstanceDefaults::default());
        assert_eq!(record.status_message, STATUS_SELECT_TORRENT);
        assert_eq!(record.status_kind, StatusKind::Warning);
        assert!(record.torrent.is_none());
        assert!(record.torrent_path.is_none());
        assert!(!record.is_running);
        assert_eq!(record.next_update_in, 0);
    }

    #[test]
    fn status_resets_even_with_overlay() {
        // The overlay only covers parameters; restored instances must not
        // inherit a stale status line.
        let overlay = InstanceDefaults {
            upload_rate: Some(10.0),
            ..Default::default()
        };
        let record = InstanceRecord::with_defaults(InstanceId::new(2), &overlay);
        assert_eq!(record.params.upload_rate, 10.0);
        assert_eq!(record.status_kind, StatusKind::Warning);
    }

    #[test]
    fn patch_merges_runtime_fields() {
        let mut record =
            InstanceRecord::with_defaults(InstanceId::new(3), &InstanceDefaults::default());
        let patch = InstancePatch {
            is_running: Some(true),
            status_message: Some("Faking".to_string()),
            status_kind: Some(StatusKind::Running),
            ..Default::default()
        };
        assert!(patch.would_change(&record));
        patch.apply_to(&mut record);
        assert!(record.is_running);
        assert_eq!(record.status_kind, StatusKind::Running);
        // Parameters untouched
        assert_eq!(record.params.upload_rate, 50.0);
    }

    #[test]
    fn noop_patch_reports_no_change() {
        let record =
            InstanceRecord::with_defaults(InstanceId::new(4), &InstanceDefaults::default());
        let patch = InstancePatch {
            params: InstanceDefaults {
                upload_rate: Some(50.0),
                ..Default::default()
            },
            is_running: Some(false),
            ..Default::default()
        };
        assert!(!patch.would_change(&record));
    }
}
