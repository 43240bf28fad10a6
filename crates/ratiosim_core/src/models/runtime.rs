//! Opaque runtime data attached to an instance.
//!
//! Everything in this module is produced at runtime (by the backend or the
//! UI scheduler) and is never written to the session document.

/// Metadata for a loaded torrent, returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TorrentMeta {
    /// Display name, derived from the torrent file.
    pub name: String,
    /// Hex-encoded info hash.
    pub info_hash: String,
    /// Total payload size in bytes.
    pub total_size: u64,
}

/// Live transfer statistics sourced from the backend while faking.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TransferStats {
    /// Total bytes reported as uploaded so far.
    pub uploaded_bytes: u64,
    /// Total bytes reported as downloaded so far.
    pub downloaded_bytes: u64,
    /// Current share ratio.
    pub ratio: f64,
    /// Seconds since the session started announcing.
    pub elapsed_seconds: u64,
}

/// Slots for periodic-task handles owned by the UI layer.
///
/// The UI scheduler parks its handle ids here so it can cancel the tasks
/// when an instance stops or is removed. The core never interprets the
/// values and never persists them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimerHandles {
    /// Main announce/update tick.
    pub update: Option<u64>,
    /// Live stats refresh tick.
    pub live_stats: Option<u64>,
    /// Next-update countdown tick.
    pub countdown: Option<u64>,
}

impl TimerHandles {
    /// True if no timer is registered.
    pub fn is_empty(&self) -> bool {
        self.update.is_none() && self.live_stats.is_none() && self.countdown.is_none()
    }

    /// Drop all handles (the UI cancels the tasks themselves).
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
