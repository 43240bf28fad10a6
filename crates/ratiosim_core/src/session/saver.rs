//! Guarded persistence of the session document.
//!
//! Saves are whole-document: every record is mapped, the active index is
//! recomputed, and the full configuration is written through the backend.
//! A try-lock guard keeps at most one write in flight; a save requested
//! while another is active is dropped, not queued. The last save to acquire
//! the guard wins.

use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::Mutex;

use crate::backend::Backend;
use crate::config::AppConfig;
use crate::models::InstanceId;

use super::mapper;
use super::record::InstanceRecord;

/// Shared handle to the in-memory copy of the global configuration.
pub type SharedConfig = Arc<RwLock<Option<AppConfig>>>;

/// Serializes session saves through the backend.
pub struct SessionSaver<B> {
    backend: Arc<B>,
    config: SharedConfig,
    /// Save guard. `try_lock` failure means a write is already in flight.
    guard: Mutex<()>,
}

impl<B: Backend> SessionSaver<B> {
    /// Create a saver writing through `backend` into `config`.
    pub fn new(backend: Arc<B>, config: SharedConfig) -> Self {
        Self {
            backend,
            config,
            guard: Mutex::new(()),
        }
    }

    /// Persist the session document built from `records` and `active_id`.
    ///
    /// Silent in every failure mode: a concurrent save drops this request,
    /// a missing configuration means there is nothing to save into yet, and
    /// backend write errors are logged and swallowed so the UI never blocks
    /// on transient persistence failures.
    pub async fn save(&self, records: &[InstanceRecord], active_id: Option<InstanceId>) {
        let Ok(_lease) = self.guard.try_lock() else {
            tracing::debug!("save already in flight, dropping request");
            return;
        };

        let Some(mut config) = self.config.read().clone() else {
            return;
        };

        config.instances = records.iter().map(mapper::to_persisted).collect();
        config.active_instance_id =
            active_id.and_then(|id| records.iter().position(|r| r.id == id));

        match self.backend.persist_configuration(&config).await {
            Ok(()) => {
                // Mirror the written document so the next save starts from it.
                *self.config.write() = Some(config);
                tracing::debug!(instances = records.len(), "session saved");
            }
            Err(e) => {
                tracing::warn!("failed to save session to config: {e}");
            }
        }
        // Guard released here on every path.
    }
}
