//! Session lifecycle controller.
//!
//! The manager is the only component that talks to the backend and the
//! saver. It orchestrates restore-or-create initialization and the public
//! instance actions; the [`SessionStore`] stays the single source of truth
//! for UI consumption.
//!
//! Persistence policy: adding and removing instances save the session
//! automatically; parameter updates never do. Edits are persisted only on
//! an explicit [`SessionManager::save_session`] call, so a save is not
//! issued on every keystroke.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::backend::Backend;
use crate::config::AppConfig;
use crate::models::{InstanceId, StatusKind};

use super::errors::SessionError;
use super::mapper::{self, PersistedInstance};
use super::params::InstanceDefaults;
use super::record::{InstancePatch, InstanceRecord, STATUS_READY, STATUS_TORRENT_MISSING};
use super::saver::{SessionSaver, SharedConfig};
use super::store::SessionStore;

/// Lifecycle state of the manager.
///
/// `Ready` is the only stable state after startup; there is no shutdown
/// state, the manager lives as long as the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ManagerState {
    /// Not yet initialized.
    #[default]
    Uninitialized,
    /// `initialize()` is running.
    Initializing,
    /// Initialization finished; instance actions are available.
    Ready,
}

/// Orchestrates the instance session over a backend.
pub struct SessionManager<B> {
    backend: Arc<B>,
    config: SharedConfig,
    saver: SessionSaver<B>,
    store: SessionStore,
    state: ManagerState,
}

impl<B: Backend> SessionManager<B> {
    /// Create a manager over `backend`, seeded with the global
    /// configuration (or `None` when no configuration exists yet).
    pub fn new(backend: Arc<B>, config: Option<AppConfig>) -> Self {
        let config: SharedConfig = Arc::new(RwLock::new(config));
        let saver = SessionSaver::new(Arc::clone(&backend), Arc::clone(&config));
        Self {
            backend,
            config,
            saver,
            store: SessionStore::new(),
            state: ManagerState::default(),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ManagerState {
        self.state
    }

    /// The in-memory store, for UI consumption.
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// All records in display order.
    pub fn records(&self) -> &[InstanceRecord] {
        self.store.records()
    }

    /// Look up an instance by id.
    pub fn get_instance(&self, id: InstanceId) -> Option<&InstanceRecord> {
        self.store.get(id)
    }

    /// The active instance (first record when the active id is stale).
    pub fn active_instance(&self) -> Option<&InstanceRecord> {
        self.store.active_record()
    }

    /// Restore the saved session, or create the first instance.
    ///
    /// With a non-empty persisted session, every entry is restored in
    /// order: a fresh backend session, parameters seeded from the entry,
    /// and a reload of any recorded torrent path. A failed reload degrades
    /// only that instance. Without one, a single instance is created from
    /// configuration-derived defaults.
    ///
    /// Returns the active instance id. Backend failures are fatal and
    /// propagate; nothing is installed into the store in that case.
    pub async fn initialize(&mut self) -> Result<InstanceId, SessionError> {
        self.state = ManagerState::Initializing;

        let saved = {
            let config = self.config.read();
            config
                .as_ref()
                .filter(|c| !c.instances.is_empty())
                .map(|c| (c.instances.clone(), c.active_instance_id))
        };

        let active_id = match saved {
            Some((persisted, active_index)) => {
                let mut restored = Vec::with_capacity(persisted.len());
                for entry in &persisted {
                    restored.push(self.restore_instance(entry).await?);
                }

                let index = active_index.filter(|&i| i < restored.len()).unwrap_or(0);
                let active_id = restored[index].id;

                tracing::info!(
                    count = restored.len(),
                    active = %active_id,
                    "restored session from configuration"
                );
                self.store.set_all(restored);
                self.store.set_active(Some(active_id));
                active_id
            }
            None => {
                let defaults = self.config_defaults();
                let id = self
                    .backend
                    .create_session()
                    .await
                    .map_err(SessionError::CreateSession)?;
                let record = InstanceRecord::with_defaults(id, &defaults);

                tracing::info!(instance = %id, "no saved session, created first instance");
                self.store.set_all(vec![record]);
                self.store.set_active(Some(id));
                id
            }
        };

        self.state = ManagerState::Ready;
        Ok(active_id)
    }

    /// Create one instance from a persisted entry.
    ///
    /// A recorded torrent path that no longer loads leaves the instance
    /// with the "not found" status instead of failing the restoration.
    async fn restore_instance(
        &self,
        entry: &PersistedInstance,
    ) -> Result<InstanceRecord, SessionError> {
        let id = self
            .backend
            .create_session()
            .await
            .map_err(SessionError::CreateSession)?;

        let defaults = mapper::restored_defaults(entry);
        let mut record = InstanceRecord::with_defaults(id, &defaults);

        if let Some(path) = &entry.torrent_path {
            match self.backend.load_resource(id, path).await {
                Ok(meta) => {
                    record.torrent = Some(meta);
                    record.torrent_path = Some(path.clone());
                    record.status_message = STATUS_READY.to_string();
                    record.status_kind = StatusKind::Idle;
                }
                Err(e) => {
                    tracing::warn!(instance = %id, path, "could not reload torrent: {e}");
                    record.status_message = STATUS_TORRENT_MISSING.to_string();
                    record.status_kind = StatusKind::Warning;
                }
            }
        }

        Ok(record)
    }

    /// Add a new instance and make it active.
    ///
    /// Without explicit defaults the configuration-derived defaults apply.
    /// The record is appended only after the backend call succeeds, so a
    /// failed creation leaves the store untouched. Saves the session.
    pub async fn add_instance(
        &mut self,
        defaults: Option<InstanceDefaults>,
    ) -> Result<InstanceId, SessionError> {
        let defaults = defaults.unwrap_or_else(|| self.config_defaults());

        let id = self
            .backend
            .create_session()
            .await
            .map_err(SessionError::CreateSession)?;

        self.store.push(InstanceRecord::with_defaults(id, &defaults));
        self.store.set_active(Some(id));
        tracing::info!(instance = %id, "added instance");

        self.saver.save(self.store.records(), Some(id)).await;
        Ok(id)
    }

    /// Remove an instance.
    ///
    /// The last remaining instance is never removed: the request is
    /// rejected with a warning and `Ok(false)`. Otherwise the backend
    /// session is deleted first; only on success is the record dropped
    /// from the store. Removing the active instance promotes the first
    /// remaining record. Saves the session and returns `Ok(true)`.
    pub async fn remove_instance(&mut self, id: InstanceId) -> Result<bool, SessionError> {
        if self.store.len() <= 1 {
            tracing::warn!(instance = %id, "cannot remove the last instance");
            return Ok(false);
        }

        self.backend
            .delete_session(id)
            .await
            .map_err(|e| SessionError::delete_session(id, e))?;

        let was_active = self.store.active_id() == Some(id);
        self.store.remove(id);
        if was_active {
            let next = self.store.records().first().map(|r| r.id);
            self.store.set_active(next);
        }
        tracing::info!(instance = %id, "removed instance");

        self.saver
            .save(self.store.records(), self.store.active_id())
            .await;
        Ok(true)
    }

    /// Switch the active instance. Pure store mutation, no backend call,
    /// no save. An invalid id surfaces as the store's fallback-to-first
    /// behavior on the next read.
    pub fn select_instance(&mut self, id: InstanceId) {
        self.store.set_active(Some(id));
    }

    /// Apply a partial update to an instance.
    ///
    /// Returns `false` without touching the store when the id is unknown
    /// or every patched field already holds the given value. Never saves;
    /// callers persist edits with [`Self::save_session`].
    pub fn update_instance(&mut self, id: InstanceId, patch: &InstancePatch) -> bool {
        let Some(record) = self.store.get_mut(id) else {
            return false;
        };
        if !patch.would_change(record) {
            return false;
        }
        patch.apply_to(record);
        true
    }

    /// Apply a partial update to the active instance.
    pub fn update_active_instance(&mut self, patch: &InstancePatch) -> bool {
        match self.store.active_id() {
            Some(id) => self.update_instance(id, patch),
            None => false,
        }
    }

    /// Persist the current session explicitly.
    pub async fn save_session(&self) {
        self.saver
            .save(self.store.records(), self.store.active_id())
            .await;
    }

    /// Instance defaults derived from the global configuration, field by
    /// field, with built-in defaults where the configuration is absent.
    fn config_defaults(&self) -> InstanceDefaults {
        match self.config.read().as_ref() {
            Some(config) => InstanceDefaults {
                selected_client: Some(config.client.default_type),
                selected_client_version: config.client.default_version.clone(),
                upload_rate: Some(config.faker.default_upload_rate),
                download_rate: Some(config.faker.default_download_rate),
                port: Some(config.client.default_port),
                update_interval_seconds: Some(config.faker.update_interval),
                ..Default::default()
            },
            None => InstanceDefaults::default(),
        }
    }
}
