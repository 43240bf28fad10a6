//! Process-local simulated backend.
//!
//! Keeps sessions in an in-memory table and persists configuration through
//! the atomic write path of [`ConfigManager`]. Torrent "loading" reads the
//! file and derives metadata from it; no announce traffic leaves this
//! process.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use sha2::{Digest, Sha256};

use crate::config::{AppConfig, ConfigManager};
use crate::models::{InstanceId, TorrentMeta};

use super::{Backend, BackendError};

/// One live simulated session.
#[derive(Debug, Default)]
struct SessionSlot {
    /// Torrent currently loaded into the session, if any.
    torrent: Option<TorrentMeta>,
}

/// In-process backend implementation.
pub struct SimBackend {
    /// Next id to hand out. Ids are never reused.
    next_id: AtomicU64,
    /// Live sessions by id.
    sessions: Mutex<HashMap<InstanceId, SessionSlot>>,
    /// Configuration persistence.
    config: Mutex<ConfigManager>,
}

impl SimBackend {
    /// Create a backend persisting configuration at `config_path`.
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            next_id: AtomicU64::new(1),
            sessions: Mutex::new(HashMap::new()),
            config: Mutex::new(ConfigManager::new(config_path)),
        }
    }

    /// Number of live sessions.
    pub fn session_count(&self) -> usize {
        self.sessions.lock().len()
    }

    /// Derive torrent metadata from raw file contents.
    fn meta_from_file(path: &Path, bytes: &[u8]) -> TorrentMeta {
        let name = path
            .file_stem()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());

        let digest = Sha256::digest(bytes);
        let info_hash = digest.iter().map(|b| format!("{b:02x}")).collect();

        TorrentMeta {
            name,
            info_hash,
            total_size: bytes.len() as u64,
        }
    }
}

impl Backend for SimBackend {
    async fn create_session(&self) -> Result<InstanceId, BackendError> {
        let id = InstanceId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.sessions.lock().insert(id, SessionSlot::default());
        tracing::debug!(%id, "created simulated session");
        Ok(id)
    }

    async fn load_resource(
        &self,
        session: InstanceId,
        path: &str,
    ) -> Result<TorrentMeta, BackendError> {
        if !self.sessions.lock().contains_key(&session) {
            return Err(BackendError::UnknownSession(session));
        }

        let path = Path::new(path);
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| BackendError::resource_unavailable(path, e))?;
        let meta = Self::meta_from_file(path, &bytes);

        // The session may have been deleted while the file was read.
        let mut sessions = self.sessions.lock();
        let slot = sessions
            .get_mut(&session)
            .ok_or(BackendError::UnknownSession(session))?;
        slot.torrent = Some(meta.clone());

        tracing::info!(%session, name = %meta.name, "loaded torrent");
        Ok(meta)
    }

    async fn delete_session(&self, session: InstanceId) -> Result<(), BackendError> {
        if self.sessions.lock().remove(&session).is_none() {
            return Err(BackendError::UnknownSession(session));
        }
        tracing::debug!(%session, "deleted simulated session");
        Ok(())
    }

    async fn persist_configuration(&self, config: &AppConfig) -> Result<(), BackendError> {
        let mut manager = self.config.lock();
        *manager.config_mut() = config.clone();
        manager.save()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn sessions_get_unique_never_reused_ids() {
        let dir = tempdir().unwrap();
        let backend = SimBackend::new(dir.path().join("config.toml"));

        let a = backend.create_session().await.unwrap();
        let b = backend.create_session().await.unwrap();
        assert_ne!(a, b);

        backend.delete_session(a).await.unwrap();
        let c = backend.create_session().await.unwrap();
        assert_ne!(c, a);
        assert_eq!(backend.session_count(), 2);
    }

    #[tokio::test]
    async fn delete_of_unknown_session_fails() {
        let dir = tempdir().unwrap();
        let backend = SimBackend::new(dir.path().join("config.toml"));
        let err = backend.delete_session(InstanceId::new(7)).await.unwrap_err();
        assert!(matches!(err, BackendError::UnknownSession(_)));
    }

    #[tokio::test]
    async fn load_resource_reads_file_metadata() {
        let dir = tempdir().unwrap();
        let torrent_path = dir.path().join("linux-iso.torrent");
        std::fs::write(&torrent_path, b"d8:announce0:e").unwrap();

        let backend = SimBackend::new(dir.path().join("config.toml"));
        let session = backend.create_session().await.unwrap();
        let meta = backend
            .load_resource(session, torrent_path.to_str().unwrap())
            .await
            .unwrap();

        assert_eq!(meta.name, "linux-iso");
        assert_eq!(meta.total_size, 14);
        assert_eq!(meta.info_hash.len(), 64);
    }

    #[tokio::test]
    async fn load_resource_of_missing_file_fails() {
        let dir = tempdir().unwrap();
        let backend = SimBackend::new(dir.path().join("config.toml"));
        let session = backend.create_session().await.unwrap();

        let err = backend
            .load_resource(session, dir.path().join("gone.torrent").to_str().unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::ResourceUnavailable { .. }));
    }

    #[tokio::test]
    async fn persist_writes_the_config_file() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        let backend = SimBackend::new(&config_path);

        let mut config = AppConfig::default();
        config.active_instance_id = Some(0);
        backend.persist_configuration(&config).await.unwrap();

        assert!(config_path.exists());
        let content = std::fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("active_instance_id = 0"));
    }
}
