//! End-to-end session lifecycle over the simulated backend: create a
//! session, edit it, persist it, then restore it as a fresh process would.

use std::sync::Arc;

use tempfile::tempdir;

use ratiosim_core::backend::{Backend, SimBackend};
use ratiosim_core::config::ConfigManager;
use ratiosim_core::models::StatusKind;
use ratiosim_core::session::{InstanceDefaults, InstancePatch, SessionManager};

#[tokio::test]
async fn session_survives_a_restart() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("ratiosim.toml");
    let torrent_path = dir.path().join("ubuntu.torrent");
    std::fs::write(&torrent_path, b"d8:announce30:http://tracker.example/announcee").unwrap();

    // First run: fresh config, one default instance.
    let mut config = ConfigManager::new(&config_path);
    config.load_or_create().unwrap();

    let backend = Arc::new(SimBackend::new(&config_path));
    let mut manager = SessionManager::new(Arc::clone(&backend), Some(config.config().clone()));
    let first = manager.initialize().await.unwrap();
    assert_eq!(manager.records().len(), 1);

    // The UI loads a torrent through the backend, then patches the record.
    let meta = backend
        .load_resource(first, torrent_path.to_str().unwrap())
        .await
        .unwrap();
    assert_eq!(meta.name, "ubuntu");
    let loaded = InstancePatch {
        torrent_path: Some(torrent_path.to_string_lossy().into_owned()),
        torrent: Some(meta),
        ..Default::default()
    };
    assert!(manager.update_instance(first, &loaded));

    // Parameter edits require an explicit save.
    let edits = InstancePatch {
        params: InstanceDefaults {
            upload_rate: Some(123.0),
            initial_uploaded_mb: Some(2.0),
            ..Default::default()
        },
        ..Default::default()
    };
    assert!(manager.update_instance(first, &edits));
    manager.save_session().await;

    // A second instance auto-saves and becomes active.
    let second = manager.add_instance(None).await.unwrap();
    assert_eq!(manager.active_instance().unwrap().id, second);

    // The document on disk holds both instances with converted units.
    let on_disk = std::fs::read_to_string(&config_path).unwrap();
    assert!(on_disk.contains("[[instances]]"));
    assert!(on_disk.contains("initial_uploaded = 2097152"));
    assert!(on_disk.contains("active_instance_id = 1"));

    // Second run: restore from the saved configuration.
    let mut reloaded = ConfigManager::new(&config_path);
    reloaded.load().unwrap();

    let backend2 = Arc::new(SimBackend::new(&config_path));
    let mut restored = SessionManager::new(backend2, Some(reloaded.config().clone()));
    restored.initialize().await.unwrap();

    assert_eq!(restored.records().len(), 2);
    let first_restored = &restored.records()[0];
    assert_eq!(first_restored.params.upload_rate, 123.0);
    assert_eq!(first_restored.params.initial_uploaded_mb, 2.0);
    assert!(first_restored.torrent.is_some());
    assert_eq!(first_restored.status_kind, StatusKind::Idle);
    // The persisted active index selected the second instance.
    assert_eq!(
        restored.active_instance().unwrap().id,
        restored.records()[1].id
    );
}

#[tokio::test]
async fn restore_degrades_instances_with_missing_torrents() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("ratiosim.toml");
    let torrent_path = dir.path().join("fleeting.torrent");
    std::fs::write(&torrent_path, b"d4:infoe").unwrap();

    let mut config = ConfigManager::new(&config_path);
    config.load_or_create().unwrap();

    let backend = Arc::new(SimBackend::new(&config_path));
    let mut manager = SessionManager::new(Arc::clone(&backend), Some(config.config().clone()));
    let id = manager.initialize().await.unwrap();

    let meta = backend
        .load_resource(id, torrent_path.to_str().unwrap())
        .await
        .unwrap();
    manager.update_instance(
        id,
        &InstancePatch {
            torrent_path: Some(torrent_path.to_string_lossy().into_owned()),
            torrent: Some(meta),
            ..Default::default()
        },
    );
    manager.save_session().await;

    // The torrent file disappears between runs.
    std::fs::remove_file(&torrent_path).unwrap();

    let mut reloaded = ConfigManager::new(&config_path);
    reloaded.load().unwrap();
    let mut restored = SessionManager::new(
        Arc::new(SimBackend::new(&config_path)),
        Some(reloaded.config().clone()),
    );
    restored.initialize().await.unwrap();

    // Restoration succeeds; the instance is kept but degraded.
    assert_eq!(restored.records().len(), 1);
    let record = &restored.records()[0];
    assert!(record.torrent.is_none());
    assert_eq!(record.status_kind, StatusKind::Warning);
}

#[tokio::test]
async fn removing_an_instance_deletes_its_backend_session() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("ratiosim.toml");

    let mut config = ConfigManager::new(&config_path);
    config.load_or_create().unwrap();

    let backend = Arc::new(SimBackend::new(&config_path));
    let mut manager = SessionManager::new(Arc::clone(&backend), Some(config.config().clone()));
    let first = manager.initialize().await.unwrap();
    manager.add_instance(None).await.unwrap();
    assert_eq!(backend.session_count(), 2);

    assert!(manager.remove_instance(first).await.unwrap());
    assert_eq!(backend.session_count(), 1);
    assert_eq!(manager.records().len(), 1);

    // The last instance stays, in the store and in the backend.
    let last = manager.records()[0].id;
    assert!(!manager.remove_instance(last).await.unwrap());
    assert_eq!(backend.session_count(), 1);
}
