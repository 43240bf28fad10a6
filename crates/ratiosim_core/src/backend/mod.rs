//! Backend interface the session layer drives.
//!
//! The backend owns actual session creation, torrent loading, deletion,
//! and configuration persistence. The session manager only ever talks to
//! it through the [`Backend`] trait, so tests can substitute a mock and
//! applications can swap in an IPC-backed implementation.

use std::future::Future;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::{AppConfig, ConfigError};
use crate::models::{InstanceId, TorrentMeta};

mod sim;

pub use sim::SimBackend;

/// Errors surfaced by backend operations.
#[derive(Error, Debug)]
pub enum BackendError {
    /// The given session id is not (or no longer) known to the backend.
    #[error("Unknown session: {0}")]
    UnknownSession(InstanceId),

    /// A torrent file could not be read.
    #[error("Failed to read torrent file '{path}': {source}")]
    ResourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing the configuration document failed.
    #[error("Failed to persist configuration: {0}")]
    Persist(#[from] ConfigError),
}

impl BackendError {
    /// Create a resource unavailable error.
    pub fn resource_unavailable(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::ResourceUnavailable {
            path: path.into(),
            source,
        }
    }
}

/// Asynchronous backend operations consumed by the session layer.
///
/// All operations may fail; none of them time out or support cancellation
/// at this layer.
pub trait Backend: Send + Sync {
    /// Allocate a new simulated client session and return its id.
    ///
    /// Ids are unique for the backend's lifetime and never reused.
    fn create_session(&self) -> impl Future<Output = Result<InstanceId, BackendError>> + Send;

    /// Load a torrent file into the given session.
    fn load_resource(
        &self,
        session: InstanceId,
        path: &str,
    ) -> impl Future<Output = Result<TorrentMeta, BackendError>> + Send;

    /// Tear down a session.
    fn delete_session(
        &self,
        session: InstanceId,
    ) -> impl Future<Output = Result<(), BackendError>> + Send;

    /// Write the configuration document to durable storage.
    fn persist_configuration(
        &self,
        config: &AppConfig,
    ) -> impl Future<Output = Result<(), BackendError>> + Send;
}
