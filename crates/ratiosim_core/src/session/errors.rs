//! Error types for the session lifecycle.
//!
//! Only backend failures on the fatal paths (initialization, instance
//! creation, instance deletion) surface here. Persistence failures are
//! swallowed by the saver, and resource reload failures during restoration
//! degrade the affected instance instead of erroring.

use thiserror::Error;

use crate::backend::BackendError;
use crate::models::InstanceId;

/// Fatal session operation failures.
#[derive(Error, Debug)]
pub enum SessionError {
    /// The backend could not create a session.
    #[error("Failed to create backend session: {0}")]
    CreateSession(#[source] BackendError),

    /// The backend could not delete a session.
    #[error("Failed to delete backend session {id}: {source}")]
    DeleteSession {
        id: InstanceId,
        #[source]
        source: BackendError,
    },
}

impl SessionError {
    /// Create a delete failure with its session id.
    pub fn delete_session(id: InstanceId, source: BackendError) -> Self {
        Self::DeleteSession { id, source }
    }
}
