//! Data models shared across the crate.
//!
//! This module contains the value types used throughout the session layer:
//! - Enums for client types and instance status
//! - The backend-assigned instance identifier
//! - Opaque runtime data sourced from the backend (torrent metadata, stats)

mod enums;
mod instance_id;
mod runtime;

pub use enums::{ClientKind, StatusKind};
pub use instance_id::InstanceId;
pub use runtime::{TimerHandles, TorrentMeta, TransferStats};
