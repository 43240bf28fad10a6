//! Instance session management.
//!
//! This module contains the session layer:
//! - The record factory and parameter defaults (`params`, `record`)
//! - The field mapper between records and the session document (`mapper`)
//! - The in-memory store with the active selection (`store`)
//! - The guarded persistence coordinator (`saver`)
//! - The lifecycle controller tying it all together (`manager`)

pub mod mapper;
pub mod params;

mod errors;
mod manager;
mod record;
mod saver;
mod store;

pub use errors::SessionError;
pub use manager::{ManagerState, SessionManager};
pub use params::{InstanceDefaults, InstanceParams};
pub use record::{InstancePatch, InstanceRecord};
pub use saver::{SessionSaver, SharedConfig};
pub use store::SessionStore;
