//! Instance identifier newtype.

use std::fmt;

/// Backend-assigned identifier for a simulated client instance.
///
/// Ids are unique for the lifetime of the backend and are never reused
/// after an instance is removed. Provides type safety so instance ids
/// cannot be mixed up with raw counters or persisted sequence indices.
///
/// Note: the persisted session document references the active instance
/// by position in the instance sequence, never by this id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(u64);

impl InstanceId {
    /// Create an id from a raw backend value.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw id value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
