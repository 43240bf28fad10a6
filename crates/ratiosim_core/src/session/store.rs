//! In-memory session store: the source of truth for UI consumption.

use crate::models::InstanceId;

use super::record::InstanceRecord;

/// Ordered collection of instance records plus the active selection.
///
/// Order is display order; it carries no other meaning. The store performs
/// no field-level validation and does not check that the active id refers
/// to a member record; callers own both concerns.
#[derive(Debug, Default)]
pub struct SessionStore {
    records: Vec<InstanceRecord>,
    active_id: Option<InstanceId>,
}

impl SessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole record sequence.
    pub fn set_all(&mut self, records: Vec<InstanceRecord>) {
        self.records = records;
    }

    /// Set the active id. Membership is not validated; a stale id falls
    /// back to the first record on the next `active_record()` read.
    pub fn set_active(&mut self, id: Option<InstanceId>) {
        self.active_id = id;
    }

    /// Currently selected id, if any.
    pub fn active_id(&self) -> Option<InstanceId> {
        self.active_id
    }

    /// All records in display order.
    pub fn records(&self) -> &[InstanceRecord] {
        &self.records
    }

    /// Look up a record by id.
    pub fn get(&self, id: InstanceId) -> Option<&InstanceRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Look up a record by id for mutation.
    pub fn get_mut(&mut self, id: InstanceId) -> Option<&mut InstanceRecord> {
        self.records.iter_mut().find(|r| r.id == id)
    }

    /// The active record, falling back to the first record when the active
    /// id is unset or stale. `None` only when the store is empty.
    ///
    /// The fallback is deliberate: the UI keeps showing something even if
    /// the active id goes stale across a removal race.
    pub fn active_record(&self) -> Option<&InstanceRecord> {
        self.active_id
            .and_then(|id| self.get(id))
            .or_else(|| self.records.first())
    }

    /// Append a record at the end of the display order.
    pub fn push(&mut self, record: InstanceRecord) {
        self.records.push(record);
    }

    /// Remove a record by id, returning it if present.
    pub fn remove(&mut self, id: InstanceId) -> Option<InstanceRecord> {
        let index = self.records.iter().position(|r| r.id == id)?;
        Some(self.records.remove(index))
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
