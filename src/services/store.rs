//! Record store.
//!
//! Owns the ordered link collection and its identity assignment. Every
//! mutation is written through to the persistence adapter before the call
//! returns; if the write fails the in-memory collection is left as it was, so
//! memory and the durable value never diverge.

use crate::models::{LinkId, LinkInput, LinkPatch, LinkRecord};
use crate::storage::PersistenceAdapter;
use crate::{Error, Result};
use tracing::instrument;

/// Ordered, write-through collection of link records.
pub struct RecordStore {
    records: Vec<LinkRecord>,
    persistence: PersistenceAdapter,
}

impl RecordStore {
    /// Creates a store over an already loaded collection.
    ///
    /// Nothing is written; use [`RecordStore::persist`] to force a save.
    #[must_use]
    pub const fn new(persistence: PersistenceAdapter, records: Vec<LinkRecord>) -> Self {
        Self {
            records,
            persistence,
        }
    }

    /// Returns the current collection in display order.
    #[must_use]
    pub fn all(&self) -> &[LinkRecord] {
        &self.records
    }

    /// Looks up a record by id.
    #[must_use]
    pub fn get(&self, id: &LinkId) -> Option<&LinkRecord> {
        self.records.iter().find(|r| &r.id == id)
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the persistence adapter.
    #[must_use]
    pub const fn persistence(&self) -> &PersistenceAdapter {
        &self.persistence
    }

    /// Writes the current collection to the durable store.
    ///
    /// # Errors
    ///
    /// Returns an error if the save fails.
    pub fn persist(&self) -> Result<()> {
        self.persistence.save(&self.records)
    }

    /// Adds a record at the front of the collection with a fresh id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if title or url is blank, or a storage
    /// error if the save fails.
    #[instrument(skip(self, input), fields(title = %input.title))]
    pub fn add(&mut self, input: LinkInput) -> Result<LinkRecord> {
        input.validate()?;

        let record = LinkRecord::from_input(LinkId::generate(), input);
        let mut next = Vec::with_capacity(self.records.len() + 1);
        next.push(record.clone());
        next.extend(self.records.iter().cloned());
        self.commit(next)?;

        tracing::info!(link_id = %record.id, "Added link");
        metrics::counter!("links_added_total").increment(1);
        Ok(record)
    }

    /// Merges `patch` into the record with `id`, keeping its position.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no record has `id`,
    /// [`Error::InvalidInput`] if the patch blanks title or url, or a
    /// storage error if the save fails.
    #[instrument(skip(self, patch), fields(link_id = %id))]
    pub fn update(&mut self, id: &LinkId, patch: LinkPatch) -> Result<LinkRecord> {
        patch.validate()?;

        let index = self.position_of(id)?;
        let mut next = self.records.clone();
        next[index].apply(patch);
        let updated = next[index].clone();
        self.commit(next)?;

        tracing::info!("Updated link");
        metrics::counter!("links_updated_total").increment(1);
        Ok(updated)
    }

    /// Removes the record with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no record has `id` (the collection is
    /// unchanged), or a storage error if the save fails.
    #[instrument(skip(self), fields(link_id = %id))]
    pub fn remove(&mut self, id: &LinkId) -> Result<LinkRecord> {
        let index = self.position_of(id)?;
        let mut next = self.records.clone();
        let removed = next.remove(index);
        self.commit(next)?;

        tracing::info!("Removed link");
        metrics::counter!("links_removed_total").increment(1);
        Ok(removed)
    }

    fn position_of(&self, id: &LinkId) -> Result<usize> {
        self.records
            .iter()
            .position(|r| &r.id == id)
            .ok_or_else(|| {
                metrics::counter!("link_not_found_total").increment(1);
                Error::NotFound {
                    id: id.to_string(),
                }
            })
    }

    /// Saves `next` and only then makes it the current collection.
    fn commit(&mut self, next: Vec<LinkRecord>) -> Result<()> {
        self.persistence.save(&next)?;
        self.records = next;
        Ok(())
    }
}
