//! Whole-collection persistence under a single storage key.
//!
//! The adapter is the only component that knows how the link collection is
//! encoded. Every save rewrites the full collection; there are no delta
//! writes. A value that cannot be decoded is reported as absence so the
//! caller falls back to seeding, and the next successful save overwrites it.

use crate::models::LinkRecord;
use crate::storage::traits::{DurableStore, validate_key};
use crate::{Error, Result};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::instrument;

/// Default storage key for the link collection.
pub const DEFAULT_STORAGE_KEY: &str = "interviewPrepLinks";

/// Loads and saves the link collection through a [`DurableStore`].
pub struct PersistenceAdapter {
    store: Arc<dyn DurableStore>,
    key: String,
    /// Serializes load/save so concurrent hosts never interleave writes.
    io_lock: Mutex<()>,
}

impl PersistenceAdapter {
    /// Creates an adapter for `key` on the given store.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the key is not a valid storage key.
    pub fn new(store: Arc<dyn DurableStore>, key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        validate_key(&key)?;
        Ok(Self {
            store,
            key,
            io_lock: Mutex::new(()),
        })
    }

    /// Returns the storage key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns a description of the backing store.
    #[must_use]
    pub fn describe(&self) -> String {
        format!("{} (key: {})", self.store.describe(), self.key)
    }

    /// Loads the previously saved collection.
    ///
    /// Returns `Ok(None)` when nothing is stored or when the stored value is
    /// malformed.
    ///
    /// # Errors
    ///
    /// Returns an error only if the underlying store cannot be read.
    #[instrument(skip(self), fields(key = %self.key))]
    pub fn load(&self) -> Result<Option<Vec<LinkRecord>>> {
        let _guard = self.lock()?;

        let decoded = match self.store.read(&self.key) {
            Ok(Some(raw)) => self.decode(&raw),
            Ok(None) => {
                tracing::debug!("No durable state present");
                return Ok(None);
            },
            Err(e @ Error::MalformedDurableState { .. }) => Err(e),
            Err(e) => return Err(e),
        };

        match decoded {
            Ok(records) => {
                tracing::debug!(count = records.len(), "Loaded durable state");
                Ok(Some(records))
            },
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring malformed durable state");
                metrics::counter!("durable_state_malformed_total").increment(1);
                Ok(None)
            },
        }
    }

    /// Serializes and stores the full collection, replacing the prior value.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the store write fails.
    #[instrument(skip(self, records), fields(key = %self.key, count = records.len()))]
    pub fn save(&self, records: &[LinkRecord]) -> Result<()> {
        let json = serde_json::to_string(records).map_err(|e| Error::OperationFailed {
            operation: "serialize_links".to_string(),
            cause: e.to_string(),
        })?;

        let _guard = self.lock()?;
        self.store.write(&self.key, &json)?;

        metrics::counter!("durable_saves_total").increment(1);
        Ok(())
    }

    /// Removes the stored collection so the next startup seeds again.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store cannot be modified.
    #[instrument(skip(self), fields(key = %self.key))]
    pub fn clear(&self) -> Result<bool> {
        let _guard = self.lock()?;
        let removed = self.store.remove(&self.key)?;
        tracing::info!(removed, "Cleared durable state");
        Ok(removed)
    }

    /// Decodes a stored value into a collection.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedDurableState`] if the value is not a JSON
    /// array of link records or if two records share an id.
    pub fn decode(&self, raw: &str) -> Result<Vec<LinkRecord>> {
        let records: Vec<LinkRecord> =
            serde_json::from_str(raw).map_err(|e| self.malformed(e.to_string()))?;

        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id.as_str()) {
                return Err(self.malformed(format!("duplicate id {}", record.id)));
            }
        }

        Ok(records)
    }

    fn malformed(&self, cause: String) -> Error {
        Error::MalformedDurableState {
            key: self.key.clone(),
            cause,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, ()>> {
        self.io_lock.lock().map_err(|e| Error::OperationFailed {
            operation: "lock_persistence".to_string(),
            cause: e.to_string(),
        })
    }
}
