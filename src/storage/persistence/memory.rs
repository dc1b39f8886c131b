//! In-memory durable store.
//!
//! Keeps values in a mutex-guarded map. Used by tests and by the
//! `--ephemeral` host mode, where nothing should outlive the process.

use crate::storage::traits::{DurableStore, validate_key};
use crate::{Error, Result};
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory durable store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding a single pre-existing value.
    #[must_use]
    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut values = HashMap::new();
        values.insert(key.into(), value.into());
        Self {
            values: Mutex::new(values),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.values.lock().map_err(|e| Error::OperationFailed {
            operation: "lock_memory_store".to_string(),
            cause: e.to_string(),
        })
    }
}

impl DurableStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;
        Ok(self.lock()?.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        validate_key(key)?;
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool> {
        validate_key(key)?;
        Ok(self.lock()?.remove(key).is_some())
    }

    fn describe(&self) -> String {
        "memory (not persisted)".to_string()
    }
}
