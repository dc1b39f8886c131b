//! Durable key-value store trait.

use crate::{Error, Result};

/// Maximum length of a storage key in bytes.
pub const MAX_KEY_LEN: usize = 255;

/// Trait for durable key-value backends.
///
/// A durable store is the local persistent layer that survives restarts. Each
/// key holds one opaque string value; writes overwrite the previous value in
/// full. Implementations must be safe to share across threads.
pub trait DurableStore: Send + Sync {
    /// Reads the value stored under `key`, or `None` if nothing is stored.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn write(&self, key: &str, value: &str) -> Result<()>;

    /// Removes the value under `key`. Returns `true` if something was removed.
    fn remove(&self, key: &str) -> Result<bool>;

    /// Returns a short description of where values live (for status output).
    fn describe(&self) -> String;
}

/// Validates a storage key.
///
/// Keys double as file names in the filesystem backend, so only
/// alphanumerics, `-`, `_` and `.` are accepted, and a key may not start with
/// a dot.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] if the key is empty, too long or contains
/// other characters.
pub fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key.len() <= MAX_KEY_LEN
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.');

    if valid {
        Ok(())
    } else {
        Err(Error::InvalidInput(format!(
            "storage key contains invalid characters: {key}"
        )))
    }
}
