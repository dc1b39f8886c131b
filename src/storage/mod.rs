//! Storage layer abstraction.
//!
//! Two layers:
//! - **Durable store**: string key-value backends ([`FilesystemStore`],
//!   [`MemoryStore`]) behind the [`DurableStore`] trait
//! - **Persistence adapter**: encodes the whole link collection under one
//!   fixed key ([`PersistenceAdapter`])

mod adapter;
pub mod persistence;
pub mod traits;

pub use adapter::{DEFAULT_STORAGE_KEY, PersistenceAdapter};
pub use persistence::{FilesystemStore, MemoryStore};
pub use traits::DurableStore;

use std::path::PathBuf;

/// Gets the user-level data directory for linkdeck.
///
/// Returns the platform-specific local data directory, falling back to
/// `.linkdeck` in the working directory when no home directory is known.
#[must_use]
pub fn default_data_dir() -> PathBuf {
    directories::BaseDirs::new().map_or_else(
        || PathBuf::from(".linkdeck"),
        |b| b.data_local_dir().join("linkdeck"),
    )
}
