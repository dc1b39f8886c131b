//! # Linkdeck
//!
//! A local-first dashboard of bookmarked links.
//!
//! Linkdeck keeps an ordered collection of link records in a small durable
//! key-value store, seeds it once from a bootstrap document, and lets the user
//! search, add, edit, star and delete records through an interaction
//! controller that mirrors a modal UI.
//!
//! ## Layers
//!
//! - Durable store: string key-value backend (filesystem or in-memory)
//! - Persistence adapter: whole-collection `load`/`save` under one fixed key
//! - Seed loader: one-shot fetch of the bootstrap document (HTTP or file)
//! - Record store: ordered CRUD with write-through persistence
//! - Filter engine and view renderer: pure functions over the record list
//! - Interaction controller: `Idle` / `Composing` / `ConfirmingDelete`
//!
//! ## Example
//!
//! ```rust,ignore
//! use linkdeck::services::{bootstrap, InteractionController, SeedLoader, StaticSeedSource};
//! use linkdeck::storage::{MemoryStore, PersistenceAdapter};
//!
//! let persistence = PersistenceAdapter::new(Arc::new(MemoryStore::new()), "links")?;
//! let seed = SeedLoader::new(Box::new(StaticSeedSource::default()));
//! let (store, outcome) = bootstrap(persistence, &seed)?;
//! let mut controller = InteractionController::new(store, outcome.status());
//! controller.set_search("graph");
//! println!("{}", controller.screen());
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error as ThisError;

// Module declarations
pub mod cli;
pub mod config;
pub mod models;
pub mod observability;
pub mod rendering;
pub mod services;
pub mod storage;

// Re-exports for convenience
pub use config::LinkdeckConfig;
pub use models::{LinkForm, LinkId, LinkInput, LinkPatch, LinkRecord};
pub use rendering::{Screen, StatusLevel, StatusMessage, TableRow, TableView};
pub use services::{
    InitOutcome, InteractionController, Mode, RecordStore, SearchQuery, SeedLoader, bootstrap,
    filter,
};
pub use storage::{DurableStore, FilesystemStore, MemoryStore, PersistenceAdapter};

/// Error type for linkdeck operations.
///
/// # Error Variant Triggers
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `InvalidInput` | Blank title or url, unsafe storage key, unparseable CLI value |
/// | `OperationFailed` | Filesystem I/O, serialization, HTTP client construction |
/// | `NotFound` | A mutation references an id that is no longer in the store |
/// | `SeedLoad` | The bootstrap document could not be fetched or parsed |
/// | `MalformedDurableState` | The persisted value does not decode into a valid collection |
/// | `PositionOutOfRange` | Edit/delete row is outside the current filtered view |
/// | `InvalidTransition` | A controller event arrives in a state that cannot accept it |
#[derive(Debug, ThisError)]
pub enum Error {
    /// Invalid input was provided.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An operation failed.
    ///
    /// Raised when:
    /// - Filesystem I/O errors occur in the durable store
    /// - The collection cannot be serialized
    /// - Logging or metrics initialization fails
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },

    /// No record with the given id exists.
    #[error("link not found: {id}")]
    NotFound {
        /// The id that was looked up.
        id: String,
    },

    /// The bootstrap document could not be loaded.
    ///
    /// Covers network errors, non-success HTTP status, unreadable files and
    /// bodies that are not a JSON array of link inputs.
    #[error("failed to load seed from {location}: {cause}")]
    SeedLoad {
        /// Where the seed was fetched from (URL or path).
        location: String,
        /// The underlying cause.
        cause: String,
    },

    /// The persisted collection is present but cannot be decoded.
    ///
    /// Treated as absence by the persistence adapter; surfaced only for
    /// logging and direct decoding.
    #[error("malformed durable state under key '{key}': {cause}")]
    MalformedDurableState {
        /// The storage key holding the value.
        key: String,
        /// The decoding failure.
        cause: String,
    },

    /// A position does not address a row of the current filtered view.
    #[error("position {position} is out of range for {len} visible links")]
    PositionOutOfRange {
        /// The requested 0-based position.
        position: usize,
        /// Number of rows in the filtered view.
        len: usize,
    },

    /// The interaction controller cannot accept the event in its current state.
    #[error("cannot {action} while {state}")]
    InvalidTransition {
        /// The requested action.
        action: &'static str,
        /// The current controller state.
        state: &'static str,
    },
}

impl Error {
    /// Returns `true` for failures the controller turns into inline status text.
    ///
    /// Storage, serialization and seed failures are not recoverable at the
    /// interaction level and propagate to the host.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput(_)
                | Self::NotFound { .. }
                | Self::PositionOutOfRange { .. }
                | Self::InvalidTransition { .. }
        )
    }
}

/// Result type alias for linkdeck operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidInput("test error".to_string());
        assert_eq!(err.to_string(), "invalid input: test error");

        let err = Error::OperationFailed {
            operation: "test".to_string(),
            cause: "failed".to_string(),
        };
        assert_eq!(err.to_string(), "operation 'test' failed: failed");

        let err = Error::NotFound {
            id: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "link not found: abc");

        let err = Error::PositionOutOfRange {
            position: 4,
            len: 2,
        };
        assert_eq!(
            err.to_string(),
            "position 4 is out of range for 2 visible links"
        );

        let err = Error::InvalidTransition {
            action: "confirm",
            state: "idle",
        };
        assert_eq!(err.to_string(), "cannot confirm while idle");
    }

    #[test]
    fn test_recoverable_classification() {
        assert!(Error::InvalidInput(String::new()).is_recoverable());
        assert!(
            Error::NotFound {
                id: "x".to_string()
            }
            .is_recoverable()
        );
        assert!(
            !Error::SeedLoad {
                location: "links.json".to_string(),
                cause: "missing".to_string(),
            }
            .is_recoverable()
        );
        assert!(
            !Error::OperationFailed {
                operation: "write".to_string(),
                cause: "disk full".to_string(),
            }
            .is_recoverable()
        );
    }
}
