//! One-shot startup: restore the durable collection or seed it.
//!
//! Startup is consumed in full before any interaction is processed. It ends
//! in exactly one of three outcomes:
//!
//! | Outcome | Durable state | Store contents |
//! |---------|---------------|----------------|
//! | `Restored` | present and well-formed | the saved collection |
//! | `Seeded` | absent or malformed | the seed document, with fresh ids, saved immediately |
//! | `Failed` | absent or malformed, seed unavailable | empty, with an error status |

use super::{RecordStore, SeedLoader};
use crate::Result;
use crate::rendering::{SEED_FAILED_MESSAGE, StatusMessage};
use crate::storage::PersistenceAdapter;
use tracing::instrument;

/// How startup ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitOutcome {
    /// A saved collection was loaded.
    Restored {
        /// Number of records loaded.
        count: usize,
    },
    /// The seed document was fetched and became the collection.
    Seeded {
        /// Number of records seeded.
        count: usize,
        /// Set if saving the seeded collection failed.
        save_error: Option<String>,
    },
    /// The seed document could not be loaded; the store is empty.
    Failed {
        /// The seed failure.
        error: String,
    },
}

impl InitOutcome {
    /// Returns the status line the user should see after startup, if any.
    #[must_use]
    pub fn status(&self) -> Option<StatusMessage> {
        match self {
            Self::Restored { .. } | Self::Seeded {
                save_error: None, ..
            } => None,
            Self::Seeded {
                save_error: Some(cause),
                ..
            } => Some(StatusMessage::error(format!(
                "Could not save resources: {cause}"
            ))),
            Self::Failed { .. } => Some(StatusMessage::error(SEED_FAILED_MESSAGE)),
        }
    }

    /// Returns `true` if startup fell back to an empty collection.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Initializes the record store.
///
/// The seed loader runs only when the persistence adapter reports absence
/// (which includes a malformed durable value). A seed failure never escapes:
/// it yields an empty store and [`InitOutcome::Failed`].
///
/// # Errors
///
/// Returns an error only if the durable store itself cannot be read.
#[instrument(skip_all, fields(key = %persistence.key()))]
pub fn bootstrap(
    persistence: PersistenceAdapter,
    seed: &SeedLoader,
) -> Result<(RecordStore, InitOutcome)> {
    if let Some(records) = persistence.load()? {
        let count = records.len();
        tracing::info!(count, "Restored links from durable store");
        return Ok((RecordStore::new(persistence, records), InitOutcome::Restored { count }));
    }

    match seed.fetch_seed() {
        Ok(records) => {
            let count = records.len();
            let store = RecordStore::new(persistence, records);
            let save_error = store.persist().err().map(|e| {
                tracing::warn!(error = %e, "Failed to persist seeded links");
                e.to_string()
            });
            Ok((store, InitOutcome::Seeded { count, save_error }))
        },
        Err(e) => {
            tracing::warn!(error = %e, "Starting with an empty collection");
            Ok((
                RecordStore::new(persistence, Vec::new()),
                InitOutcome::Failed {
                    error: e.to_string(),
                },
            ))
        },
    }
}
