//! CLI command implementations.
//!
//! Each submodule implements one command of the `linkdeck` binary. Every
//! command except `reset` bootstraps the record store first.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `list` | Show the filtered table |
//! | `add` | Add a link at the front of the collection |
//! | `edit` | Edit the link at a row of the filtered table |
//! | `delete` | Delete the link at a row, after confirmation |
//! | `shell` | Interactive session over the controller |
//! | `reset` | Clear durable state so the next start re-seeds |
//! | `status` | Show paths, record count and metrics |
//!
//! # Example Usage
//!
//! ```bash
//! linkdeck list --search graph
//! linkdeck add --title "Graph Theory" --url https://example.com/graphs --starred
//! linkdeck edit 2 --search graph --starred false
//! linkdeck delete 1 --yes
//! ```

mod add;
mod delete;
mod edit;
mod list;
mod reset;
mod shell;
mod status;

pub use add::AddCommand;
pub use delete::{DeleteCommand, confirm};
pub use edit::EditCommand;
pub use list::{ListCommand, OutputFormat};
pub use reset::ResetCommand;
pub use shell::{ShellCommand, run_shell};
pub use status::StatusCommand;

use crate::config::LinkdeckConfig;
use crate::services::{InitOutcome, InteractionController, SeedLoader, bootstrap, source_for_location};
use crate::storage::{DurableStore, FilesystemStore, MemoryStore, PersistenceAdapter};
use crate::{Error, Result};
use std::sync::Arc;

/// Everything a command needs to open the collection.
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// Resolved configuration.
    pub config: LinkdeckConfig,
    /// Keep state in memory only; nothing is read from or written to disk.
    pub ephemeral: bool,
}

impl CommandContext {
    /// Creates a context.
    #[must_use]
    pub const fn new(config: LinkdeckConfig, ephemeral: bool) -> Self {
        Self { config, ephemeral }
    }

    /// Opens the persistence adapter for the configured durable store.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage key is invalid.
    pub fn persistence(&self) -> Result<PersistenceAdapter> {
        let store: Arc<dyn DurableStore> = if self.ephemeral {
            Arc::new(MemoryStore::new())
        } else {
            Arc::new(FilesystemStore::new(&self.config.data_dir))
        };
        PersistenceAdapter::new(store, self.config.storage_key.as_str())
    }

    /// Builds the seed loader for the configured location.
    #[must_use]
    pub fn seed_loader(&self) -> SeedLoader {
        let seed = &self.config.seed;
        SeedLoader::new(source_for_location(&seed.location, seed.http_config()))
    }

    /// Bootstraps the store and wraps it in a controller.
    ///
    /// The controller starts with the startup status line, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the durable store cannot be read.
    pub fn start(&self) -> Result<(InteractionController, InitOutcome)> {
        let (store, outcome) = bootstrap(self.persistence()?, &self.seed_loader())?;
        let controller = InteractionController::new(store, outcome.status());
        Ok((controller, outcome))
    }
}

/// Converts a 1-based row number from the command line to a position.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] for row 0.
pub fn row_to_position(row: usize) -> Result<usize> {
    row.checked_sub(1)
        .ok_or_else(|| Error::InvalidInput("rows are numbered from 1".to_string()))
}

/// Maps an output I/O failure.
pub(crate) fn output_error(e: &std::io::Error) -> Error {
    Error::OperationFailed {
        operation: "write_output".to_string(),
        cause: e.to_string(),
    }
}
