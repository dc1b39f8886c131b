//! Reset CLI command.

use super::{CommandContext, output_error};
use crate::Result;
use std::io::Write;

/// Clears the durable collection so the next start re-seeds.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResetCommand;

impl ResetCommand {
    /// Creates a new reset command.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Removes the saved collection without bootstrapping.
    ///
    /// # Errors
    ///
    /// Returns an error if the durable store cannot be modified.
    pub fn run(self, context: &CommandContext, out: &mut impl Write) -> Result<()> {
        let persistence = context.persistence()?;
        let message = if persistence.clear()? {
            format!("Cleared {}.", persistence.describe())
        } else {
            format!("Nothing saved in {}.", persistence.describe())
        };
        writeln!(out, "{message}").map_err(|e| output_error(&e))
    }
}
