//! Status CLI command.

use super::{CommandContext, output_error};
use crate::Result;
use crate::observability::MetricsHandle;
use crate::services::{InitOutcome, InteractionController};
use std::io::Write;

/// Shows where links are kept and what startup did.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusCommand;

impl StatusCommand {
    /// Creates a new status command.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Writes the status report, followed by a metrics snapshot when a
    /// recorder is installed.
    ///
    /// # Errors
    ///
    /// Returns an error if output cannot be written.
    pub fn run(
        self,
        context: &CommandContext,
        controller: &InteractionController,
        outcome: &InitOutcome,
        metrics: Option<&MetricsHandle>,
        out: &mut impl Write,
    ) -> Result<()> {
        let store = controller.store();
        let starred = store.all().iter().filter(|r| r.starred).count();

        let startup = match outcome {
            InitOutcome::Restored { count } => format!("restored {count} links"),
            InitOutcome::Seeded {
                count,
                save_error: None,
            } => format!("seeded {count} links"),
            InitOutcome::Seeded {
                count,
                save_error: Some(cause),
            } => format!("seeded {count} links (not saved: {cause})"),
            InitOutcome::Failed { error } => format!("seed failed: {error}"),
        };

        let lines = [
            format!("storage: {}", store.persistence().describe()),
            format!("seed:    {}", context.config.seed.location),
            format!("startup: {startup}"),
            format!("links:   {} ({starred} starred)", store.len()),
        ];
        for line in lines {
            writeln!(out, "{line}").map_err(|e| output_error(&e))?;
        }

        if let Some(metrics) = metrics {
            writeln!(out, "\n{}", metrics.render()).map_err(|e| output_error(&e))?;
        }
        Ok(())
    }
}
