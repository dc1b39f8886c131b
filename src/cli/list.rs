//! List CLI command.

use super::output_error;
use crate::services::InteractionController;
use crate::{Error, Result};
use std::io::Write;

/// Output format for `list`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Aligned text table.
    #[default]
    Text,
    /// Screen structure as JSON.
    Json,
}

/// Shows the filtered table.
#[derive(Debug, Clone, Default)]
pub struct ListCommand {
    /// Search term; empty shows everything.
    pub search: String,
    /// Output format.
    pub format: OutputFormat,
}

impl ListCommand {
    /// Renders the controller's screen for the search term.
    ///
    /// # Errors
    ///
    /// Returns an error if output cannot be written or serialized.
    pub fn run(&self, controller: &mut InteractionController, out: &mut impl Write) -> Result<()> {
        controller.set_search(self.search.as_str());
        let screen = controller.screen();

        match self.format {
            OutputFormat::Text => write!(out, "{screen}").map_err(|e| output_error(&e)),
            OutputFormat::Json => {
                let json =
                    serde_json::to_string_pretty(&screen).map_err(|e| Error::OperationFailed {
                        operation: "serialize_screen".to_string(),
                        cause: e.to_string(),
                    })?;
                writeln!(out, "{json}").map_err(|e| output_error(&e))
            },
        }
    }
}
