//! Add CLI command.

use super::output_error;
use crate::Result;
use crate::models::LinkForm;
use crate::services::InteractionController;
use std::io::Write;

/// Adds a link at the front of the collection.
#[derive(Debug, Clone, Default)]
pub struct AddCommand {
    /// Title.
    pub title: String,
    /// URL.
    pub url: String,
    /// Whether to star the new link.
    pub starred: bool,
}

impl AddCommand {
    /// Opens the add form, fills it and submits.
    ///
    /// # Errors
    ///
    /// Returns an error if the title or url is blank, or the save fails.
    pub fn run(&self, controller: &mut InteractionController, out: &mut impl Write) -> Result<()> {
        controller.request_add()?;
        let form = LinkForm::new()
            .with_title(self.title.as_str())
            .with_url(self.url.as_str())
            .with_starred(self.starred);
        if let Err(e) = controller.submit_form(form) {
            controller.cancel();
            return Err(e);
        }

        writeln!(out, "Added \"{}\".", self.title.trim()).map_err(|e| output_error(&e))?;
        write!(out, "{}", controller.screen()).map_err(|e| output_error(&e))
    }
}
