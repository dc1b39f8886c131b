//! Edit CLI command.

use super::{output_error, row_to_position};
use crate::models::LinkPatch;
use crate::services::InteractionController;
use crate::{Error, Result};
use std::io::Write;

/// Edits the link at a row of the filtered table.
///
/// Fields left as `None` keep their current value.
#[derive(Debug, Clone, Default)]
pub struct EditCommand {
    /// 1-based row in the table filtered by `search`.
    pub row: usize,
    /// Search term the row refers to.
    pub search: String,
    /// New title.
    pub title: Option<String>,
    /// New URL.
    pub url: Option<String>,
    /// New starred flag.
    pub starred: Option<bool>,
}

impl EditCommand {
    /// Returns the fields this command changes.
    #[must_use]
    pub fn patch(&self) -> LinkPatch {
        LinkPatch {
            title: self.title.clone(),
            url: self.url.clone(),
            starred: self.starred,
        }
    }

    /// Opens the edit form for the row, applies the given fields and submits.
    ///
    /// # Errors
    ///
    /// Returns an error if no field is given, the row does not exist, the
    /// edited form is invalid, or the save fails.
    pub fn run(&self, controller: &mut InteractionController, out: &mut impl Write) -> Result<()> {
        let patch = self.patch();
        if patch.is_empty() {
            return Err(Error::InvalidInput(
                "nothing to change: pass --title, --url or --starred".to_string(),
            ));
        }

        controller.set_search(self.search.as_str());
        controller.request_edit(row_to_position(self.row)?)?;

        let draft = controller.draft_mut()?;
        if let Some(title) = patch.title {
            draft.title = title;
        }
        if let Some(url) = patch.url {
            draft.url = url;
        }
        if let Some(starred) = patch.starred {
            draft.starred = starred;
        }

        if let Err(e) = controller.submit() {
            controller.cancel();
            return Err(e);
        }

        writeln!(out, "Updated row {}.", self.row).map_err(|e| output_error(&e))?;
        write!(out, "{}", controller.screen()).map_err(|e| output_error(&e))
    }
}
