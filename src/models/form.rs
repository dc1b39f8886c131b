//! Add/edit form draft.

use super::{LinkInput, LinkRecord};
use crate::{Error, Result};
use serde::Serialize;

/// Draft contents of the add/edit form.
///
/// Fields are kept as typed by the user; [`LinkForm::to_input`] trims them
/// and enforces that title and url are present.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct LinkForm {
    /// Title field.
    pub title: String,
    /// URL field.
    pub url: String,
    /// Starred checkbox.
    pub starred: bool,
}

impl LinkForm {
    /// Creates an empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a form pre-filled from an existing record.
    #[must_use]
    pub fn from_record(record: &LinkRecord) -> Self {
        Self {
            title: record.title.clone(),
            url: record.url.clone(),
            starred: record.starred,
        }
    }

    /// Sets the title field.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the URL field.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Sets the starred checkbox.
    #[must_use]
    pub const fn with_starred(mut self, starred: bool) -> Self {
        self.starred = starred;
        self
    }

    /// Validates the draft and converts it to a link input.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if title or url is blank.
    pub fn to_input(&self) -> Result<LinkInput> {
        let title = self.title.trim();
        let url = self.url.trim();
        if title.is_empty() || url.is_empty() {
            return Err(Error::InvalidInput(
                "title and url are required".to_string(),
            ));
        }
        Ok(LinkInput {
            title: title.to_string(),
            url: url.to_string(),
            starred: self.starred,
        })
    }
}
