//! Link record types and identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a link record.
///
/// Generated once at creation and never reused or changed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinkId(String);

impl LinkId {
    /// Creates a link ID from an existing string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh collision-resistant ID (UUID v4).
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for LinkId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for LinkId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A bookmarked link entry.
///
/// This is also the persisted shape: the durable value is a JSON array of
/// these objects in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    /// Unique identifier.
    pub id: LinkId,
    /// Display title.
    pub title: String,
    /// Target URL (not validated beyond being non-empty).
    pub url: String,
    /// Whether the link is starred.
    #[serde(default)]
    pub starred: bool,
}

impl LinkRecord {
    /// Builds a record from an input and an already assigned ID.
    #[must_use]
    pub fn from_input(id: LinkId, input: LinkInput) -> Self {
        Self {
            id,
            title: input.title,
            url: input.url,
            starred: input.starred,
        }
    }

    /// Merges a patch into this record, leaving omitted fields untouched.
    ///
    /// The ID is never part of a patch.
    pub fn apply(&mut self, patch: LinkPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(url) = patch.url {
            self.url = url;
        }
        if let Some(starred) = patch.starred {
            self.starred = starred;
        }
    }
}

/// A link without an identity, as found in the seed document or a submitted form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LinkInput {
    /// Display title.
    pub title: String,
    /// Target URL.
    pub url: String,
    /// Whether the link is starred.
    #[serde(default)]
    pub starred: bool,
}

impl LinkInput {
    /// Creates an unstarred input.
    #[must_use]
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            starred: false,
        }
    }

    /// Sets the starred flag.
    #[must_use]
    pub const fn with_starred(mut self, starred: bool) -> Self {
        self.starred = starred;
        self
    }

    /// Checks that title and url are non-blank.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidInput`] naming the first blank field.
    pub fn validate(&self) -> crate::Result<()> {
        require_non_blank("title", &self.title)?;
        require_non_blank("url", &self.url)
    }
}

/// A partial update to a link record.
///
/// `None` fields are left unchanged when the patch is applied.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LinkPatch {
    /// New title.
    pub title: Option<String>,
    /// New URL.
    pub url: Option<String>,
    /// New starred flag.
    pub starred: Option<bool>,
}

impl LinkPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the URL.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Sets the starred flag.
    #[must_use]
    pub const fn with_starred(mut self, starred: bool) -> Self {
        self.starred = Some(starred);
        self
    }

    /// Returns `true` if the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.url.is_none() && self.starred.is_none()
    }

    /// Checks that any provided title or url is non-blank.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidInput`] naming the first blank field.
    pub fn validate(&self) -> crate::Result<()> {
        if let Some(title) = &self.title {
            require_non_blank("title", title)?;
        }
        if let Some(url) = &self.url {
            require_non_blank("url", url)?;
        }
        Ok(())
    }
}

impl From<LinkInput> for LinkPatch {
    fn from(input: LinkInput) -> Self {
        Self {
            title: Some(input.title),
            url: Some(input.url),
            starred: Some(input.starred),
        }
    }
}

fn require_non_blank(field: &str, value: &str) -> crate::Result<()> {
    if value.trim().is_empty() {
        return Err(crate::Error::InvalidInput(format!("{field} cannot be empty")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> LinkRecord {
        LinkRecord::from_input(
            LinkId::new("id-1"),
            LinkInput::new("Graphs", "https://example.com/graphs"),
        )
    }

    #[test]
    fn test_generate_is_unique() {
        let a = LinkId::generate();
        let b = LinkId::generate();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 36);
    }

    #[test]
    fn test_apply_keeps_omitted_fields() {
        let mut link = record();
        link.apply(LinkPatch::new().with_starred(true));

        assert_eq!(link.title, "Graphs");
        assert_eq!(link.url, "https://example.com/graphs");
        assert!(link.starred);
        assert_eq!(link.id.as_str(), "id-1");
    }

    #[test]
    fn test_apply_replaces_given_fields() {
        let mut link = record();
        link.apply(LinkPatch::new().with_title("DP").with_url("http://x"));

        assert_eq!(link.title, "DP");
        assert_eq!(link.url, "http://x");
        assert!(!link.starred);
    }

    #[test]
    fn test_input_validation() {
        assert!(LinkInput::new("t", "u").validate().is_ok());
        assert!(LinkInput::new("  ", "u").validate().is_err());
        assert!(LinkInput::new("t", "").validate().is_err());
    }

    #[test]
    fn test_patch_validation() {
        assert!(LinkPatch::new().validate().is_ok());
        assert!(LinkPatch::new().with_title("").validate().is_err());
        assert!(LinkPatch::new().with_url(" ").validate().is_err());
    }

    #[test]
    fn test_input_starred_defaults_to_false() {
        let input: LinkInput =
            serde_json::from_str(r#"{"title": "A", "url": "http://a"}"#).unwrap();
        assert!(!input.starred);
    }

    #[test]
    fn test_record_json_shape() {
        let json = serde_json::to_value(record()).unwrap();
        assert_eq!(json["id"], "id-1");
        assert_eq!(json["title"], "Graphs");
        assert_eq!(json["starred"], false);
    }
}
