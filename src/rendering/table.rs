//! Table view of link records.
//!
//! Rendering is a pure mapping from the filtered view (plus controller state)
//! to a display structure. The structure serializes to JSON for machine
//! output and implements `Display` for the terminal.

use crate::models::{LinkForm, LinkRecord};
use serde::Serialize;
use std::fmt::{self, Write};

/// Message shown when the filtered view has no rows.
pub const EMPTY_MESSAGE: &str = "No resources found. Try a different search.";

/// Status text shown when the seed document could not be loaded.
pub const SEED_FAILED_MESSAGE: &str = "Failed to load initial resources.";

/// Widest title column before truncation, in characters.
const MAX_TITLE_WIDTH: usize = 48;

/// Severity of an inline status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusLevel {
    /// Informational feedback.
    Info,
    /// A failure the user should see.
    Error,
}

/// Inline, dismissible status text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusMessage {
    /// Severity.
    pub level: StatusLevel,
    /// Text to show.
    pub text: String,
}

impl StatusMessage {
    /// Creates an informational message.
    #[must_use]
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Info,
            text: text.into(),
        }
    }

    /// Creates an error message.
    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Error,
            text: text.into(),
        }
    }
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = match self.level {
            StatusLevel::Info => "i",
            StatusLevel::Error => "!",
        };
        write!(f, "[{marker}] {}", self.text)
    }
}

/// One displayed row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    /// 1-based row number within the filtered view.
    pub row: usize,
    /// Starred indicator.
    pub starred: bool,
    /// Title.
    pub title: String,
    /// URL.
    pub url: String,
}

/// Rendered table: either rows or a distinct empty state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TableView {
    /// No records to show.
    Empty {
        /// Message displayed in place of the rows.
        message: String,
    },
    /// One row per record, in view order.
    Rows {
        /// The rows.
        rows: Vec<TableRow>,
    },
}

impl TableView {
    /// Returns the rows, or an empty slice for the empty state.
    #[must_use]
    pub fn rows(&self) -> &[TableRow] {
        match self {
            Self::Empty { .. } => &[],
            Self::Rows { rows } => rows,
        }
    }

    /// Returns `true` for the empty state.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty { .. })
    }
}

/// Renders a filtered view.
#[must_use]
pub fn render_table(records: &[&LinkRecord]) -> TableView {
    if records.is_empty() {
        return TableView::Empty {
            message: EMPTY_MESSAGE.to_string(),
        };
    }

    let rows = records
        .iter()
        .enumerate()
        .map(|(index, record)| TableRow {
            row: index + 1,
            starred: record.starred,
            title: record.title.clone(),
            url: record.url.clone(),
        })
        .collect();

    TableView::Rows { rows }
}

impl fmt::Display for TableView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = match self {
            Self::Empty { message } => return writeln!(f, "  {message}"),
            Self::Rows { rows } => rows,
        };

        let number_width = rows.len().to_string().len();
        let title_width = rows
            .iter()
            .map(|r| r.title.chars().count().min(MAX_TITLE_WIDTH))
            .max()
            .unwrap_or(0);

        for row in rows {
            let star = if row.starred { '★' } else { '☆' };
            writeln!(
                f,
                "{:>number_width$}  {star}  {:<title_width$}  {}",
                row.row,
                truncate(&row.title, MAX_TITLE_WIDTH),
                row.url,
            )?;
        }
        Ok(())
    }
}

/// Open modal as seen by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModalView {
    /// Add/edit form.
    Compose {
        /// `"Add New Resource"` or `"Edit Resource"`.
        heading: String,
        /// Current draft.
        form: LinkForm,
    },
    /// Delete confirmation.
    ConfirmDelete {
        /// Title of the record about to be deleted.
        title: String,
    },
}

impl fmt::Display for ModalView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compose { heading, form } => {
                writeln!(f, "-- {heading} --")?;
                writeln!(f, "  title:   {}", form.title)?;
                writeln!(f, "  url:     {}", form.url)?;
                writeln!(f, "  starred: {}", if form.starred { "yes" } else { "no" })
            },
            Self::ConfirmDelete { title } => {
                writeln!(f, "-- Delete \"{title}\"? (confirm / cancel) --")
            },
        }
    }
}

/// Everything the user currently sees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Screen {
    /// Active search term.
    pub search: String,
    /// Inline status line, if any.
    pub status: Option<StatusMessage>,
    /// Table of the filtered view.
    pub table: TableView,
    /// Open modal, if any.
    pub modal: Option<ModalView>,
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.search.is_empty() {
            writeln!(f, "search: \"{}\"", self.search)?;
        }
        if let Some(status) = &self.status {
            writeln!(f, "{status}")?;
        }
        write!(f, "{}", self.table)?;
        if let Some(modal) = &self.modal {
            write!(f, "{modal}")?;
        }
        Ok(())
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    let _ = out.write_char('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LinkId, LinkInput};

    fn records() -> Vec<LinkRecord> {
        vec![
            LinkRecord::from_input(LinkId::new("1"), LinkInput::new("Graphs", "http://g")),
            LinkRecord::from_input(
                LinkId::new("2"),
                LinkInput::new("DP", "http://dp").with_starred(true),
            ),
        ]
    }

    #[test]
    fn test_empty_state() {
        let view = render_table(&[]);
        assert!(view.is_empty());
        assert!(view.rows().is_empty());
        assert_eq!(view.to_string().trim(), EMPTY_MESSAGE);
    }

    #[test]
    fn test_rows_reflect_starred() {
        let all = records();
        let refs: Vec<&LinkRecord> = all.iter().collect();
        let view = render_table(&refs);

        let rows = view.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].row, 1);
        assert!(!rows[0].starred);
        assert!(rows[1].starred);
    }

    #[test]
    fn test_text_output() {
        let all = records();
        let refs: Vec<&LinkRecord> = all.iter().collect();
        let text = render_table(&refs).to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("1  ☆  Graphs"));
        assert!(lines[1].contains('★'));
        assert!(lines[1].ends_with("http://dp"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let all = records();
        let refs: Vec<&LinkRecord> = all.iter().collect();
        assert_eq!(render_table(&refs), render_table(&refs));
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(render_table(&[])).unwrap();
        assert_eq!(json["kind"], "empty");
        assert_eq!(json["message"], EMPTY_MESSAGE);
    }

    #[test]
    fn test_long_titles_truncated() {
        let long = "x".repeat(60);
        assert_eq!(truncate(&long, 10).chars().count(), 10);
        assert!(truncate(&long, 10).ends_with('…'));
        assert_eq!(truncate("short", 10), "short");
    }

    #[test]
    fn test_screen_shows_status_and_modal() {
        let screen = Screen {
            search: "gr".to_string(),
            status: Some(StatusMessage::error(SEED_FAILED_MESSAGE)),
            table: render_table(&[]),
            modal: Some(ModalView::ConfirmDelete {
                title: "Graphs".to_string(),
            }),
        };

        let text = screen.to_string();
        assert!(text.contains("search: \"gr\""));
        assert!(text.contains("[!] Failed to load initial resources."));
        assert!(text.contains("Delete \"Graphs\"?"));
    }
}
