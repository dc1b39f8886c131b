//! Interaction controller.
//!
//! Drives the record store from user intent through a small state machine:
//!
//! ```text
//!            add / edit(p)                 delete(p)
//!   Composing <───────────── Idle ─────────────────> ConfirmingDelete
//!       │  submit (valid) ──>  ^  <── confirm / cancel      │
//!       └──── cancel ──────────┘ └──────────────────────────┘
//! ```
//!
//! Positions always index the filtered view the user currently sees, and
//! they are resolved to a [`LinkId`] at request time. A pending edit or
//! delete carries that id; it is never re-derived from a position later.
//!
//! Every action returns `Result<()>`. On failure the controller also sets an
//! inline status message describing it, so a host can render the screen
//! after any outcome without inspecting the error.

use super::{RecordStore, SearchQuery, filter};
use crate::models::{LinkForm, LinkId, LinkPatch, LinkRecord};
use crate::rendering::{ModalView, Screen, StatusMessage, render_table};
use crate::{Error, Result};

/// Heading of the form when adding.
pub const ADD_HEADING: &str = "Add New Resource";

/// Heading of the form when editing.
pub const EDIT_HEADING: &str = "Edit Resource";

/// An open add/edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    /// Record being edited, or `None` when adding.
    pub editing: Option<LinkId>,
    /// Current form contents.
    pub form: LinkForm,
}

impl Draft {
    /// Returns the form heading.
    #[must_use]
    pub const fn heading(&self) -> &'static str {
        if self.editing.is_some() {
            EDIT_HEADING
        } else {
            ADD_HEADING
        }
    }
}

/// A delete waiting for confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    /// Record to delete, captured when the delete was requested.
    pub id: LinkId,
    /// Its title at request time, for the confirmation prompt.
    pub title: String,
}

/// Controller state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Mode {
    /// No modal open.
    #[default]
    Idle,
    /// Add/edit form open.
    Composing(Draft),
    /// Delete confirmation open.
    ConfirmingDelete(PendingDelete),
}

impl Mode {
    /// Returns a short name for messages and logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Composing(_) => "editing a resource",
            Self::ConfirmingDelete(_) => "confirming a delete",
        }
    }

    /// Returns `true` if no modal is open.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// Binds user actions to record store mutations.
pub struct InteractionController {
    store: RecordStore,
    search: String,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl InteractionController {
    /// Creates a controller over an initialized store.
    ///
    /// `status` is the initial status line, typically from
    /// [`super::InitOutcome::status`].
    #[must_use]
    pub fn new(store: RecordStore, status: Option<StatusMessage>) -> Self {
        Self {
            store,
            search: String::new(),
            mode: Mode::Idle,
            status,
        }
    }

    /// Returns the current state.
    #[must_use]
    pub const fn mode(&self) -> &Mode {
        &self.mode
    }

    /// Returns the status line, if any.
    #[must_use]
    pub const fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    /// Returns the active search term.
    #[must_use]
    pub fn search_term(&self) -> &str {
        &self.search
    }

    /// Returns the underlying store.
    #[must_use]
    pub const fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Returns the filtered view for the active search term.
    #[must_use]
    pub fn visible(&self) -> Vec<&LinkRecord> {
        filter(self.store.all(), &self.search)
    }

    /// Renders what the user currently sees.
    #[must_use]
    pub fn screen(&self) -> Screen {
        let modal = match &self.mode {
            Mode::Idle => None,
            Mode::Composing(draft) => Some(ModalView::Compose {
                heading: draft.heading().to_string(),
                form: draft.form.clone(),
            }),
            Mode::ConfirmingDelete(pending) => Some(ModalView::ConfirmDelete {
                title: pending.title.clone(),
            }),
        };

        Screen {
            search: self.search.clone(),
            status: self.status.clone(),
            table: render_table(&self.visible()),
            modal,
        }
    }

    /// Changes the search term. Accepted in every state.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
        metrics::counter!("search_queries_total").increment(1);
        tracing::debug!(term = %self.search, "Search changed");
    }

    /// Clears the status line.
    pub fn dismiss_status(&mut self) {
        self.status = None;
    }

    /// Opens an empty add form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTransition`] if a modal is already open.
    pub fn request_add(&mut self) -> Result<()> {
        self.require_idle("add a resource")?;
        self.mode = Mode::Composing(Draft {
            editing: None,
            form: LinkForm::new(),
        });
        Ok(())
    }

    /// Opens the edit form pre-filled with the record at `position` in the
    /// filtered view (0-based).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTransition`] if a modal is open, or
    /// [`Error::PositionOutOfRange`] if there is no such row.
    pub fn request_edit(&mut self, position: usize) -> Result<()> {
        self.require_idle("edit a resource")?;
        let record = self.resolve(position)?;
        self.mode = Mode::Composing(Draft {
            form: LinkForm::from_record(&record),
            editing: Some(record.id),
        });
        Ok(())
    }

    /// Gives mutable access to the open form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTransition`] if no form is open.
    pub fn draft_mut(&mut self) -> Result<&mut LinkForm> {
        let state = self.mode.name();
        match &mut self.mode {
            Mode::Composing(draft) => Ok(&mut draft.form),
            _ => Err(record_failure(
                &mut self.status,
                Error::InvalidTransition {
                    action: "edit the form",
                    state,
                },
            )),
        }
    }

    /// Replaces the open form's contents and submits it.
    ///
    /// # Errors
    ///
    /// See [`InteractionController::submit`].
    pub fn submit_form(&mut self, form: LinkForm) -> Result<()> {
        *self.draft_mut()? = form;
        self.submit()
    }

    /// Submits the open form: adds a record, or updates the one being edited.
    ///
    /// An invalid form keeps the form open. If the edited record has
    /// disappeared the form closes with a status message.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTransition`] if no form is open,
    /// [`Error::InvalidInput`] for a blank title or url,
    /// [`Error::NotFound`] if the edited record is gone, or a storage error.
    pub fn submit(&mut self) -> Result<()> {
        let draft = match &self.mode {
            Mode::Composing(draft) => draft.clone(),
            other => {
                let state = other.name();
                return Err(self.fail(Error::InvalidTransition {
                    action: "submit",
                    state,
                }));
            },
        };

        let input = match draft.form.to_input() {
            Ok(input) => input,
            Err(e) => return Err(self.fail(e)),
        };

        let result = match &draft.editing {
            Some(id) => self.store.update(id, LinkPatch::from(input)),
            None => self.store.add(input),
        };

        match result {
            Ok(record) => {
                tracing::debug!(link_id = %record.id, "Form submitted");
                self.mode = Mode::Idle;
                self.status = (!SearchQuery::new(&self.search).matches(&record)).then(|| {
                    StatusMessage::info(format!(
                        "Saved \"{}\". It is hidden by the current search.",
                        record.title
                    ))
                });
                Ok(())
            },
            Err(e @ Error::NotFound { .. }) => {
                self.mode = Mode::Idle;
                Err(self.fail(e))
            },
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Opens the delete confirmation for the record at `position` in the
    /// filtered view (0-based), capturing its id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTransition`] if a modal is open, or
    /// [`Error::PositionOutOfRange`] if there is no such row.
    pub fn request_delete(&mut self, position: usize) -> Result<()> {
        self.require_idle("delete a resource")?;
        let record = self.resolve(position)?;
        self.mode = Mode::ConfirmingDelete(PendingDelete {
            id: record.id,
            title: record.title,
        });
        Ok(())
    }

    /// Deletes the record captured by [`InteractionController::request_delete`].
    ///
    /// The confirmation closes whatever the outcome.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTransition`] if no delete is pending,
    /// [`Error::NotFound`] if the record is already gone, or a storage error.
    pub fn confirm_delete(&mut self) -> Result<()> {
        let pending = match std::mem::take(&mut self.mode) {
            Mode::ConfirmingDelete(pending) => pending,
            other => {
                let state = other.name();
                self.mode = other;
                return Err(self.fail(Error::InvalidTransition {
                    action: "confirm",
                    state,
                }));
            },
        };

        match self.store.remove(&pending.id) {
            Ok(_) => {
                self.status = None;
                Ok(())
            },
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Closes any open modal without changing the store.
    pub fn cancel(&mut self) {
        if !self.mode.is_idle() {
            tracing::debug!(state = self.mode.name(), "Modal cancelled");
        }
        self.mode = Mode::Idle;
    }

    fn require_idle(&mut self, action: &'static str) -> Result<()> {
        if self.mode.is_idle() {
            return Ok(());
        }
        let state = self.mode.name();
        Err(self.fail(Error::InvalidTransition { action, state }))
    }

    /// Resolves a filtered-view position to a snapshot of its record.
    fn resolve(&mut self, position: usize) -> Result<LinkRecord> {
        let (len, found) = {
            let view = self.visible();
            (view.len(), view.get(position).map(|r| (*r).clone()))
        };
        match found {
            Some(record) => Ok(record),
            None => Err(self.fail(Error::PositionOutOfRange { position, len })),
        }
    }

    /// Records `err` as the status line and hands it back.
    fn fail(&mut self, err: Error) -> Error {
        record_failure(&mut self.status, err)
    }
}

fn record_failure(status: &mut Option<StatusMessage>, err: Error) -> Error {
    if err.is_recoverable() {
        tracing::debug!(error = %err, "Action rejected");
    } else {
        tracing::warn!(error = %err, "Action failed");
    }
    *status = Some(status_for(&err));
    err
}

/// Maps an error to the inline text shown to the user.
#[must_use]
pub fn status_for(err: &Error) -> StatusMessage {
    match err {
        Error::PositionOutOfRange { position, .. } => {
            StatusMessage::error(format!("No resource at row {}.", position + 1))
        },
        Error::NotFound { .. } => StatusMessage::error("That resource no longer exists."),
        Error::InvalidInput(_) => StatusMessage::error("Title and URL are required."),
        Error::InvalidTransition { action, state } => {
            StatusMessage::error(format!("Cannot {action} while {state}."))
        },
        other => StatusMessage::error(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LinkInput;
    use crate::rendering::{StatusLevel, TableView};
    use crate::storage::{MemoryStore, PersistenceAdapter};
    use std::sync::Arc;

    fn controller_with(titles: &[&str]) -> InteractionController {
        let persistence = PersistenceAdapter::new(Arc::new(MemoryStore::new()), "links").unwrap();
        let mut store = RecordStore::new(persistence, Vec::new());
        for title in titles.iter().rev() {
            store
                .add(LinkInput::new(*title, format!("http://{}", title.to_lowercase())))
                .unwrap();
        }
        InteractionController::new(store, None)
    }

    fn titles(controller: &InteractionController) -> Vec<String> {
        controller
            .store()
            .all()
            .iter()
            .map(|r| r.title.clone())
            .collect()
    }

    #[test]
    fn test_add_flow() {
        let mut c = controller_with(&["Graphs"]);

        c.request_add().unwrap();
        assert!(matches!(c.mode(), Mode::Composing(d) if d.heading() == ADD_HEADING));

        c.submit_form(LinkForm::new().with_title("New").with_url("http://x"))
            .unwrap();

        assert!(c.mode().is_idle());
        assert_eq!(titles(&c), ["New", "Graphs"]);
    }

    #[test]
    fn test_edit_prefills_from_filtered_position() {
        let mut c = controller_with(&["Graphs", "DP", "Graph Theory"]);
        c.set_search("graph");

        c.request_edit(1).unwrap();

        let Mode::Composing(draft) = c.mode() else {
            panic!("expected composing");
        };
        assert_eq!(draft.heading(), EDIT_HEADING);
        assert_eq!(draft.form.title, "Graph Theory");
    }

    #[test]
    fn test_edit_submit_updates_in_place() {
        let mut c = controller_with(&["Graphs", "DP"]);

        c.request_edit(1).unwrap();
        c.draft_mut().unwrap().starred = true;
        c.submit().unwrap();

        let dp = &c.store().all()[1];
        assert_eq!(dp.title, "DP");
        assert!(dp.starred);
        assert_eq!(c.store().len(), 2);
    }

    #[test]
    fn test_invalid_form_stays_composing() {
        let mut c = controller_with(&[]);
        c.request_add().unwrap();

        let result = c.submit_form(LinkForm::new().with_title("  "));

        assert!(matches!(result, Err(Error::InvalidInput(_))));
        assert!(matches!(c.mode(), Mode::Composing(_)));
        assert_eq!(c.status().unwrap().text, "Title and URL are required.");
        assert!(c.store().is_empty());
    }

    #[test]
    fn test_cancel_discards_draft() {
        let mut c = controller_with(&["Graphs"]);
        c.request_edit(0).unwrap();
        c.draft_mut().unwrap().title = "Changed".to_string();

        c.cancel();

        assert!(c.mode().is_idle());
        assert_eq!(titles(&c), ["Graphs"]);
    }

    #[test]
    fn test_delete_flow() {
        let mut c = controller_with(&["Graphs", "DP"]);

        c.request_delete(0).unwrap();
        assert!(matches!(c.mode(), Mode::ConfirmingDelete(p) if p.title == "Graphs"));

        c.confirm_delete().unwrap();

        assert!(c.mode().is_idle());
        assert_eq!(titles(&c), ["DP"]);
    }

    #[test]
    fn test_delete_cancel_keeps_record() {
        let mut c = controller_with(&["Graphs"]);
        c.request_delete(0).unwrap();
        c.cancel();
        assert_eq!(titles(&c), ["Graphs"]);
    }

    #[test]
    fn test_delete_target_not_reresolved_after_search_change() {
        let mut c = controller_with(&["Graphs", "DP"]);
        c.request_delete(0).unwrap();

        c.set_search("dp");
        c.confirm_delete().unwrap();

        assert_eq!(titles(&c), ["DP"]);
    }

    #[test]
    fn test_out_of_range_position() {
        let mut c = controller_with(&["Graphs"]);

        let result = c.request_edit(3);

        assert!(matches!(
            result,
            Err(Error::PositionOutOfRange {
                position: 3,
                len: 1
            })
        ));
        assert!(c.mode().is_idle());
        assert_eq!(c.status().unwrap().text, "No resource at row 4.");
    }

    #[test]
    fn test_position_counts_filtered_rows_only() {
        let mut c = controller_with(&["Graphs", "DP"]);
        c.set_search("dp");
        assert!(c.request_delete(1).is_err());
    }

    #[test]
    fn test_stale_edit_reports_not_found() {
        let mut c = controller_with(&["Graphs"]);
        c.request_edit(0).unwrap();
        let Mode::Composing(draft) = c.mode().clone() else {
            panic!("expected composing");
        };
        c.store.remove(draft.editing.as_ref().unwrap()).unwrap();

        let result = c.submit();

        assert!(matches!(result, Err(Error::NotFound { .. })));
        assert!(c.mode().is_idle());
        assert_eq!(c.status().unwrap().text, "That resource no longer exists.");
    }

    #[test]
    fn test_invalid_transitions() {
        let mut c = controller_with(&["Graphs"]);

        assert!(matches!(
            c.confirm_delete(),
            Err(Error::InvalidTransition { .. })
        ));
        assert!(c.submit().is_err());
        assert!(c.draft_mut().is_err());

        c.request_add().unwrap();
        assert!(c.request_delete(0).is_err());
        assert!(matches!(c.mode(), Mode::Composing(_)));
        assert_eq!(
            c.status().unwrap().text,
            "Cannot delete a resource while editing a resource."
        );
    }

    #[test]
    fn test_status_dismiss_and_clear_on_success() {
        let mut c = controller_with(&["Graphs"]);
        let _ = c.request_edit(9);
        assert!(c.status().is_some());

        c.dismiss_status();
        assert!(c.status().is_none());

        let _ = c.request_edit(9);
        c.request_add().unwrap();
        c.submit_form(LinkForm::new().with_title("A").with_url("http://a"))
            .unwrap();
        assert!(c.status().is_none());
    }

    #[test]
    fn test_saved_record_hidden_by_search_gets_info_status() {
        let mut c = controller_with(&["Graphs", "DP"]);
        c.set_search("graph");

        c.request_add().unwrap();
        c.submit_form(LinkForm::new().with_title("Heaps").with_url("http://h"))
            .unwrap();

        let status = c.status().unwrap();
        assert_eq!(status.level, StatusLevel::Info);
        assert_eq!(
            status.text,
            "Saved \"Heaps\". It is hidden by the current search."
        );
        assert_eq!(c.visible().len(), 1);

        c.request_add().unwrap();
        c.submit_form(LinkForm::new().with_title("Graph Coloring").with_url("http://c"))
            .unwrap();
        assert!(c.status().is_none());
    }

    #[test]
    fn test_form_access_while_idle_sets_status() {
        let mut c = controller_with(&["Graphs"]);

        assert!(matches!(
            c.draft_mut(),
            Err(Error::InvalidTransition { state: "idle", .. })
        ));
        assert_eq!(c.status().unwrap().text, "Cannot edit the form while idle.");
    }

    #[test]
    fn test_screen_reflects_search_and_modal() {
        let mut c = controller_with(&["Graphs", "DP"]);
        c.set_search("gr");
        c.request_delete(0).unwrap();

        let screen = c.screen();

        assert_eq!(screen.search, "gr");
        assert_eq!(screen.table.rows().len(), 1);
        assert!(matches!(screen.modal, Some(ModalView::ConfirmDelete { .. })));
    }

    #[test]
    fn test_screen_empty_state() {
        let mut c = controller_with(&["Graphs"]);
        c.set_search("nothing matches");
        assert!(matches!(c.screen().table, TableView::Empty { .. }));
    }

    #[test]
    fn test_status_for_storage_error() {
        let status = status_for(&Error::OperationFailed {
            operation: "write_value_file".to_string(),
            cause: "disk full".to_string(),
        });
        assert_eq!(status.level, StatusLevel::Error);
        assert!(status.text.contains("disk full"));
    }
}
