//! Delete CLI command.
//!
//! # Usage
//!
//! ```bash
//! # Prompt before deleting row 2
//! linkdeck delete 2
//!
//! # Row 1 of the table filtered by "graph", no prompt
//! linkdeck delete 1 --search graph --yes
//! ```

use super::{output_error, row_to_position};
use crate::services::{InteractionController, Mode};
use crate::{Error, Result};
use std::io::{BufRead, Write};

/// Deletes the link at a row of the filtered table.
#[derive(Debug, Clone, Default)]
pub struct DeleteCommand {
    /// 1-based row in the table filtered by `search`.
    pub row: usize,
    /// Search term the row refers to.
    pub search: String,
    /// Skip the confirmation prompt.
    pub yes: bool,
}

impl DeleteCommand {
    /// Requests the delete, asks for confirmation on `input` unless `yes`,
    /// then confirms or cancels.
    ///
    /// # Errors
    ///
    /// Returns an error if the row does not exist, the prompt cannot be
    /// answered, or the save fails.
    pub fn run(
        &self,
        controller: &mut InteractionController,
        input: &mut impl BufRead,
        out: &mut impl Write,
    ) -> Result<()> {
        controller.set_search(self.search.as_str());
        controller.request_delete(row_to_position(self.row)?)?;

        let title = match controller.mode() {
            Mode::ConfirmingDelete(pending) => pending.title.clone(),
            _ => String::new(),
        };

        if !self.yes && !confirm(&format!("Delete \"{title}\"?"), input, out)? {
            controller.cancel();
            return writeln!(out, "Cancelled.").map_err(|e| output_error(&e));
        }

        controller.confirm_delete()?;
        writeln!(out, "Deleted \"{title}\".").map_err(|e| output_error(&e))?;
        write!(out, "{}", controller.screen()).map_err(|e| output_error(&e))
    }
}

/// Asks a y/N question. Anything but `y` or `yes` is a no.
///
/// # Errors
///
/// Returns an error if the prompt cannot be written or the answer read.
pub fn confirm(question: &str, input: &mut impl BufRead, out: &mut impl Write) -> Result<bool> {
    write!(out, "{question} [y/N] ").map_err(|e| output_error(&e))?;
    out.flush().map_err(|e| Error::OperationFailed {
        operation: "flush_stdout".to_string(),
        cause: e.to_string(),
    })?;

    let mut answer = String::new();
    input
        .read_line(&mut answer)
        .map_err(|e| Error::OperationFailed {
            operation: "read_stdin".to_string(),
            cause: e.to_string(),
        })?;

    let answer = answer.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LinkInput;
    use crate::services::RecordStore;
    use crate::storage::{MemoryStore, PersistenceAdapter};
    use std::io::Cursor;
    use std::sync::Arc;
    use test_case::test_case;

    fn controller() -> InteractionController {
        let persistence = PersistenceAdapter::new(Arc::new(MemoryStore::new()), "links").unwrap();
        let mut store = RecordStore::new(persistence, Vec::new());
        store.add(LinkInput::new("DP", "http://dp")).unwrap();
        store.add(LinkInput::new("Graphs", "http://g")).unwrap();
        InteractionController::new(store, None)
    }

    #[test_case("y\n", true)]
    #[test_case("YES\n", true)]
    #[test_case("n\n", false)]
    #[test_case("\n", false)]
    #[test_case("", false ; "eof")]
    fn test_confirm(answer: &str, expected: bool) {
        let mut out = Vec::new();
        let result = confirm("Delete?", &mut Cursor::new(answer), &mut out).unwrap();
        assert_eq!(result, expected);
        assert_eq!(String::from_utf8(out).unwrap(), "Delete? [y/N] ");
    }

    #[test]
    fn test_delete_with_yes() {
        let mut controller = controller();
        let mut out = Vec::new();

        DeleteCommand {
            row: 1,
            yes: true,
            ..DeleteCommand::default()
        }
        .run(&mut controller, &mut Cursor::new(""), &mut out)
        .unwrap();

        assert_eq!(controller.store().len(), 1);
        assert_eq!(controller.store().all()[0].title, "DP");
        assert!(String::from_utf8(out).unwrap().contains("Deleted \"Graphs\"."));
    }

    #[test]
    fn test_declined_prompt_keeps_record() {
        let mut controller = controller();
        let mut out = Vec::new();

        DeleteCommand {
            row: 2,
            ..DeleteCommand::default()
        }
        .run(&mut controller, &mut Cursor::new("n\n"), &mut out)
        .unwrap();

        assert_eq!(controller.store().len(), 2);
        assert!(controller.mode().is_idle());
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Delete \"DP\"? [y/N] "));
        assert!(text.ends_with("Cancelled.\n"));
    }

    #[test]
    fn test_row_zero_is_invalid() {
        let result = DeleteCommand {
            row: 0,
            yes: true,
            ..DeleteCommand::default()
        }
        .run(&mut controller(), &mut Cursor::new(""), &mut Vec::new());
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }
}
