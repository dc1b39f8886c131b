//! Interactive shell over the interaction controller.
//!
//! One command per line; the screen is redrawn after every command. Failed
//! actions show up on the status line and never end the session.

use super::{output_error, row_to_position};
use crate::services::InteractionController;
use crate::{Error, Result};
use std::io::{BufRead, Write};
use std::str::FromStr;

const HELP: &str = "\
commands:
  list                 show the table
  search [TERM]        filter by title (no TERM clears the search)
  add                  open the add form
  edit ROW             open the edit form for a row
  delete ROW           ask to delete a row
  title TEXT           set the form title
  url TEXT             set the form url
  star | unstar        set the form's starred box
  save                 submit the form
  confirm              confirm a pending delete
  cancel               close the form or confirmation
  dismiss              clear the status line
  help                 show this help
  quit                 leave the shell
";

/// A parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// Redraw the screen.
    List,
    /// Change the search term.
    Search(String),
    /// Open the add form.
    Add,
    /// Open the edit form for a 1-based row.
    Edit(usize),
    /// Ask to delete a 1-based row.
    Delete(usize),
    /// Set the form title.
    SetTitle(String),
    /// Set the form url.
    SetUrl(String),
    /// Set the form's starred box.
    SetStarred(bool),
    /// Submit the form.
    Save,
    /// Confirm the pending delete.
    Confirm,
    /// Close the open modal.
    Cancel,
    /// Clear the status line.
    Dismiss,
    /// Show help.
    Help,
    /// Leave the shell.
    Quit,
}

impl FromStr for ShellCommand {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(w, r)| (w, r.trim()));

        let command = match word.to_lowercase().as_str() {
            "" | "list" | "ls" => Self::List,
            "search" | "/" => Self::Search(rest.to_string()),
            "add" | "new" => Self::Add,
            "edit" => Self::Edit(parse_row(rest)?),
            "delete" | "rm" => Self::Delete(parse_row(rest)?),
            "title" => Self::SetTitle(rest.to_string()),
            "url" => Self::SetUrl(rest.to_string()),
            "star" => Self::SetStarred(true),
            "unstar" => Self::SetStarred(false),
            "save" | "submit" => Self::Save,
            "confirm" | "yes" => Self::Confirm,
            "cancel" | "no" => Self::Cancel,
            "dismiss" => Self::Dismiss,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => {
                return Err(Error::InvalidInput(format!(
                    "unknown command '{other}' (try 'help')"
                )));
            },
        };
        Ok(command)
    }
}

impl ShellCommand {
    /// Applies the command to the controller.
    ///
    /// # Errors
    ///
    /// Returns the controller's error for a rejected action.
    pub fn apply(&self, controller: &mut InteractionController) -> Result<()> {
        match self {
            Self::List | Self::Help | Self::Quit => Ok(()),
            Self::Search(term) => {
                controller.set_search(term.as_str());
                Ok(())
            },
            Self::Add => controller.request_add(),
            Self::Edit(row) => controller.request_edit(row_to_position(*row)?),
            Self::Delete(row) => controller.request_delete(row_to_position(*row)?),
            Self::SetTitle(title) => {
                controller.draft_mut()?.title.clone_from(title);
                Ok(())
            },
            Self::SetUrl(url) => {
                controller.draft_mut()?.url.clone_from(url);
                Ok(())
            },
            Self::SetStarred(starred) => {
                controller.draft_mut()?.starred = *starred;
                Ok(())
            },
            Self::Save => controller.submit(),
            Self::Confirm => controller.confirm_delete(),
            Self::Cancel => {
                controller.cancel();
                Ok(())
            },
            Self::Dismiss => {
                controller.dismiss_status();
                Ok(())
            },
        }
    }
}

fn parse_row(arg: &str) -> Result<usize> {
    match arg.parse::<usize>() {
        Ok(row) if row > 0 => Ok(row),
        _ => Err(Error::InvalidInput(format!(
            "expected a row number from 1, got '{arg}'"
        ))),
    }
}

/// Runs the shell until `quit` or end of input.
///
/// # Errors
///
/// Returns an error only if reading input or writing output fails.
pub fn run_shell(
    controller: &mut InteractionController,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    write!(out, "{}", controller.screen()).map_err(|e| output_error(&e))?;

    let mut line = String::new();
    loop {
        write!(out, "> ").map_err(|e| output_error(&e))?;
        out.flush().map_err(|e| output_error(&e))?;

        line.clear();
        let read = input.read_line(&mut line).map_err(|e| Error::OperationFailed {
            operation: "read_stdin".to_string(),
            cause: e.to_string(),
        })?;
        if read == 0 {
            writeln!(out).map_err(|e| output_error(&e))?;
            break;
        }

        match line.parse::<ShellCommand>() {
            Err(e) => writeln!(out, "[!] {e}").map_err(|e| output_error(&e))?,
            Ok(ShellCommand::Quit) => break,
            Ok(ShellCommand::Help) => write!(out, "{HELP}").map_err(|e| output_error(&e))?,
            Ok(command) => {
                // Rejected actions are already on the status line.
                let _ = command.apply(controller);
                write!(out, "{}", controller.screen()).map_err(|e| output_error(&e))?;
            },
        }
    }
    Ok(())
}
