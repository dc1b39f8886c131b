//! View rendering.
//!
//! Pure functions from the filtered link view to display structures.

mod table;

pub use table::{
    EMPTY_MESSAGE, ModalView, SEED_FAILED_MESSAGE, Screen, StatusLevel, StatusMessage, TableRow,
    TableView, render_table,
};
