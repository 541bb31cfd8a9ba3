//! The interactive query builder.
//!
//! Building an operation for a root field takes three steps:
//!
//! 1. [`collect_arguments`] prompts for each argument on a line-oriented stream
//!    and decodes the answers into [`ArgumentValues`].
//! 2. [`selection_for_field`] picks a selection set, either from the operator's
//!    text or automatically, and renders it with [`render_selection`].
//! 3. [`build_operation`] assembles the final operation text.

mod args;
mod error;
mod operation;
mod selection;

pub use args::{collect_arguments, parse_value, ArgValue, ArgumentValues};
pub use error::{QueryError, Result};
pub use gqlsh_schema::OperationType;
pub use operation::{build_operation, format_argument};
pub use selection::{
    auto_select, parse_selection, render_selection, selection_for_field, validate_selection,
    SelectedField, DEFAULT_SELECTION_DEPTH, MAX_SELECTION_DEPTH,
};
