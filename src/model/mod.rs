//! Tabular model types.
//!
//! This module defines the intermediate representation that bridges format
//! readers and writers: a read-only table of named columns and scalar
//! cells, plus the paginated preview projection over it.

mod preview;
mod table;

pub use preview::PreviewResult;
pub use table::{CellValue, Table};
