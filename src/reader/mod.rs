//! Format readers producing the tabular model.
//!
//! Every reader has the same contract: raw bytes in, a validated [`Table`]
//! out, with a descriptive error for malformed input. A reader never
//! returns a table with zero data rows.

pub mod csv;
pub mod excel;
pub mod json;

use crate::detect::Format;
use crate::error::Result;
use crate::model::Table;

/// How readers interpret cell text.
///
/// One parsing algorithm per format, parameterized by mode: conversion
/// wants typed values, previews want the literal text the user uploaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Infer scalar types (numbers, booleans) per cell
    #[default]
    Typed,
    /// Keep every cell as its literal text, so `"007"` stays `"007"`
    Literal,
}

/// Parse raw bytes of the given format into a table.
///
/// The mode applies to CSV and Excel input; JSON values carry their types
/// in the grammar, so the JSON reader has no literal mode.
pub fn read_table(format: Format, content: &[u8], mode: ParseMode) -> Result<Table> {
    match format {
        Format::Json => json::read(content),
        Format::Csv => csv::read(content, mode),
        Format::Xlsx | Format::Xls => excel::read(content, mode),
    }
}
