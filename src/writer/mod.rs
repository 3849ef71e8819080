//! Format writers consuming the tabular model.
//!
//! Every writer has the same contract: a borrowed [`Table`] in, output
//! bytes out. Writers never mutate the table, so any writer can follow any
//! reader.

pub mod csv;
pub mod excel;
pub mod json;

use crate::detect::Format;
use crate::error::{Error, Result};
use crate::model::Table;

/// Serialize a table into the given output format.
pub fn write_table(format: Format, table: &Table) -> Result<Vec<u8>> {
    match format {
        Format::Json => json::write(table),
        Format::Csv => csv::write(table),
        Format::Xlsx => excel::write(table),
        Format::Xls => Err(Error::Serialize(
            "writing legacy .xls workbooks is not supported".to_string(),
        )),
    }
}
