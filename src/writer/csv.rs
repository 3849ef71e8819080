//! CSV writing: comma-delimited with a header row.

use csv::WriterBuilder;

use crate::error::{Error, Result};
use crate::model::Table;

/// Serialize a table as comma-delimited CSV with a header row.
///
/// Null cells become empty fields; quoting is applied only where needed.
pub fn write(table: &Table) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());

    writer
        .write_record(table.columns())
        .map_err(map_write_error)?;
    for row in table.rows() {
        let fields: Vec<String> = row.iter().map(|cell| cell.to_field()).collect();
        writer.write_record(&fields).map_err(map_write_error)?;
    }

    writer
        .into_inner()
        .map_err(|e| Error::Serialize(format!("CSV serialization error: {e}")))
}

fn map_write_error(error: csv::Error) -> Error {
    Error::Serialize(format!("CSV serialization error: {error}"))
}
