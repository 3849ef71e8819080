//! JSON writing: a pretty-printed array of objects.

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::model::Table;

/// Serialize a table as a pretty-printed JSON array of objects.
///
/// Keys follow column order; null and non-finite cells serialize as JSON
/// null. Non-ASCII characters are left as literal Unicode.
pub fn write(table: &Table) -> Result<Vec<u8>> {
    let records: Vec<Value> = table
        .rows()
        .iter()
        .map(|row| {
            let mut object = Map::with_capacity(table.column_count());
            for (column, cell) in table.columns().iter().zip(row) {
                object.insert(column.clone(), cell.to_json());
            }
            Value::Object(object)
        })
        .collect();

    let text = serde_json::to_string_pretty(&records)
        .map_err(|e| Error::Serialize(format!("JSON serialization error: {e}")))?;
    Ok(text.into_bytes())
}
