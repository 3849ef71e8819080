//! JSON reading with one-level flattening.
//!
//! Accepted top-level shapes:
//! - a non-empty array of objects (one row per object)
//! - an object whose first property holding a non-empty array supplies the
//!   rows
//! - any other non-empty object, read as a single-row table
//!
//! Nested objects flatten one level into dot-joined columns; anything
//! deeper, and any array value, is re-serialized to a JSON string.

use std::collections::{HashMap, HashSet};

use serde_json::Value;

use crate::error::{Error, Result};
use crate::model::{CellValue, Table};

/// Parse JSON bytes into a table.
pub fn read(content: &[u8]) -> Result<Table> {
    let text = std::str::from_utf8(content)
        .map_err(|e| Error::Encoding(format!("JSON input is not valid UTF-8: {e}")))?;
    let data: Value =
        serde_json::from_str(text).map_err(|e| Error::Malformed(format!("invalid JSON: {e}")))?;

    let records = select_records(data)?;
    let flat: Vec<Vec<(String, CellValue)>> = records
        .iter()
        .map(flatten_record)
        .collect::<Result<_>>()?;

    // Union of keys in first-encountered order across all rows
    let mut columns: Vec<String> = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();
    for row in &flat {
        for (column, _) in row {
            if seen.insert(column.as_str()) {
                columns.push(column.clone());
            }
        }
    }

    let rows = flat
        .iter()
        .map(|cells| {
            let mut by_column: HashMap<&str, &CellValue> =
                cells.iter().map(|(column, cell)| (column.as_str(), cell)).collect();
            columns
                .iter()
                .map(|column| {
                    by_column
                        .remove(column.as_str())
                        .cloned()
                        .unwrap_or(CellValue::Null)
                })
                .collect()
        })
        .collect();

    Table::new(columns, rows)
}

/// Pick the list of row objects out of the top-level value.
fn select_records(data: Value) -> Result<Vec<Value>> {
    match data {
        Value::Array(items) => {
            if items.is_empty() {
                return Err(Error::EmptyInput("JSON array is empty".to_string()));
            }
            Ok(items)
        }
        Value::Object(map) => {
            if map.is_empty() {
                return Err(Error::EmptyInput("JSON object is empty".to_string()));
            }
            let nested = map.values().find_map(|value| match value {
                Value::Array(items) if !items.is_empty() => Some(items.clone()),
                _ => None,
            });
            match nested {
                Some(items) => Ok(items),
                None => Ok(vec![Value::Object(map)]),
            }
        }
        _ => Err(Error::UnsupportedShape(
            "JSON must be an array of objects or an object".to_string(),
        )),
    }
}

/// Flatten one record by a single level of nesting.
fn flatten_record(record: &Value) -> Result<Vec<(String, CellValue)>> {
    let Value::Object(object) = record else {
        return Err(Error::UnsupportedShape(
            "JSON array must contain objects".to_string(),
        ));
    };

    let mut cells = Vec::with_capacity(object.len());
    for (key, value) in object {
        match value {
            Value::Object(nested) => {
                for (nested_key, nested_value) in nested {
                    let column = format!("{key}.{nested_key}");
                    // One level only: deeper structures become JSON text
                    let cell = match nested_value {
                        Value::Object(_) | Value::Array(_) => {
                            CellValue::Text(stringify(nested_value)?)
                        }
                        scalar => scalar_cell(scalar),
                    };
                    cells.push((column, cell));
                }
            }
            Value::Array(_) => cells.push((key.clone(), CellValue::Text(stringify(value)?))),
            scalar => cells.push((key.clone(), scalar_cell(scalar))),
        }
    }
    Ok(cells)
}

fn scalar_cell(value: &Value) -> CellValue {
    match value {
        Value::Null => CellValue::Null,
        Value::Bool(b) => CellValue::Bool(*b),
        Value::Number(n) => n
            .as_i64()
            .map(CellValue::Integer)
            .or_else(|| n.as_f64().map(CellValue::Float))
            .unwrap_or(CellValue::Null),
        Value::String(s) => CellValue::Text(s.clone()),
        // Containers are handled by the caller; kept total for safety
        other => CellValue::Text(other.to_string()),
    }
}

fn stringify(value: &Value) -> Result<String> {
    serde_json::to_string(value).map_err(|e| Error::Serialize(e.to_string()))
}
