//! The common tabular representation all formats convert through.

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::error::{Error, Result};

/// A single cell value.
///
/// Integer and floating-point values are kept apart so that whole numbers
/// survive a round trip as JSON integers. Non-finite floats are normalized
/// to null at every serialization edge.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Missing or empty value
    Null,
    /// Boolean
    Bool(bool),
    /// Whole number
    Integer(i64),
    /// Floating-point number
    Float(f64),
    /// Text
    Text(String),
}

impl CellValue {
    /// Check whether the value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Convert to a JSON value. NaN and infinities become null.
    pub fn to_json(&self) -> Value {
        match self {
            CellValue::Null => Value::Null,
            CellValue::Bool(b) => Value::Bool(*b),
            CellValue::Integer(i) => Value::Number((*i).into()),
            CellValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            CellValue::Text(s) => Value::String(s.clone()),
        }
    }

    /// The text form used for CSV fields. Null renders as the empty field.
    pub fn to_field(&self) -> String {
        match self {
            CellValue::Null => String::new(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Integer(i) => i.to_string(),
            CellValue::Float(f) if f.is_finite() => f.to_string(),
            CellValue::Float(_) => String::new(),
            CellValue::Text(s) => s.clone(),
        }
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            CellValue::Null => serializer.serialize_none(),
            CellValue::Bool(b) => serializer.serialize_bool(*b),
            CellValue::Integer(i) => serializer.serialize_i64(*i),
            CellValue::Float(f) if f.is_finite() => serializer.serialize_f64(*f),
            CellValue::Float(_) => serializer.serialize_none(),
            CellValue::Text(s) => serializer.serialize_str(s),
        }
    }
}

/// An in-memory table: ordered column names plus rows of cells.
///
/// Built fresh per call by a reader, consumed by a writer or a preview
/// slice, then discarded. Read-only after construction; every row is
/// exactly `columns.len()` wide with nulls standing in for absent values,
/// and a table with zero data rows cannot be constructed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl Table {
    /// Build a table, validating the row invariants.
    ///
    /// Returns `NoDataRows` for an empty row set and `Malformed` when a row
    /// width disagrees with the column count.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Result<Self> {
        if rows.is_empty() {
            return Err(Error::NoDataRows("table has no data rows".to_string()));
        }
        for (index, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(Error::Malformed(format!(
                    "row {} has {} cells, expected {}",
                    index + 1,
                    row.len(),
                    columns.len()
                )));
            }
        }
        Ok(Self { columns, rows })
    }

    /// Column names in first-seen order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// All data rows.
    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}
