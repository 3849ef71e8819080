//! Excel reading via calamine: the XLSX engine first, then the legacy XLS
//! engine, with the failure pair classified into a single descriptive error.

use std::io::Cursor;

use calamine::{Data, Range, Reader, Xls, Xlsx};

use super::ParseMode;
use crate::error::{Error, Result};
use crate::model::{CellValue, Table};

/// Parse Excel bytes (.xlsx or .xls) into a table.
///
/// Only the first worksheet is read. The first row supplies the column
/// names; rows that are entirely empty are skipped.
pub fn read(content: &[u8], mode: ParseMode) -> Result<Table> {
    let range = first_sheet_range(content)?;

    let mut sheet_rows = range.rows();
    let Some(header_row) = sheet_rows.next() else {
        return Err(no_data_error());
    };
    let columns: Vec<String> = header_row
        .iter()
        .enumerate()
        .map(|(index, cell)| header_name(cell, index))
        .collect();

    let mut rows = Vec::new();
    for row in sheet_rows {
        if row.iter().all(|cell| matches!(cell, Data::Empty)) {
            continue;
        }
        rows.push(row.iter().map(|cell| convert_cell(cell, mode)).collect());
    }

    if rows.is_empty() {
        return Err(no_data_error());
    }

    Table::new(columns, rows)
}

fn no_data_error() -> Error {
    Error::NoDataRows(
        "Excel file has no data. The first sheet is empty or contains only headers \
         with no data rows."
            .to_string(),
    )
}

/// Open the first worksheet, trying the modern engine before the legacy one.
fn first_sheet_range(content: &[u8]) -> Result<Range<Data>> {
    let xlsx_error = match open_first_sheet::<Xlsx<_>>(content) {
        Ok(range) => return Ok(range),
        Err(message) => message,
    };

    log::warn!("XLSX engine failed ({xlsx_error}); retrying with the legacy XLS engine");
    let xls_error = match open_first_sheet::<Xls<_>>(content) {
        Ok(range) => return Ok(range),
        Err(message) => message,
    };

    Err(classify_failure(&xlsx_error, &xls_error))
}

fn open_first_sheet<R>(content: &[u8]) -> std::result::Result<Range<Data>, String>
where
    R: Reader<Cursor<Vec<u8>>>,
    R::Error: std::fmt::Display,
{
    let mut workbook = R::new(Cursor::new(content.to_vec())).map_err(|e| e.to_string())?;
    match workbook.worksheet_range_at(0) {
        Some(Ok(range)) => Ok(range),
        Some(Err(e)) => Err(e.to_string()),
        None => Err("workbook contains no worksheets".to_string()),
    }
}

/// Turn the (xlsx, xls) engine failure pair into one descriptive error.
fn classify_failure(xlsx_error: &str, xls_error: &str) -> Error {
    let xlsx_lower = xlsx_error.to_ascii_lowercase();
    let xls_lower = xls_error.to_ascii_lowercase();

    if xlsx_lower.contains("zip") {
        Error::Malformed(
            "Invalid Excel file: the file appears to be corrupted or is not a valid \
             Excel file. Check that it opens correctly in Excel."
                .to_string(),
        )
    } else if xls_lower.contains("unsupported") || xls_lower.contains("not supported") {
        Error::Malformed(
            "Unsupported Excel format. Save the file as .xlsx (Excel 2007+) or \
             .xls (Excel 97-2003)."
                .to_string(),
        )
    } else {
        Error::Malformed(format!(
            "Could not read Excel file. The file may be corrupted, password-protected, \
             or in an unsupported format. Details: {xlsx_error}"
        ))
    }
}

/// Column name for a header cell; blanks get the positional fallback name.
fn header_name(cell: &Data, index: usize) -> String {
    match literal_text(cell) {
        Some(name) if !name.trim().is_empty() => name,
        _ => format!("Unnamed: {index}"),
    }
}

fn convert_cell(cell: &Data, mode: ParseMode) -> CellValue {
    match mode {
        ParseMode::Typed => typed_cell(cell),
        ParseMode::Literal => literal_text(cell)
            .map(CellValue::Text)
            .unwrap_or(CellValue::Null),
    }
}

fn typed_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Null,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Int(i) => CellValue::Integer(*i),
        Data::Float(f) if f.is_nan() => CellValue::Null,
        Data::Float(f) => CellValue::Float(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => datetime_text(dt).map(CellValue::Text).unwrap_or(CellValue::Null),
        Data::DateTimeIso(s) => CellValue::Text(s.clone()),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
        // Error cells surface as their Excel literal, e.g. #DIV/0!
        Data::Error(e) => CellValue::Text(e.to_string()),
    }
}

/// The literal text of a cell, or None for an empty cell.
fn literal_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) => Some(s.clone()),
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) if f.is_nan() => None,
        Data::Float(f) => Some(f.to_string()),
        Data::Bool(b) => Some(b.to_string()),
        Data::DateTime(dt) => datetime_text(dt),
        Data::DateTimeIso(s) => Some(s.clone()),
        Data::DurationIso(s) => Some(s.clone()),
        Data::Error(e) => Some(e.to_string()),
    }
}

/// Render a serial datetime; date-only when the time is midnight.
fn datetime_text(value: &calamine::ExcelDateTime) -> Option<String> {
    let datetime = value.as_datetime()?;
    if datetime.time() == chrono::NaiveTime::MIN {
        Some(datetime.date().to_string())
    } else {
        Some(datetime.format("%Y-%m-%d %H:%M:%S").to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_cell_mapping() {
        assert_eq!(typed_cell(&Data::Empty), CellValue::Null);
        assert_eq!(typed_cell(&Data::Int(7)), CellValue::Integer(7));
        assert_eq!(typed_cell(&Data::Float(1.5)), CellValue::Float(1.5));
        assert_eq!(typed_cell(&Data::Float(f64::NAN)), CellValue::Null);
        assert_eq!(typed_cell(&Data::Bool(true)), CellValue::Bool(true));
        assert_eq!(
            typed_cell(&Data::String("x".to_string())),
            CellValue::Text("x".to_string())
        );
    }

    #[test]
    fn test_literal_text_mapping() {
        assert_eq!(literal_text(&Data::Empty), None);
        assert_eq!(literal_text(&Data::Int(7)), Some("7".to_string()));
        assert_eq!(literal_text(&Data::Float(30.0)), Some("30".to_string()));
        assert_eq!(literal_text(&Data::Bool(false)), Some("false".to_string()));
        assert_eq!(
            literal_text(&Data::String("007".to_string())),
            Some("007".to_string())
        );
    }

    #[test]
    fn test_error_cell_surfaces_literal() {
        let cell = Data::Error(calamine::CellErrorType::Div0);
        assert_eq!(typed_cell(&cell), CellValue::Text("#DIV/0!".to_string()));
    }

    #[test]
    fn test_header_name_fallback() {
        assert_eq!(header_name(&Data::String("age".to_string()), 1), "age");
        assert_eq!(header_name(&Data::Empty, 2), "Unnamed: 2");
        assert_eq!(header_name(&Data::String("  ".to_string()), 0), "Unnamed: 0");
    }

    #[test]
    fn test_classify_corrupted_container() {
        let err = classify_failure("Zip error: invalid Zip archive", "cfb error");
        assert!(err.to_string().contains("corrupted or is not a valid"));
    }

    #[test]
    fn test_classify_unsupported_format() {
        let err = classify_failure("some other failure", "Unsupported BIFF version");
        assert!(err.to_string().contains("Unsupported Excel format"));
    }

    #[test]
    fn test_classify_generic_includes_details() {
        let err = classify_failure("mystery failure", "another mystery");
        assert!(err.to_string().contains("Could not read Excel file"));
        assert!(err.to_string().contains("mystery failure"));
    }

    #[test]
    fn test_not_excel_bytes_fail() {
        let err = read(b"plainly not a workbook", ParseMode::Typed).unwrap_err();
        assert!(matches!(err, Error::Malformed(_)));
    }
}
