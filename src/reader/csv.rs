//! CSV reading with encoding fallback and delimiter sniffing.

use chardetng::EncodingDetector;
use csv::ReaderBuilder;

use super::ParseMode;
use crate::detect::sniff_delimiter;
use crate::error::{Error, Result};
use crate::model::{CellValue, Table};

/// Parse CSV bytes into a table.
///
/// Decoding tries UTF-8, then windows-1252, then a chardetng guess. The
/// delimiter is sniffed from the first line. Ragged rows, header-only
/// input, and empty input each fail with their own error kind.
pub fn read(content: &[u8], mode: ParseMode) -> Result<Table> {
    let text = decode(content)?;
    if text.trim().is_empty() {
        return Err(Error::EmptyInput(
            "CSV file is empty. The file contains no data to convert.".to_string(),
        ));
    }

    let delimiter = sniff_delimiter(&text);
    log::debug!("sniffed CSV delimiter {:?}", delimiter as char);

    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(false)
        .from_reader(text.as_bytes());

    let columns: Vec<String> = reader
        .headers()
        .map_err(|e| Error::Malformed(format!("invalid CSV header: {e}")))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(map_parse_error)?;
        rows.push(
            record
                .iter()
                .map(|field| parse_cell(field, mode))
                .collect(),
        );
    }

    if rows.is_empty() {
        return Err(Error::NoDataRows(
            "CSV file has headers but no data rows. Add data below the header row.".to_string(),
        ));
    }

    Table::new(columns, rows)
}

/// Decode CSV bytes, trying UTF-8, windows-1252, then a detector guess.
fn decode(content: &[u8]) -> Result<String> {
    let content = strip_bom(content);

    if let Ok(text) = std::str::from_utf8(content) {
        return Ok(text.to_string());
    }

    let (decoded, _, had_errors) = encoding_rs::WINDOWS_1252.decode(content);
    if !had_errors {
        return Ok(decoded.into_owned());
    }

    let mut detector = EncodingDetector::new();
    detector.feed(content, true);
    let encoding = detector.guess(None, true);
    let (decoded, _, had_errors) = encoding.decode(content);
    if !had_errors {
        log::debug!("decoded CSV input as {}", encoding.name());
        return Ok(decoded.into_owned());
    }

    Err(Error::Encoding(
        "Unable to read file: unsupported character encoding. \
         Save the file as UTF-8 and try again."
            .to_string(),
    ))
}

/// Skip a UTF-8 byte order mark so it does not leak into the first header.
fn strip_bom(content: &[u8]) -> &[u8] {
    content.strip_prefix(&[0xEF, 0xBB, 0xBF][..]).unwrap_or(content)
}

fn map_parse_error(error: csv::Error) -> Error {
    match error.kind() {
        csv::ErrorKind::UnequalLengths { .. } => Error::Malformed(format!(
            "CSV parsing error: {error}. Check that all rows have the same number of columns."
        )),
        _ => Error::Malformed(format!(
            "Invalid CSV format: {error}. Ensure the file is a valid CSV with consistent delimiters."
        )),
    }
}

fn parse_cell(field: &str, mode: ParseMode) -> CellValue {
    if field.is_empty() {
        return CellValue::Null;
    }
    match mode {
        ParseMode::Literal => CellValue::Text(field.to_string()),
        ParseMode::Typed => infer_cell(field),
    }
}

/// Infer a scalar type from field text: bool, integer, float, else text.
fn infer_cell(field: &str) -> CellValue {
    match field {
        "true" | "True" | "TRUE" => return CellValue::Bool(true),
        "false" | "False" | "FALSE" => return CellValue::Bool(false),
        _ => {}
    }
    if let Ok(value) = field.parse::<i64>() {
        return CellValue::Integer(value);
    }
    if let Ok(value) = field.parse::<f64>() {
        // NaN spellings are missing values, not numbers
        return if value.is_nan() {
            CellValue::Null
        } else {
            CellValue::Float(value)
        };
    }
    CellValue::Text(field.to_string())
}
