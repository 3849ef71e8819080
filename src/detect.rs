//! File format detection and delimiter sniffing.
//!
//! Detection is content-first: magic bytes for the Excel containers, then
//! structural heuristics for JSON and CSV over decoded text, then a filename
//! extension fallback. Content checks live in an explicit ordered list so
//! the precedence is auditable and testable in isolation.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Supported tabular file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// JSON (array of objects, or an object wrapping one)
    Json,
    /// Delimiter-separated text
    Csv,
    /// Office Open XML spreadsheet (ZIP container)
    Xlsx,
    /// Legacy Excel 97-2003 spreadsheet (OLE container)
    Xls,
}

impl Format {
    /// All supported formats, in detection-tag order.
    pub const ALL: [Format; 4] = [Format::Json, Format::Csv, Format::Xlsx, Format::Xls];

    /// The lowercase tag used on the API boundary (`json`, `csv`, ...).
    pub fn tag(&self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Csv => "csv",
            Format::Xlsx => "xlsx",
            Format::Xls => "xls",
        }
    }

    /// The canonical file extension for this format, without the dot.
    pub fn extension(&self) -> &'static str {
        self.tag()
    }

    /// MIME type for converted output in this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Format::Json => "application/json",
            Format::Csv => "text/csv",
            Format::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            Format::Xls => "application/vnd.ms-excel",
        }
    }

    /// Look up a format from a file extension (with or without the dot).
    pub fn from_extension(ext: &str) -> Option<Format> {
        let ext = ext.strip_prefix('.').unwrap_or(ext);
        match ext.to_ascii_lowercase().as_str() {
            "json" => Some(Format::Json),
            "csv" => Some(Format::Csv),
            "xlsx" => Some(Format::Xlsx),
            "xls" => Some(Format::Xls),
            _ => None,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

// Satisfies the `std::error::Error` bound that `thiserror` requires for the
// field named `source` in `Error::UnsupportedConversion`.
impl std::error::Error for Format {}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Format::from_extension(s.trim()).ok_or(Error::UndetectedFormat)
    }
}

/// XLSX magic bytes: ZIP local file header.
const XLSX_MAGIC: &[u8] = b"PK\x03\x04";

/// XLS magic bytes: OLE compound file header.
const XLS_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0];

/// Candidate CSV delimiters, in preference order.
pub const CANDIDATE_DELIMITERS: [u8; 3] = [b',', b';', b'\t'];

/// Ordered content checks; the first predicate that matches wins.
const CONTENT_CHECKS: &[(fn(&[u8]) -> bool, Format)] = &[
    (is_xlsx_content, Format::Xlsx),
    (is_xls_content, Format::Xls),
    (is_json_content, Format::Json),
    (is_csv_content, Format::Csv),
];

/// Detect the format of a file from its content, falling back to the
/// filename extension.
///
/// Returns `None` when neither the content heuristics nor the extension
/// identify a supported format. Pure classification; no I/O.
///
/// # Example
/// ```
/// use tabconv::detect::{detect_format, Format};
///
/// let format = detect_format(b"[{\"a\": 1}]", "data.txt");
/// assert_eq!(format, Some(Format::Json));
/// ```
pub fn detect_format(content: &[u8], filename: &str) -> Option<Format> {
    if let Some(format) = detect_by_content(content) {
        log::debug!("detected {} by content", format);
        return Some(format);
    }
    let format = detect_by_extension(filename);
    if let Some(format) = format {
        log::debug!("detected {} by extension of {:?}", format, filename);
    }
    format
}

/// Run the ordered content checks.
fn detect_by_content(content: &[u8]) -> Option<Format> {
    CONTENT_CHECKS
        .iter()
        .find(|(check, _)| check(content))
        .map(|&(_, format)| format)
}

/// Fall back to the filename extension.
fn detect_by_extension(filename: &str) -> Option<Format> {
    let ext = filename.rsplit_once('.').map(|(_, ext)| ext)?;
    Format::from_extension(ext)
}

fn is_xlsx_content(content: &[u8]) -> bool {
    content.starts_with(XLSX_MAGIC)
}

fn is_xls_content(content: &[u8]) -> bool {
    content.starts_with(XLS_MAGIC)
}

fn is_json_content(content: &[u8]) -> bool {
    let Some(text) = decode_text(content) else {
        return false;
    };
    let text = text.trim();
    if !text.starts_with('[') && !text.starts_with('{') {
        return false;
    }
    serde_json::from_str::<serde_json::Value>(text).is_ok()
}

/// CSV heuristic: at least two lines, and one candidate delimiter whose
/// first-line count is repeated on the next few non-blank lines.
fn is_csv_content(content: &[u8]) -> bool {
    let Some(text) = decode_text(content) else {
        return false;
    };
    let lines: Vec<&str> = text.split('\n').collect();
    if lines.len() < 2 {
        return false;
    }
    for &delimiter in &CANDIDATE_DELIMITERS {
        let first_count = count_byte(lines[0], delimiter);
        if first_count == 0 {
            continue;
        }
        let consistent = lines[1..lines.len().min(4)]
            .iter()
            .filter(|line| !line.trim().is_empty())
            .all(|line| count_byte(line, delimiter) == first_count);
        if consistent {
            return true;
        }
    }
    false
}

/// Decode content as UTF-8, falling back to windows-1252 (the WHATWG
/// superset of Latin-1). Returns `None` if neither decoding succeeds.
fn decode_text(content: &[u8]) -> Option<Cow<'_, str>> {
    if let Ok(text) = std::str::from_utf8(content) {
        return Some(Cow::Borrowed(text));
    }
    let (decoded, _, had_errors) = encoding_rs::WINDOWS_1252.decode(content);
    if had_errors {
        return None;
    }
    Some(decoded)
}

/// Guess the field delimiter of CSV-like text.
///
/// Only the first line is inspected. Counts are literal character counts
/// with no quote awareness, so a delimiter appearing inside quoted fields
/// biases the result. Ties and the all-zero case fall back to the comma.
///
/// # Example
/// ```
/// use tabconv::detect::sniff_delimiter;
///
/// assert_eq!(sniff_delimiter("a;b;c\n1;2;3"), b';');
/// assert_eq!(sniff_delimiter("no delimiters here"), b',');
/// ```
pub fn sniff_delimiter(text: &str) -> u8 {
    let first_line = text.split('\n').next().unwrap_or("");
    let mut best = b',';
    let mut best_count = 0;
    for &delimiter in &CANDIDATE_DELIMITERS {
        let count = count_byte(first_line, delimiter);
        if count > best_count {
            best = delimiter;
            best_count = count;
        }
    }
    best
}

fn count_byte(line: &str, byte: u8) -> usize {
    line.bytes().filter(|&b| b == byte).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_tags() {
        assert_eq!(Format::Json.tag(), "json");
        assert_eq!(Format::Xlsx.to_string(), "xlsx");
        assert_eq!("csv".parse::<Format>().unwrap(), Format::Csv);
        assert!("parquet".parse::<Format>().is_err());
    }

    #[test]
    fn test_format_mime_types() {
        assert_eq!(Format::Json.mime_type(), "application/json");
        assert_eq!(Format::Csv.mime_type(), "text/csv");
        assert_eq!(Format::Xls.mime_type(), "application/vnd.ms-excel");
    }

    #[test]
    fn test_detect_xlsx_magic() {
        let data = b"PK\x03\x04rest-of-zip";
        assert_eq!(detect_format(data, "anything"), Some(Format::Xlsx));
    }

    #[test]
    fn test_detect_xls_magic() {
        let data = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1];
        assert_eq!(detect_format(&data, "anything"), Some(Format::Xls));
    }

    #[test]
    fn test_magic_beats_extension() {
        // Content wins even when the extension disagrees
        let data = b"PK\x03\x04";
        assert_eq!(detect_format(data, "file.csv"), Some(Format::Xlsx));
    }

    #[test]
    fn test_detect_json_array() {
        let data = br#"[{"name": "Alice"}]"#;
        assert_eq!(detect_format(data, "data"), Some(Format::Json));
    }

    #[test]
    fn test_detect_json_object_with_whitespace() {
        let data = b"  \n {\"a\": 1} ";
        assert_eq!(detect_format(data, "data"), Some(Format::Json));
    }

    #[test]
    fn test_invalid_json_is_not_json() {
        // Starts with '{' but does not parse; also fails the CSV heuristic
        let data = b"{not json at all";
        assert_eq!(detect_format(data, "data"), None);
    }

    #[test]
    fn test_detect_csv_consistent_columns() {
        let data = b"name,age\nAlice,30\nBob,25";
        assert_eq!(detect_format(data, "data"), Some(Format::Csv));
    }

    #[test]
    fn test_detect_csv_semicolon() {
        let data = b"a;b;c\n1;2;3";
        assert_eq!(detect_format(data, "data"), Some(Format::Csv));
    }

    #[test]
    fn test_inconsistent_csv_not_detected_by_content() {
        let data = b"a,b\n1,2,3,4";
        assert_eq!(detect_by_content(data), None);
        // ...but the extension still resolves it
        assert_eq!(detect_format(data, "file.csv"), Some(Format::Csv));
    }

    #[test]
    fn test_single_line_is_not_csv() {
        assert_eq!(detect_by_content(b"a,b,c"), None);
    }

    #[test]
    fn test_extension_fallback() {
        assert_eq!(detect_format(b"plain text", "report.JSON"), Some(Format::Json));
        assert_eq!(detect_format(b"plain text", "report.xls"), Some(Format::Xls));
        assert_eq!(detect_format(b"plain text", "report.txt"), None);
        assert_eq!(detect_format(b"plain text", "no-extension"), None);
    }

    #[test]
    fn test_undecodable_content_falls_through() {
        // 0x81 is undefined in windows-1252 and invalid UTF-8
        let data = [0x81, 0x81, 0x81];
        assert_eq!(detect_by_content(&data), None);
    }

    #[test]
    fn test_sniff_delimiter_basic() {
        assert_eq!(sniff_delimiter("a,b,c\n1,2,3"), b',');
        assert_eq!(sniff_delimiter("a;b;c"), b';');
        assert_eq!(sniff_delimiter("a\tb\tc"), b'\t');
    }

    #[test]
    fn test_sniff_delimiter_majority_wins() {
        // One comma, two semicolons
        assert_eq!(sniff_delimiter("a,b;c;d"), b';');
    }

    #[test]
    fn test_sniff_delimiter_tie_prefers_comma() {
        assert_eq!(sniff_delimiter("a,b;c\n"), b',');
    }

    #[test]
    fn test_sniff_delimiter_default_comma() {
        assert_eq!(sniff_delimiter("no delimiter"), b',');
        assert_eq!(sniff_delimiter(""), b',');
    }

    #[test]
    fn test_sniff_delimiter_ignores_later_lines() {
        // Second line is full of semicolons; only line 1 counts
        assert_eq!(sniff_delimiter("a,b\nx;y;z;w"), b',');
    }

    #[test]
    fn test_sniff_delimiter_quote_blindness() {
        // The comma inside quotes still counts: documented limitation
        assert_eq!(sniff_delimiter("\"a,b\";c\n"), b',');
    }
}
