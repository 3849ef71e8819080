//! # tabconv
//!
//! Tabular data conversion library for Rust.
//!
//! This library converts small tabular files between JSON, CSV, and Excel
//! (.xlsx/.xls), and produces paginated previews of a file before
//! conversion. Input format is sniffed from content first (magic bytes and
//! structural heuristics) with a filename-extension fallback.
//!
//! ## Quick Start
//!
//! ```
//! use tabconv::{convert_bytes, Format};
//!
//! fn main() -> tabconv::Result<()> {
//!     let input = br#"[{"name": "Alice", "age": 30}]"#;
//!
//!     // Detect the source format, then convert to CSV
//!     let result = convert_bytes(input, "people.json", Format::Csv)?;
//!     assert_eq!(result.mime_type, "text/csv");
//!     assert!(result.bytes.starts_with(b"name,age"));
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Previews
//!
//! ```
//! use tabconv::preview_bytes;
//!
//! # fn main() -> tabconv::Result<()> {
//! let input = b"code,city\n007,London\n042,Oslo\n";
//! let (format, preview) = preview_bytes(input, "codes.csv", 1, 10)?;
//!
//! assert_eq!(format.tag(), "csv");
//! assert_eq!(preview.total_rows, 2);
//! // Preview cells keep their literal text: "007" is not coerced to 7
//! # Ok(())
//! # }
//! ```
//!
//! ## Features
//!
//! - **Format sniffing**: magic bytes for Excel containers, structural
//!   heuristics for JSON and CSV, extension fallback
//! - **Common tabular model**: every reader produces it, every writer
//!   consumes it
//! - **Dual parse modes**: typed cells for conversion, literal text for
//!   previews
//! - **Fixed allow-list**: only the supported (source, target) pairs are
//!   accepted, with descriptive rejections for the rest

pub mod convert;
pub mod detect;
pub mod error;
pub mod model;
pub mod reader;
pub mod writer;

// Re-export commonly used types
pub use convert::{
    allowed_targets, is_conversion_allowed, ConvertResult, ALLOWED_CONVERSIONS,
    DEFAULT_PREVIEW_PAGE_SIZE, MAX_FILE_SIZE,
};
pub use detect::{detect_format, sniff_delimiter, Format};
pub use error::{Error, Result};
pub use model::{CellValue, PreviewResult, Table};
pub use reader::{read_table, ParseMode};
pub use writer::write_table;

/// Detect the format of `content` and convert it to `target`.
///
/// The filename is only used as a detection fallback when the content
/// heuristics are inconclusive. Fails with [`Error::UndetectedFormat`] when
/// neither identifies the input, and with [`Error::UnsupportedConversion`]
/// when the detected pair is outside the allow-list.
///
/// # Example
///
/// ```
/// use tabconv::{convert_bytes, Format};
///
/// let result = convert_bytes(b"a,b\n1,2\n", "data.csv", Format::Json).unwrap();
/// assert_eq!(result.mime_type, "application/json");
/// ```
pub fn convert_bytes(content: &[u8], filename: &str, target: Format) -> Result<ConvertResult> {
    let source = detect_format(content, filename).ok_or(Error::UndetectedFormat)?;
    convert::convert(content, source, target)
}

/// Detect the format of `content` and produce a paginated preview.
///
/// Returns the detected format tag alongside the preview. The reader runs
/// in literal mode, so numeric-looking text keeps its exact form.
///
/// # Example
///
/// ```
/// use tabconv::{preview_bytes, Format};
///
/// let (format, preview) = preview_bytes(b"a,b\n1,2\n", "data.csv", 1, 10).unwrap();
/// assert_eq!(format, Format::Csv);
/// assert_eq!(preview.columns, ["a", "b"]);
/// ```
pub fn preview_bytes(
    content: &[u8],
    filename: &str,
    page: i64,
    page_size: usize,
) -> Result<(Format, PreviewResult)> {
    let format = detect_format(content, filename).ok_or(Error::UndetectedFormat)?;
    let preview = convert::preview(content, format, page, page_size)?;
    Ok((format, preview))
}
