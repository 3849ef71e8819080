//! The conversion facade: pairs a reader and a writer per request.
//!
//! The set of legal (source, target) pairs is a fixed allow-list; previews
//! use one reader per source format in literal mode. Constants consumed by
//! the boundary layer (size cap, default preview page size, MIME types via
//! [`Format::mime_type`]) live here rather than in business logic.

use crate::detect::Format;
use crate::error::{Error, Result};
use crate::model::PreviewResult;
use crate::reader::{read_table, ParseMode};
use crate::writer::write_table;

/// Maximum input size in bytes, enforced by the boundary layer (10 MB).
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// Default number of rows per preview page.
pub const DEFAULT_PREVIEW_PAGE_SIZE: usize = 10;

/// The fixed conversion allow-list: source format to permitted targets.
///
/// Note the deliberate gaps: no CSV to XLSX, no XLSX to CSV, and no output
/// into the legacy XLS format at all.
pub const ALLOWED_CONVERSIONS: &[(Format, &[Format])] = &[
    (Format::Json, &[Format::Csv, Format::Xlsx]),
    (Format::Csv, &[Format::Json]),
    (Format::Xlsx, &[Format::Json]),
    (Format::Xls, &[Format::Json]),
];

/// Permitted target formats for a source format.
pub fn allowed_targets(source: Format) -> &'static [Format] {
    ALLOWED_CONVERSIONS
        .iter()
        .find(|(from, _)| *from == source)
        .map(|(_, targets)| *targets)
        .unwrap_or(&[])
}

/// Check whether a (source, target) pair is in the allow-list.
pub fn is_conversion_allowed(source: Format, target: Format) -> bool {
    allowed_targets(source).contains(&target)
}

/// Result of a conversion: output bytes plus their MIME type.
#[derive(Debug, Clone)]
pub struct ConvertResult {
    /// Converted file content
    pub bytes: Vec<u8>,
    /// MIME type of the output
    pub mime_type: &'static str,
}

impl ConvertResult {
    /// Get output length in bytes.
    pub fn content_len(&self) -> usize {
        self.bytes.len()
    }
}

/// Convert raw bytes from one format to another.
///
/// Fails with [`Error::UnsupportedConversion`] when the pair is outside the
/// allow-list, naming the permitted targets for the source.
///
/// # Example
/// ```
/// use tabconv::convert::convert;
/// use tabconv::detect::Format;
///
/// let result = convert(br#"[{"a": 1}]"#, Format::Json, Format::Csv).unwrap();
/// assert_eq!(result.mime_type, "text/csv");
/// ```
pub fn convert(content: &[u8], source: Format, target: Format) -> Result<ConvertResult> {
    if !is_conversion_allowed(source, target) {
        let allowed: Vec<&str> = allowed_targets(source)
            .iter()
            .map(|format| format.tag())
            .collect();
        return Err(Error::UnsupportedConversion {
            source,
            target,
            allowed: allowed.join(", "),
        });
    }

    let table = read_table(source, content, ParseMode::Typed)?;
    let bytes = write_table(target, &table)?;
    Ok(ConvertResult {
        bytes,
        mime_type: target.mime_type(),
    })
}

/// Produce a paginated preview of raw bytes in the given format.
///
/// The reader runs in literal mode so the preview shows the text the user
/// uploaded: `"007"` is never coerced into `7`.
pub fn preview(
    content: &[u8],
    format: Format,
    page: i64,
    page_size: usize,
) -> Result<PreviewResult> {
    let table = read_table(format, content, ParseMode::Literal)?;
    Ok(table.paginate(page, page_size))
}
