//! Error types for the tabconv library.

use std::io;
use thiserror::Error;

use crate::detect::Format;

/// Result type alias for tabconv operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during detection, parsing, or conversion.
///
/// Every failure is local to the call that produced it: a convert or preview
/// call either fully succeeds or returns one of these kinds with a
/// human-readable message. Nothing is retried and no partial output is
/// produced.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Input bytes could not be decoded under any attempted text encoding.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Input has no data at all (empty file, empty JSON array/object).
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// Structurally valid input with zero data rows (header-only CSV,
    /// empty worksheet).
    #[error("No data rows: {0}")]
    NoDataRows(String),

    /// Malformed input: JSON syntax error, ragged CSV structure, or a
    /// corrupted Excel container.
    #[error("Malformed input: {0}")]
    Malformed(String),

    /// JSON top-level shape that cannot become a table (scalar, array of
    /// non-objects).
    #[error("Unsupported shape: {0}")]
    UnsupportedShape(String),

    /// Requested (source, target) pair is not in the conversion allow-list.
    #[error("Cannot convert {source} to {target}. Allowed targets: {allowed}")]
    UnsupportedConversion {
        /// Detected source format.
        source: Format,
        /// Requested target format.
        target: Format,
        /// Comma-joined list of permitted targets for the source.
        allowed: String,
    },

    /// The sniffer could not classify the input by content or extension.
    #[error("Could not detect file format from content or filename")]
    UndetectedFormat,

    /// Output serialization failed (JSON or workbook writer).
    #[error("Serialization error: {0}")]
    Serialize(String),
}
