//! Paginated, read-only projections of a table.

use serde::Serialize;

use super::table::{CellValue, Table};

/// One page of a table, plus pagination metadata.
///
/// Serializes directly into the shape the boundary layer returns for
/// preview requests.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreviewResult {
    /// Column names, same as the full table
    pub columns: Vec<String>,
    /// The rows of the requested page
    pub rows: Vec<Vec<CellValue>>,
    /// Row count of the full table
    pub total_rows: usize,
    /// The page actually returned, after clamping
    pub current_page: usize,
    /// Total number of pages, at least 1
    pub total_pages: usize,
    /// Requested page size
    pub page_size: usize,
}

impl Table {
    /// Slice out one page of rows.
    ///
    /// `page_size` is clamped to at least 1. The requested `page`, including
    /// zero, negative, or past-the-end values, is clamped into
    /// `[1, total_pages]` rather than rejected.
    ///
    /// # Example
    /// ```
    /// use tabconv::model::{CellValue, Table};
    ///
    /// let table = Table::new(
    ///     vec!["n".to_string()],
    ///     (0..5).map(|i| vec![CellValue::Integer(i)]).collect(),
    /// )
    /// .unwrap();
    /// let page = table.paginate(2, 2);
    /// assert_eq!(page.current_page, 2);
    /// assert_eq!(page.total_pages, 3);
    /// assert_eq!(page.rows.len(), 2);
    /// ```
    pub fn paginate(&self, page: i64, page_size: usize) -> PreviewResult {
        let page_size = page_size.max(1);
        let total_rows = self.row_count();
        let total_pages = total_rows.div_ceil(page_size).max(1);
        let current_page = page.clamp(1, total_pages as i64) as usize;

        let start = (current_page - 1) * page_size;
        let end = (start + page_size).min(total_rows);

        PreviewResult {
            columns: self.columns().to_vec(),
            rows: self.rows()[start..end].to_vec(),
            total_rows,
            current_page,
            total_pages,
            page_size,
        }
    }
}
