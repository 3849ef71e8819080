//! Excel writing via rust_xlsxwriter: one worksheet named "Data".

use rust_xlsxwriter::Workbook;

use crate::error::{Error, Result};
use crate::model::{CellValue, Table};

/// Worksheet name used for all generated workbooks.
const SHEET_NAME: &str = "Data";

/// Serialize a table as an XLSX workbook with a single "Data" worksheet.
///
/// The header row comes first, then the data rows in table order. Null
/// cells are left blank.
pub fn write(table: &Table) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME).map_err(map_write_error)?;

    for (col, column) in table.columns().iter().enumerate() {
        worksheet
            .write_string(0, col as u16, column.as_str())
            .map_err(map_write_error)?;
    }

    for (index, row) in table.rows().iter().enumerate() {
        let excel_row = (index + 1) as u32;
        for (col, cell) in row.iter().enumerate() {
            let col = col as u16;
            match cell {
                CellValue::Null => {}
                CellValue::Bool(b) => {
                    worksheet
                        .write_boolean(excel_row, col, *b)
                        .map_err(map_write_error)?;
                }
                CellValue::Integer(i) => {
                    worksheet
                        .write_number(excel_row, col, *i as f64)
                        .map_err(map_write_error)?;
                }
                CellValue::Float(f) if f.is_finite() => {
                    worksheet
                        .write_number(excel_row, col, *f)
                        .map_err(map_write_error)?;
                }
                CellValue::Float(_) => {}
                CellValue::Text(s) => {
                    worksheet
                        .write_string(excel_row, col, s.as_str())
                        .map_err(map_write_error)?;
                }
            }
        }
    }

    workbook.save_to_buffer().map_err(map_write_error)
}

fn map_write_error(error: rust_xlsxwriter::XlsxError) -> Error {
    Error::Serialize(format!("Excel serialization error: {error}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::{self, ParseMode};

    fn sample() -> Table {
        Table::new(
            vec!["name".to_string(), "age".to_string()],
            vec![
                vec![CellValue::Text("Alice".to_string()), CellValue::Integer(30)],
                vec![CellValue::Text("Bob".to_string()), CellValue::Null],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_output_is_zip_container() {
        let bytes = write(&sample()).unwrap();
        assert!(bytes.starts_with(b"PK\x03\x04"));
    }

    #[test]
    fn test_worksheet_is_named_data() {
        use calamine::Reader as _;

        let bytes = write(&sample()).unwrap();
        let workbook = calamine::Xlsx::new(std::io::Cursor::new(bytes)).unwrap();
        assert_eq!(workbook.sheet_names(), ["Data"]);
    }

    #[test]
    fn test_round_trip_through_excel_reader() {
        let bytes = write(&sample()).unwrap();
        let table = reader::excel::read(&bytes, ParseMode::Typed).unwrap();

        assert_eq!(table.columns(), ["name", "age"]);
        assert_eq!(table.rows()[0][0], CellValue::Text("Alice".to_string()));
        // Numbers come back as floats from the workbook cell store
        assert_eq!(table.rows()[0][1], CellValue::Float(30.0));
        assert_eq!(table.rows()[1][1], CellValue::Null);
    }
}
