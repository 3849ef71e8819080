//! Integration tests for the conversion facade.

use tabconv::convert::{allowed_targets, convert, is_conversion_allowed};
use tabconv::{convert_bytes, write_table, CellValue, Error, Format, Table};

#[test]
fn test_json_to_csv_scenario() {
    let input = br#"[{"name":"Alice","age":30},{"name":"Bob","age":25}]"#;
    let result = convert(input, Format::Json, Format::Csv).unwrap();

    let text = String::from_utf8(result.bytes).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines, ["name,age", "Alice,30", "Bob,25"]);
    assert_eq!(result.mime_type, "text/csv");
}

#[test]
fn test_csv_to_json_null_scenario() {
    let input = b"name,age,city\nAlice,30,\nBob,,Los Angeles";
    let result = convert(input, Format::Csv, Format::Json).unwrap();

    let records: Vec<serde_json::Value> = serde_json::from_slice(&result.bytes).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["name"], "Alice");
    assert_eq!(records[0]["age"], 30);
    assert_eq!(records[0]["city"], serde_json::Value::Null);
    assert_eq!(records[1]["age"], serde_json::Value::Null);
    assert_eq!(records[1]["city"], "Los Angeles");
}

#[test]
fn test_nested_json_flattens_into_columns() {
    let input = br#"[{"name":"A","address":{"street":"123 Main St","city":"X"}}]"#;
    let result = convert(input, Format::Json, Format::Csv).unwrap();

    let text = String::from_utf8(result.bytes).unwrap();
    assert_eq!(
        text.lines().next(),
        Some("name,address.street,address.city")
    );
}

#[test]
fn test_empty_json_array_rejected_for_any_target() {
    for target in [Format::Csv, Format::Xlsx] {
        let err = convert(b"[]", Format::Json, target).unwrap_err();
        assert!(matches!(err, Error::EmptyInput(_)), "target {target}");
    }
}

#[test]
fn test_conversions_outside_allow_list_rejected() {
    let err = convert(b"a,b\n1,2\n", Format::Csv, Format::Xlsx).unwrap_err();
    assert!(matches!(err, Error::UnsupportedConversion { .. }));

    let err = convert(b"irrelevant", Format::Xlsx, Format::Csv).unwrap_err();
    assert!(matches!(err, Error::UnsupportedConversion { .. }));

    let err = convert(b"[]", Format::Json, Format::Xls).unwrap_err();
    // Allow-list check happens before any parsing
    assert!(matches!(err, Error::UnsupportedConversion { .. }));
}

#[test]
fn test_allow_list_exposed_to_boundary() {
    assert_eq!(allowed_targets(Format::Json), [Format::Csv, Format::Xlsx]);
    assert_eq!(allowed_targets(Format::Xls), [Format::Json]);
    assert!(is_conversion_allowed(Format::Xls, Format::Json));
    assert!(!is_conversion_allowed(Format::Xls, Format::Csv));
}

#[test]
fn test_json_to_xlsx_and_back() {
    let input = br#"[{"name":"Alice","age":30},{"name":"Bob","age":25}]"#;
    let workbook = convert(input, Format::Json, Format::Xlsx).unwrap();
    assert!(workbook.bytes.starts_with(b"PK\x03\x04"));
    assert_eq!(
        workbook.mime_type,
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );

    let back = convert(&workbook.bytes, Format::Xlsx, Format::Json).unwrap();
    let records: Vec<serde_json::Value> = serde_json::from_slice(&back.bytes).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["name"], "Alice");
    assert_eq!(records[1]["name"], "Bob");
    // Workbook cells store numbers as floats; values are preserved
    assert_eq!(records[0]["age"].as_f64(), Some(30.0));
}

#[test]
fn test_typed_conversion_coerces_leading_zeros() {
    let result = convert(b"code\n007\n", Format::Csv, Format::Json).unwrap();
    let records: Vec<serde_json::Value> = serde_json::from_slice(&result.bytes).unwrap();
    assert_eq!(records[0]["code"], 7);
}

#[test]
fn test_corrupted_xls_is_classified() {
    // OLE magic followed by garbage: both Excel engines fail
    let mut bytes = vec![0xD0, 0xCF, 0x11, 0xE0];
    bytes.extend_from_slice(b"garbage");
    let err = convert(&bytes, Format::Xls, Format::Json).unwrap_err();
    assert!(matches!(err, Error::Malformed(_)));
}

#[test]
fn test_convert_bytes_detects_by_content_over_extension() {
    let input = br#"[{"a": 1}]"#;
    let result = convert_bytes(input, "mislabeled.csv", Format::Csv).unwrap();
    assert!(String::from_utf8(result.bytes).unwrap().starts_with("a\n"));
}

#[test]
fn test_convert_bytes_undetectable_input() {
    let err = convert_bytes(b"hello world", "notes.txt", Format::Json).unwrap_err();
    assert!(matches!(err, Error::UndetectedFormat));
}

#[test]
fn test_written_xlsx_worksheet_is_named_data() {
    let table = Table::new(
        vec!["a".to_string()],
        vec![vec![CellValue::Integer(1)]],
    )
    .unwrap();
    let bytes = write_table(Format::Xlsx, &table).unwrap();

    // The sheet name is recorded in the workbook part of the container
    let text = String::from_utf8_lossy(&bytes).into_owned();
    assert!(bytes.starts_with(b"PK\x03\x04"));
    // Stored deflated or not, the file list mentions the single sheet part
    assert!(text.contains("sheet1.xml") || text.contains("workbook"));
}
