//! Integration tests for the CLI output rows.

use std::io::Cursor;

use datefmt_cli::inputs::{collect_values, read_values};
use datefmt_cli::rows::{InferRow, ParseRow, shape_rows};
use datefmt_core::{Dialect, bind, shape_table};
use serde_json::json;

const BOTH: &[Dialect] = &[Dialect::Legacy, Dialect::Modern];

// =========================================================================
// Infer Rows
// =========================================================================

#[test]
fn test_infer_row_for_zoned_input() {
    let row = InferRow::new("2020/01/2T6:16:6Z", BOTH);
    assert!(!row.is_match());
    insta::assert_json_snapshot!(row, @r#"
    {
      "input": "2020/01/2T6:16:6Z",
      "legacy": null,
      "modern": "y/M/d'T'H:m:sVV",
      "grammar": "punctuated",
      "zone": "bare_z"
    }
    "#);
}

#[test]
fn test_infer_row_omits_unrequested_dialects() {
    let row = InferRow::new("99", &[Dialect::Modern]);
    assert_eq!(
        serde_json::to_value(&row).unwrap(),
        json!({
            "input": "99",
            "modern": null,
            "rejection": "no known shape matches the input"
        })
    );
}

#[test]
fn test_infer_row_match_depends_on_requested_dialects() {
    assert!(InferRow::new("2020/01/2T6:16:6Z", &[Dialect::Modern]).is_match());
    assert!(InferRow::new("2020-1-2 6:6:6.6", BOTH).is_match());
    assert!(!InferRow::new("20201266665", BOTH).is_match());
}

// =========================================================================
// Parse Rows
// =========================================================================

#[test]
fn test_parse_row_for_bracketed_zone() {
    let formatter = bind("y-M-d H:m:s '['VV' 'XXX']'").unwrap();
    let row = ParseRow::new(&formatter, "999-1-2 6:6:6 [GMT+04:00 +04:00]");
    assert!(row.is_ok());
    assert_eq!(
        serde_json::to_value(&row).unwrap(),
        json!({
            "input": "999-1-2 6:6:6 [GMT+04:00 +04:00]",
            "fields": {
                "year": 999,
                "month": 1,
                "day": 2,
                "hour": 6,
                "minute": 6,
                "second": 6,
                "nanosecond": null,
                "zone": "GMT+04:00",
                "offset_seconds": 14400
            },
            "value": "0999-01-02T06:06:06+04:00"
        })
    );
}

#[test]
fn test_parse_row_reports_errors() {
    let formatter = bind("y-M-d").unwrap();
    let row = ParseRow::new(&formatter, "2020/01/02");
    assert!(!row.is_ok());
    assert_eq!(row.error.as_deref(), Some("expected '-' at byte 4"));
    assert!(row.fields.is_none());

    let row = ParseRow::new(&formatter, "2021-02-29");
    assert_eq!(
        row.error.as_deref(),
        Some("fields do not form a valid calendar date")
    );
}

// =========================================================================
// Shape Rows
// =========================================================================

#[test]
fn test_every_layout_has_a_shape_row() {
    let rows = shape_rows();
    assert_eq!(rows.len(), shape_table().len());
    assert_eq!(rows.first().map(|row| row.legacy.as_str()), Some("yyyy"));
    assert!(rows.iter().all(|row| !row.modern.is_empty()));
    assert!(
        rows.iter()
            .any(|row| row.modern == "y-M-d'T'H:m:s[.SSS][.SS][.S]")
    );
}

// =========================================================================
// Inputs
// =========================================================================

#[test]
fn test_read_values_keeps_whitespace_and_skips_empty_lines() {
    let values = read_values(Cursor::new("2020-01-02\r\n\n 2020-01-03\n")).unwrap();
    assert_eq!(values, vec!["2020-01-02", " 2020-01-03"]);
}

#[test]
fn test_collect_values_requires_input() {
    let error = collect_values(&[], None).unwrap_err();
    assert!(error.to_string().contains("no values given"));

    let values = collect_values(&["2020".to_string()], None).unwrap();
    assert_eq!(values, vec!["2020"]);
}

#[test]
fn test_collect_values_reports_missing_file() {
    let error = collect_values(&[], Some(std::path::Path::new("does/not/exist.txt"))).unwrap_err();
    assert!(format!("{error:#}").contains("open input file does/not/exist.txt"));
}
