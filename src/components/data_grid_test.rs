use super::*;

#[test]
fn row_offset_is_zero_based_across_pages() {
    assert_eq!(row_offset(1, 50), 0);
    assert_eq!(row_offset(3, 50), 100);
    assert_eq!(row_offset(0, 50), 0);
}

#[test]
fn cell_text_formats_json_values() {
    assert_eq!(cell_text(&serde_json::Value::Null), "");
    assert_eq!(cell_text(&serde_json::json!("A")), "A");
    assert_eq!(cell_text(&serde_json::json!(12.5)), "12.5");
    assert_eq!(cell_text(&serde_json::json!(true)), "true");
}

#[test]
fn parse_cell_respects_numeric_dtype() {
    assert_eq!(parse_cell("42", "numeric"), serde_json::json!(42));
    assert_eq!(parse_cell(" 1.5 ", "numeric"), serde_json::json!(1.5));
    assert_eq!(parse_cell("n/a", "numeric"), serde_json::json!("n/a"));
}

#[test]
fn parse_cell_blank_is_null() {
    assert_eq!(parse_cell("   ", "categorical"), serde_json::Value::Null);
}

#[test]
fn parse_cell_keeps_text_for_other_dtypes() {
    assert_eq!(parse_cell("42", "categorical"), serde_json::json!("42"));
    assert_eq!(parse_cell("TRUE", "boolean"), serde_json::json!(true));
}
