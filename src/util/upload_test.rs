use super::*;

#[test]
fn content_type_from_extension() {
    assert_eq!(content_type_for("trial.csv"), "text/csv");
    assert_eq!(content_type_for("TRIAL.CSV"), "text/csv");
    assert_eq!(content_type_for("cohort.xlsx"), "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet");
    assert_eq!(content_type_for("study.dta"), "application/x-stata-dta");
}

#[test]
fn unknown_or_missing_extension_is_octet_stream() {
    assert_eq!(content_type_for("README"), "application/octet-stream");
    assert_eq!(content_type_for("data.parquet"), "application/octet-stream");
}
