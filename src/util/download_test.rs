use std::time::Duration;

use super::*;

#[test]
fn report_filename_uses_format_extension() {
    assert_eq!(report_filename("analysis", "a1", ReportFormat::Pdf), "analysis-a1.pdf");
    assert_eq!(report_filename("protocol", "p9", ReportFormat::Docx), "protocol-p9.docx");
}

#[test]
fn report_filename_replaces_unsafe_characters() {
    assert_eq!(report_filename("analysis", "a/b c", ReportFormat::Html), "analysis-a_b_c.html");
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn save_is_noop_outside_browser() {
    let download = Download {
        filename: "x.pdf".to_owned(),
        content_type: "application/pdf".to_owned(),
        bytes: vec![1, 2, 3],
    };
    assert!(save(&download).is_ok());
}

#[test]
fn object_url_outlives_the_click() {
    assert!(REVOKE_DELAY >= Duration::from_millis(500));
}
