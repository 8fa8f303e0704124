use super::*;

fn issue(id: &str, severity: Severity, fixable: bool) -> QualityIssue {
    QualityIssue {
        id: id.to_owned(),
        column: Some("age".to_owned()),
        kind: "missing_values".to_owned(),
        severity,
        message: "3 missing values".to_owned(),
        fixable,
    }
}

#[test]
fn fixable_ids_skips_manual_issues() {
    let report = QualityReport {
        dataset_id: "d1".to_owned(),
        issues: vec![issue("a", Severity::Error, true), issue("b", Severity::Info, false), issue("c", Severity::Warning, true)],
        score: None,
    };
    assert_eq!(fixable_ids(&report), vec!["a".to_owned(), "c".to_owned()]);
}

#[test]
fn severity_class_names() {
    assert_eq!(severity_class(Severity::Warning), "warning");
    assert_eq!(severity_class(Severity::Error), "error");
}
