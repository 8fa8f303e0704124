use super::*;

// =============================================================
// AnalysisOutcome decoding
// =============================================================

#[test]
fn group_comparison_decodes_by_kind_tag() {
    let json = serde_json::json!({
        "id": "a-1",
        "method": "welch_t",
        "interpretation": "Groups differ.",
        "kind": "group_comparison",
        "test": "Welch t-test",
        "statistic": 2.5,
        "p_value": 0.013,
        "effect_size": 0.42,
        "groups": [
            { "name": "A", "n": 30, "mean": 5.1, "sd": 1.2, "median": 5.0 },
            { "name": "B", "n": 28, "mean": 4.2, "sd": 1.0, "median": null }
        ]
    });
    let outcome: AnalysisOutcome = serde_json::from_value(json).unwrap();
    assert_eq!(outcome.id.as_deref(), Some("a-1"));
    assert_eq!(outcome.method, "welch_t");
    let AnalysisResult::GroupComparison(result) = outcome.result else {
        panic!("expected group comparison");
    };
    assert_eq!(result.test, "Welch t-test");
    assert_eq!(result.groups.len(), 2);
    assert_eq!(result.groups[1].median, None);
}

#[test]
fn regression_decodes_with_integer_statistics() {
    let json = serde_json::json!({
        "id": null,
        "method": "ols",
        "interpretation": null,
        "kind": "regression",
        "model": "linear",
        "coefficients": [
            { "term": "(Intercept)", "estimate": 1, "std_error": 0.5, "p_value": 0.04, "ci_low": 0.1, "ci_high": 1.9 }
        ],
        "r_squared": 0.31,
        "n": 120
    });
    let outcome: AnalysisOutcome = serde_json::from_value(json).unwrap();
    assert_eq!(outcome.result.kind(), "regression");
    let AnalysisResult::Regression(result) = outcome.result else {
        panic!("expected regression");
    };
    assert_eq!(result.coefficients[0].estimate, 1.0);
    assert_eq!(result.n, 120);
}

#[test]
fn survival_decodes_curves() {
    let json = serde_json::json!({
        "id": "s-1",
        "method": "kaplan_meier",
        "interpretation": null,
        "kind": "survival",
        "curves": [
            { "group": "treated", "points": [{ "time": 0.0, "survival": 1.0 }, { "time": 3.5, "survival": 0.8 }], "median": null }
        ],
        "log_rank_p": 0.02,
        "hazard_ratio": 0.7
    });
    let outcome: AnalysisOutcome = serde_json::from_value(json).unwrap();
    let AnalysisResult::Survival(result) = outcome.result else {
        panic!("expected survival");
    };
    assert_eq!(result.curves[0].points.len(), 2);
    assert_eq!(result.hazard_ratio, Some(0.7));
}

#[test]
fn unknown_kind_decodes_as_unsupported() {
    let json = serde_json::json!({
        "id": null,
        "method": "bayes_factor",
        "interpretation": null,
        "kind": "bayesian",
        "bf10": 3.2
    });
    let outcome: AnalysisOutcome = serde_json::from_value(json).unwrap();
    assert_eq!(outcome.result, AnalysisResult::Unsupported);
    assert_eq!(outcome.method, "bayes_factor");
}

#[test]
fn missing_kind_is_a_decode_error() {
    let json = serde_json::json!({ "id": null, "method": "x", "interpretation": null });
    assert!(serde_json::from_value::<AnalysisOutcome>(json).is_err());
}

// =============================================================
// Request bodies
// =============================================================

#[test]
fn schema_action_is_tagged_by_action() {
    let action = SchemaAction::RenameColumn { column: "age".to_owned(), new_name: "age_years".to_owned() };
    let json = serde_json::to_value(&action).unwrap();
    assert_eq!(json, serde_json::json!({ "action": "rename_column", "column": "age", "new_name": "age_years" }));
}

#[test]
fn clean_column_request_flattens_operation() {
    let request = CleanColumnRequest { column: "sex".to_owned(), operation: CleanOperation::Lowercase };
    let json = serde_json::to_value(&request).unwrap();
    assert_eq!(json, serde_json::json!({ "column": "sex", "operation": "lowercase" }));

    let fill = CleanColumnRequest {
        column: "bmi".to_owned(),
        operation: CleanOperation::FillMissing { value: serde_json::json!(0) },
    };
    let json = serde_json::to_value(&fill).unwrap();
    assert_eq!(json, serde_json::json!({ "column": "bmi", "operation": "fill_missing", "value": 0 }));
}

#[test]
fn reparse_options_omit_unset_fields() {
    let options = ReparseOptions { delimiter: Some(";".to_owned()), ..ReparseOptions::default() };
    let json = serde_json::to_value(&options).unwrap();
    assert_eq!(json, serde_json::json!({ "delimiter": ";" }));
}

#[test]
fn apply_request_flattens_selection() {
    let request = ApplyRequest {
        selection: RecommendRequest {
            dataset_id: "d1".to_owned(),
            goal: AnalysisGoal::CompareGroups,
            outcome: Some("sbp".to_owned()),
            predictors: vec![],
            group: Some("arm".to_owned()),
            paired: false,
        },
        method: "welch_t".to_owned(),
    };
    let json = serde_json::to_value(&request).unwrap();
    assert_eq!(json["dataset_id"], "d1");
    assert_eq!(json["goal"], "compare_groups");
    assert_eq!(json["method"], "welch_t");
}

// =============================================================
// Variable mapping
// =============================================================

#[test]
fn mapping_role_defaults_to_ignore() {
    let mapping = VariableMapping::default();
    assert_eq!(mapping.role("anything"), VariableRole::Ignore);
}

#[test]
fn with_role_leaves_original_untouched() {
    let mapping = VariableMapping::default();
    let next = mapping.with_role("sbp", VariableRole::Outcome);
    assert!(mapping.variables.is_empty());
    assert_eq!(next.role("sbp"), VariableRole::Outcome);
    assert_ne!(mapping, next);
}

#[test]
fn columns_with_lists_matching_columns() {
    let mapping = VariableMapping::default()
        .with_role("age", VariableRole::Predictor)
        .with_role("sbp", VariableRole::Outcome)
        .with_role("bmi", VariableRole::Predictor);
    assert_eq!(mapping.columns_with(VariableRole::Predictor), vec!["age", "bmi"]);
}

#[test]
fn variable_role_parse_inverts_as_str() {
    for role in VariableRole::ALL {
        assert_eq!(VariableRole::parse(role.as_str()), Some(role));
    }
    assert_eq!(VariableRole::parse("nonsense"), None);
}

#[test]
fn mapping_decodes_snake_case_roles() {
    let mapping: VariableMapping =
        serde_json::from_str(r#"{"variables":{"arm":"group","died":"event"}}"#).unwrap();
    assert_eq!(mapping.role("arm"), VariableRole::Group);
    assert_eq!(mapping.role("died"), VariableRole::Event);
}

// =============================================================
// Misc
// =============================================================

#[test]
fn quality_issues_sort_most_severe_first() {
    let issue = |id: &str, severity| QualityIssue {
        id: id.to_owned(),
        column: None,
        kind: "missing_values".to_owned(),
        severity,
        message: String::new(),
        fixable: false,
    };
    let report = QualityReport {
        dataset_id: "d".to_owned(),
        issues: vec![issue("a", Severity::Info), issue("b", Severity::Error), issue("c", Severity::Warning)],
        score: None,
    };
    let ordered = report.by_severity();
    let ids: Vec<&str> = ordered.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["b", "c", "a"]);
}

#[test]
fn run_status_terminal_states() {
    assert!(!RunStatus::Pending.is_terminal());
    assert!(!RunStatus::Running.is_terminal());
    assert!(RunStatus::Completed.is_terminal());
    assert!(RunStatus::Failed.is_terminal());
}

#[test]
fn report_format_path_and_display() {
    assert_eq!(ReportFormat::Docx.as_str(), "docx");
    assert_eq!(ReportFormat::Pdf.to_string(), "PDF");
    assert_eq!(serde_json::to_string(&ReportFormat::Html).unwrap(), "\"html\"");
}
