use super::*;

#[test]
fn parse_option_treats_empty_as_none() {
    assert_eq!(parse_option(""), None);
    assert_eq!(parse_option("arm"), Some("arm".to_owned()));
    assert_eq!(option_value(None), "");
}

#[test]
fn summary_rows_for_group_comparison() {
    let config = WizardConfig {
        goal: Some(AnalysisGoal::CompareGroups),
        outcome: Some("sbp".to_owned()),
        group: Some("arm".to_owned()),
        method: Some("welch_t".to_owned()),
        ..WizardConfig::default()
    };
    let rows = summary_rows(&config);
    assert_eq!(
        rows,
        vec![
            ("Goal", "Compare groups".to_owned()),
            ("Outcome", "sbp".to_owned()),
            ("Group", "arm".to_owned()),
            ("Paired", "no".to_owned()),
            ("Method", "welch_t".to_owned()),
        ]
    );
}

#[test]
fn summary_rows_mark_missing_choices() {
    let rows = summary_rows(&WizardConfig::default());
    assert_eq!(rows, vec![("Goal", "—".to_owned()), ("Method", "—".to_owned())]);
}

#[test]
fn summary_rows_join_predictors() {
    let config = WizardConfig {
        goal: Some(AnalysisGoal::Prediction),
        predictors: vec!["age".to_owned(), "sex".to_owned()],
        ..WizardConfig::default()
    };
    assert!(summary_rows(&config).contains(&("Predictors", "age, sex".to_owned())));
}
