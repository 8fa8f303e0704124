use super::*;

fn compare_groups() -> WizardConfig {
    let mut config = WizardConfig::default();
    config.set_goal(AnalysisGoal::CompareGroups);
    config
}

#[test]
fn steps_walk_forward_and_back() {
    assert_eq!(WizardStep::Goal.next(), Some(WizardStep::Variables));
    assert_eq!(WizardStep::Review.next(), None);
    assert_eq!(WizardStep::Goal.prev(), None);
    assert_eq!(WizardStep::Review.prev(), Some(WizardStep::Method));
}

#[test]
fn goal_step_needs_a_goal() {
    let mut config = WizardConfig::default();
    assert!(!config.advance());
    config.set_goal(AnalysisGoal::Describe);
    assert!(config.advance());
    assert_eq!(config.step, WizardStep::Variables);
}

#[test]
fn describe_needs_no_variables() {
    let mut config = WizardConfig::default();
    config.set_goal(AnalysisGoal::Describe);
    assert!(config.can_advance(WizardStep::Variables));
}

#[test]
fn compare_groups_needs_outcome_and_group() {
    let mut config = compare_groups();
    assert!(!config.can_advance(WizardStep::Variables));
    config.outcome = Some("sbp".to_owned());
    assert!(!config.can_advance(WizardStep::Variables));
    config.group = Some("arm".to_owned());
    assert!(config.can_advance(WizardStep::Variables));
}

#[test]
fn prediction_needs_a_predictor() {
    let mut config = WizardConfig::default();
    config.set_goal(AnalysisGoal::Prediction);
    config.outcome = Some("death".to_owned());
    assert!(!config.can_advance(WizardStep::Variables));
    config.toggle_predictor("age");
    assert!(config.can_advance(WizardStep::Variables));
}

#[test]
fn toggle_predictor_adds_then_removes() {
    let mut config = WizardConfig::default();
    config.toggle_predictor("age");
    config.toggle_predictor("sex");
    config.toggle_predictor("age");
    assert_eq!(config.predictors, vec!["sex".to_owned()]);
}

#[test]
fn changing_goal_clears_method() {
    let mut config = compare_groups();
    config.method = Some("welch_t".to_owned());
    config.set_goal(AnalysisGoal::CompareGroups);
    assert_eq!(config.method.as_deref(), Some("welch_t"));
    config.set_goal(AnalysisGoal::Survival);
    assert!(config.method.is_none());
}

#[test]
fn review_is_the_last_step() {
    let mut config = compare_groups();
    config.step = WizardStep::Review;
    assert!(!config.advance());
    assert!(config.back());
    assert_eq!(config.step, WizardStep::Method);
}

#[test]
fn recommend_request_requires_goal() {
    assert!(WizardConfig::default().recommend_request("d1").is_none());
    let mut config = compare_groups();
    config.outcome = Some("sbp".to_owned());
    config.group = Some("arm".to_owned());
    let request = config.recommend_request("d1").unwrap();
    assert_eq!(request.dataset_id, "d1");
    assert_eq!(request.goal, AnalysisGoal::CompareGroups);
    assert_eq!(request.group.as_deref(), Some("arm"));
}

#[test]
fn apply_request_requires_method() {
    let mut config = compare_groups();
    assert!(config.apply_request("d1").is_none());
    config.method = Some("welch_t".to_owned());
    assert_eq!(config.apply_request("d1").unwrap().method, "welch_t");
}

#[test]
fn from_mapping_prefills_roles() {
    let mapping = VariableMapping::default()
        .with_role("sbp", VariableRole::Outcome)
        .with_role("age", VariableRole::Predictor)
        .with_role("sex", VariableRole::Predictor)
        .with_role("arm", VariableRole::Group);
    let config = WizardConfig::from_mapping(&mapping);
    assert_eq!(config.outcome.as_deref(), Some("sbp"));
    assert_eq!(config.predictors, vec!["age".to_owned(), "sex".to_owned()]);
    assert_eq!(config.group.as_deref(), Some("arm"));
    assert_eq!(config.step, WizardStep::Goal);
}

#[test]
fn config_survives_json_draft() {
    let mut config = compare_groups();
    config.step = WizardStep::Method;
    let raw = serde_json::to_string(&config).unwrap();
    let restored: WizardConfig = serde_json::from_str(&raw).unwrap();
    assert_eq!(restored, config);
}

#[test]
fn reset_results_clears_backend_output() {
    let mut state = WizardState {
        recommendations: Some(RecommendResponse::default()),
        error: Some("boom".to_owned()),
        loading: true,
        ..WizardState::default()
    };
    state.reset_results();
    assert!(!state.loading);
    assert!(state.recommendations.is_none());
    assert!(state.error.is_none());
}
