//! Analysis wizard state.
//!
//! DESIGN
//! ======
//! `WizardConfig` is everything the user has chosen so far. It is
//! serializable so it can be cached per dataset as a session draft and
//! restored on reload. Backend responses live in `WizardState`, which is
//! never persisted.

#[cfg(test)]
#[path = "wizard_test.rs"]
mod wizard_test;

use serde::{Deserialize, Serialize};

use crate::net::types::{
    AnalysisGoal, AnalysisOutcome, ApplyRequest, RecommendRequest, RecommendResponse, VariableMapping, VariableRole,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    #[default]
    Goal,
    Variables,
    Method,
    Review,
}

impl WizardStep {
    pub const ALL: [WizardStep; 4] = [WizardStep::Goal, WizardStep::Variables, WizardStep::Method, WizardStep::Review];

    #[must_use]
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Goal => Some(Self::Variables),
            Self::Variables => Some(Self::Method),
            Self::Method => Some(Self::Review),
            Self::Review => None,
        }
    }

    #[must_use]
    pub fn prev(self) -> Option<Self> {
        match self {
            Self::Goal => None,
            Self::Variables => Some(Self::Goal),
            Self::Method => Some(Self::Variables),
            Self::Review => Some(Self::Method),
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Goal => "Goal",
            Self::Variables => "Variables",
            Self::Method => "Method",
            Self::Review => "Review",
        }
    }
}

/// User selections, cached as a draft between page loads.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WizardConfig {
    #[serde(default)]
    pub step: WizardStep,
    pub goal: Option<AnalysisGoal>,
    pub outcome: Option<String>,
    #[serde(default)]
    pub predictors: Vec<String>,
    pub group: Option<String>,
    #[serde(default)]
    pub paired: bool,
    /// Backend method id picked from the recommendations.
    pub method: Option<String>,
}

impl WizardConfig {
    /// Seed variable choices from the dataset's saved mapping.
    #[must_use]
    pub fn from_mapping(mapping: &VariableMapping) -> Self {
        Self {
            outcome: mapping.columns_with(VariableRole::Outcome).into_iter().next(),
            predictors: mapping.columns_with(VariableRole::Predictor),
            group: mapping.columns_with(VariableRole::Group).into_iter().next(),
            ..Self::default()
        }
    }

    /// Whether the selections made so far are enough to leave `step`.
    #[must_use]
    pub fn can_advance(&self, step: WizardStep) -> bool {
        match step {
            WizardStep::Goal => self.goal.is_some(),
            WizardStep::Variables => {
                let Some(goal) = self.goal else {
                    return false;
                };
                if goal.needs_outcome() && self.outcome.is_none() {
                    return false;
                }
                match goal {
                    AnalysisGoal::CompareGroups => self.group.is_some(),
                    AnalysisGoal::Association | AnalysisGoal::Prediction => !self.predictors.is_empty(),
                    AnalysisGoal::Describe | AnalysisGoal::Survival => true,
                }
            }
            WizardStep::Method => self.method.is_some(),
            WizardStep::Review => false,
        }
    }

    /// Move to the next step if the current one is complete.
    pub fn advance(&mut self) -> bool {
        match self.step.next() {
            Some(next) if self.can_advance(self.step) => {
                self.step = next;
                true
            }
            _ => false,
        }
    }

    pub fn back(&mut self) -> bool {
        match self.step.prev() {
            Some(prev) => {
                self.step = prev;
                true
            }
            None => false,
        }
    }

    /// Changing the goal invalidates the chosen method.
    pub fn set_goal(&mut self, goal: AnalysisGoal) {
        if self.goal != Some(goal) {
            self.goal = Some(goal);
            self.method = None;
        }
    }

    pub fn toggle_predictor(&mut self, column: &str) {
        if let Some(pos) = self.predictors.iter().position(|p| p == column) {
            self.predictors.remove(pos);
        } else {
            self.predictors.push(column.to_owned());
        }
    }

    /// Body for `/wizard/recommend`, once a goal is chosen.
    #[must_use]
    pub fn recommend_request(&self, dataset_id: &str) -> Option<RecommendRequest> {
        Some(RecommendRequest {
            dataset_id: dataset_id.to_owned(),
            goal: self.goal?,
            outcome: self.outcome.clone(),
            predictors: self.predictors.clone(),
            group: self.group.clone(),
            paired: self.paired,
        })
    }

    /// Body for `/wizard/apply`, once a method is chosen.
    #[must_use]
    pub fn apply_request(&self, dataset_id: &str) -> Option<ApplyRequest> {
        Some(ApplyRequest { selection: self.recommend_request(dataset_id)?, method: self.method.clone()? })
    }
}

/// Backend results for the current wizard run.
#[derive(Clone, Debug, Default)]
pub struct WizardState {
    pub recommendations: Option<RecommendResponse>,
    pub result: Option<AnalysisOutcome>,
    pub loading: bool,
    pub error: Option<String>,
}

impl WizardState {
    /// Forget backend output after the selections change.
    pub fn reset_results(&mut self) {
        self.loading = false;
        self.recommendations = None;
        self.result = None;
        self.error = None;
    }
}
