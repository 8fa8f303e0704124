//! Wire DTOs for the analysis backend's JSON API.
//!
//! DESIGN
//! ======
//! Responses whose shape varies by analysis family are decoded into tagged
//! enums here, at the boundary, so components dispatch on an explicit variant
//! instead of probing which optional fields happen to be present.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// =============================================================
// Datasets
// =============================================================

/// A dataset as listed on the datasets page.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub row_count: u64,
    #[serde(default)]
    pub column_count: u32,
    /// ISO-8601 upload timestamp.
    pub created_at: Option<String>,
}

/// Column metadata inferred by the backend parser.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub name: String,
    /// Backend dtype label (`"numeric"`, `"categorical"`, `"datetime"`, ...).
    pub dtype: String,
    #[serde(default)]
    pub missing: u64,
    pub unique: Option<u64>,
}

/// One page of dataset rows plus schema.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DatasetPage {
    pub id: String,
    pub name: String,
    pub columns: Vec<ColumnInfo>,
    /// Rows keyed by column name.
    pub rows: Vec<serde_json::Map<String, serde_json::Value>>,
    pub page: u32,
    pub limit: u32,
    pub total_rows: u64,
}

/// Schema mutation sent to `POST /datasets/{id}/modify`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum SchemaAction {
    RenameColumn { column: String, new_name: String },
    DropColumn { column: String },
    ChangeType { column: String, dtype: String },
    UpdateCell { row: u64, column: String, value: serde_json::Value },
}

/// Parser overrides sent to `POST /datasets/{id}/reparse`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ReparseOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delimiter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_row: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decimal: Option<String>,
}

/// Column cleaning operation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum CleanOperation {
    TrimWhitespace,
    Lowercase,
    ToNumeric,
    ParseDates,
    DropMissing,
    FillMissing { value: serde_json::Value },
}

impl CleanOperation {
    /// Operations offered in the column menu, without parameters.
    pub const SIMPLE: [CleanOperation; 5] = [
        CleanOperation::TrimWhitespace,
        CleanOperation::Lowercase,
        CleanOperation::ToNumeric,
        CleanOperation::ParseDates,
        CleanOperation::DropMissing,
    ];

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::TrimWhitespace => "Trim whitespace",
            Self::Lowercase => "Lowercase",
            Self::ToNumeric => "Convert to numeric",
            Self::ParseDates => "Parse dates",
            Self::DropMissing => "Drop missing rows",
            Self::FillMissing { .. } => "Fill missing",
        }
    }
}

/// Body of `POST /datasets/{id}/clean_column`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CleanColumnRequest {
    pub column: String,
    #[serde(flatten)]
    pub operation: CleanOperation,
}

// =============================================================
// Variable mapping
// =============================================================

/// Analytical role assigned to a dataset column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableRole {
    Outcome,
    Predictor,
    Group,
    Covariate,
    Time,
    Event,
    Id,
    #[default]
    Ignore,
}

impl VariableRole {
    pub const ALL: [VariableRole; 8] = [
        VariableRole::Outcome,
        VariableRole::Predictor,
        VariableRole::Group,
        VariableRole::Covariate,
        VariableRole::Time,
        VariableRole::Event,
        VariableRole::Id,
        VariableRole::Ignore,
    ];

    /// Wire name, also used as the `<option>` value.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Outcome => "outcome",
            Self::Predictor => "predictor",
            Self::Group => "group",
            Self::Covariate => "covariate",
            Self::Time => "time",
            Self::Event => "event",
            Self::Id => "id",
            Self::Ignore => "ignore",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.as_str() == value)
    }
}

/// Column name → role assignments for one dataset.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableMapping {
    #[serde(default)]
    pub variables: BTreeMap<String, VariableRole>,
}

impl VariableMapping {
    /// Role for `column`, defaulting to [`VariableRole::Ignore`].
    #[must_use]
    pub fn role(&self, column: &str) -> VariableRole {
        self.variables.get(column).copied().unwrap_or_default()
    }

    /// Copy of this mapping with `column` reassigned.
    #[must_use]
    pub fn with_role(&self, column: &str, role: VariableRole) -> Self {
        let mut next = self.clone();
        next.variables.insert(column.to_owned(), role);
        next
    }

    /// Columns assigned `role`, in column-name order.
    #[must_use]
    pub fn columns_with(&self, role: VariableRole) -> Vec<String> {
        self.variables
            .iter()
            .filter(|(_, r)| **r == role)
            .map(|(c, _)| c.clone())
            .collect()
    }
}

// =============================================================
// Data quality
// =============================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// One finding from `GET /quality/scan/{id}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QualityIssue {
    pub id: String,
    pub column: Option<String>,
    /// Machine-readable issue kind (`"missing_values"`, `"outliers"`, ...).
    pub kind: String,
    pub severity: Severity,
    pub message: String,
    /// Whether the backend offers an automatic fix.
    #[serde(default)]
    pub fixable: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    pub dataset_id: String,
    #[serde(default)]
    pub issues: Vec<QualityIssue>,
    /// Overall score in `[0, 100]`, if computed.
    pub score: Option<f64>,
}

impl QualityReport {
    /// Issues ordered most severe first, preserving backend order within a level.
    #[must_use]
    pub fn by_severity(&self) -> Vec<&QualityIssue> {
        let mut issues: Vec<&QualityIssue> = self.issues.iter().collect();
        issues.sort_by(|a, b| b.severity.cmp(&a.severity));
        issues
    }
}

/// Body of `POST /quality/fix/{id}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AutoFixRequest {
    pub issue_ids: Vec<String>,
}

// =============================================================
// Wizard
// =============================================================

/// What the user wants to learn from the data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisGoal {
    Describe,
    CompareGroups,
    Association,
    Prediction,
    Survival,
}

impl AnalysisGoal {
    pub const ALL: [AnalysisGoal; 5] = [
        AnalysisGoal::Describe,
        AnalysisGoal::CompareGroups,
        AnalysisGoal::Association,
        AnalysisGoal::Prediction,
        AnalysisGoal::Survival,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Describe => "Describe variables",
            Self::CompareGroups => "Compare groups",
            Self::Association => "Test an association",
            Self::Prediction => "Predict an outcome",
            Self::Survival => "Time-to-event",
        }
    }

    /// Whether the goal needs an outcome variable before methods can be suggested.
    #[must_use]
    pub fn needs_outcome(self) -> bool {
        !matches!(self, Self::Describe)
    }
}

/// Body of `POST /wizard/recommend`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecommendRequest {
    pub dataset_id: String,
    pub goal: AnalysisGoal,
    pub outcome: Option<String>,
    pub predictors: Vec<String>,
    pub group: Option<String>,
    pub paired: bool,
}

/// One suggested statistical method.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Backend method identifier passed back to `/wizard/apply`.
    pub method: String,
    pub label: String,
    pub rationale: String,
    #[serde(default)]
    pub assumptions: Vec<String>,
    pub score: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendResponse {
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
    #[serde(default)]
    pub warnings: Vec<String>,
}

/// Body of `POST /wizard/apply`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApplyRequest {
    #[serde(flatten)]
    pub selection: RecommendRequest,
    pub method: String,
}

/// Body of `POST /wizard/export`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExportRequest {
    #[serde(flatten)]
    pub apply: ApplyRequest,
    pub format: ReportFormat,
}

// =============================================================
// Analysis results
// =============================================================

/// A completed analysis: shared metadata plus a family-specific result.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalysisOutcome {
    /// Analysis id for report export; absent for ad hoc previews.
    pub id: Option<String>,
    pub method: String,
    /// AI-written plain-language interpretation (markdown).
    pub interpretation: Option<String>,
    #[serde(flatten)]
    pub result: AnalysisResult,
}

/// Family-specific result body, discriminated by `kind`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalysisResult {
    GroupComparison(GroupComparison),
    Regression(RegressionResult),
    Survival(SurvivalResult),
    Descriptive(DescriptiveResult),
    /// A result family this client does not know how to render.
    #[serde(other)]
    Unsupported,
}

impl AnalysisResult {
    /// Wire tag of the variant.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::GroupComparison(_) => "group_comparison",
            Self::Regression(_) => "regression",
            Self::Survival(_) => "survival",
            Self::Descriptive(_) => "descriptive",
            Self::Unsupported => "unsupported",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GroupSummary {
    pub name: String,
    pub n: u64,
    pub mean: Option<f64>,
    pub sd: Option<f64>,
    pub median: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GroupComparison {
    /// Test name (`"Welch t-test"`, `"Kruskal-Wallis"`, ...).
    pub test: String,
    pub statistic: f64,
    pub p_value: f64,
    pub effect_size: Option<f64>,
    #[serde(default)]
    pub groups: Vec<GroupSummary>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coefficient {
    pub term: String,
    pub estimate: f64,
    pub std_error: Option<f64>,
    pub p_value: Option<f64>,
    pub ci_low: Option<f64>,
    pub ci_high: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegressionResult {
    /// Model family (`"linear"`, `"logistic"`, `"cox"`, ...).
    pub model: String,
    pub coefficients: Vec<Coefficient>,
    pub r_squared: Option<f64>,
    pub n: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SurvivalPoint {
    pub time: f64,
    pub survival: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SurvivalCurve {
    pub group: String,
    pub points: Vec<SurvivalPoint>,
    pub median: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SurvivalResult {
    pub curves: Vec<SurvivalCurve>,
    pub log_rank_p: Option<f64>,
    pub hazard_ratio: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VariableSummary {
    pub name: String,
    pub n: u64,
    pub mean: Option<f64>,
    pub sd: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DescriptiveResult {
    pub variables: Vec<VariableSummary>,
}

/// Body of `POST /analysis/interpret`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InterpretRequest {
    pub outcome: AnalysisOutcome,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Interpretation {
    /// Markdown text.
    pub text: String,
}

// =============================================================
// Protocols
// =============================================================

/// Body of `POST /analysis/design`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DesignRequest {
    pub dataset_id: String,
    pub goal: AnalysisGoal,
    pub mapping: VariableMapping,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProtocolStep {
    pub id: String,
    pub title: String,
    pub method: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub depends_on: Vec<String>,
}

/// Backend-generated sequence of analysis steps.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Protocol {
    pub id: String,
    pub title: String,
    pub steps: Vec<ProtocolStep>,
}

/// Body of `POST /analysis/protocol/run`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunRequest {
    pub protocol_id: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    #[default]
    Pending,
    Running,
    Completed,
    Failed,
}

impl RunStatus {
    /// Completed and failed runs never change again.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

/// Response of `POST /analysis/protocol/run`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunHandle {
    pub run_id: String,
    #[serde(default)]
    pub status: RunStatus,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StepResult {
    pub step_id: String,
    pub outcome: AnalysisOutcome,
}

/// Response of `GET /analysis/run/{id}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProtocolRun {
    pub id: String,
    pub protocol_id: String,
    pub status: RunStatus,
    #[serde(default)]
    pub results: Vec<StepResult>,
    pub error: Option<String>,
}

// =============================================================
// Reports
// =============================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Html,
    Pdf,
    Docx,
}

impl ReportFormat {
    pub const ALL: [ReportFormat; 3] = [ReportFormat::Html, ReportFormat::Pdf, ReportFormat::Docx];

    /// Path segment and file extension.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Pdf => "pdf",
            Self::Docx => "docx",
        }
    }

    #[must_use]
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Html => "text/html",
            Self::Pdf => "application/pdf",
            Self::Docx => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str().to_ascii_uppercase())
    }
}

// =============================================================
// Knowledge base
// =============================================================

/// Depth of a tooltip explanation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExplanationLevel {
    #[default]
    Basic,
    Intermediate,
    Advanced,
}

impl ExplanationLevel {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

/// Knowledge-base entry for a statistical term.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TermEntry {
    pub term: String,
    pub level: ExplanationLevel,
    pub definition: String,
    pub example: Option<String>,
}
