//! REST API client for the analysis backend.
//!
//! Each method performs exactly one request through the injected
//! [`Transport`] and returns parsed JSON, or raw bytes for report downloads.
//! There is no retry, caching, batching or request deduplication; concurrent
//! calls race and the last response to arrive wins.
//!
//! ERROR HANDLING
//! ==============
//! Non-2xx responses become an [`ApiError`] whose message is the backend's
//! `detail` (see [`ApiError::from_response`]). Callers catch and display.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::request::{ApiRequest, FilePart, FormPart, segment};
use super::transport::{HttpTransport, RawResponse, Transport};
use super::types::{
    ApplyRequest, AnalysisOutcome, AutoFixRequest, CleanColumnRequest, DatasetPage, DatasetSummary, DesignRequest,
    ExplanationLevel, ExportRequest, InterpretRequest, Interpretation, Protocol, ProtocolRun, QualityReport,
    RecommendRequest, RecommendResponse, ReparseOptions, ReportFormat, RunHandle, RunRequest, SchemaAction, TermEntry,
    VariableMapping,
};
use crate::util::download::{Download, report_filename};

fn dataset_endpoint(dataset_id: &str) -> String {
    format!("/datasets/{}", segment(dataset_id))
}

fn variable_mapping_endpoint(dataset_id: &str) -> String {
    format!("/datasets/{}/variable_mapping", segment(dataset_id))
}

fn analysis_report_endpoint(analysis_id: &str, format: ReportFormat) -> String {
    format!("/analysis/report/{}/{}", segment(analysis_id), format.as_str())
}

fn protocol_report_endpoint(protocol_id: &str, format: ReportFormat) -> String {
    format!("/analysis/protocol/report/{}/{}", segment(protocol_id), format.as_str())
}

/// Typed client over a [`Transport`].
#[derive(Clone, Debug)]
pub struct ApiClient<T = HttpTransport> {
    transport: T,
}

impl ApiClient<HttpTransport> {
    /// Browser client rooted at `api_base`.
    pub fn http(api_base: &str) -> Self {
        Self::new(HttpTransport::new(api_base))
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn exchange(&self, request: &ApiRequest) -> Result<RawResponse, ApiError> {
        let response = self.transport.send(request).await?;
        if !response.is_success() {
            let err = ApiError::from_response(response.status, &response.status_text, &response.body);
            log::warn!("api: {} {} failed: {} {}", request.method.as_str(), request.path, response.status, err);
            return Err(err);
        }
        Ok(response)
    }

    async fn call<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R, ApiError> {
        let response = self.exchange(&request).await?;
        serde_json::from_slice(&response.body).map_err(|e| ApiError::decode(&e))
    }

    async fn call_empty(&self, request: ApiRequest) -> Result<(), ApiError> {
        self.exchange(&request).await.map(|_| ())
    }

    async fn download(&self, request: ApiRequest, filename: String, format: ReportFormat) -> Result<Download, ApiError> {
        let response = self.exchange(&request.binary()).await?;
        let content_type = response
            .content_type
            .unwrap_or_else(|| format.mime_type().to_owned());
        Ok(Download { filename, content_type, bytes: response.body })
    }

    // =============================================================
    // Datasets
    // =============================================================

    /// `GET /datasets`.
    ///
    /// # Errors
    ///
    /// Returns the backend's error message on failure.
    pub async fn list_datasets(&self) -> Result<Vec<DatasetSummary>, ApiError> {
        self.call(ApiRequest::get("/datasets")).await
    }

    /// Upload a raw file via multipart `POST /datasets`.
    ///
    /// # Errors
    ///
    /// Returns the backend's error message on failure.
    pub async fn upload_dataset(&self, file: FilePart) -> Result<DatasetSummary, ApiError> {
        let part = FormPart::File { name: "file".to_owned(), file };
        self.call(ApiRequest::post("/datasets").multipart(vec![part])).await
    }

    /// `GET /datasets/{id}?page&limit`.
    ///
    /// # Errors
    ///
    /// Returns the backend's error message on failure.
    pub async fn fetch_dataset(&self, dataset_id: &str, page: u32, limit: u32) -> Result<DatasetPage, ApiError> {
        let request = ApiRequest::get(dataset_endpoint(dataset_id))
            .query("page", page)
            .query("limit", limit);
        self.call(request).await
    }

    /// `DELETE /datasets/{id}`.
    ///
    /// # Errors
    ///
    /// Returns the backend's error message on failure.
    pub async fn delete_dataset(&self, dataset_id: &str) -> Result<(), ApiError> {
        self.call_empty(ApiRequest::delete(dataset_endpoint(dataset_id))).await
    }

    /// Apply a schema change; returns the refreshed dataset summary.
    ///
    /// # Errors
    ///
    /// Returns the backend's error message on failure.
    pub async fn modify_dataset(&self, dataset_id: &str, action: &SchemaAction) -> Result<DatasetSummary, ApiError> {
        let request = ApiRequest::post(format!("{}/modify", dataset_endpoint(dataset_id))).json(action)?;
        self.call(request).await
    }

    /// Re-run the parser with overrides.
    ///
    /// # Errors
    ///
    /// Returns the backend's error message on failure.
    pub async fn reparse_dataset(&self, dataset_id: &str, options: &ReparseOptions) -> Result<DatasetSummary, ApiError> {
        let request = ApiRequest::post(format!("{}/reparse", dataset_endpoint(dataset_id))).json(options)?;
        self.call(request).await
    }

    /// Apply a cleaning operation to one column.
    ///
    /// # Errors
    ///
    /// Returns the backend's error message on failure.
    pub async fn clean_column(&self, dataset_id: &str, body: &CleanColumnRequest) -> Result<DatasetSummary, ApiError> {
        let request = ApiRequest::post(format!("{}/clean_column", dataset_endpoint(dataset_id))).json(body)?;
        self.call(request).await
    }

    // =============================================================
    // Variable mapping
    // =============================================================

    /// # Errors
    ///
    /// Returns the backend's error message on failure.
    pub async fn fetch_variable_mapping(&self, dataset_id: &str) -> Result<VariableMapping, ApiError> {
        self.call(ApiRequest::get(variable_mapping_endpoint(dataset_id))).await
    }

    /// Replace the whole mapping; returns what the backend stored.
    ///
    /// # Errors
    ///
    /// Returns the backend's error message on failure.
    pub async fn save_variable_mapping(
        &self,
        dataset_id: &str,
        mapping: &VariableMapping,
    ) -> Result<VariableMapping, ApiError> {
        let request = ApiRequest::put(variable_mapping_endpoint(dataset_id)).json(mapping)?;
        self.call(request).await
    }

    // =============================================================
    // Data quality
    // =============================================================

    /// # Errors
    ///
    /// Returns the backend's error message on failure.
    pub async fn scan_quality(&self, dataset_id: &str) -> Result<QualityReport, ApiError> {
        self.call(ApiRequest::get(format!("/quality/scan/{}", segment(dataset_id)))).await
    }

    /// Ask the backend to auto-fix the given issues; returns a fresh scan.
    ///
    /// # Errors
    ///
    /// Returns the backend's error message on failure.
    pub async fn auto_fix(&self, dataset_id: &str, issue_ids: Vec<String>) -> Result<QualityReport, ApiError> {
        let request = ApiRequest::post(format!("/quality/fix/{}", segment(dataset_id))).json(&AutoFixRequest { issue_ids })?;
        self.call(request).await
    }

    // =============================================================
    // Wizard
    // =============================================================

    /// # Errors
    ///
    /// Returns the backend's error message on failure.
    pub async fn recommend(&self, body: &RecommendRequest) -> Result<RecommendResponse, ApiError> {
        self.call(ApiRequest::post("/wizard/recommend").json(body)?).await
    }

    /// # Errors
    ///
    /// Returns the backend's error message on failure.
    pub async fn apply_strategy(&self, body: &ApplyRequest) -> Result<AnalysisOutcome, ApiError> {
        self.call(ApiRequest::post("/wizard/apply").json(body)?).await
    }

    /// # Errors
    ///
    /// Returns the backend's error message on failure.
    pub async fn export_wizard_report(&self, body: &ExportRequest) -> Result<Download, ApiError> {
        let request = ApiRequest::post("/wizard/export").json(body)?;
        let filename = report_filename("wizard", &body.apply.selection.dataset_id, body.format);
        self.download(request, filename, body.format).await
    }

    /// # Errors
    ///
    /// Returns the backend's error message on failure.
    pub async fn interpret(&self, outcome: &AnalysisOutcome) -> Result<Interpretation, ApiError> {
        let body = InterpretRequest { outcome: outcome.clone() };
        self.call(ApiRequest::post("/analysis/interpret").json(&body)?).await
    }

    // =============================================================
    // Protocols
    // =============================================================

    /// # Errors
    ///
    /// Returns the backend's error message on failure.
    pub async fn design_protocol(&self, body: &DesignRequest) -> Result<Protocol, ApiError> {
        self.call(ApiRequest::post("/analysis/design").json(body)?).await
    }

    /// # Errors
    ///
    /// Returns the backend's error message on failure.
    pub async fn run_protocol(&self, protocol_id: &str) -> Result<RunHandle, ApiError> {
        let body = RunRequest { protocol_id: protocol_id.to_owned() };
        self.call(ApiRequest::post("/analysis/protocol/run").json(&body)?).await
    }

    /// # Errors
    ///
    /// Returns the backend's error message on failure.
    pub async fn fetch_run(&self, run_id: &str) -> Result<ProtocolRun, ApiError> {
        self.call(ApiRequest::get(format!("/analysis/run/{}", segment(run_id)))).await
    }

    // =============================================================
    // Reports
    // =============================================================

    /// # Errors
    ///
    /// Returns the backend's error message on failure.
    pub async fn analysis_report(&self, analysis_id: &str, format: ReportFormat) -> Result<Download, ApiError> {
        let request = ApiRequest::get(analysis_report_endpoint(analysis_id, format));
        self.download(request, report_filename("analysis", analysis_id, format), format)
            .await
    }

    /// # Errors
    ///
    /// Returns the backend's error message on failure.
    pub async fn protocol_report(&self, protocol_id: &str, format: ReportFormat) -> Result<Download, ApiError> {
        let request = ApiRequest::get(protocol_report_endpoint(protocol_id, format));
        self.download(request, report_filename("protocol", protocol_id, format), format)
            .await
    }

    // =============================================================
    // Knowledge base
    // =============================================================

    /// Tooltip definition for a statistical term.
    ///
    /// # Errors
    ///
    /// Returns the backend's error message on failure.
    pub async fn lookup_term(&self, term: &str, level: ExplanationLevel) -> Result<TermEntry, ApiError> {
        let request = ApiRequest::get("/knowledge/terms")
            .query("term", term)
            .query("level", level.as_str());
        self.call(request).await
    }
}
