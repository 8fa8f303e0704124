//! State for the dataset profile page: paged rows, quality scan and the
//! variable mapping editor.

#[cfg(test)]
#[path = "dataset_profile_test.rs"]
mod dataset_profile_test;

use crate::net::types::{DatasetPage, QualityReport, VariableMapping};

/// Progress of the debounced variable-mapping save.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SaveStatus {
    #[default]
    Idle,
    /// An edit is waiting for the debounce to elapse.
    Pending,
    Saving,
    Saved,
    Failed(String),
}

impl SaveStatus {
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Idle => "",
            Self::Pending => "Unsaved changes",
            Self::Saving => "Saving...",
            Self::Saved => "Saved",
            Self::Failed(message) => message,
        }
    }
}

#[derive(Clone, Debug)]
pub struct DatasetProfileState {
    /// 1-based page number.
    pub page: u32,
    pub page_size: u32,
    pub data: Option<DatasetPage>,
    pub loading: bool,
    pub error: Option<String>,
    pub quality: Option<QualityReport>,
    pub scanning: bool,
    pub mapping: VariableMapping,
    pub save_status: SaveStatus,
}

impl Default for DatasetProfileState {
    fn default() -> Self {
        Self::new(crate::config::ClientConfig::default().page_size)
    }
}

impl DatasetProfileState {
    pub fn new(page_size: u32) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
            data: None,
            loading: false,
            error: None,
            quality: None,
            scanning: false,
            mapping: VariableMapping::default(),
            save_status: SaveStatus::Idle,
        }
    }

    /// Total pages for the loaded dataset, at least one.
    #[must_use]
    pub fn page_count(&self) -> u32 {
        let total = self.data.as_ref().map_or(0, |d| d.total_rows);
        page_count(total, self.page_size)
    }

    /// `page` forced into `1..=page_count()`.
    #[must_use]
    pub fn clamp_page(&self, page: u32) -> u32 {
        page.clamp(1, self.page_count())
    }

    #[must_use]
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page < self.page_count()
    }

    /// Column names of the loaded page, in backend order.
    #[must_use]
    pub fn column_names(&self) -> Vec<String> {
        self.data
            .as_ref()
            .map(|d| d.columns.iter().map(|c| c.name.clone()).collect())
            .unwrap_or_default()
    }
}

/// Number of `limit`-row pages needed for `total_rows`, at least one.
#[must_use]
pub fn page_count(total_rows: u64, limit: u32) -> u32 {
    let limit = u64::from(limit.max(1));
    let pages = total_rows.div_ceil(limit).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}
