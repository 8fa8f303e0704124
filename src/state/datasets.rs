//! Dataset-list state for the landing page.
//!
//! DESIGN
//! ======
//! List inventory is kept apart from the profile of the dataset being viewed
//! so upload and delete flows never disturb an open profile page.

#[cfg(test)]
#[path = "datasets_test.rs"]
mod datasets_test;

use crate::net::types::DatasetSummary;

#[derive(Clone, Debug, Default)]
pub struct DatasetsState {
    pub items: Vec<DatasetSummary>,
    pub loading: bool,
    pub uploading: bool,
    pub error: Option<String>,
}

impl DatasetsState {
    /// Replace the entry with the same id, or append a new one.
    pub fn upsert(&mut self, dataset: DatasetSummary) {
        match self.items.iter_mut().find(|d| d.id == dataset.id) {
            Some(existing) => *existing = dataset,
            None => self.items.push(dataset),
        }
    }

    /// Drop `id` from the list. Returns whether anything was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|d| d.id != id);
        self.items.len() != before
    }

    pub fn get(&self, id: &str) -> Option<&DatasetSummary> {
        self.items.iter().find(|d| d.id == id)
    }
}
