//! Session-scoped wizard drafts.
//!
//! SYSTEM CONTEXT
//! ==============
//! The wizard caches its in-progress configuration per dataset so a reload
//! restores the user's choices. Storage is injected: pages receive a
//! [`WizardDrafts`] from context and never touch `sessionStorage` directly,
//! which lets native tests run against [`MemoryStorage`].

#[cfg(test)]
#[path = "draft_store_test.rs"]
mod draft_store_test;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Minimal string key/value store.
pub trait DraftStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Browser `sessionStorage`. Outside the browser every call is a no-op.
#[derive(Clone, Copy, Debug, Default)]
pub struct SessionStorage;

#[cfg(feature = "hydrate")]
fn session_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.session_storage().ok().flatten())
}

impl DraftStorage for SessionStorage {
    fn get(&self, key: &str) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            session_storage()?.get_item(key).ok().flatten()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
            None
        }
    }

    fn set(&self, key: &str, value: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = session_storage() {
                let _ = storage.set_item(key, value);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (key, value);
        }
    }

    fn remove(&self, key: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = session_storage() {
                let _ = storage.remove_item(key);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
        }
    }
}

/// In-process store. Clones share entries.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl DraftStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_owned(), value.to_owned());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(key);
        }
    }
}

/// Storage key for the draft of `dataset_id`.
pub fn draft_key(dataset_id: &str) -> String {
    format!("wizard_draft:{dataset_id}")
}

/// JSON drafts keyed by dataset.
#[derive(Clone, Debug, Default)]
pub struct WizardDrafts<S = SessionStorage> {
    storage: S,
}

impl<S: DraftStorage> WizardDrafts<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Restore the draft for `dataset_id`. A draft that no longer parses is
    /// discarded.
    pub fn load<T: DeserializeOwned>(&self, dataset_id: &str) -> Option<T> {
        let key = draft_key(dataset_id);
        let raw = self.storage.get(&key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("drafts: dropping unreadable {key}: {e}");
                self.storage.remove(&key);
                None
            }
        }
    }

    pub fn save<T: Serialize>(&self, dataset_id: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(raw) => self.storage.set(&draft_key(dataset_id), &raw),
            Err(e) => log::warn!("drafts: could not serialize draft for {dataset_id}: {e}"),
        }
    }

    pub fn clear(&self, dataset_id: &str) {
        self.storage.remove(&draft_key(dataset_id));
    }
}
