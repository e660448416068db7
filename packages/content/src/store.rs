//! Store-level inputs owned outside the content document, and the
//! persistence seam for the content document itself.

use crate::errors::StoreError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::RwLock;

/// Store record fields the renderers read
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreProfile {
    pub display_name: String,
    pub description: String,
    /// Public domain, e.g. `fireside.shop.example`
    pub domain: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl StoreProfile {
    /// Text that replaces the template's placeholder brand: the first label
    /// of the domain, upper-cased, else the display name upper-cased
    pub fn brand_text(&self) -> Option<String> {
        let label = self
            .domain
            .trim()
            .trim_start_matches("www.")
            .split('.')
            .next()
            .unwrap_or("")
            .trim();

        let brand = if label.is_empty() {
            self.display_name.trim()
        } else {
            label
        };
        (!brand.is_empty()).then(|| brand.to_uppercase())
    }

    pub fn has_contact(&self) -> bool {
        [&self.email, &self.phone, &self.address]
            .iter()
            .any(|field| field.as_deref().is_some_and(|v| !v.trim().is_empty()))
    }
}

/// Load/save of the opaque content JSON on a store record.
///
/// Saves are last-write-wins; there is no version check.
pub trait ContentStore: Send + Sync {
    fn load_content(&self, store_key: &str) -> Result<Option<Value>, StoreError>;

    fn save_content(&self, store_key: &str, content: &Value) -> Result<(), StoreError>;
}

/// In-memory [`ContentStore`]
#[derive(Debug, Default)]
pub struct MemoryContentStore {
    documents: RwLock<HashMap<String, Value>>,
}

impl MemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ContentStore for MemoryContentStore {
    fn load_content(&self, store_key: &str) -> Result<Option<Value>, StoreError> {
        let documents = self
            .documents
            .read()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(documents.get(store_key).cloned())
    }

    fn save_content(&self, store_key: &str, content: &Value) -> Result<(), StoreError> {
        let mut documents = self
            .documents
            .write()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        documents.insert(store_key.to_string(), content.clone());
        Ok(())
    }
}
