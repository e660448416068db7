//! Store records: the externally owned row a public page is rendered from.
//!
//! Records are opaque to the renderers apart from the profile fields, the
//! template key, the content document and the product list. Both stores
//! here are last-write-wins.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use storefront_content::{ContentStore, StoreError, StoreProfile};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// One store as persisted
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreRecord {
    #[serde(flatten)]
    pub profile: StoreProfile,

    /// Template key; unknown keys render with the default template
    #[serde(default)]
    pub template: String,

    /// Unpublished stores are not served
    #[serde(default)]
    pub published: bool,

    /// Content document JSON, read leniently
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Value>,

    /// Product list JSON, read leniently
    #[serde(default = "empty_products")]
    pub products: Value,
}

fn empty_products() -> Value {
    Value::Array(Vec::new())
}

impl StoreRecord {
    pub fn new(domain: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            profile: StoreProfile {
                domain: domain.into(),
                display_name: display_name.into(),
                ..Default::default()
            },
            products: empty_products(),
            ..Default::default()
        }
    }

    pub fn domain(&self) -> &str {
        &self.profile.domain
    }
}

/// Normalize a `Host` header or domain path segment to a record key.
///
/// Strips any port, lowercases, and rejects anything that is not a plain
/// domain name.
pub fn normalize_domain(host: &str) -> Option<String> {
    let host = host.trim();
    let host = match host.rsplit_once(':') {
        Some((name, port)) if port.chars().all(|c| c.is_ascii_digit()) => name,
        _ => host,
    };
    let domain = host.trim_end_matches('.').to_ascii_lowercase();

    let valid = !domain.is_empty()
        && domain.len() <= 253
        && !domain.starts_with('.')
        && !domain.contains("..")
        && domain
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.');
    valid.then_some(domain)
}

/// Load/save of whole store records
pub trait RecordStore: ContentStore {
    fn load(&self, domain: &str) -> Result<Option<StoreRecord>, StoreError>;

    fn save(&self, record: &StoreRecord) -> Result<(), StoreError>;
}

fn load_content_from(records: &dyn RecordStore, domain: &str) -> Result<Option<Value>, StoreError> {
    Ok(records.load(domain)?.and_then(|record| record.content))
}

fn save_content_to(records: &dyn RecordStore, domain: &str, content: &Value) -> Result<(), StoreError> {
    let mut record = records
        .load(domain)?
        .ok_or_else(|| StoreError::NotFound(domain.to_string()))?;
    record.content = Some(content.clone());
    records.save(&record)
}

/// One JSON file per store under `<data_dir>/stores/`
#[derive(Debug, Clone)]
pub struct FileRecordStore {
    root: PathBuf,
}

impl FileRecordStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            root: data_dir.into().join("stores"),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, domain: &str) -> Option<PathBuf> {
        normalize_domain(domain).map(|domain| self.root.join(format!("{}.json", domain)))
    }

    /// Every record on disk, skipping files that fail to parse
    pub fn list(&self) -> Result<Vec<StoreRecord>, StoreError> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut records = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().map_or(false, |e| e == "json") {
                match fs::read_to_string(&path).map_err(StoreError::from).and_then(|json| {
                    serde_json::from_str::<StoreRecord>(&json).map_err(StoreError::from)
                }) {
                    Ok(record) => records.push(record),
                    Err(e) => debug!(path = %path.display(), error = %e, "Skipping unreadable store record"),
                }
            }
        }
        records.sort_by(|a, b| a.profile.domain.cmp(&b.profile.domain));
        Ok(records)
    }
}

impl RecordStore for FileRecordStore {
    fn load(&self, domain: &str) -> Result<Option<StoreRecord>, StoreError> {
        let Some(domain) = normalize_domain(domain) else {
            return Ok(None);
        };
        let path = self.root.join(format!("{}.json", domain));

        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let mut record: StoreRecord = serde_json::from_str(&json)?;
        if record.profile.domain.trim().is_empty() {
            record.profile.domain = domain;
        }
        Ok(Some(record))
    }

    fn save(&self, record: &StoreRecord) -> Result<(), StoreError> {
        let path = self
            .path_for(record.domain())
            .ok_or_else(|| StoreError::Backend(format!("Invalid store domain: {:?}", record.domain())))?;

        fs::create_dir_all(&self.root)?;
        // Each writer stages its own file, then renames it over the record
        let mut staging = NamedTempFile::new_in(&self.root)?;
        staging.write_all(serde_json::to_string_pretty(record)?.as_bytes())?;
        staging.persist(&path).map_err(|e| e.error)?;

        info!(domain = %record.domain(), "Saved store record");
        Ok(())
    }
}

impl ContentStore for FileRecordStore {
    fn load_content(&self, store_key: &str) -> Result<Option<Value>, StoreError> {
        load_content_from(self, store_key)
    }

    fn save_content(&self, store_key: &str, content: &Value) -> Result<(), StoreError> {
        save_content_to(self, store_key, content)
    }
}

/// In-memory [`RecordStore`]
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    records: RwLock<HashMap<String, StoreRecord>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store; records without a usable domain are dropped
    pub fn with_records(records: impl IntoIterator<Item = StoreRecord>) -> Self {
        let records = records
            .into_iter()
            .filter_map(|record| normalize_domain(record.domain()).map(|domain| (domain, record)))
            .collect();
        Self {
            records: RwLock::new(records),
        }
    }

    fn lock_error() -> StoreError {
        StoreError::Backend("record store lock poisoned".to_string())
    }
}

impl RecordStore for MemoryRecordStore {
    fn load(&self, domain: &str) -> Result<Option<StoreRecord>, StoreError> {
        let Some(domain) = normalize_domain(domain) else {
            return Ok(None);
        };
        let records = self.records.read().map_err(|_| Self::lock_error())?;
        Ok(records.get(&domain).cloned())
    }

    fn save(&self, record: &StoreRecord) -> Result<(), StoreError> {
        let domain = normalize_domain(record.domain())
            .ok_or_else(|| StoreError::Backend(format!("Invalid store domain: {:?}", record.domain())))?;
        let mut records = self.records.write().map_err(|_| Self::lock_error())?;
        records.insert(domain, record.clone());
        Ok(())
    }
}

impl ContentStore for MemoryRecordStore {
    fn load_content(&self, store_key: &str) -> Result<Option<Value>, StoreError> {
        load_content_from(self, store_key)
    }

    fn save_content(&self, store_key: &str, content: &Value) -> Result<(), StoreError> {
        save_content_to(self, store_key, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_domain() {
        assert_eq!(normalize_domain("Fireside.Shop.Example:8080"), Some("fireside.shop.example".into()));
        assert_eq!(normalize_domain("fireside.shop.example."), Some("fireside.shop.example".into()));
        assert_eq!(normalize_domain("../etc/passwd"), None);
        assert_eq!(normalize_domain("a..b"), None);
        assert_eq!(normalize_domain(""), None);
        assert_eq!(normalize_domain("shop example"), None);
    }

    #[test]
    fn test_record_json_shape() {
        let record: StoreRecord = serde_json::from_value(json!({
            "displayName": "Fireside Pottery",
            "domain": "fireside.shop.example",
            "email": "hello@fireside.example",
            "template": "modern",
            "published": true,
            "products": [{ "id": 1, "name": "Mug", "price": 199.5 }]
        }))
        .unwrap();

        assert_eq!(record.profile.display_name, "Fireside Pottery");
        assert_eq!(record.profile.email.as_deref(), Some("hello@fireside.example"));
        assert_eq!(record.template, "modern");
        assert!(record.published);
        assert!(record.content.is_none());
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileRecordStore::new(dir.path());
        assert!(store.load("fireside.shop.example").unwrap().is_none());

        let mut record = StoreRecord::new("fireside.shop.example", "Fireside Pottery");
        record.published = true;
        store.save(&record).unwrap();

        assert!(dir.path().join("stores/fireside.shop.example.json").exists());
        assert_eq!(store.load("FIRESIDE.shop.example:443").unwrap(), Some(record));
        assert_eq!(store.list().unwrap().len(), 1);
    }

    #[test]
    fn test_content_store_is_last_write_wins() {
        let store = MemoryRecordStore::with_records([StoreRecord::new("fireside.shop.example", "Fireside")]);

        store.save_content("fireside.shop.example", &json!({ "version": 1 })).unwrap();
        store
            .save_content("fireside.shop.example", &json!({ "version": 1, "hero": { "title": "B" } }))
            .unwrap();

        assert_eq!(
            store.load_content("fireside.shop.example").unwrap(),
            Some(json!({ "version": 1, "hero": { "title": "B" } }))
        );
    }

    #[test]
    fn test_concurrent_saves_never_tear_a_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = std::sync::Arc::new(FileRecordStore::new(dir.path()));
        store.save(&StoreRecord::new("fireside.shop.example", "Fireside")).unwrap();

        let handles: Vec<_> = (0..8)
            .map(|writer| {
                let store = store.clone();
                std::thread::spawn(move || {
                    for round in 0..50 {
                        let content = json!({ "version": 1, "hero": { "title": format!("{}-{}", writer, round) } });
                        store.save_content("fireside.shop.example", &content).unwrap();
                        let record = store.load("fireside.shop.example").unwrap().unwrap();
                        assert!(record.content.is_some());
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.list().unwrap().len(), 1);
        let leftovers = fs::read_dir(store.root()).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[test]
    fn test_content_save_needs_a_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileRecordStore::new(dir.path());
        assert!(matches!(
            store.save_content("missing.example", &json!({})),
            Err(StoreError::NotFound(_))
        ));
    }
}
