use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use serde_json::Value;
use tracing::info;

use super::{Document, ProfileStore, StoreError};

/// In-process profile store keyed by `(collection, document)`.
#[derive(Debug, Clone, Default)]
pub struct MemoryProfileStore {
    documents: HashMap<(String, String), Document>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        collection: impl Into<String>,
        document: impl Into<String>,
        data: Document,
    ) {
        self.documents
            .insert((collection.into(), document.into()), data);
    }

    /// Builder-style `insert`.
    #[allow(dead_code)]
    pub fn with_document(
        mut self,
        collection: impl Into<String>,
        document: impl Into<String>,
        data: Document,
    ) -> Self {
        self.insert(collection, document, data);
        self
    }

    /// Parses `{collection: {document: {key: value}}}`. Key order inside each
    /// document is preserved.
    pub fn from_json_str(raw: &str) -> Result<Self, StoreError> {
        let root: Value = serde_json::from_str(raw)
            .map_err(|e| StoreError::Malformed(format!("invalid profile JSON: {e}")))?;
        let collections = root
            .as_object()
            .ok_or_else(|| StoreError::Malformed("profile root must be an object".into()))?;

        let mut store = Self::new();
        for (collection, documents) in collections {
            let documents = documents.as_object().ok_or_else(|| {
                StoreError::Malformed(format!("collection '{collection}' must be an object"))
            })?;
            for (document, fields) in documents {
                let fields = fields.as_object().ok_or_else(|| {
                    StoreError::Malformed(format!(
                        "document '{collection}/{document}' must be an object"
                    ))
                })?;
                store.insert(
                    collection.as_str(),
                    document.as_str(),
                    Document::from_json_object(fields),
                );
            }
        }
        Ok(store)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let store = Self::from_json_str(&raw)?;
        info!(
            "Loaded {} profile documents from {}",
            store.documents.len(),
            path.display()
        );
        Ok(store)
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn get(
        &self,
        collection: &str,
        document: &str,
    ) -> Result<Option<Document>, StoreError> {
        Ok(self
            .documents
            .get(&(collection.to_string(), document.to_string()))
            .cloned())
    }
}
