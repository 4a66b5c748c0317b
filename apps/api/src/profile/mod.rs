//! Profile store: read-only access to the profile dataset.
//!
//! The dataset is organised as named collections of named documents, each
//! document a flat, ordered `key -> value` mapping. A missing document is
//! `Ok(None)`, never an error: callers treat it as an empty contribution.
//!
//! Backends:
//! - `MemoryProfileStore` (in-process, loadable from a JSON file)
//! - `PgProfileStore` (sqlx / Postgres)

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

pub mod memory;
pub mod postgres;
pub mod sections;

pub use memory::MemoryProfileStore;
pub use postgres::PgProfileStore;

pub const SKILLS_COLLECTION: &str = "SKILLS";
pub const SKILLS_DOC: &str = "Skills";
pub const TOOLS_DOC: &str = "Tools";

pub const PROJECTS_COLLECTION: &str = "Projects";
pub const PROJECTS_DONE_DOC: &str = "Projects Done";
pub const GITHUB_LINKS_DOC: &str = "GitHub links";

pub const CERTIFICATIONS_COLLECTION: &str = "Certifications";
pub const CERTIFICATION_DOCS: [&str; 2] = ["AI ML", "CLOUD"];

pub const EDUCATION_COLLECTION: &str = "Education";
pub const SCHOOLING_DOC: &str = "Schooling";
pub const UNDERGRADUATE_DOC: &str = "Under Graduate";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed profile data: {0}")]
    Malformed(String),
}

/// A single profile document: ordered `key -> value` pairs, in store order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    fields: Vec<(String, String)>,
}

impl Document {
    /// Builds a document from a JSON object. Non-string values keep their JSON text.
    pub fn from_json_object(object: &Map<String, Value>) -> Self {
        let fields = object
            .iter()
            .map(|(key, value)| {
                let value = match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (key.clone(), value)
            })
            .collect();
        Self { fields }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    #[allow(dead_code)]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[allow(dead_code)]
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    /// Renders each field as `"key: value"`, in document order.
    pub fn key_value_lines(&self) -> Vec<String> {
        self.iter().map(|(k, v)| format!("{k}: {v}")).collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Document {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Read interface over the profile dataset. Carried as `Arc<dyn ProfileStore>`.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get(&self, collection: &str, document: &str)
        -> Result<Option<Document>, StoreError>;
}
