//! Projects pipeline: soft-join project records to their links, then summarize
//! every matched project with the model in parallel.
//!
//! Flow: read_project_sources → Correlator::match_projects → Enricher::enrich

use tracing::error;

use crate::profile::{sections::read_project_sources, ProfileStore};

pub mod correlate;
pub mod enrich;

pub use correlate::Correlator;
pub use enrich::Enricher;

/// Rendered in place of a link when no candidate clears the threshold.
pub const NO_LINK: &str = "No link found";

/// Summary used when the model call times out or fails.
pub const SUMMARY_UNAVAILABLE: &str = "Description not available.";

/// One entry of the "Projects Done" document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRecord {
    pub name: String,
    pub description: String,
}

/// One entry of the "GitHub links" document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkEntry {
    pub name: String,
    pub url: String,
}

/// A project joined to at most one link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedProject {
    pub name: String,
    pub description: String,
    pub link: Option<String>,
}

impl MatchedProject {
    #[allow(dead_code)]
    pub fn link_or_placeholder(&self) -> &str {
        self.link.as_deref().unwrap_or(NO_LINK)
    }
}

/// A matched project plus its model summary (or the unavailable sentinel).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedProject {
    pub name: String,
    pub description: String,
    pub link: Option<String>,
    pub summary: String,
}

impl EnrichedProject {
    pub fn link_or_placeholder(&self) -> &str {
        self.link.as_deref().unwrap_or(NO_LINK)
    }
}

/// Reads both project documents and joins them.
///
/// Store failures are logged and degrade to an empty list so the request can
/// still answer "No projects found."
pub async fn load_matched_projects(
    store: &dyn ProfileStore,
    correlator: &Correlator,
) -> Vec<MatchedProject> {
    match read_project_sources(store).await {
        Ok((projects, links)) => correlator.match_projects(&projects, &links),
        Err(e) => {
            error!("Error fetching project data: {e}");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::profile::{Document, MemoryProfileStore, StoreError};

    struct FailingStore;

    #[async_trait]
    impl ProfileStore for FailingStore {
        async fn get(&self, _: &str, _: &str) -> Result<Option<Document>, StoreError> {
            Err(StoreError::Malformed("connection reset".to_string()))
        }
    }

    #[tokio::test]
    async fn test_store_failure_degrades_to_empty() {
        let matched = load_matched_projects(&FailingStore, &Correlator::default()).await;
        assert!(matched.is_empty());
    }

    #[tokio::test]
    async fn test_missing_links_document_leaves_projects_unlinked() {
        let store = MemoryProfileStore::new().with_document(
            "Projects",
            "Projects Done",
            [("Chat Bot", "An assistant")].into_iter().collect(),
        );
        let matched = load_matched_projects(&store, &Correlator::default()).await;
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].link_or_placeholder(), "No link found");
    }

    #[tokio::test]
    async fn test_joins_links_in_project_order() {
        let store = MemoryProfileStore::new()
            .with_document(
                "Projects",
                "Projects Done",
                [("Weather App", "Forecasts"), ("Chat Bot", "An assistant")]
                    .into_iter()
                    .collect(),
            )
            .with_document(
                "Projects",
                "GitHub links",
                [
                    ("ChatBot-App", "https://github.com/u/chatbot"),
                    ("weather-app", "https://github.com/u/weather"),
                ]
                .into_iter()
                .collect(),
            );
        let matched = load_matched_projects(&store, &Correlator::default()).await;
        let names: Vec<_> = matched.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Weather App", "Chat Bot"]);
        assert_eq!(matched[1].link.as_deref(), Some("https://github.com/u/chatbot"));
    }
}
