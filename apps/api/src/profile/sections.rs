//! Typed readers for each profile section. Absent documents contribute nothing.

use tracing::debug;

use super::{
    Document, ProfileStore, StoreError, CERTIFICATIONS_COLLECTION, CERTIFICATION_DOCS,
    EDUCATION_COLLECTION, GITHUB_LINKS_DOC, PROJECTS_COLLECTION, PROJECTS_DONE_DOC,
    SCHOOLING_DOC, SKILLS_COLLECTION, SKILLS_DOC, TOOLS_DOC, UNDERGRADUATE_DOC,
};
use crate::projects::{LinkEntry, ProjectRecord};

/// Education lines, one `"key: value"` string per field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EducationRecord {
    pub schooling: Vec<String>,
    pub undergraduate: Vec<String>,
}

/// The two skill sets. A set is `None` when its document is absent or empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkillSets {
    pub skills: Option<Document>,
    pub tools: Option<Document>,
}

impl SkillSets {
    pub fn is_empty(&self) -> bool {
        self.skills.is_none() && self.tools.is_none()
    }
}

async fn read(
    store: &dyn ProfileStore,
    collection: &str,
    document: &str,
) -> Result<Document, StoreError> {
    match store.get(collection, document).await? {
        Some(doc) => Ok(doc),
        None => {
            debug!("Document {collection}/{document} not found");
            Ok(Document::default())
        }
    }
}

pub async fn read_certifications(store: &dyn ProfileStore) -> Result<Vec<String>, StoreError> {
    let mut certifications = Vec::new();
    for doc_id in CERTIFICATION_DOCS {
        let doc = read(store, CERTIFICATIONS_COLLECTION, doc_id).await?;
        certifications.extend(doc.key_value_lines());
    }
    Ok(certifications)
}

pub async fn read_education(store: &dyn ProfileStore) -> Result<EducationRecord, StoreError> {
    let schooling = read(store, EDUCATION_COLLECTION, SCHOOLING_DOC).await?;
    let undergraduate = read(store, EDUCATION_COLLECTION, UNDERGRADUATE_DOC).await?;
    Ok(EducationRecord {
        schooling: schooling.key_value_lines(),
        undergraduate: undergraduate.key_value_lines(),
    })
}

pub async fn read_skill_sets(store: &dyn ProfileStore) -> Result<SkillSets, StoreError> {
    let skills = read(store, SKILLS_COLLECTION, SKILLS_DOC).await?;
    let tools = read(store, SKILLS_COLLECTION, TOOLS_DOC).await?;
    Ok(SkillSets {
        skills: Some(skills).filter(|d| !d.is_empty()),
        tools: Some(tools).filter(|d| !d.is_empty()),
    })
}

/// Reads the project records and the link entries, both in store order.
pub async fn read_project_sources(
    store: &dyn ProfileStore,
) -> Result<(Vec<ProjectRecord>, Vec<LinkEntry>), StoreError> {
    let projects = read(store, PROJECTS_COLLECTION, PROJECTS_DONE_DOC).await?;
    if projects.is_empty() {
        return Ok((Vec::new(), Vec::new()));
    }
    let links = read(store, PROJECTS_COLLECTION, GITHUB_LINKS_DOC).await?;

    let projects = projects
        .iter()
        .map(|(name, description)| ProjectRecord {
            name: name.to_string(),
            description: description.to_string(),
        })
        .collect();
    let links = links
        .iter()
        .map(|(name, url)| LinkEntry {
            name: name.to_string(),
            url: url.to_string(),
        })
        .collect();
    Ok((projects, links))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::MemoryProfileStore;

    fn doc(pairs: &[(&str, &str)]) -> Document {
        pairs.iter().copied().collect()
    }

    #[tokio::test]
    async fn test_certifications_follow_document_order() {
        let store = MemoryProfileStore::new()
            .with_document("Certifications", "CLOUD", doc(&[("AWS", "SAA")]))
            .with_document("Certifications", "AI ML", doc(&[("TensorFlow", "Developer")]));

        let certs = read_certifications(&store).await.unwrap();
        assert_eq!(certs, vec!["TensorFlow: Developer", "AWS: SAA"]);
    }

    #[tokio::test]
    async fn test_certifications_empty_when_absent() {
        let certs = read_certifications(&MemoryProfileStore::new()).await.unwrap();
        assert!(certs.is_empty());
    }

    #[tokio::test]
    async fn test_education_missing_schooling() {
        let store = MemoryProfileStore::new().with_document(
            "Education",
            "Under Graduate",
            doc(&[("B.Tech", "CSE")]),
        );
        let record = read_education(&store).await.unwrap();
        assert!(record.schooling.is_empty());
        assert_eq!(record.undergraduate, vec!["B.Tech: CSE"]);
    }

    #[tokio::test]
    async fn test_skill_sets_treat_empty_document_as_absent() {
        let store = MemoryProfileStore::new()
            .with_document("SKILLS", "Skills", Document::default())
            .with_document("SKILLS", "Tools", doc(&[("Docker", "Intermediate")]));
        let sets = read_skill_sets(&store).await.unwrap();
        assert!(sets.skills.is_none());
        assert_eq!(sets.tools.unwrap().get("Docker"), Some("Intermediate"));
    }

    #[tokio::test]
    async fn test_project_sources_without_links() {
        let store = MemoryProfileStore::new().with_document(
            "Projects",
            "Projects Done",
            doc(&[("Chat Bot", "A chatbot"), ("Weather App", "Forecasts")]),
        );
        let (projects, links) = read_project_sources(&store).await.unwrap();
        assert_eq!(projects.len(), 2);
        assert_eq!(projects[1].name, "Weather App");
        assert!(links.is_empty());
    }
}
