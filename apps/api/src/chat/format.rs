//! Rendering of handler results into reply text.

use crate::profile::sections::EducationRecord;
use crate::projects::EnrichedProject;

pub const NO_PROJECTS: &str = "No projects found.";
pub const NO_SKILLS: &str = "No skills or tools information found.";
pub const NO_SCHOOLING: &str = "no schooling information.";
pub const NO_UNDERGRADUATE: &str = "no undergraduate information.";

/// Names used in the rendered sentences.
#[derive(Debug, Clone)]
pub struct Owner {
    pub full_name: String,
}

impl Owner {
    pub fn new(full_name: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
        }
    }

    pub fn first_name(&self) -> &str {
        self.full_name
            .split_whitespace()
            .next()
            .unwrap_or(&self.full_name)
    }
}

pub fn format_education(owner: &Owner, record: &EducationRecord) -> String {
    let schooling = join_or(&record.schooling, NO_SCHOOLING);
    let undergraduate = join_or(&record.undergraduate, NO_UNDERGRADUATE);
    format!(
        "{} has completed his schooling at {schooling}. \
         In his undergraduate studies, he completed {undergraduate}.",
        owner.first_name()
    )
}

/// Projects keep the order they are given in.
pub fn format_projects(owner: &Owner, projects: &[EnrichedProject]) -> String {
    if projects.is_empty() {
        return NO_PROJECTS.to_string();
    }
    let blocks: Vec<String> = projects
        .iter()
        .map(|p| {
            format!(
                "**{}**:\n{}\nGitHub Link: {}",
                p.name,
                p.summary,
                p.link_or_placeholder()
            )
        })
        .collect();
    format!(
        "Here are {}'s projects:\n{}",
        owner.full_name,
        blocks.join("\n\n")
    )
}

fn join_or(lines: &[String], placeholder: &str) -> String {
    if lines.is_empty() {
        placeholder.to_string()
    } else {
        lines.join(" and ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner() -> Owner {
        Owner::new("Fatheen Khan")
    }

    fn enriched(name: &str, summary: &str, link: Option<&str>) -> EnrichedProject {
        EnrichedProject {
            name: name.to_string(),
            description: String::new(),
            link: link.map(String::from),
            summary: summary.to_string(),
        }
    }

    #[test]
    fn test_first_name() {
        assert_eq!(owner().first_name(), "Fatheen");
        assert_eq!(Owner::new("Cher").first_name(), "Cher");
    }

    #[test]
    fn test_education_sentence() {
        let record = EducationRecord {
            schooling: vec!["School: DPS".into(), "Year: 2018".into()],
            undergraduate: vec!["B.Tech: CSE".into()],
        };
        assert_eq!(
            format_education(&owner(), &record),
            "Fatheen has completed his schooling at School: DPS and Year: 2018. \
             In his undergraduate studies, he completed B.Tech: CSE."
        );
    }

    #[test]
    fn test_education_placeholders() {
        let text = format_education(&owner(), &EducationRecord::default());
        assert_eq!(
            text,
            "Fatheen has completed his schooling at no schooling information.. \
             In his undergraduate studies, he completed no undergraduate information.."
        );
    }

    #[test]
    fn test_projects_empty() {
        assert_eq!(format_projects(&owner(), &[]), "No projects found.");
    }

    #[test]
    fn test_projects_blocks() {
        let text = format_projects(
            &owner(),
            &[
                enriched("Chat Bot", "A helpful bot.", Some("https://github.com/u/chatbot")),
                enriched("Weather", "Description not available.", None),
            ],
        );
        assert_eq!(
            text,
            "Here are Fatheen Khan's projects:\n\
             **Chat Bot**:\nA helpful bot.\nGitHub Link: https://github.com/u/chatbot\n\n\
             **Weather**:\nDescription not available.\nGitHub Link: No link found"
        );
    }
}
