// Prompt builders for every model call the service makes.

use crate::profile::sections::SkillSets;

/// Summary request for one project.
pub fn project_summary_prompt(name: &str, description: &str) -> String {
    format!(
        "summarize the project in few sentences for a project called '{name}'. \
         Here is the brief description: {description}."
    )
}

/// Introduction request built from both skill sets. Absent sets leave their
/// heading with no entries.
pub fn skills_introduction_prompt(sets: &SkillSets) -> String {
    let mut prompt = String::from(
        "Generate a brief introduction about a person with the following skills and tools experience:\n",
    );
    prompt.push_str("Skills:\n");
    for (skill, level) in sets.skills.iter().flat_map(|d| d.iter()) {
        prompt.push_str(&format!("- {skill}: {level}\n"));
    }
    prompt.push_str("Tools:\n");
    for (tool, proficiency) in sets.tools.iter().flat_map(|d| d.iter()) {
        prompt.push_str(&format!("- {tool}: {proficiency}\n"));
    }
    prompt.push_str("\nIntroduction:");
    prompt
}
