//! Keyword intent classification.

use crate::errors::AppError;

pub const PROMPT_REQUIRED: &str = "Prompt is required";

/// Handling path for a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Certifications,
    Education,
    Projects,
    SkillsTools,
    Freeform,
}

/// Checked in order; the first group with a keyword present in the prompt wins.
const KEYWORD_GROUPS: &[(&[&str], Intent)] = &[
    (&["certification"], Intent::Certifications),
    (&["education"], Intent::Education),
    (&["projects"], Intent::Projects),
    (&["skills", "tools"], Intent::SkillsTools),
];

/// Trims the prompt, rejecting it when nothing is left.
pub fn validate_prompt(raw: &str) -> Result<&str, AppError> {
    let prompt = raw.trim();
    if prompt.is_empty() {
        return Err(AppError::Validation(PROMPT_REQUIRED.to_string()));
    }
    Ok(prompt)
}

pub fn classify(prompt: &str) -> Intent {
    let lower = prompt.trim().to_lowercase();
    KEYWORD_GROUPS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(_, intent)| *intent)
        .unwrap_or(Intent::Freeform)
}
