//! Fuzzy correlation of project names to link names.
//!
//! The two documents are maintained independently, so there is no shared key:
//! each project takes the most similar link name, provided the similarity
//! reaches the threshold. Matching is per project; one link may serve several.

use similar::TextDiff;

use super::{LinkEntry, MatchedProject, ProjectRecord};

pub const DEFAULT_THRESHOLD: f32 = 0.6;

/// Similarity function over two names, returning a score in `[0, 1]`.
pub type Scorer = fn(&str, &str) -> f32;

/// Character-sequence similarity: `2·M / (|a| + |b|)` where M is the number of
/// characters left unchanged by a diff of the two strings. Case-sensitive.
///
/// M comes from a Myers (longest-common-subsequence) diff. Ratcliff/Obershelp
/// matching, which grows the longest contiguous block first, agrees on
/// ordinary project names but can score lower on inputs with many scattered
/// repeats, so scores near the threshold may differ between the two.
pub fn sequence_ratio(a: &str, b: &str) -> f32 {
    TextDiff::from_chars(a, b).ratio()
}

#[derive(Clone, Copy)]
pub struct Correlator {
    threshold: f32,
    scorer: Scorer,
}

impl std::fmt::Debug for Correlator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Correlator")
            .field("threshold", &self.threshold)
            .finish_non_exhaustive()
    }
}

impl Default for Correlator {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

impl Correlator {
    pub fn new(threshold: f32) -> Self {
        Self::with_scorer(threshold, sequence_ratio)
    }

    pub fn with_scorer(threshold: f32, scorer: Scorer) -> Self {
        Self { threshold, scorer }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Index of the best candidate scoring at least the threshold.
    /// Ties go to the earliest candidate.
    pub fn best_match<'a, I>(&self, name: &str, candidates: I) -> Option<usize>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut best: Option<(usize, f32)> = None;
        for (idx, candidate) in candidates.into_iter().enumerate() {
            let score = (self.scorer)(name, candidate);
            if score < self.threshold {
                continue;
            }
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((idx, score)),
            }
        }
        best.map(|(idx, _)| idx)
    }

    /// Joins every project to its best link. Output order and length equal the input's.
    pub fn match_projects(
        &self,
        projects: &[ProjectRecord],
        links: &[LinkEntry],
    ) -> Vec<MatchedProject> {
        projects
            .iter()
            .map(|project| {
                let link = self
                    .best_match(&project.name, links.iter().map(|l| l.name.as_str()))
                    .map(|idx| links[idx].url.clone());
                MatchedProject {
                    name: project.name.clone(),
                    description: project.description.clone(),
                    link,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn links(pairs: &[(&str, &str)]) -> Vec<LinkEntry> {
        pairs
            .iter()
            .map(|(name, url)| LinkEntry {
                name: name.to_string(),
                url: url.to_string(),
            })
            .collect()
    }

    fn project(name: &str) -> ProjectRecord {
        ProjectRecord {
            name: name.to_string(),
            description: format!("{name} description"),
        }
    }

    #[test]
    fn test_sequence_ratio_bounds() {
        assert!((sequence_ratio("Chat Bot", "Chat Bot") - 1.0).abs() < f32::EPSILON);
        assert_eq!(sequence_ratio("abc", "xyz"), 0.0);
        // "Chat" + "Bot" survive: 2·7 / (8 + 11)
        let score = sequence_ratio("Chat Bot", "ChatBot-App");
        assert!((score - 14.0 / 19.0).abs() < 0.001, "score was {score}");
    }

    #[test]
    fn test_reordered_words_still_clear_threshold() {
        // "esume" + "uilder" survive the diff: 2·11 / (17 + 17)
        let score = sequence_ratio("AI Resume Builder", "resume-builder-ai");
        assert!((score - 22.0 / 34.0).abs() < 0.001, "score was {score}");
        assert!(score >= DEFAULT_THRESHOLD);
    }

    #[test]
    fn test_close_name_selects_its_link() {
        let correlator = Correlator::default();
        let matched = correlator.match_projects(
            &[project("Chat Bot")],
            &links(&[("ChatBot-App", "url1"), ("Unrelated", "url2")]),
        );
        assert_eq!(matched[0].link.as_deref(), Some("url1"));
    }

    #[test]
    fn test_no_candidate_above_threshold() {
        let correlator = Correlator::default();
        let matched = correlator.match_projects(
            &[project("Chat Bot")],
            &links(&[("Unrelated", "url2"), ("Image Classifier", "url3")]),
        );
        assert_eq!(matched[0].link, None);
        assert_eq!(matched[0].link_or_placeholder(), "No link found");
    }

    #[test]
    fn test_ties_go_to_first_candidate() {
        let correlator = Correlator::with_scorer(0.5, |_, _| 0.9);
        let idx = correlator.best_match("anything", ["first", "second", "third"]);
        assert_eq!(idx, Some(0));
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let correlator = Correlator::with_scorer(0.6, |_, candidate| {
            if candidate == "exact" {
                0.6
            } else {
                0.59
            }
        });
        assert_eq!(correlator.best_match("x", ["near", "exact"]), Some(1));
    }

    #[test]
    fn test_link_can_serve_several_projects() {
        let correlator = Correlator::default();
        let matched = correlator.match_projects(
            &[project("Portfolio Site"), project("Portfolio Sites")],
            &links(&[("Portfolio-Site", "url-portfolio")]),
        );
        assert!(matched.iter().all(|m| m.link.as_deref() == Some("url-portfolio")));
    }

    #[test]
    fn test_preserves_project_order_and_length() {
        let correlator = Correlator::default();
        let projects = vec![project("C"), project("A"), project("B")];
        let matched = correlator.match_projects(&projects, &[]);
        let names: Vec<_> = matched.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["C", "A", "B"]);
    }
}
