//! Parallel enrichment: one model call per matched project.
//!
//! Every project gets its own spawned task on the multi-threaded runtime.
//! A semaphore caps how many calls run at once; the per-call timeout starts
//! once a slot is held. A call that times out, fails, or panics yields
//! `SUMMARY_UNAVAILABLE` for its own project and nothing else. Results are
//! tagged with their input index and re-sorted after the barrier, so output
//! order always equals input order.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

use super::{EnrichedProject, MatchedProject, SUMMARY_UNAVAILABLE};
use crate::llm_client::{prompts::project_summary_prompt, Completion, ModelClient};

#[derive(Clone)]
pub struct Enricher {
    client: Arc<dyn ModelClient>,
    timeout: Duration,
    /// 0 = one slot per project.
    max_concurrency: usize,
}

impl Enricher {
    pub fn new(client: Arc<dyn ModelClient>, timeout: Duration, max_concurrency: usize) -> Self {
        Self {
            client,
            timeout,
            max_concurrency,
        }
    }

    fn slots_for(&self, items: usize) -> usize {
        match self.max_concurrency {
            0 => items.max(1),
            limit => limit.min(items.max(1)),
        }
    }

    /// Summarizes every project. Waits for all calls; never fails.
    pub async fn enrich(&self, projects: Vec<MatchedProject>) -> Vec<EnrichedProject> {
        if projects.is_empty() {
            return Vec::new();
        }

        let slots = self.slots_for(projects.len());
        info!(
            "Enriching {} projects via {} ({} slots, {}s timeout)",
            projects.len(),
            self.client.backend_name(),
            slots,
            self.timeout.as_secs_f64()
        );
        let semaphore = Arc::new(Semaphore::new(slots));

        let mut tasks = Vec::with_capacity(projects.len());
        for (idx, project) in projects.iter().enumerate() {
            let semaphore = Arc::clone(&semaphore);
            let client = Arc::clone(&self.client);
            let timeout = self.timeout;
            let prompt = project_summary_prompt(&project.name, &project.description);
            let name = project.name.clone();

            tasks.push(tokio::spawn(async move {
                // The semaphore is never closed.
                let _permit = semaphore.acquire_owned().await.ok();
                debug!("Summarizing project {idx} '{name}'");

                let call = client.complete(&prompt, timeout);
                let completion = match tokio::time::timeout(timeout, call).await {
                    Ok(completion) => completion,
                    Err(_) => Completion::Timeout,
                };
                (idx, completion)
            }));
        }

        let mut outcomes: Vec<(usize, Completion)> = Vec::with_capacity(tasks.len());
        for (idx, task) in tasks.into_iter().enumerate() {
            match task.await {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => {
                    warn!("Summary task {idx} aborted: {e}");
                    outcomes.push((
                        idx,
                        Completion::ProcessError {
                            message: e.to_string(),
                        },
                    ));
                }
            }
        }
        outcomes.sort_by_key(|(idx, _)| *idx);

        projects
            .into_iter()
            .zip(outcomes)
            .map(|(project, (_, completion))| {
                let summary = match completion {
                    Completion::Success { text } => text,
                    failed => {
                        warn!(
                            "No summary for '{}': {}",
                            project.name,
                            failed.display_text()
                        );
                        SUMMARY_UNAVAILABLE.to_string()
                    }
                };
                EnrichedProject {
                    name: project.name,
                    description: project.description,
                    link: project.link,
                    summary,
                }
            })
            .collect()
    }
}
