//! Chat dispatch: validates, classifies, and runs exactly one handler.
//!
//! Flow: validate_prompt → classify → handler (store reads, model calls) → ChatReply
//!
//! Collaborators are injected at construction; the service holds no mutable
//! state and is cloned into every request.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::info;

use crate::chat::format::{format_education, format_projects, Owner, NO_PROJECTS, NO_SKILLS};
use crate::chat::intent::{classify, validate_prompt, Intent};
use crate::errors::AppError;
use crate::llm_client::{prompts::skills_introduction_prompt, Completion, ModelClient};
use crate::profile::sections::{read_certifications, read_education, read_skill_sets};
use crate::profile::ProfileStore;
use crate::projects::{load_matched_projects, Correlator, Enricher};

/// Reply produced by a handler.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatReply {
    /// `{"response": "<text>"}`
    Text(String),
    /// `{"response": ["<line>", ...]}`
    Lines(Vec<String>),
    /// The completion object itself, not wrapped under `response`.
    Completion(Completion),
}

impl IntoResponse for ChatReply {
    fn into_response(self) -> Response {
        match self {
            ChatReply::Text(text) => Json(json!({ "response": text })).into_response(),
            ChatReply::Lines(lines) => Json(json!({ "response": lines })).into_response(),
            ChatReply::Completion(completion) => Json(completion).into_response(),
        }
    }
}

#[derive(Clone)]
pub struct ChatService {
    store: Arc<dyn ProfileStore>,
    model: Arc<dyn ModelClient>,
    correlator: Correlator,
    enricher: Enricher,
    model_timeout: Duration,
    owner: Owner,
}

impl ChatService {
    pub fn new(
        store: Arc<dyn ProfileStore>,
        model: Arc<dyn ModelClient>,
        correlator: Correlator,
        model_timeout: Duration,
        max_concurrency: usize,
        owner: Owner,
    ) -> Self {
        let enricher = Enricher::new(Arc::clone(&model), model_timeout, max_concurrency);
        Self {
            store,
            model,
            correlator,
            enricher,
            model_timeout,
            owner,
        }
    }

    pub async fn respond(&self, raw_prompt: &str) -> Result<ChatReply, AppError> {
        let prompt = validate_prompt(raw_prompt)?;
        let intent = classify(prompt);
        info!("Routing prompt to {intent:?}");

        match intent {
            Intent::Certifications => self.certifications().await,
            Intent::Education => self.education().await,
            Intent::Projects => Ok(self.projects().await),
            Intent::SkillsTools => self.skills_and_tools().await,
            Intent::Freeform => Ok(self.freeform(prompt).await),
        }
    }

    async fn certifications(&self) -> Result<ChatReply, AppError> {
        let certifications = read_certifications(self.store.as_ref()).await?;
        Ok(ChatReply::Lines(certifications))
    }

    async fn education(&self) -> Result<ChatReply, AppError> {
        let record = read_education(self.store.as_ref()).await?;
        Ok(ChatReply::Text(format_education(&self.owner, &record)))
    }

    async fn projects(&self) -> ChatReply {
        let matched = load_matched_projects(self.store.as_ref(), &self.correlator).await;
        if matched.is_empty() {
            return ChatReply::Text(NO_PROJECTS.to_string());
        }
        let enriched = self.enricher.enrich(matched).await;
        ChatReply::Text(format_projects(&self.owner, &enriched))
    }

    async fn skills_and_tools(&self) -> Result<ChatReply, AppError> {
        let sets = read_skill_sets(self.store.as_ref()).await?;
        if sets.is_empty() {
            return Ok(ChatReply::Text(NO_SKILLS.to_string()));
        }
        let prompt = skills_introduction_prompt(&sets);
        let completion = self.model.complete(&prompt, self.model_timeout).await;
        Ok(ChatReply::Completion(completion))
    }

    async fn freeform(&self, prompt: &str) -> ChatReply {
        let completion = self.model.complete(prompt, self.model_timeout).await;
        ChatReply::Text(completion.display_text())
    }
}
