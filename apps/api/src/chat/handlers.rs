//! Axum route handler for the chat endpoint.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Deserialize;
use tracing::{warn, Instrument};
use uuid::Uuid;

use crate::chat::intent::PROMPT_REQUIRED;
use crate::chat::ChatReply;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// A missing or null prompt is treated like an empty one.
    #[serde(default)]
    pub prompt: Option<String>,
}

/// POST /chat
///
/// Classifies the prompt and answers from the profile store and/or the model.
/// A body that is not a JSON object with a string `prompt` gets the same
/// 400 reply as an empty prompt.
pub async fn handle_chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<ChatReply, AppError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!("Rejected chat body: {rejection}");
        AppError::Validation(PROMPT_REQUIRED.to_string())
    })?;

    let prompt = request.prompt.unwrap_or_default();
    let span = tracing::info_span!("chat", request_id = %Uuid::new_v4());
    state.chat.respond(&prompt).instrument(span).await
}
