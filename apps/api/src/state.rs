use crate::chat::ChatService;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub chat: ChatService,
    pub config: Config,
}
