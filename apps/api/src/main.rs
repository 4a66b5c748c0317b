mod chat;
mod config;
mod errors;
mod llm_client;
mod profile;
mod projects;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::chat::{format::Owner, ChatService};
use crate::config::Config;
use crate::profile::{MemoryProfileStore, PgProfileStore, ProfileStore};
use crate::projects::Correlator;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on invalid values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting chat API v{}", env!("CARGO_PKG_VERSION"));

    let store = build_profile_store(&config).await?;

    let model = llm_client::from_config(&config)?;
    info!(
        "Model client initialized (backend: {}, model: {})",
        model.backend_name(),
        config.model_name
    );

    let correlator = Correlator::new(config.match_threshold);
    info!("Project link threshold: {}", correlator.threshold());

    let chat = ChatService::new(
        store,
        model,
        correlator,
        Duration::from_secs(config.model_timeout_secs),
        config.enrich_max_concurrency,
        Owner::new(config.profile_owner.clone()),
    );

    let state = AppState {
        chat,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Postgres when `DATABASE_URL` is set, otherwise the JSON profile file.
async fn build_profile_store(config: &Config) -> Result<Arc<dyn ProfileStore>> {
    match &config.database_url {
        Some(url) => {
            let store = PgProfileStore::connect(url, 5)
                .await
                .context("Failed to connect to the profile database")?;
            info!("Profile store: Postgres");
            Ok(Arc::new(store))
        }
        None => {
            let store = MemoryProfileStore::from_json_file(&config.profile_path)
                .with_context(|| format!("Failed to load profile from {}", config.profile_path))?;
            info!("Profile store: {}", config.profile_path);
            Ok(Arc::new(store))
        }
    }
}
