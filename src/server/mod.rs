pub mod handlers;
pub mod types;

use crate::{
    Result,
    config::{API_KEY_ENV, Config},
    llm::{LlmClient, OpenAiClient},
    narrator::{GenerationSettings, Narrator},
};
use axum::{
    Router,
    routing::{get, post},
};
use handlers::AppState;
use std::{net::SocketAddr, sync::Arc};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::{info, warn};

/// Builds the application state from configuration and an upstream client.
pub fn state(config: &Config, llm_client: Arc<dyn LlmClient>) -> Result<AppState> {
    let narrator = Narrator::new(
        llm_client,
        config.video.profile()?,
        config.video.prompt_variant,
        GenerationSettings {
            max_tokens: config.llm.max_tokens,
            temperature: config.llm.temperature,
        },
    );

    Ok(AppState {
        narrator: Arc::new(narrator),
        static_dir: Arc::new(config.server.static_dir.clone()),
        expose_error_details: config.server.expose_error_details,
    })
}

pub fn router(state: AppState) -> Router {
    let static_files = ServeDir::new(state.static_dir.as_ref());

    Router::new()
        .route("/", get(handlers::index))
        .route("/process-image", post(handlers::process_image))
        .route("/process-question", post(handlers::process_question))
        .nest_service("/static", static_files)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Full application: routes plus the optional permissive CORS layer.
pub fn app(config: &Config, llm_client: Arc<dyn LlmClient>) -> Result<Router> {
    let app = router(state(config, llm_client)?);
    if config.server.allow_cors {
        return Ok(app.layer(CorsLayer::permissive()));
    }
    Ok(app)
}

pub async fn run(config: Config) -> Result<()> {
    if config.llm.api_key.is_none() {
        warn!(
            "{} is not set; upstream calls will fail until it is provided",
            API_KEY_ENV
        );
    }

    let llm_client = OpenAiClient::new(config.llm.clone())?;
    info!("Using model {}", llm_client.model());

    let app = app(&config, Arc::new(llm_client))?;
    info!(
        title = config.video.title.as_deref().unwrap_or("<untitled>"),
        variant = ?config.video.prompt_variant,
        cors = config.server.allow_cors,
        "Video profile loaded"
    );

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
