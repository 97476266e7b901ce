use std::{net::SocketAddr, str::FromStr, sync::Arc};

use axum::{
    Extension, Router,
    routing::{get, post},
};
use reqwest::Client;

use crate::{
    api::{self, AppState},
    config::Config,
    db,
    error::{Error, Result},
    generation::{GeminiClient, GenerationAdapter, TextGenerator},
    management::TokenManager,
    pipeline::{PlaylistAssembler, Synthesizer, TrackResolver},
    spotify::{ClientCredentials, SpotifyCatalog, TrackSearch},
};

pub type LiveSynthesizer = Synthesizer<SpotifyCatalog<ClientCredentials>, GeminiClient>;

pub fn router<S, G>(state: Arc<AppState<S, G>>) -> Router
where
    S: TrackSearch + 'static,
    G: TextGenerator + 'static,
{
    Router::new()
        .route("/health", get(api::health::<S, G>))
        .route(
            "/playlists",
            post(api::synthesize::<S, G>).get(api::list::<S, G>),
        )
        .route("/playlists/{id}", get(api::show::<S, G>))
        .layer(Extension(state))
}

/// Wires the live Spotify and Gemini clients into a synthesizer.
///
/// One [`TokenManager`] is created here and shared by every request.
pub fn build_synthesizer(config: &Config, pool: sqlx::SqlitePool) -> LiveSynthesizer {
    let client = Client::new();

    let tokens = Arc::new(TokenManager::new(ClientCredentials::from_config(
        client.clone(),
        config,
    )));
    let catalog = SpotifyCatalog::from_config(client.clone(), config, tokens);
    let generator = GeminiClient::from_config(client, config);

    Synthesizer::new(
        GenerationAdapter::new(generator),
        PlaylistAssembler::new(TrackResolver::new(catalog), pool, config.search_concurrency),
    )
}

pub async fn start_api_server(config: &Config) -> Result<()> {
    let pool = db::connect(&config.database_url).await?;
    let synthesizer = build_synthesizer(config, pool.clone());
    let app = router(Arc::new(AppState::new(pool, synthesizer)));

    let addr = SocketAddr::from_str(&config.server_address).map_err(|e| {
        Error::Config(format!(
            "invalid SERVER_ADDRESS {}: {}",
            config.server_address, e
        ))
    })?;

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(%addr, "moodlist server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
