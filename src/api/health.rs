use std::sync::Arc;

use axum::{Extension, http::StatusCode, response::Json};
use serde_json::{Value, json};
use sqlx::SqlitePool;

use super::AppState;
use crate::{db, error::Result, generation::TextGenerator, spotify::TrackSearch};

/// Reports database reachability and the size of the stored catalog.
pub async fn health<S, G>(
    Extension(state): Extension<Arc<AppState<S, G>>>,
) -> (StatusCode, Json<Value>)
where
    S: TrackSearch + 'static,
    G: TextGenerator + 'static,
{
    let catalog = match catalog_counts(&state.db).await {
        Ok(counts) => Some(counts),
        Err(e) => {
            tracing::warn!(error = %e, "health check could not read the catalog");
            None
        }
    };
    let database = catalog.is_some();
    let status = if database {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(json!({
            "status": if database { "ok" } else { "degraded" },
            "database": database,
            "catalog": catalog,
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

async fn catalog_counts(pool: &SqlitePool) -> Result<Value> {
    let songs = db::songs::count(pool).await?;
    let playlists = db::playlists::count(pool).await?;
    let links = db::playlists::count_links(pool).await?;
    Ok(json!({ "songs": songs, "playlists": playlists, "links": links }))
}
