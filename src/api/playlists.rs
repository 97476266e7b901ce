use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{
        Path, Query,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use serde::Deserialize;

use super::AppState;
use crate::{
    db::playlists,
    error::Result,
    generation::TextGenerator,
    spotify::TrackSearch,
    types::{Playlist, PlaylistWithSongs, SynthesizeRequest},
};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub owner_id: Option<String>,
}

pub async fn synthesize<S, G>(
    Extension(state): Extension<Arc<AppState<S, G>>>,
    request: std::result::Result<Json<SynthesizeRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PlaylistWithSongs>)>
where
    S: TrackSearch + 'static,
    G: TextGenerator + 'static,
{
    let Json(request) = request?;
    let playlist = state.synthesizer.synthesize_playlist(request).await?;
    Ok((StatusCode::CREATED, Json(playlist)))
}

pub async fn show<S, G>(
    Extension(state): Extension<Arc<AppState<S, G>>>,
    id: std::result::Result<Path<i64>, PathRejection>,
) -> Result<Json<PlaylistWithSongs>>
where
    S: TrackSearch + 'static,
    G: TextGenerator + 'static,
{
    let Path(id) = id?;
    Ok(Json(playlists::get_with_songs(&state.db, id).await?))
}

pub async fn list<S, G>(
    Extension(state): Extension<Arc<AppState<S, G>>>,
    query: std::result::Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Vec<Playlist>>>
where
    S: TrackSearch + 'static,
    G: TextGenerator + 'static,
{
    let Query(query) = query?;
    Ok(Json(
        playlists::list(&state.db, query.owner_id.as_deref()).await?,
    ))
}
