//! # API Module
//!
//! HTTP endpoints for the moodlist server. Handlers only marshal requests and
//! responses; all synthesis logic lives in [`crate::pipeline`].
//!
//! ## Endpoints
//!
//! - `GET /health` - [`health`], status, database reachability, catalog counts and version
//! - `POST /playlists` - [`synthesize`], build a playlist from a mood and genres
//! - `GET /playlists` - [`list`], stored playlists, optionally `?owner_id=`
//! - `GET /playlists/{id}` - [`show`], one playlist with its songs in order
//!
//! Failures are rendered by [`Error`](crate::error::Error)'s `IntoResponse` as
//! `{"error": {"code", "message"}}`.
//!
//! ```rust,ignore
//! use moodlist::server::router;
//!
//! let app = router(Arc::new(state));
//! ```

mod health;
mod playlists;

pub use health::health;
pub use playlists::{list, show, synthesize};

use sqlx::SqlitePool;

use crate::pipeline::Synthesizer;

/// Shared state handed to every handler.
pub struct AppState<S, G> {
    pub db: SqlitePool,
    pub synthesizer: Synthesizer<S, G>,
}

impl<S, G> AppState<S, G> {
    pub fn new(db: SqlitePool, synthesizer: Synthesizer<S, G>) -> Self {
        Self { db, synthesizer }
    }
}
