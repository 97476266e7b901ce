//! # Playlist synthesis pipeline
//!
//! ```text
//! GenerationAdapter ──(proposed tracks)──▶ PlaylistAssembler
//!                                             ├─ TrackResolver ─▶ TrackSearch (TokenManager)
//!                                             ├─ songs::upsert
//!                                             └─ playlists::create_with_songs
//! ```
//!
//! Fatal errors (authorization, search, invalid generation answer) abort the
//! request and are returned as-is. A proposal with no catalog match is skipped;
//! callers notice it only through the playlist holding fewer songs than were
//! proposed.

pub mod assembler;
pub mod resolver;

pub use assembler::PlaylistAssembler;
pub use resolver::{Resolution, TrackResolver};

use crate::{
    error::{Error, Result},
    generation::{GenerationAdapter, TextGenerator},
    spotify::TrackSearch,
    types::{NewPlaylist, PlaylistWithSongs, SynthesizeRequest},
};

pub const DEFAULT_OWNER_ID: &str = "anonymous";

pub struct Synthesizer<S, G> {
    generation: GenerationAdapter<G>,
    assembler: PlaylistAssembler<S>,
}

impl<S: TrackSearch, G: TextGenerator> Synthesizer<S, G> {
    pub fn new(generation: GenerationAdapter<G>, assembler: PlaylistAssembler<S>) -> Self {
        Self {
            generation,
            assembler,
        }
    }

    /// Single entry point for the web boundary and the CLI.
    ///
    /// An explicit `playlist_name` wins over the generated one.
    pub async fn synthesize_playlist(&self, request: SynthesizeRequest) -> Result<PlaylistWithSongs> {
        let mood = request.mood.trim();
        if mood.is_empty() {
            return Err(Error::BadRequest("mood must not be empty".into()));
        }

        let genres: Vec<String> = request
            .genres
            .iter()
            .map(|g| g.trim().to_string())
            .filter(|g| !g.is_empty())
            .collect();

        let proposals = self.generation.generate_proposals(mood, &genres).await?;

        let name = request
            .playlist_name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or(proposals.playlist_name);

        let owner_id = request
            .owner_id
            .filter(|o| !o.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_OWNER_ID.to_string());

        let playlist = NewPlaylist {
            name,
            owner_id,
            mood: Some(mood.to_string()),
            genres,
        };

        self.assembler.assemble(playlist, &proposals.tracks).await
    }
}
