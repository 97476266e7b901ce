use futures::future::join_all;
use sqlx::SqlitePool;

use crate::{
    db::{playlists, songs},
    error::Result,
    pipeline::resolver::{Resolution, TrackResolver},
    spotify::TrackSearch,
    types::{NewPlaylist, PlaylistWithSongs, ProposedTrack, ResolvedTrack},
    utils,
};

/// Resolves proposed tracks against the catalog and stores the result as a playlist.
pub struct PlaylistAssembler<S> {
    resolver: TrackResolver<S>,
    pool: SqlitePool,
    concurrency: usize,
}

impl<S: TrackSearch> PlaylistAssembler<S> {
    pub fn new(resolver: TrackResolver<S>, pool: SqlitePool, concurrency: usize) -> Self {
        Self {
            resolver,
            pool,
            concurrency: concurrency.max(1),
        }
    }

    /// Builds and persists a playlist from `proposed`.
    ///
    /// Tracks without a match are skipped. A failed search aborts the request
    /// before anything is written. Linked songs keep input order; a song that
    /// several proposals resolve to is linked once, at its first position.
    pub async fn assemble(
        &self,
        playlist: NewPlaylist,
        proposed: &[ProposedTrack],
    ) -> Result<PlaylistWithSongs> {
        let resolved = self.resolve_all(proposed).await?;

        let mut linked = Vec::with_capacity(resolved.len());
        for track in &resolved {
            linked.push(songs::upsert(&self.pool, track).await?);
        }
        utils::remove_duplicate_songs(&mut linked);

        let assembled = playlists::create_with_songs(&self.pool, &playlist, linked).await?;

        tracing::info!(
            playlist_id = assembled.playlist.id,
            name = %assembled.playlist.name,
            proposed = proposed.len(),
            linked = assembled.songs.len(),
            "playlist assembled"
        );
        Ok(assembled)
    }

    /// Runs searches `concurrency` at a time and returns the matches in input order.
    async fn resolve_all(&self, proposed: &[ProposedTrack]) -> Result<Vec<ResolvedTrack>> {
        let mut resolved = Vec::with_capacity(proposed.len());

        for chunk in proposed.chunks(self.concurrency) {
            let outcomes = join_all(chunk.iter().map(|p| self.resolver.resolve(p))).await;

            for (track, outcome) in chunk.iter().zip(outcomes) {
                match outcome {
                    Resolution::Resolved(r) => {
                        tracing::debug!(title = %track.title, url = %r.external_url, "resolved");
                        resolved.push(r);
                    }
                    Resolution::NoMatch => {
                        tracing::warn!(
                            title = %track.title,
                            artist = %track.artist,
                            "no catalog match, skipping track"
                        );
                    }
                    Resolution::Failed(e) => {
                        tracing::warn!(title = %track.title, "search failed, aborting: {}", e);
                        return Err(e);
                    }
                }
            }
        }

        Ok(resolved)
    }
}
