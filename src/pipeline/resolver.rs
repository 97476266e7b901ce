use crate::{
    error::Error,
    spotify::TrackSearch,
    types::{ProposedTrack, ResolvedTrack, TrackItem},
};

/// Outcome of resolving one proposed track.
#[derive(Debug)]
pub enum Resolution {
    Resolved(ResolvedTrack),
    /// The search ran but produced nothing usable. Only this track is skipped.
    NoMatch,
    /// The search could not be performed. Aborts the whole request.
    Failed(Error),
}

pub struct TrackResolver<S> {
    search: S,
}

impl<S: TrackSearch> TrackResolver<S> {
    pub fn new(search: S) -> Self {
        Self { search }
    }

    pub async fn resolve(&self, proposed: &ProposedTrack) -> Resolution {
        match self.search.search(&proposed.title, &proposed.artist).await {
            Ok(Some(item)) => normalize(item),
            Ok(None) => Resolution::NoMatch,
            Err(e) => Resolution::Failed(e),
        }
    }
}

/// A descriptor without a canonical url cannot be deduplicated, so it counts
/// as no match.
pub fn normalize(item: TrackItem) -> Resolution {
    let Some(external_url) = item.external_urls.spotify.filter(|u| !u.is_empty()) else {
        return Resolution::NoMatch;
    };

    let artist = item
        .artists
        .into_iter()
        .next()
        .map(|a| a.name)
        .unwrap_or_default();

    Resolution::Resolved(ResolvedTrack {
        name: item.name,
        artist,
        external_url,
    })
}
