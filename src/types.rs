use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tabled::Tabled;

/// Short-lived access credential for the catalog service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: Option<String>,
    pub expires_in: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub tracks: TrackPage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackPage {
    pub items: Vec<TrackItem>,
    pub total: Option<u64>,
}

/// A track descriptor as returned by the catalog search endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackItem {
    pub name: String,
    #[serde(default)]
    pub artists: Vec<TrackArtist>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackArtist {
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExternalUrls {
    pub spotify: Option<String>,
}

/// An unverified (title, artist) pair suggested for a playlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposedTrack {
    pub title: String,
    pub artist: String,
}

impl ProposedTrack {
    pub fn new(title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
        }
    }
}

/// A proposal matched to exactly one catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedTrack {
    pub name: String,
    pub artist: String,
    pub external_url: String,
}

/// The typed result of asking the generative service for a playlist.
#[derive(Debug, Clone)]
pub struct Proposals {
    pub playlist_name: String,
    pub tracks: Vec<ProposedTrack>,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Song {
    pub id: i64,
    pub name: String,
    pub artist_name: String,
    pub url: String,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Playlist {
    pub id: i64,
    pub name: String,
    pub owner_id: String,
    pub mood: Option<String>,
    /// JSON array of genre names.
    pub genres: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistWithSongs {
    #[serde(flatten)]
    pub playlist: Playlist,
    pub songs: Vec<Song>,
}

/// Everything needed to persist a new playlist.
#[derive(Debug, Clone)]
pub struct NewPlaylist {
    pub name: String,
    pub owner_id: String,
    pub mood: Option<String>,
    pub genres: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesizeRequest {
    pub mood: String,
    #[serde(default)]
    pub genres: Vec<String>,
    pub playlist_name: Option<String>,
    pub owner_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Candidate {
    pub content: Option<Content>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Part {
    pub text: Option<String>,
}

#[derive(Tabled)]
pub struct SongTableRow {
    pub position: usize,
    pub name: String,
    pub artist: String,
    pub url: String,
}

#[derive(Tabled)]
pub struct PlaylistTableRow {
    pub id: i64,
    pub name: String,
    pub owner: String,
    pub mood: String,
    pub created: String,
}
