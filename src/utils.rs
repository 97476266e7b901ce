use std::collections::HashSet;

use crate::types::{Playlist, PlaylistTableRow, Song, SongTableRow};

/// Field-qualified catalog query for a title/artist pair.
pub fn build_search_query(title: &str, artist: &str) -> String {
    format!("track: {} artist: {}", title, artist)
}

/// Prompt asking the generative service for a playlist as bare JSON.
pub fn build_prompt(mood: &str, genres: &[String]) -> String {
    let genres = if genres.is_empty() {
        "any genre".to_string()
    } else {
        genres.join(", ")
    };

    format!(
        "Create a playlist of 10 to 15 existing songs for someone who feels \"{mood}\" \
         and enjoys the following genres: {genres}. \
         Respond with JSON only, no prose and no Markdown, using exactly this shape: \
         {{\"playlist_name\": \"<a short creative name>\", \
         \"tracks\": [{{\"title\": \"<song title>\", \"artist\": \"<main artist>\", \
         \"url\": \"<spotify url if known, otherwise omit>\"}}]}}"
    )
}

/// Removes a surrounding Markdown code fence (```` ```json ... ``` ````) if present.
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // drop the info string ("json") on the opening fence line
    let body = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => rest,
    };

    body.trim_end()
        .strip_suffix("```")
        .unwrap_or(body)
        .trim()
}

/// Keeps the first occurrence of every song id, preserving order.
pub fn remove_duplicate_songs(songs: &mut Vec<Song>) {
    let mut seen_ids = HashSet::new();
    songs.retain(|song| seen_ids.insert(song.id));
}

pub fn song_table_rows(songs: &[Song]) -> Vec<SongTableRow> {
    songs
        .iter()
        .enumerate()
        .map(|(i, s)| SongTableRow {
            position: i + 1,
            name: s.name.clone(),
            artist: s.artist_name.clone(),
            url: s.url.clone(),
        })
        .collect()
}

pub fn playlist_table_rows(playlists: &[Playlist]) -> Vec<PlaylistTableRow> {
    playlists
        .iter()
        .map(|p| PlaylistTableRow {
            id: p.id,
            name: p.name.clone(),
            owner: p.owner_id.clone(),
            mood: p.mood.clone().unwrap_or_default(),
            created: p.created_at.format("%Y-%m-%d %H:%M").to_string(),
        })
        .collect()
}
