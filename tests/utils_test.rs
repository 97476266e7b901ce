use chrono::{TimeZone, Utc};
use moodlist::types::{Playlist, Song};
use moodlist::utils::*;

// Helper function to create a test song
fn create_test_song(id: i64, name: &str, artist: &str) -> Song {
    Song {
        id,
        name: name.to_string(),
        artist_name: artist.to_string(),
        url: format!("https://open.spotify.com/track/{}", id),
    }
}

#[test]
fn test_build_search_query() {
    assert_eq!(
        build_search_query("Sunroof", "Nicky Youre"),
        "track: Sunroof artist: Nicky Youre"
    );

    // Empty parts are kept verbatim; the catalog decides what matches
    assert_eq!(build_search_query("", ""), "track:  artist: ");
}

#[test]
fn test_build_prompt_embeds_mood_and_genres() {
    let prompt = build_prompt("rainy sunday", &["jazz".to_string(), "lofi".to_string()]);

    assert!(prompt.contains("\"rainy sunday\""));
    assert!(prompt.contains("jazz, lofi"));
    assert!(prompt.contains("playlist_name"));
    assert!(prompt.contains("\"tracks\""));
}

#[test]
fn test_build_prompt_without_genres() {
    let prompt = build_prompt("calm", &[]);
    assert!(prompt.contains("any genre"));
}

#[test]
fn test_strip_code_fences() {
    // Plain JSON is untouched
    assert_eq!(strip_code_fences("  {\"a\":1} "), "{\"a\":1}");

    // Fence with info string
    assert_eq!(strip_code_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");

    // Fence without info string
    assert_eq!(strip_code_fences("```\n{\"a\":1}\n```\n"), "{\"a\":1}");

    // Unterminated fence keeps the body
    assert_eq!(strip_code_fences("```json\n{\"a\":1}"), "{\"a\":1}");
}

#[test]
fn test_remove_duplicate_songs() {
    let mut songs = vec![
        create_test_song(1, "Sunroof", "Nicky Youre"),
        create_test_song(2, "Heat Waves", "Glass Animals"),
        create_test_song(1, "Sunroof", "Nicky Youre"),
        create_test_song(3, "Levitating", "Dua Lipa"),
        create_test_song(2, "Heat Waves", "Glass Animals"),
    ];

    remove_duplicate_songs(&mut songs);

    let ids: Vec<i64> = songs.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn test_remove_duplicate_songs_empty() {
    let mut songs: Vec<Song> = Vec::new();
    remove_duplicate_songs(&mut songs);
    assert!(songs.is_empty());
}

#[test]
fn test_song_table_rows_are_numbered_from_one() {
    let songs = vec![
        create_test_song(7, "Sunroof", "Nicky Youre"),
        create_test_song(9, "Heat Waves", "Glass Animals"),
    ];

    let rows = song_table_rows(&songs);

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].position, 1);
    assert_eq!(rows[0].artist, "Nicky Youre");
    assert_eq!(rows[1].position, 2);
    assert_eq!(rows[1].url, "https://open.spotify.com/track/9");
}

#[test]
fn test_playlist_table_rows() {
    let playlists = vec![Playlist {
        id: 4,
        name: "Sunny Side".to_string(),
        owner_id: "u1".to_string(),
        mood: None,
        genres: None,
        created_at: Utc.with_ymd_and_hms(2024, 5, 17, 9, 30, 0).unwrap(),
    }];

    let rows = playlist_table_rows(&playlists);

    assert_eq!(rows[0].id, 4);
    assert_eq!(rows[0].mood, "");
    assert_eq!(rows[0].created, "2024-05-17 09:30");
}
