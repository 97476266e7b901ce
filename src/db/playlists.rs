//! Playlist persistence. A playlist and its song links are written in one
//! transaction and never modified afterwards.

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};

use crate::{
    error::{Error, Result},
    types::{NewPlaylist, Playlist, PlaylistWithSongs, Song},
};

/// Persists `playlist` and links `songs` to it in input order.
///
/// `songs` must not contain the same id twice.
pub async fn create_with_songs(
    pool: &SqlitePool,
    playlist: &NewPlaylist,
    songs: Vec<Song>,
) -> Result<PlaylistWithSongs> {
    let mut tx = pool.begin().await?;

    let created = create(&mut tx, playlist).await?;
    link_songs(&mut tx, created.id, &songs).await?;

    tx.commit().await?;

    Ok(PlaylistWithSongs {
        playlist: created,
        songs,
    })
}

pub async fn create(conn: &mut SqliteConnection, playlist: &NewPlaylist) -> Result<Playlist> {
    let created_at = Utc::now();
    let genres = if playlist.genres.is_empty() {
        None
    } else {
        Some(serde_json::to_string(&playlist.genres).map_err(|e| {
            Error::BadRequest(format!("genres cannot be serialized: {}", e))
        })?)
    };

    let result = sqlx::query(
        "INSERT INTO playlists (name, owner_id, mood, genres, created_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&playlist.name)
    .bind(&playlist.owner_id)
    .bind(&playlist.mood)
    .bind(&genres)
    .bind(created_at)
    .execute(&mut *conn)
    .await?;

    Ok(Playlist {
        id: result.last_insert_rowid(),
        name: playlist.name.clone(),
        owner_id: playlist.owner_id.clone(),
        mood: playlist.mood.clone(),
        genres,
        created_at,
    })
}

/// Batch-inserts the playlist/song links; `position` follows slice order.
pub async fn link_songs(conn: &mut SqliteConnection, playlist_id: i64, songs: &[Song]) -> Result<()> {
    if songs.is_empty() {
        return Ok(());
    }

    let mut builder: QueryBuilder<Sqlite> =
        QueryBuilder::new("INSERT INTO playlist_songs (playlist_id, song_id, position) ");
    builder.push_values(songs.iter().enumerate(), |mut row, (position, song)| {
        row.push_bind(playlist_id)
            .push_bind(song.id)
            .push_bind(position as i64);
    });
    builder.build().execute(&mut *conn).await?;

    Ok(())
}

pub async fn get(pool: &SqlitePool, id: i64) -> Result<Option<Playlist>> {
    let playlist = sqlx::query_as::<_, Playlist>(
        "SELECT id, name, owner_id, mood, genres, created_at FROM playlists WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(playlist)
}

pub async fn songs_for(pool: &SqlitePool, playlist_id: i64) -> Result<Vec<Song>> {
    let songs = sqlx::query_as::<_, Song>(
        r#"
        SELECT s.id, s.name, s.artist_name, s.url
        FROM playlist_songs ps
        JOIN songs s ON s.id = ps.song_id
        WHERE ps.playlist_id = ?
        ORDER BY ps.position
        "#,
    )
    .bind(playlist_id)
    .fetch_all(pool)
    .await?;
    Ok(songs)
}

pub async fn get_with_songs(pool: &SqlitePool, id: i64) -> Result<PlaylistWithSongs> {
    let playlist = get(pool, id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("playlist {}", id)))?;
    let songs = songs_for(pool, id).await?;
    Ok(PlaylistWithSongs { playlist, songs })
}

pub async fn list(pool: &SqlitePool, owner_id: Option<&str>) -> Result<Vec<Playlist>> {
    let playlists = match owner_id {
        Some(owner) => {
            sqlx::query_as::<_, Playlist>(
                "SELECT id, name, owner_id, mood, genres, created_at FROM playlists \
                 WHERE owner_id = ? ORDER BY created_at DESC, id DESC",
            )
            .bind(owner)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, Playlist>(
                "SELECT id, name, owner_id, mood, genres, created_at FROM playlists \
                 ORDER BY created_at DESC, id DESC",
            )
            .fetch_all(pool)
            .await?
        }
    };
    Ok(playlists)
}

pub async fn count(pool: &SqlitePool) -> Result<i64> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM playlists")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

pub async fn count_links(pool: &SqlitePool) -> Result<i64> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM playlist_songs")
        .fetch_one(pool)
        .await?;
    Ok(count)
}
