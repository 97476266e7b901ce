//! Song catalog operations. `url` is the identity key; `id` is only a row handle.

use sqlx::SqlitePool;

use crate::{
    error::{Error, Result},
    types::{ResolvedTrack, Song},
};

pub async fn find_by_url(pool: &SqlitePool, url: &str) -> Result<Option<Song>> {
    let song = sqlx::query_as::<_, Song>(
        "SELECT id, name, artist_name, url FROM songs WHERE url = ?",
    )
    .bind(url)
    .fetch_optional(pool)
    .await?;
    Ok(song)
}

/// Inserts a new song. Fails with a unique violation if `url` already exists.
pub async fn create(pool: &SqlitePool, track: &ResolvedTrack) -> Result<Song> {
    let result = sqlx::query("INSERT INTO songs (name, artist_name, url) VALUES (?, ?, ?)")
        .bind(&track.name)
        .bind(&track.artist)
        .bind(&track.external_url)
        .execute(pool)
        .await?;

    Ok(Song {
        id: result.last_insert_rowid(),
        name: track.name.clone(),
        artist_name: track.artist.clone(),
        url: track.external_url.clone(),
    })
}

/// Returns the song for `track.external_url`, creating it if needed.
///
/// An existing row is returned unchanged.
pub async fn upsert(pool: &SqlitePool, track: &ResolvedTrack) -> Result<Song> {
    if let Some(existing) = find_by_url(pool, &track.external_url).await? {
        return Ok(existing);
    }
    insert_or_reread(pool, track).await
}

/// Inserts `track`; if a concurrent writer already created the same url, the
/// unique constraint rejects our insert and the winner's row is re-read.
async fn insert_or_reread(pool: &SqlitePool, track: &ResolvedTrack) -> Result<Song> {
    match create(pool, track).await {
        Ok(song) => Ok(song),
        Err(Error::Database(sqlx::Error::Database(e))) if e.is_unique_violation() => {
            tracing::warn!(url = %track.external_url, "song created concurrently, re-reading");
            find_by_url(pool, &track.external_url)
                .await?
                .ok_or(Error::Database(sqlx::Error::RowNotFound))
        }
        Err(e) => Err(e),
    }
}

/// Number of songs in the catalog.
pub async fn count(pool: &SqlitePool) -> Result<i64> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM songs")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    fn sunroof() -> ResolvedTrack {
        ResolvedTrack {
            name: "Sunroof".into(),
            artist: "Nicky Youre".into(),
            external_url: "https://open.spotify.com/track/123".into(),
        }
    }

    #[tokio::test]
    async fn upsert_is_idempotent() {
        let pool = db::connect_in_memory().await.unwrap();

        let first = upsert(&pool, &sunroof()).await.unwrap();
        let second = upsert(&pool, &sunroof()).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(count(&pool).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn lost_insert_race_returns_winning_row() {
        let pool = db::connect_in_memory().await.unwrap();
        let winner = create(&pool, &sunroof()).await.unwrap();

        let renamed = ResolvedTrack {
            name: "Sunroof (Remix)".into(),
            ..sunroof()
        };
        let song = insert_or_reread(&pool, &renamed).await.unwrap();

        assert_eq!(song, winner);
        assert_eq!(count(&pool).await.unwrap(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_upserts_agree_on_one_row() {
        let path = std::env::temp_dir().join(format!(
            "moodlist-upsert-{}-{}.db",
            std::process::id(),
            chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
        ));
        let pool = db::connect(&format!("sqlite://{}?mode=rwc", path.display()))
            .await
            .unwrap();

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let pool = pool.clone();
                tokio::spawn(async move { upsert(&pool, &sunroof()).await })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap().unwrap().id);
        }

        ids.dedup();
        assert_eq!(ids.len(), 1);
        assert_eq!(count(&pool).await.unwrap(), 1);

        pool.close().await;
        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn existing_row_is_returned_unchanged() {
        let pool = db::connect_in_memory().await.unwrap();
        let original = upsert(&pool, &sunroof()).await.unwrap();

        let renamed = ResolvedTrack {
            name: "Sunroof (Remix)".into(),
            ..sunroof()
        };
        let song = upsert(&pool, &renamed).await.unwrap();

        assert_eq!(song.id, original.id);
        assert_eq!(song.name, "Sunroof");
    }

    #[tokio::test]
    async fn duplicate_create_is_a_unique_violation() {
        let pool = db::connect_in_memory().await.unwrap();
        create(&pool, &sunroof()).await.unwrap();

        let err = create(&pool, &sunroof()).await.unwrap_err();
        match err {
            Error::Database(sqlx::Error::Database(e)) => assert!(e.is_unique_violation()),
            other => panic!("expected unique violation, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn find_by_url_misses_unknown_url() {
        let pool = db::connect_in_memory().await.unwrap();
        assert!(find_by_url(&pool, "https://open.spotify.com/track/none")
            .await
            .unwrap()
            .is_none());
    }
}
