use tabled::Table;

use crate::{config::Config, db, error, info, utils};

pub async fn show_playlist(config: &Config, id: i64) {
    let pool = match db::connect(&config.database_url).await {
        Ok(pool) => pool,
        Err(e) => error!("Cannot open database {}: {}", config.database_url, e),
    };

    match db::playlists::get_with_songs(&pool, id).await {
        Ok(playlist) => {
            info!(
                "{} by {} ({} songs)",
                playlist.playlist.name,
                playlist.playlist.owner_id,
                playlist.songs.len()
            );
            if !playlist.songs.is_empty() {
                println!("{}", Table::new(utils::song_table_rows(&playlist.songs)));
            }
        }
        Err(e) => error!("{}", e),
    }
}

pub async fn list_playlists(config: &Config, owner: Option<String>) {
    let pool = match db::connect(&config.database_url).await {
        Ok(pool) => pool,
        Err(e) => error!("Cannot open database {}: {}", config.database_url, e),
    };

    match db::playlists::list(&pool, owner.as_deref()).await {
        Ok(playlists) if playlists.is_empty() => info!("No playlists stored yet."),
        Ok(playlists) => println!("{}", Table::new(utils::playlist_table_rows(&playlists))),
        Err(e) => error!("Cannot list playlists: {}", e),
    }
}
