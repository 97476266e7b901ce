use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    config::Config, db, error, info, server, success, types::SynthesizeRequest, utils, warning,
};

pub async fn generate(
    config: &Config,
    mood: String,
    genres: Vec<String>,
    name: Option<String>,
    owner: Option<String>,
) {
    let pool = match db::connect(&config.database_url).await {
        Ok(pool) => pool,
        Err(e) => error!("Cannot open database {}: {}", config.database_url, e),
    };
    let synthesizer = server::build_synthesizer(config, pool);

    info!(
        "Synthesizing a playlist for mood \"{}\" ({})",
        mood,
        if genres.is_empty() {
            "any genre".to_string()
        } else {
            genres.join(", ")
        }
    );

    let pb = ProgressBar::new_spinner();
    pb.set_message("Asking for track ideas and resolving them on Spotify...");
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }

    let result = synthesizer
        .synthesize_playlist(SynthesizeRequest {
            mood,
            genres,
            playlist_name: name,
            owner_id: owner,
        })
        .await;
    pb.finish_and_clear();

    match result {
        Ok(playlist) => {
            success!(
                "Playlist \"{}\" (id {}) created with {} songs",
                playlist.playlist.name,
                playlist.playlist.id,
                playlist.songs.len()
            );
            if playlist.songs.is_empty() {
                warning!("None of the proposed tracks could be found on Spotify.");
            } else {
                println!("{}", Table::new(utils::song_table_rows(&playlist.songs)));
            }
        }
        Err(e) => error!("Playlist synthesis failed: {}", e),
    }
}
