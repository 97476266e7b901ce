//! Configuration management for moodlist.
//!
//! Settings come from environment variables, optionally seeded from `.env`
//! files. Lookup order:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. `.env` file in the working directory
//! 4. Application defaults (where applicable)

use std::{env, path::PathBuf};

use crate::error::{Error, Result};

pub const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8080";
pub const DEFAULT_SEARCH_CONCURRENCY: usize = 4;

/// Loads environment variables from `.env` files.
///
/// The local data directory file (`~/.local/share/moodlist/.env` on Linux,
/// `~/Library/Application Support/moodlist/.env` on macOS,
/// `%LOCALAPPDATA%/moodlist/.env` on Windows) is read first, then a `.env` in
/// the working directory. Variables already present in the environment are
/// never overwritten, and missing files are skipped.
///
/// # Errors
///
/// Fails only if the data directory cannot be created.
pub async fn load_env() -> std::result::Result<(), String> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    dotenv::from_path(&path).ok();
    dotenv::dotenv().ok();
    Ok(())
}

/// Platform-specific directory holding the `.env` file and the default database.
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("moodlist");
    path
}

#[derive(Debug, Clone)]
pub struct Config {
    pub spotify_client_id: String,
    pub spotify_client_secret: String,
    pub spotify_api_url: String,
    pub spotify_token_url: String,
    pub gemini_api_key: String,
    pub gemini_api_url: String,
    pub gemini_model: String,
    pub database_url: String,
    pub server_address: String,
    pub search_concurrency: usize,
}

impl Config {
    /// Reads every setting from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming the first required variable that is
    /// missing, or a variable whose value cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let search_concurrency = match env::var("SEARCH_CONCURRENCY") {
            Ok(raw) => raw.trim().parse::<usize>().map_err(|e| {
                Error::Config(format!("SEARCH_CONCURRENCY must be a number: {}", e))
            })?,
            Err(_) => DEFAULT_SEARCH_CONCURRENCY,
        };

        Ok(Self {
            spotify_client_id: required("SPOTIFY_CLIENT_ID")?,
            spotify_client_secret: required("SPOTIFY_CLIENT_SECRET")?,
            spotify_api_url: optional("SPOTIFY_API_URL", DEFAULT_SPOTIFY_API_URL),
            spotify_token_url: optional("SPOTIFY_API_TOKEN_URL", DEFAULT_SPOTIFY_TOKEN_URL),
            gemini_api_key: required("GEMINI_API_KEY")?,
            gemini_api_url: optional("GEMINI_API_URL", DEFAULT_GEMINI_API_URL),
            gemini_model: optional("GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| default_database_url()),
            server_address: optional("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS),
            search_concurrency: search_concurrency.max(1),
        })
    }
}

fn required(key: &str) -> Result<String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(Error::Config(format!("{} must be set", key))),
    }
}

fn optional(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn default_database_url() -> String {
    format!(
        "sqlite://{path}?mode=rwc",
        path = data_dir().join("moodlist.db").display()
    )
}
