use std::{future::Future, sync::Arc};

use reqwest::Client;

use crate::{
    config::Config,
    error::{Error, Result},
    management::{Authorizer, TokenManager},
    types::{SearchResponse, TrackItem},
    utils,
};

/// Looks up the best catalog match for a title/artist pair.
///
/// `Ok(None)` means the search ran and found nothing; `Err` means the search
/// could not be performed at all.
pub trait TrackSearch: Send + Sync {
    fn search(
        &self,
        title: &str,
        artist: &str,
    ) -> impl Future<Output = Result<Option<TrackItem>>> + Send;
}

/// Spotify Web API search, authorized through a shared [`TokenManager`].
pub struct SpotifyCatalog<A> {
    client: Client,
    api_url: String,
    tokens: Arc<TokenManager<A>>,
}

impl<A: Authorizer> SpotifyCatalog<A> {
    pub fn new(client: Client, api_url: impl Into<String>, tokens: Arc<TokenManager<A>>) -> Self {
        Self {
            client,
            api_url: api_url.into(),
            tokens,
        }
    }

    pub fn from_config(client: Client, config: &Config, tokens: Arc<TokenManager<A>>) -> Self {
        Self::new(client, &config.spotify_api_url, tokens)
    }
}

impl<A: Authorizer> TrackSearch for SpotifyCatalog<A> {
    async fn search(&self, title: &str, artist: &str) -> Result<Option<TrackItem>> {
        let query = utils::build_search_query(title, artist);
        let credential = self.tokens.get_valid_token().await?;

        let response = self
            .client
            .get(format!("{url}/search", url = self.api_url))
            .bearer_auth(&credential.token)
            .query(&[("q", query.as_str()), ("type", "track"), ("limit", "1")])
            .send()
            .await
            .and_then(|res| res.error_for_status())
            .map_err(|e| Error::Search(e.to_string()))?;

        let body = response
            .text()
            .await
            .map_err(|e| Error::Search(e.to_string()))?;

        first_track(&body)
    }
}

/// Picks the top hit out of a search response body.
pub fn first_track(body: &str) -> Result<Option<TrackItem>> {
    let page = serde_json::from_str::<SearchResponse>(body)
        .map_err(|e| Error::Search(format!("malformed search response: {}", e)))?;

    Ok(page.tracks.items.into_iter().next())
}
