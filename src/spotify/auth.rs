use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::{TimeDelta, Utc};
use reqwest::Client;

use crate::{
    config::Config,
    error::{Error, Result},
    management::Authorizer,
    types::{Credential, TokenResponse},
};

/// Client-credentials grant against the Spotify accounts service.
#[derive(Debug, Clone)]
pub struct ClientCredentials {
    client: Client,
    token_url: String,
    client_id: String,
    client_secret: String,
}

impl ClientCredentials {
    pub fn new(
        client: Client,
        token_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            client,
            token_url: token_url.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    pub fn from_config(client: Client, config: &Config) -> Self {
        Self::new(
            client,
            &config.spotify_token_url,
            &config.spotify_client_id,
            &config.spotify_client_secret,
        )
    }

    fn basic_auth_header(&self) -> String {
        let raw = format!("{}:{}", self.client_id, self.client_secret);
        format!("Basic {}", STANDARD.encode(raw))
    }
}

impl Authorizer for ClientCredentials {
    async fn authorize(&self) -> Result<Credential> {
        let response = self
            .client
            .post(&self.token_url)
            .header(reqwest::header::AUTHORIZATION, self.basic_auth_header())
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .and_then(|res| res.error_for_status())
            .map_err(|e| Error::Authorization(e.to_string()))?;

        let token = response
            .json::<TokenResponse>()
            .await
            .map_err(|e| Error::Authorization(format!("malformed token response: {}", e)))?;

        credential_from_response(token)
    }
}

/// Turns a server-reported lifetime into an absolute expiry.
///
/// Negative or unrepresentable lifetimes are an authorization failure.
pub fn credential_from_response(token: TokenResponse) -> Result<Credential> {
    let expires_at = Some(token.expires_in)
        .filter(|secs| *secs >= 0)
        .and_then(TimeDelta::try_seconds)
        .and_then(|lifetime| Utc::now().checked_add_signed(lifetime))
        .ok_or_else(|| {
            Error::Authorization(format!("invalid expires_in {}", token.expires_in))
        })?;

    Ok(Credential {
        token: token.access_token,
        expires_at,
    })
}
