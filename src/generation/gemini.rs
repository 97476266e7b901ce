use std::future::Future;

use reqwest::Client;

use crate::{
    config::Config,
    error::{Error, Result},
    types::{Content, GenerateContentRequest, GenerateContentResponse, Part},
};

/// Opaque text-in/text-out oracle.
pub trait TextGenerator: Send + Sync {
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String>> + Send;
}

/// Google Gemini `generateContent` client.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    api_url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(
        client: Client,
        api_url: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_url: api_url.into(),
            model: model.into(),
            api_key: api_key.into(),
        }
    }

    pub fn from_config(client: Client, config: &Config) -> Self {
        Self::new(
            client,
            &config.gemini_api_url,
            &config.gemini_model,
            &config.gemini_api_key,
        )
    }
}

impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
        };

        let response = self
            .client
            .post(format!(
                "{url}/models/{model}:generateContent",
                url = self.api_url,
                model = self.model
            ))
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .and_then(|res| res.error_for_status())
            .map_err(|e| Error::Generation(e.to_string()))?;

        let envelope = response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| Error::InvalidGenerationResponse(e.to_string()))?;

        answer_text(envelope)
    }
}

/// Pulls `candidates[0].content.parts[0].text` out of the response envelope.
pub fn answer_text(envelope: GenerateContentResponse) -> Result<String> {
    envelope
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text)
        .ok_or_else(|| Error::InvalidGenerationResponse("response carries no answer text".into()))
}
