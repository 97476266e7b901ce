//! Turns a mood/genre request into a validated list of proposed tracks.
//!
//! The generative service is treated as an oracle: we send a prompt, take the
//! single answer text out of its envelope and parse that text as JSON. Anything
//! structurally incomplete is rejected here so the assembler only ever sees
//! well-formed [`ProposedTrack`]s.

pub mod gemini;

use serde::Deserialize;

use crate::{
    error::{Error, Result},
    types::{ProposedTrack, Proposals},
    utils,
};

pub use gemini::{GeminiClient, TextGenerator};

#[derive(Debug, Deserialize)]
struct RawAnswer {
    playlist_name: Option<String>,
    tracks: Option<Vec<RawTrack>>,
}

// Any url the model adds is ignored; only title/artist reach the resolver.
#[derive(Debug, Deserialize)]
struct RawTrack {
    title: Option<String>,
    artist: Option<String>,
}

pub struct GenerationAdapter<G> {
    generator: G,
}

impl<G: TextGenerator> GenerationAdapter<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    pub async fn generate_proposals(&self, mood: &str, genres: &[String]) -> Result<Proposals> {
        let prompt = utils::build_prompt(mood, genres);
        let answer = self.generator.generate(&prompt).await?;
        let proposals = parse_proposals(&answer)?;

        tracing::debug!(
            playlist = %proposals.playlist_name,
            tracks = proposals.tracks.len(),
            "generation answer accepted"
        );
        Ok(proposals)
    }
}

/// Parses and validates the generated answer text.
///
/// # Errors
///
/// [`Error::InvalidGenerationResponse`] if the text is not JSON, if
/// `playlist_name` or `tracks` is missing, or if any track lacks a non-blank
/// `title` or `artist`.
pub fn parse_proposals(text: &str) -> Result<Proposals> {
    let raw: RawAnswer = serde_json::from_str(utils::strip_code_fences(text))
        .map_err(|e| Error::InvalidGenerationResponse(format!("answer is not valid JSON: {}", e)))?;

    let playlist_name = raw
        .playlist_name
        .ok_or_else(|| Error::InvalidGenerationResponse("missing playlist_name".into()))?;
    let raw_tracks = raw
        .tracks
        .ok_or_else(|| Error::InvalidGenerationResponse("missing tracks".into()))?;

    let tracks = raw_tracks
        .into_iter()
        .enumerate()
        .map(|(i, t)| {
            let title = non_blank(t.title).ok_or_else(|| {
                Error::InvalidGenerationResponse(format!("track {} is missing title", i))
            })?;
            let artist = non_blank(t.artist).ok_or_else(|| {
                Error::InvalidGenerationResponse(format!("track {} is missing artist", i))
            })?;
            Ok(ProposedTrack { title, artist })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Proposals {
        playlist_name,
        tracks,
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
