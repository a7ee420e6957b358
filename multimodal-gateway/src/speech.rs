//! Text-to-speech provider seam.

use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use crate::error::{GatewayError, Result};

/// Trait for speech-synthesis providers: text in, playable audio out
#[async_trait]
pub trait SpeechProvider: Send + Sync {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>>;
}

/// HTTP speech-synthesis provider posting `{ "voice", "text", "format" }`
/// to `{api_url}/synthesize` and reading raw audio bytes back
pub struct HttpSpeechProvider {
    client: reqwest::Client,
    api_url: String,
    voice: String,
    api_key: Option<String>,
}

#[derive(Serialize)]
struct SynthesisRequest<'a> {
    voice: &'a str,
    text: &'a str,
    format: &'a str,
}

impl HttpSpeechProvider {
    pub fn new(api_url: &str, voice: &str, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
            voice: voice.to_string(),
            api_key,
        }
    }
}

#[async_trait]
impl SpeechProvider for HttpSpeechProvider {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>> {
        let mut request = self
            .client
            .post(format!("{}/synthesize", self.api_url))
            .json(&SynthesisRequest {
                voice: &self.voice,
                text,
                format: "mp3",
            });

        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let audio = request
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?
            .to_vec();

        if audio.is_empty() {
            return Err(GatewayError::SpeechSynthesis(
                "speech service returned no audio".to_string(),
            ));
        }

        debug!(voice = %self.voice, bytes = audio.len(), "speech synthesized");

        Ok(audio)
    }
}
