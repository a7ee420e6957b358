//! Speech-to-text provider seam.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::error::{GatewayError, Result};

/// Trait for transcription providers: audio bytes in, text out
#[async_trait]
pub trait TranscriptionProvider: Send + Sync {
    async fn transcribe(&self, audio: &[u8]) -> Result<String>;
}

/// Whisper-style HTTP transcription provider.
///
/// Posts audio as multipart form data to
/// `{api_url}/audio/transcriptions` and reads `{ "text": ... }` back.
pub struct HttpTranscriptionProvider {
    client: reqwest::Client,
    api_url: String,
    model: String,
    api_key: Option<String>,
}

#[derive(Deserialize)]
struct TranscriptionResponse {
    text: String,
}

impl HttpTranscriptionProvider {
    pub fn new(api_url: &str, model: &str, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key,
        }
    }
}

#[async_trait]
impl TranscriptionProvider for HttpTranscriptionProvider {
    async fn transcribe(&self, audio: &[u8]) -> Result<String> {
        let form = reqwest::multipart::Form::new()
            .text("model", self.model.clone())
            .text("language", "en")
            .part(
                "file",
                reqwest::multipart::Part::bytes(audio.to_vec()).file_name("input.wav"),
            );

        let mut request = self
            .client
            .post(format!("{}/audio/transcriptions", self.api_url))
            .multipart(form);

        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response: TranscriptionResponse = request
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if response.text.trim().is_empty() {
            return Err(GatewayError::Transcription(
                "transcription service returned empty text".to_string(),
            ));
        }

        debug!(model = %self.model, chars = response.text.len(), "audio transcribed");

        Ok(response.text)
    }
}
