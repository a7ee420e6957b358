use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{GatewayError, Result};
use crate::speech::{HttpSpeechProvider, SpeechProvider};
use crate::transcription::{HttpTranscriptionProvider, TranscriptionProvider};
use crate::vision::{ImageDescriptionProvider, VlmDescriptionProvider};

/// Multimodal gateway configuration.
///
/// Each collaborator is optional: a deployment may run text-only, with
/// no transcription, vision, or speech services configured.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    pub transcription_api_url: Option<String>,
    pub transcription_model: String,
    pub transcription_api_key: Option<String>,
    pub vision_api_url: Option<String>,
    pub vision_model: String,
    pub vision_api_key: Option<String>,
    pub speech_api_url: Option<String>,
    pub speech_voice: String,
    pub speech_api_key: Option<String>,
}

impl GatewayConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            transcription_api_url: std::env::var("TRANSCRIPTION_API_URL").ok(),
            transcription_model: std::env::var("TRANSCRIPTION_MODEL")
                .unwrap_or_else(|_| "whisper-large-v3-turbo".to_string()),
            transcription_api_key: std::env::var("TRANSCRIPTION_API_KEY").ok(),
            vision_api_url: std::env::var("VISION_API_URL").ok(),
            vision_model: std::env::var("VISION_MODEL")
                .unwrap_or_else(|_| "Qwen/Qwen2.5-VL-7B-Instruct".to_string()),
            vision_api_key: std::env::var("VISION_API_KEY").ok(),
            speech_api_url: std::env::var("SPEECH_API_URL").ok(),
            speech_voice: std::env::var("SPEECH_VOICE").unwrap_or_else(|_| "aria".to_string()),
            speech_api_key: std::env::var("SPEECH_API_KEY").ok(),
        })
    }

    /// Build the transcription provider, if one is configured
    pub fn transcription_provider(&self) -> Result<Option<Arc<dyn TranscriptionProvider>>> {
        match &self.transcription_api_url {
            Some(url) if url.is_empty() => Err(GatewayError::Config(
                "TRANSCRIPTION_API_URL is set but empty".to_string(),
            )),
            Some(url) => Ok(Some(Arc::new(HttpTranscriptionProvider::new(
                url,
                &self.transcription_model,
                self.transcription_api_key.clone(),
            )))),
            None => Ok(None),
        }
    }

    /// Build the image-description provider, if one is configured
    pub fn image_provider(&self) -> Result<Option<Arc<dyn ImageDescriptionProvider>>> {
        match &self.vision_api_url {
            Some(url) if url.is_empty() => Err(GatewayError::Config(
                "VISION_API_URL is set but empty".to_string(),
            )),
            Some(url) => Ok(Some(Arc::new(VlmDescriptionProvider::new(
                url,
                &self.vision_model,
                self.vision_api_key.clone(),
            )))),
            None => Ok(None),
        }
    }

    /// Build the speech-synthesis provider, if one is configured
    pub fn speech_provider(&self) -> Result<Option<Arc<dyn SpeechProvider>>> {
        match &self.speech_api_url {
            Some(url) if url.is_empty() => Err(GatewayError::Config(
                "SPEECH_API_URL is set but empty".to_string(),
            )),
            Some(url) => Ok(Some(Arc::new(HttpSpeechProvider::new(
                url,
                &self.speech_voice,
                self.speech_api_key.clone(),
            )))),
            None => Ok(None),
        }
    }
}
