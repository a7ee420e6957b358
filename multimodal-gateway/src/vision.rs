//! Image-description provider seam.
//!
//! The description instruction is fixed and neutral: the downstream
//! pipeline treats image findings as context only, so the provider must
//! never emit diagnostic claims or treatment suggestions.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{GatewayError, Result};

/// Fixed, non-diagnostic instruction sent with every image
pub const IMAGE_DESCRIPTION_INSTRUCTION: &str = "Describe the visible medical features in this image in a neutral, \
     factual way. Do not diagnose or suggest treatment.";

/// Trait for image-description providers: image bytes in, neutral
/// descriptive text out
#[async_trait]
pub trait ImageDescriptionProvider: Send + Sync {
    async fn describe(&self, image: &[u8]) -> Result<String>;
}

/// Vision-language model provider speaking the chat-completions
/// contract, with the image inlined as a base64 data URL
pub struct VlmDescriptionProvider {
    client: reqwest::Client,
    api_url: String,
    model: String,
    api_key: Option<String>,
}

#[derive(Serialize)]
#[serde(tag = "type")]
enum ContentPart<'a> {
    #[serde(rename = "text")]
    Text { text: &'a str },
    #[serde(rename = "image_url")]
    ImageUrl { image_url: ImageUrl },
}

#[derive(Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Serialize)]
struct VisionMessage<'a> {
    role: &'a str,
    content: Vec<ContentPart<'a>>,
}

#[derive(Serialize)]
struct VisionRequest<'a> {
    model: &'a str,
    messages: Vec<VisionMessage<'a>>,
}

#[derive(Deserialize)]
struct VisionResponse {
    choices: Vec<VisionChoice>,
}

#[derive(Deserialize)]
struct VisionChoice {
    message: VisionResponseMessage,
}

#[derive(Deserialize)]
struct VisionResponseMessage {
    content: String,
}

impl VlmDescriptionProvider {
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
impl ImageDescriptionProvider for VlmDescriptionProvider {
    async fn describe(&self, image: &[u8]) -> Result<String> {
        let encoded = BASE64.encode(image);
        let data_url = format!("data:image/jpeg;base64,{}", encoded);

        let mut request = self
            .client
            .post(format!("{}/chat/completions", self.api_url))
            .json(&VisionRequest {
                model: &self.model,
                messages: vec![VisionMessage {
                    role: "user",
                    content: vec![
                        ContentPart::Text {
                            text: IMAGE_DESCRIPTION_INSTRUCTION,
                        },
                        ContentPart::ImageUrl {
                            image_url: ImageUrl { url: data_url },
                        },
                    ],
                }],
            });

        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response: VisionResponse = request
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let description = response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| {
                GatewayError::ImageAnalysis("vision service returned no choices".to_string())
            })?;

        debug!(model = %self.model, chars = description.len(), "image described");

        Ok(description)
    }
}
