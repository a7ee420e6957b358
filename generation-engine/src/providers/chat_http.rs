//! Chat-completion HTTP provider.
//!
//! Posts an OpenAI-style chat completion to a configurable endpoint
//! (`{api_url}/chat/completions`), which covers self-hosted runtimes
//! and hosted inference gateways exposing the same contract.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{GenerationError, Result};
use crate::prompt::PromptTemplate;
use crate::providers::GenerationProvider;

pub struct ChatHttpProvider {
    client: reqwest::Client,
    api_url: String,
    model: String,
    api_key: Option<String>,
    template: PromptTemplate,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String,
}

impl ChatHttpProvider {
    pub fn new(api_url: &str, model: &str, api_key: Option<String>) -> Self {
        Self::with_template(api_url, model, api_key, PromptTemplate::default())
    }

    pub fn with_template(
        api_url: &str,
        model: &str,
        api_key: Option<String>,
        template: PromptTemplate,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key,
            template,
        }
    }
}

#[async_trait]
impl GenerationProvider for ChatHttpProvider {
    async fn generate(&self, query: &str, context: &str) -> Result<String> {
        let user_message = self.template.render(query, context);

        let mut request = self
            .client
            .post(format!("{}/chat/completions", self.api_url))
            .json(&ChatRequest {
                model: &self.model,
                messages: vec![
                    ChatMessage {
                        role: "system",
                        content: &self.template.system,
                    },
                    ChatMessage {
                        role: "user",
                        content: &user_message,
                    },
                ],
            });

        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response: ChatResponse = request
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let answer = response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| {
                GenerationError::Provider("completion service returned no choices".to_string())
            })?;

        debug!(model = %self.model, answer_len = answer.len(), "generation complete");

        Ok(answer)
    }
}
