//! OpenAI-compatible provider adapter
//!
//! Implements [`LlmProvider`] over any `/chat/completions` endpoint
//! (OpenAI, Azure OpenAI, vLLM, Ollama, LM Studio, ...).

use super::types::{ChatCompletionResponse, build_request, convert_response};
use crate::config::FileProviderConfig;
use async_trait::async_trait;
use roundtable_application::{ChatMessage, GenerateOptions, Generation, LlmProvider, ProviderError};
use roundtable_domain::core::string::first_chars;
use tracing::debug;

/// Characters of an error body kept in [`ProviderError::HttpStatus`]
const ERROR_BODY_CHARS: usize = 500;

/// Provider backed by an OpenAI-compatible HTTP API
pub struct OpenAiProvider {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

impl OpenAiProvider {
    pub fn new(base_url: &str, model: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            model: model.into(),
            api_key,
        }
    }

    /// Build from the `[provider]` section.
    ///
    /// The key comes from `api_key`, then from the `api_key_env` variable.
    /// An empty `api_key_env` means the endpoint needs no key.
    pub fn from_config(config: &FileProviderConfig) -> Result<Self, ProviderError> {
        let api_key = match &config.api_key {
            Some(key) => Some(key.clone()),
            None if config.api_key_env.is_empty() => None,
            None => Some(
                std::env::var(&config.api_key_env)
                    .map_err(|_| ProviderError::MissingApiKey(config.api_key_env.clone()))?,
            ),
        };
        Ok(Self::new(&config.base_url, &config.model, api_key))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn generate(
        &self,
        messages: &[ChatMessage],
        options: &GenerateOptions,
    ) -> Result<Generation, ProviderError> {
        let request = build_request(&self.model, messages, options);
        debug!(
            "POST {} model={} max_tokens={}",
            self.endpoint, self.model, options.max_tokens
        );

        let mut builder = self.client.post(&self.endpoint).json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await.map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::HttpStatus {
                status: status.as_u16(),
                body: first_chars(body.trim(), ERROR_BODY_CHARS).to_string(),
            });
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        let generation = convert_response(parsed)?;
        if let Some(usage) = generation.usage {
            debug!("{} tokens used", usage.total());
        }
        Ok(generation)
    }
}

fn map_transport_error(e: reqwest::Error) -> ProviderError {
    if e.is_connect() {
        ProviderError::ConnectionError(e.to_string())
    } else {
        ProviderError::RequestFailed(e.to_string())
    }
}
