//! Hosted model backends through graniet/llm

use llm::builder::{LLMBackend, LLMBuilder};
use llm::chat::ChatMessage;
use llm::error::LLMError as LLMLibError;

use crate::assistant::ReasoningService;
use crate::error::{AssistError, AssistResult};

/// Map a provider id to an llm backend
fn get_backend(provider: &str) -> AssistResult<LLMBackend> {
    match provider {
        "openai" => Ok(LLMBackend::OpenAI),
        "anthropic" => Ok(LLMBackend::Anthropic),
        "google" => Ok(LLMBackend::Google),
        "groq" => Ok(LLMBackend::Groq),
        "mistral" => Ok(LLMBackend::Mistral),
        "ollama" => Ok(LLMBackend::Ollama),
        _ => Err(AssistError::NotConfigured {
            message: format!("unknown provider: {}", provider),
        }),
    }
}

/// Provider ids accepted by [`LlmService::new`]
pub fn supported_providers() -> Vec<&'static str> {
    vec!["openai", "anthropic", "google", "groq", "mistral", "ollama"]
}

/// A [`ReasoningService`] backed by a hosted model
#[derive(Debug, Clone)]
pub struct LlmService {
    provider: String,
    model: String,
    api_key: String,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
}

impl LlmService {
    pub fn new(
        provider: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> AssistResult<Self> {
        let provider = provider.into();
        get_backend(&provider)?;
        Ok(Self {
            provider,
            model: model.into(),
            api_key: api_key.into(),
            max_tokens: None,
            temperature: None,
        })
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

fn map_error(e: LLMLibError) -> AssistError {
    let err_str = e.to_string().to_lowercase();
    if err_str.contains("rate limit") || err_str.contains("429") {
        AssistError::RateLimited {
            retry_after_seconds: Some(60),
        }
    } else if err_str.contains("unauthorized")
        || err_str.contains("401")
        || err_str.contains("invalid api key")
    {
        AssistError::NotConfigured {
            message: e.to_string(),
        }
    } else if err_str.contains("network") || err_str.contains("connection") {
        AssistError::NetworkError {
            message: e.to_string(),
        }
    } else {
        AssistError::ApiError {
            message: e.to_string(),
        }
    }
}

impl ReasoningService for LlmService {
    async fn complete(&self, prompt: String) -> AssistResult<String> {
        let mut builder = LLMBuilder::new()
            .backend(get_backend(&self.provider)?)
            .api_key(&self.api_key)
            .model(&self.model);

        if let Some(max_tokens) = self.max_tokens {
            builder = builder.max_tokens(max_tokens);
        }
        if let Some(temp) = self.temperature {
            builder = builder.temperature(temp);
        }

        let llm = builder
            .build()
            .map_err(|e: LLMLibError| AssistError::InvalidRequest {
                message: e.to_string(),
            })?;

        let messages = vec![ChatMessage::user().content(&prompt).build()];
        let response = llm.chat(&messages).await.map_err(map_error)?;

        tracing::debug!(provider = %self.provider, model = %self.model, "completion received");
        Ok(response.text().unwrap_or_default())
    }
}
