use secrecy::SecretString;
use serde::Deserialize;

use crate::builder::{LLMBackend, LLMBuilder};
use crate::error::EvalError;

const DEFAULT_OPENAI_MODEL: &str = "gpt-4";
const DEFAULT_VLLM_API_BASE: &str = "http://localhost:8000/v1";
const DEFAULT_TEMPERATURE: f32 = 0.3;
const DEFAULT_MAX_TOKENS: u32 = 500;
const DEFAULT_TIMEOUT_SECONDS: u64 = 60;

/// Everything needed to construct a [`ContentEvaluator`](crate::evaluator::ContentEvaluator).
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct EvaluatorConfig {
    pub llm_type: LLMBackend,
    pub openai_api_key: Option<SecretString>,
    pub openai_model: String,
    pub openai_base_url: Option<String>,
    pub vllm_api_base: String,
    pub vllm_api_key: Option<SecretString>,
    pub vllm_model: Option<String>,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_seconds: u64,
    pub system_prompt: Option<String>,
    pub templates: TemplateOverrides,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            llm_type: LLMBackend::OpenAI,
            openai_api_key: None,
            openai_model: DEFAULT_OPENAI_MODEL.to_string(),
            openai_base_url: None,
            vllm_api_base: DEFAULT_VLLM_API_BASE.to_string(),
            vllm_api_key: None,
            vllm_model: None,
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            system_prompt: None,
            templates: TemplateOverrides::default(),
        }
    }
}

/// Optional replacements for the built-in prompt templates.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TemplateOverrides {
    pub quality: Option<String>,
    pub spread: Option<String>,
    pub operation: Option<String>,
    pub comprehensive: Option<String>,
    pub english_article: Option<String>,
}

impl EvaluatorConfig {
    /// Builder preloaded for the selected backend.
    ///
    /// Consumes the credentials; validation of required values happens in
    /// [`LLMBuilder::build`].
    pub fn to_builder(&mut self) -> LLMBuilder {
        let mut builder = LLMBuilder::new()
            .backend(self.llm_type)
            .temperature(self.temperature)
            .max_tokens(self.max_tokens)
            .timeout_seconds(self.timeout_seconds);

        match self.llm_type {
            LLMBackend::OpenAI => {
                builder = builder.model(self.openai_model.clone());
                if let Some(url) = &self.openai_base_url {
                    builder = builder.base_url(url.clone());
                }
                if let Some(key) = self.openai_api_key.take() {
                    builder = builder.api_key_secret(key);
                }
            }
            LLMBackend::Vllm => {
                builder = builder.base_url(self.vllm_api_base.clone());
                if let Some(model) = &self.vllm_model {
                    builder = builder.model(model.clone());
                }
                if let Some(key) = self.vllm_api_key.take() {
                    builder = builder.api_key_secret(key);
                }
            }
        }

        if let Some(system) = &self.system_prompt {
            builder = builder.system(system.clone());
        }
        builder
    }

    /// Model name that will be used for the selected backend, if known.
    pub fn active_model(&self) -> Option<&str> {
        match self.llm_type {
            LLMBackend::OpenAI => Some(&self.openai_model),
            LLMBackend::Vllm => self.vllm_model.as_deref(),
        }
    }

    pub(super) fn parse_toml(contents: &str) -> Result<Self, EvalError> {
        toml::from_str(contents).map_err(|e| EvalError::Config(format!("invalid config: {e}")))
    }
}
