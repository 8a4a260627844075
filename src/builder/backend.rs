use serde::Deserialize;

use crate::error::EvalError;

/// Supported LLM backend providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LLMBackend {
    /// Hosted OpenAI API
    #[default]
    OpenAI,
    /// Self-hosted vLLM server exposing the OpenAI chat API
    Vllm,
}

impl LLMBackend {
    pub fn display_name(&self) -> &'static str {
        match self {
            LLMBackend::OpenAI => "OpenAI",
            LLMBackend::Vllm => "vLLM",
        }
    }
}

impl std::str::FromStr for LLMBackend {
    type Err = EvalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(LLMBackend::OpenAI),
            "vllm" => Ok(LLMBackend::Vllm),
            _ => Err(EvalError::Config(format!("Unknown LLM backend: {s}"))),
        }
    }
}
