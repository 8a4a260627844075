use crate::{
    backends::openai::{OpenAI, OpenAIConfig, OPENAI_BASE_URL, OPENAI_DEFAULT_MODEL},
    builder::LLMBackend,
    chat::ChatProvider,
    error::EvalError,
};

use super::helpers;
use crate::builder::state::BuilderState;

pub(super) fn build_backend(
    state: &mut BuilderState,
    backend: LLMBackend,
) -> Result<Box<dyn ChatProvider>, EvalError> {
    match backend {
        LLMBackend::OpenAI => build_openai(state),
        LLMBackend::Vllm => build_vllm(state),
    }
}

fn build_openai(state: &mut BuilderState) -> Result<Box<dyn ChatProvider>, EvalError> {
    let name = LLMBackend::OpenAI.display_name();
    let api_key = helpers::require_api_key(state, name)?;
    let timeout_seconds = helpers::timeout_or_default(state);

    let provider = OpenAI::new(OpenAIConfig {
        provider_name: name.to_string(),
        api_key,
        base_url: state
            .base_url
            .take()
            .unwrap_or_else(|| OPENAI_BASE_URL.to_string()),
        model: state
            .model
            .take()
            .unwrap_or_else(|| OPENAI_DEFAULT_MODEL.to_string()),
        max_tokens: state.max_tokens,
        temperature: state.temperature,
        system: state.system.take(),
        timeout_seconds,
    })?;

    Ok(Box::new(provider))
}

fn build_vllm(state: &mut BuilderState) -> Result<Box<dyn ChatProvider>, EvalError> {
    let name = LLMBackend::Vllm.display_name();
    let base_url = helpers::require_field(state.base_url.take(), "base URL", name)?;
    let model = helpers::require_field(state.model.take(), "model", name)?;
    let timeout_seconds = helpers::timeout_or_default(state);

    log::info!("Using vLLM model {model} at {base_url}");
    let provider = OpenAI::new(OpenAIConfig {
        provider_name: name.to_string(),
        api_key: helpers::api_key_or_placeholder(state),
        base_url,
        model,
        max_tokens: state.max_tokens,
        temperature: state.temperature,
        system: state.system.take(),
        timeout_seconds,
    })?;

    Ok(Box::new(provider))
}
