use secrecy::{ExposeSecret, SecretString};

use crate::error::EvalError;

use super::super::state::BuilderState;

const DEFAULT_TIMEOUT_SECONDS: u64 = 60;
/// Key sent to servers that accept any bearer token.
const PLACEHOLDER_API_KEY: &str = "EMPTY";

pub(super) fn log_builder_state(state: &BuilderState) {
    log::debug!(
        "Building LLM provider. backend={:?} model={:?} base_url={:?} temp={:?} max_tokens={:?}",
        state.backend,
        state.model,
        state.base_url,
        state.temperature,
        state.max_tokens,
    );
}

pub(super) fn require_api_key(
    state: &mut BuilderState,
    provider: &str,
) -> Result<SecretString, EvalError> {
    match state.api_key.take() {
        Some(key) if !key.expose_secret().trim().is_empty() => Ok(key),
        _ => Err(EvalError::Config(format!(
            "No API key provided for {provider}"
        ))),
    }
}

pub(super) fn api_key_or_placeholder(state: &mut BuilderState) -> SecretString {
    state
        .api_key
        .take()
        .filter(|key| !key.expose_secret().trim().is_empty())
        .unwrap_or_else(|| SecretString::new(PLACEHOLDER_API_KEY.to_string()))
}

pub(super) fn require_field(
    value: Option<String>,
    name: &str,
    provider: &str,
) -> Result<String, EvalError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| EvalError::Config(format!("No {name} provided for {provider}")))
}

pub(super) fn timeout_or_default(state: &BuilderState) -> Option<u64> {
    Some(state.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS))
}
