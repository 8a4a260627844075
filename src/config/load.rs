use std::fs;
use std::path::Path;

use secrecy::SecretString;

use crate::error::EvalError;

use super::types::EvaluatorConfig;

pub const ENV_LLM_TYPE: &str = "LLM_TYPE";
pub const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_OPENAI_MODEL: &str = "OPENAI_MODEL";
pub const ENV_VLLM_API_BASE: &str = "VLLM_API_BASE";
pub const ENV_VLLM_API_KEY: &str = "VLLM_API_KEY";
pub const ENV_VLLM_MODEL: &str = "VLLM_MODEL";

impl EvaluatorConfig {
    /// Defaults overlaid with the process environment.
    pub fn from_env() -> Result<Self, EvalError> {
        let mut config = Self::default();
        config.apply_env_with(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Parses a TOML document; environment values are not consulted.
    pub fn from_toml_str(contents: &str) -> Result<Self, EvalError> {
        Self::parse_toml(contents)
    }

    /// Reads a TOML file, then overlays the process environment.
    ///
    /// A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, EvalError> {
        let mut config = match fs::read_to_string(path) {
            Ok(contents) => Self::parse_toml(&contents)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("config file {} not found, using defaults", path.display());
                Self::default()
            }
            Err(err) => {
                return Err(EvalError::Config(format!(
                    "failed to read {}: {err}",
                    path.display()
                )))
            }
        };
        config.apply_env_with(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Overrides settings with non-empty values returned by `lookup`.
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<(), EvalError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(kind) = get(ENV_LLM_TYPE) {
            self.llm_type = kind.parse()?;
        }
        if let Some(key) = get(ENV_OPENAI_API_KEY) {
            self.openai_api_key = Some(SecretString::new(key));
        }
        if let Some(model) = get(ENV_OPENAI_MODEL) {
            self.openai_model = model;
        }
        if let Some(base) = get(ENV_VLLM_API_BASE) {
            self.vllm_api_base = base;
        }
        if let Some(key) = get(ENV_VLLM_API_KEY) {
            self.vllm_api_key = Some(SecretString::new(key));
        }
        if let Some(model) = get(ENV_VLLM_MODEL) {
            self.vllm_model = Some(model);
        }
        Ok(())
    }
}
