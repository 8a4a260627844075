//! Evaluator configuration: backend selection, credentials and sampling
//! settings, loaded from TOML and/or the process environment.

mod load;
mod paths;
mod types;

pub use load::{
    ENV_LLM_TYPE, ENV_OPENAI_API_KEY, ENV_OPENAI_MODEL, ENV_VLLM_API_BASE, ENV_VLLM_API_KEY,
    ENV_VLLM_MODEL,
};
pub use paths::{default_config_file, default_data_dir, default_logs_dir};
pub use types::{EvaluatorConfig, TemplateOverrides};
