use std::path::PathBuf;

use crate::error::EvalError;

const APP_DIR: &str = "llm-evaluator";

fn home() -> Result<PathBuf, EvalError> {
    dirs::home_dir().ok_or_else(|| EvalError::Config("missing home directory".to_string()))
}

/// `~/.config/llm-evaluator/config.toml`
pub fn default_config_file() -> Result<PathBuf, EvalError> {
    Ok(home()?.join(".config").join(APP_DIR).join("config.toml"))
}

/// `~/.local/share/llm-evaluator`
pub fn default_data_dir() -> Result<PathBuf, EvalError> {
    Ok(home()?.join(".local").join("share").join(APP_DIR))
}

pub fn default_logs_dir() -> Result<PathBuf, EvalError> {
    Ok(default_data_dir()?.join("logs"))
}
