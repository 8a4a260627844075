use thiserror::Error;

/// Error types that can occur while configuring or running content evaluations.
#[derive(Debug, Error)]
pub enum EvalError {
    /// Missing or invalid configuration detected at construction time
    #[error("Configuration error: {0}")]
    Config(String),
    /// HTTP request/response errors
    #[error("HTTP error: {0}")]
    HttpError(String),
    /// Authentication and authorization errors
    #[error("Auth error: {0}")]
    AuthError(String),
    /// Errors returned by the LLM provider
    #[error("Provider error: {0}")]
    ProviderError(String),
    /// API response parsing or format error
    #[error("Response format error: {message}. Raw response: {raw_response}")]
    ResponseFormatError {
        message: String,
        raw_response: String,
    },
    /// JSON serialization/deserialization errors
    #[error("JSON parse error: {0}")]
    JsonError(String),
    /// Prompt template could not be rendered
    #[error("Template error: {0}")]
    Template(String),
    /// Score sink failures
    #[error("Storage error: {0}")]
    Storage(String),
}

impl EvalError {
    /// Whether this error belongs to construction rather than to a single call.
    pub fn is_config(&self) -> bool {
        matches!(self, EvalError::Config(_))
    }
}

/// Converts reqwest HTTP errors into EvalErrors
impl From<reqwest::Error> for EvalError {
    fn from(err: reqwest::Error) -> Self {
        EvalError::HttpError(err.to_string())
    }
}

impl From<serde_json::Error> for EvalError {
    fn from(err: serde_json::Error) -> Self {
        EvalError::JsonError(format!(
            "{} at line {} column {}",
            err,
            err.line(),
            err.column()
        ))
    }
}

impl From<std::io::Error> for EvalError {
    fn from(err: std::io::Error) -> Self {
        EvalError::Storage(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_errors_carry_position() {
        let err: EvalError = serde_json::from_str::<serde_json::Value>("{\"a\":")
            .unwrap_err()
            .into();
        let rendered = err.to_string();
        assert!(rendered.starts_with("JSON parse error:"));
        assert!(rendered.contains("line 1"));
    }

    #[test]
    fn only_config_errors_are_config() {
        assert!(EvalError::Config("x".into()).is_config());
        assert!(!EvalError::Template("x".into()).is_config());
    }
}
