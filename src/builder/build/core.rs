use crate::{chat::ChatProvider, error::EvalError};

use super::super::llm_builder::LLMBuilder;
use super::super::state::BuilderState;
use super::{backends, helpers};

impl LLMBuilder {
    /// Builds the configured provider, failing closed on missing settings.
    pub fn build(self) -> Result<Box<dyn ChatProvider>, EvalError> {
        self.state.build()
    }
}

impl BuilderState {
    pub(super) fn build(mut self) -> Result<Box<dyn ChatProvider>, EvalError> {
        helpers::log_builder_state(&self);
        let backend = self
            .backend
            .take()
            .ok_or_else(|| EvalError::Config("No backend specified".to_string()))?;

        backends::build_backend(&mut self, backend)
    }
}
