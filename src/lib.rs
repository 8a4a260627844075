//! LLM-driven scoring of user-generated content.
//!
//! A [`ContentEvaluator`] sends rubric prompts to an OpenAI-compatible chat
//! model, then parses labeled scores out of the free-form reply. Failed calls
//! never surface as errors: the evaluator substitutes a neutral record that
//! callers can recognize by its marker text.
//!
//! ```no_run
//! use llm_evaluator::{ContentEvaluator, EvaluatorConfig};
//!
//! # async fn run() -> Result<(), llm_evaluator::EvalError> {
//! let evaluator = ContentEvaluator::new(EvaluatorConfig::from_env()?)?;
//! let result = evaluator.evaluate_comprehensive("标题: 如何坚持学英语").await;
//! println!("total: {}", result.total_score);
//! # Ok(())
//! # }
//! ```

pub mod backends;
pub mod builder;
pub mod chat;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod storage;

pub use builder::{LLMBackend, LLMBuilder};
pub use chat::{ChatMessage, ChatProvider, ChatResponse};
pub use config::EvaluatorConfig;
pub use error::EvalError;
pub use evaluator::{
    ComprehensiveResult, ContentEvaluator, Dimension, EnglishArticleResult, Grade,
    SingleDimensionResult,
};
pub use storage::{ContentType, JsonLinesSink, ScoreRecord, ScoreSink};
