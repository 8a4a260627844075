//! Rubric-based scoring of content through an LLM.

pub mod extract;

#[path = "evaluator/types.rs"]
mod types;

#[path = "evaluator/dimension.rs"]
mod dimension;

#[path = "evaluator/comprehensive.rs"]
mod comprehensive;

#[path = "evaluator/article.rs"]
mod article;

#[path = "evaluator/fallback.rs"]
mod fallback;

#[path = "evaluator/prompt.rs"]
pub mod prompt;

#[path = "evaluator/content.rs"]
mod content;

pub use article::{
    parse_english_article, split_pain_points, weighted_total, DEFAULT_LEARNING_ADVICE_SCORE,
    MATCH_ANALYSIS_LABELS,
};
pub use comprehensive::parse_comprehensive;
pub use content::ContentEvaluator;
pub use dimension::{parse_single_dimension, Dimension, REASON_LABEL};
pub use fallback::{
    COMPREHENSIVE_FALLBACK_DETAILS, FALLBACK_GRADE, FALLBACK_REASON, FALLBACK_SCORE,
};
pub use prompt::{PromptSet, PromptTemplate};
pub use types::{
    ComprehensiveResult, EnglishArticleResult, Grade, SingleDimensionResult, SubScores,
};
