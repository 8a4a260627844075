//! Neutral records substituted when a whole evaluation call fails.
//!
//! Failures score at the midpoint so they do not drag rankings toward zero;
//! the marker strings let consumers tell a substituted record apart.

use super::types::{
    ComprehensiveResult, EnglishArticleResult, Grade, SingleDimensionResult, SubScores,
};

pub const FALLBACK_SCORE: f64 = 5.0;
pub const FALLBACK_REASON: &str = "评估失败，使用默认评分";
pub const COMPREHENSIVE_FALLBACK_DETAILS: &str = "综合评估失败，使用默认评分";
pub const FALLBACK_GRADE: Grade = Grade::B;

impl SingleDimensionResult {
    pub fn fallback(dimension: &str) -> Self {
        Self {
            dimension: dimension.to_string(),
            score: FALLBACK_SCORE,
            sub_scores: SubScores::new(),
            reason: FALLBACK_REASON.to_string(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.reason == FALLBACK_REASON
    }
}

impl ComprehensiveResult {
    pub fn fallback() -> Self {
        Self {
            quality_score: FALLBACK_SCORE,
            spread_score: FALLBACK_SCORE,
            operation_score: FALLBACK_SCORE,
            total_score: FALLBACK_SCORE,
            details: COMPREHENSIVE_FALLBACK_DETAILS.to_string(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.details == COMPREHENSIVE_FALLBACK_DETAILS
    }
}

impl EnglishArticleResult {
    pub fn fallback(title: &str) -> Self {
        Self {
            title: title.to_string(),
            target_audience_score: FALLBACK_SCORE,
            product_relevance_score: FALLBACK_SCORE,
            learning_advice_score: FALLBACK_SCORE,
            total_score: FALLBACK_SCORE,
            grade: FALLBACK_GRADE,
            match_analysis: FALLBACK_REASON.to_string(),
            core_pain_points: Vec::new(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.match_analysis == FALLBACK_REASON
    }
}
