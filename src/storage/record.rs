use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::EvalError;
use crate::evaluator::{ComprehensiveResult, EnglishArticleResult, Grade};

/// Kind of content a score belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Question,
    Answer,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Question => "question",
            ContentType::Answer => "answer",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ContentType {
    type Err = EvalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "question" => Ok(ContentType::Question),
            "answer" => Ok(ContentType::Answer),
            other => Err(EvalError::Config(format!("unknown content type: {other}"))),
        }
    }
}

/// One stored score for a piece of content.
///
/// Records are keyed by `(content_id, content_type)`; fields that the
/// producing evaluation does not fill are `None` and omitted when serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub content_id: String,
    pub content_type: ContentType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spread_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_score: Option<f64>,
    pub total_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub english_article_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_audience_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_relevance_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub learning_advice_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<Grade>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_analysis: Option<String>,
    /// Pain points joined with `,`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub core_pain_points: Option<String>,
    pub evaluation_details: String,
    pub evaluation_time: DateTime<Utc>,
}

impl ScoreRecord {
    fn empty(content_id: &str, content_type: ContentType) -> Self {
        Self {
            content_id: content_id.to_string(),
            content_type,
            quality_score: None,
            spread_score: None,
            operation_score: None,
            total_score: 0.0,
            english_article_score: None,
            target_audience_score: None,
            product_relevance_score: None,
            learning_advice_score: None,
            grade: None,
            match_analysis: None,
            core_pain_points: None,
            evaluation_details: String::new(),
            evaluation_time: Utc::now(),
        }
    }

    pub fn from_comprehensive(
        content_id: &str,
        content_type: ContentType,
        result: &ComprehensiveResult,
    ) -> Self {
        Self {
            quality_score: Some(result.quality_score),
            spread_score: Some(result.spread_score),
            operation_score: Some(result.operation_score),
            total_score: result.total_score,
            evaluation_details: result.details.clone(),
            ..Self::empty(content_id, content_type)
        }
    }

    pub fn from_english_article(
        content_id: &str,
        content_type: ContentType,
        result: &EnglishArticleResult,
    ) -> Self {
        let pain_points = result.core_pain_points.join(",");
        Self {
            total_score: result.total_score,
            english_article_score: Some(result.total_score),
            target_audience_score: Some(result.target_audience_score),
            product_relevance_score: Some(result.product_relevance_score),
            learning_advice_score: Some(result.learning_advice_score),
            grade: Some(result.grade),
            match_analysis: Some(result.match_analysis.clone()),
            evaluation_details: format!(
                "分级: {}, 匹配分析: {}, 核心痛点: {}",
                result.grade, result.match_analysis, pain_points
            ),
            core_pain_points: Some(pain_points),
            ..Self::empty(content_id, content_type)
        }
    }

    /// Overrides the evaluation timestamp.
    pub fn at(mut self, time: DateTime<Utc>) -> Self {
        self.evaluation_time = time;
        self
    }

    /// Whether `other` targets the same stored row.
    pub fn same_key(&self, other: &ScoreRecord) -> bool {
        self.content_id == other.content_id && self.content_type == other.content_type
    }

    /// Flat field name to value mapping, without the absent fields.
    pub fn to_fields(&self) -> Result<Map<String, Value>, EvalError> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            other => Err(EvalError::JsonError(format!(
                "score record serialized to {other}, expected an object"
            ))),
        }
    }
}
