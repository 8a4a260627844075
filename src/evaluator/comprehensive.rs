use super::extract::{extract_fields, FieldSpec};
use super::types::ComprehensiveResult;

const QUALITY: &str = "quality_score";
const SPREAD: &str = "spread_score";
const OPERATION: &str = "operation_score";
const TOTAL: &str = "total_score";
const DETAILS: &str = "details";

const FIELDS: &[FieldSpec] = &[
    FieldSpec::number(QUALITY, "内容质量评分"),
    FieldSpec::number(SPREAD, "传播潜力评分"),
    FieldSpec::number(OPERATION, "运营价值评分"),
    FieldSpec::number(TOTAL, "综合总评分"),
    FieldSpec::to_end(DETAILS, "评估详情"),
];

/// Parses a comprehensive reply. Each field is read on its own; a missing
/// score stays `0.0` and missing details stay empty.
pub fn parse_comprehensive(text: &str) -> ComprehensiveResult {
    let found = extract_fields(text, FIELDS);
    ComprehensiveResult {
        quality_score: found.number(QUALITY).unwrap_or(0.0),
        spread_score: found.number(SPREAD).unwrap_or(0.0),
        operation_score: found.number(OPERATION).unwrap_or(0.0),
        total_score: found.number(TOTAL).unwrap_or(0.0),
        details: found.text(DETAILS).unwrap_or_default().to_string(),
    }
}
