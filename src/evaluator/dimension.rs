use super::extract::{extract_all_labeled_numbers, extract_number, extract_text_to_end};
use super::types::{SingleDimensionResult, SubScores};

/// Label of the free-text justification in single-dimension replies.
pub const REASON_LABEL: &str = "评估理由";

/// The three independently scored axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Quality,
    SpreadPotential,
    OperationValue,
}

impl Dimension {
    pub const ALL: [Dimension; 3] = [
        Dimension::Quality,
        Dimension::SpreadPotential,
        Dimension::OperationValue,
    ];

    /// Name used inside reply labels, e.g. `总体质量评分`.
    pub fn label(&self) -> &'static str {
        match self {
            Dimension::Quality => "质量",
            Dimension::SpreadPotential => "传播潜力",
            Dimension::OperationValue => "运营价值",
        }
    }

    /// Short machine key.
    pub fn key(&self) -> &'static str {
        match self {
            Dimension::Quality => "quality",
            Dimension::SpreadPotential => "spread",
            Dimension::OperationValue => "operation",
        }
    }

    pub fn overall_label(&self) -> String {
        overall_label(self.label())
    }

    pub fn parse(&self, text: &str) -> SingleDimensionResult {
        parse_single_dimension(text, self.label())
    }
}

fn overall_label(dimension_name: &str) -> String {
    format!("总体{dimension_name}评分")
}

/// Parses a single-dimension reply.
///
/// Overall score comes from `总体{dimension_name}评分`, the reason from
/// `评估理由` to the end of the reply, and every other `label：number` pair
/// becomes a sub-score, in reply order (a repeated label keeps its first
/// position and last value). Missing fields stay at `0.0` / empty.
pub fn parse_single_dimension(text: &str, dimension_name: &str) -> SingleDimensionResult {
    let overall = overall_label(dimension_name);

    let score = extract_number(text, &overall).unwrap_or(0.0);
    let reason = extract_text_to_end(text, REASON_LABEL).unwrap_or_default();

    let reserved = [overall.as_str(), REASON_LABEL];
    let sub_scores: SubScores = extract_all_labeled_numbers(text, &reserved)
        .into_iter()
        .collect();

    SingleDimensionResult {
        dimension: dimension_name.to_string(),
        score,
        sub_scores,
        reason,
    }
}
