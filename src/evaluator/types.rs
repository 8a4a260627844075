use std::fmt;
use std::ops::Index;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::EvalError;

/// Result of scoring content along one dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleDimensionResult {
    /// Dimension label as it appears in the reply, e.g. `质量`.
    pub dimension: String,
    /// Overall score for the dimension.
    pub score: f64,
    /// Any other labeled numbers found in the reply.
    pub sub_scores: SubScores,
    /// Free-text justification.
    pub reason: String,
}

/// Labeled sub-scores in the order they first appear in a reply.
///
/// Inserting a label that is already present updates its value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubScores(Vec<(String, f64)>);

impl SubScores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, label: impl Into<String>, value: f64) {
        let label = label.into();
        match self.0.iter_mut().find(|(existing, _)| *existing == label) {
            Some(entry) => entry.1 = value,
            None => self.0.push((label, value)),
        }
    }

    pub fn get(&self, label: &str) -> Option<f64> {
        self.0
            .iter()
            .find(|(existing, _)| existing == label)
            .map(|(_, value)| *value)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(label, value)| (label.as_str(), *value))
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(label, _)| label.as_str())
    }
}

impl FromIterator<(String, f64)> for SubScores {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        let mut scores = SubScores::new();
        for (label, value) in iter {
            scores.insert(label, value);
        }
        scores
    }
}

impl Index<&str> for SubScores {
    type Output = f64;

    fn index(&self, label: &str) -> &f64 {
        match self.0.iter().find(|(existing, _)| existing == label) {
            Some((_, value)) => value,
            None => panic!("no sub-score labeled {label:?}"),
        }
    }
}

impl Serialize for SubScores {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

impl<'de> Deserialize<'de> for SubScores {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SubScoresVisitor;

        impl<'de> Visitor<'de> for SubScoresVisitor {
            type Value = SubScores;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of sub-score labels to numbers")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<SubScores, A::Error> {
                let mut scores = SubScores::new();
                while let Some((label, value)) = map.next_entry::<String, f64>()? {
                    scores.insert(label, value);
                }
                Ok(scores)
            }
        }

        deserializer.deserialize_map(SubScoresVisitor)
    }
}

/// Result of the combined quality / spread / operation evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComprehensiveResult {
    pub quality_score: f64,
    pub spread_score: f64,
    pub operation_score: f64,
    pub total_score: f64,
    pub details: String,
}

/// Result of the English-learning article evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnglishArticleResult {
    pub title: String,
    pub target_audience_score: f64,
    pub product_relevance_score: f64,
    pub learning_advice_score: f64,
    pub total_score: f64,
    pub grade: Grade,
    pub match_analysis: String,
    pub core_pain_points: Vec<String>,
}

/// Coarse article bucket, rendered with the `级` suffix (`S级`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "S级")]
    S,
    #[serde(rename = "A级")]
    A,
    #[serde(rename = "B级")]
    B,
    #[serde(rename = "C级")]
    C,
}

impl Grade {
    /// Bucket for a total score: `>= 9` S, `>= 7` A, `>= 5` B, otherwise C.
    pub fn from_total(total: f64) -> Self {
        if total >= 9.0 {
            Grade::S
        } else if total >= 7.0 {
            Grade::A
        } else if total >= 5.0 {
            Grade::B
        } else {
            Grade::C
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::S => "S级",
            Grade::A => "A级",
            Grade::B => "B级",
            Grade::C => "C级",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Grade {
    type Err = EvalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "S级" => Ok(Grade::S),
            "A级" => Ok(Grade::A),
            "B级" => Ok(Grade::B),
            "C级" => Ok(Grade::C),
            other => Err(EvalError::ResponseFormatError {
                message: "unknown grade".to_string(),
                raw_response: other.to_string(),
            }),
        }
    }
}
