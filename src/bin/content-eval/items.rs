use std::fs;
use std::path::Path;

use anyhow::Context;
use llm_evaluator::ContentType;
use serde::{Deserialize, Deserializer};

use crate::args::TypeFilter;

/// A question or answer waiting to be scored.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentItem {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub content_type: ContentType,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {other}"
        ))),
    }
}

impl ContentItem {
    /// Text sent to the model.
    pub fn text(&self) -> String {
        match self.content_type {
            ContentType::Question => format!(
                "标题: {}\n描述: {}",
                self.title,
                self.excerpt.as_deref().unwrap_or_default()
            ),
            ContentType::Answer => {
                format!("回答内容: {}", self.content.as_deref().unwrap_or_default())
            }
        }
    }

    /// Title used for article evaluation and log lines.
    pub fn display_title(&self) -> String {
        if !self.title.trim().is_empty() {
            return self.title.clone();
        }
        match self.content_type {
            ContentType::Question => format!("问题 #{}", self.id),
            ContentType::Answer => format!("回答 #{}", self.id),
        }
    }
}

pub fn load_items(path: &Path) -> anyhow::Result<Vec<ContentItem>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid items file {}", path.display()))
}

/// Up to `limit` items of one type, after skipping `offset` of that type.
fn of_type(
    items: &[ContentItem],
    content_type: ContentType,
    offset: usize,
    limit: usize,
) -> impl Iterator<Item = &ContentItem> {
    items
        .iter()
        .filter(move |item| item.content_type == content_type)
        .skip(offset)
        .take(limit)
}

/// Items to evaluate.
///
/// `offset` and `limit` apply to questions and answers separately; with
/// [`TypeFilter::All`] the questions come first and the combined list is cut
/// back to `limit`.
pub fn select(
    items: &[ContentItem],
    filter: TypeFilter,
    offset: usize,
    limit: usize,
) -> Vec<ContentItem> {
    let questions = || of_type(items, ContentType::Question, offset, limit);
    let answers = || of_type(items, ContentType::Answer, offset, limit);
    match filter {
        TypeFilter::Question => questions().cloned().collect(),
        TypeFilter::Answer => answers().cloned().collect(),
        TypeFilter::All => questions().chain(answers()).take(limit).cloned().collect(),
    }
}
