//! Labeled-field extraction from free-form model replies.
//!
//! Replies are expected to contain lines such as `总体质量评分：7.5`. Labels are
//! matched literally and case-sensitively, followed by a full-width colon.
//! The first occurrence of a label wins. A label that is not found yields
//! `None`, which callers resolve to a per-field default.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;

/// Full-width colon separating a label from its value.
pub const LABEL_SEPARATOR: char = '：';

const NUMBER_PATTERN: &str = r"[0-9０-９]+\.?[0-9０-９]*";

/// How the value following a label is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Digits with at most one decimal point. Full-width digits are accepted.
    Number,
    /// The remainder of the label's line, or the next non-blank line when the
    /// label ends its line.
    Line,
    /// Everything after the label up to the end of the reply, across newlines.
    ToEnd,
}

/// One row of an extraction table.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn number(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Number,
        }
    }

    pub const fn line(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Line,
        }
    }

    pub const fn to_end(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::ToEnd,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

/// Values found for an extraction table, keyed by field name.
#[derive(Debug, Default)]
pub struct Extracted {
    values: HashMap<&'static str, FieldValue>,
}

impl Extracted {
    pub fn number(&self, name: &str) -> Option<f64> {
        match self.values.get(name) {
            Some(FieldValue::Number(n)) => Some(*n),
            _ => None,
        }
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(FieldValue::Text(t)) => Some(t.as_str()),
            _ => None,
        }
    }

}

/// Runs every row of `specs` against `text`. Rows are independent; a miss in
/// one never affects another.
pub fn extract_fields(text: &str, specs: &[FieldSpec]) -> Extracted {
    let mut out = Extracted::default();
    for spec in specs {
        let value = match spec.kind {
            FieldKind::Number => extract_number(text, spec.label).map(FieldValue::Number),
            FieldKind::Line => extract_line(text, spec.label).map(FieldValue::Text),
            FieldKind::ToEnd => extract_text_to_end(text, spec.label).map(FieldValue::Text),
        };
        if let Some(value) = value {
            out.values.insert(spec.name, value);
        }
    }
    out
}

fn label_regex(label: &str, value: &str) -> Option<Regex> {
    let pattern = format!(
        "{}{}\\s*{}",
        regex::escape(label),
        LABEL_SEPARATOR,
        value
    );
    match Regex::new(&pattern) {
        Ok(re) => Some(re),
        Err(err) => {
            log::warn!("cannot build pattern for label {label:?}: {err}");
            None
        }
    }
}

/// Parses a matched number, folding full-width digits to ASCII.
fn parse_number(raw: &str) -> Option<f64> {
    let ascii: String = raw
        .chars()
        .map(|c| match c {
            '０'..='９' => char::from_u32(c as u32 - '０' as u32 + '0' as u32).unwrap_or(c),
            _ => c,
        })
        .collect();
    ascii.parse().ok()
}

/// First number following `label：`.
pub fn extract_number(text: &str, label: &str) -> Option<f64> {
    let re = label_regex(label, &format!("({NUMBER_PATTERN})"))?;
    let caps = re.captures(text)?;
    parse_number(caps.get(1)?.as_str())
}

/// Everything after the first `label：` to the end of `text`, trimmed.
pub fn extract_text_to_end(text: &str, label: &str) -> Option<String> {
    let re = label_regex(label, r"(?s)(.+)$")?;
    let caps = re.captures(text)?;
    Some(caps.get(1)?.as_str().trim().to_string())
}

/// Rest of the line holding the first `label：`, trimmed.
///
/// When nothing follows the label on its line, the next non-blank line is
/// used instead, unless that line holds a label of its own. A label with no
/// value yields `Some("")`.
pub fn extract_line(text: &str, label: &str) -> Option<String> {
    let needle = format!("{label}{LABEL_SEPARATOR}");
    let start = text.find(&needle)? + needle.len();
    let mut lines = text[start..].lines().map(str::trim);
    let same_line = lines.next().unwrap_or_default();
    if !same_line.is_empty() {
        return Some(same_line.to_string());
    }
    let next = lines
        .find(|line| !line.is_empty())
        .filter(|line| !line.contains(LABEL_SEPARATOR))
        .unwrap_or_default();
    Some(next.to_string())
}

fn any_label_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!("(.+?){LABEL_SEPARATOR}\\s*({NUMBER_PATTERN})"))
            .expect("labeled number pattern is valid")
    })
}

/// Every `label：number` pair in `text`, in order of appearance, skipping
/// labels listed in `reserved`.
///
/// Labels are taken verbatim from the start of the match, so list markers or
/// leading spaces stay part of the label. Repeated labels are all returned.
pub fn extract_all_labeled_numbers(text: &str, reserved: &[&str]) -> Vec<(String, f64)> {
    any_label_regex()
        .captures_iter(text)
        .filter_map(|caps| {
            let label = caps.get(1)?.as_str();
            if reserved.contains(&label) {
                return None;
            }
            let value = parse_number(caps.get(2)?.as_str())?;
            Some((label.to_string(), value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("总体质量评分：7.5", 7.5)]
    #[case("总体质量评分： 8", 8.0)]
    #[case("总体质量评分：9.", 9.0)]
    #[case("前言\n总体质量评分：6分，理由见下", 6.0)]
    #[case("总体质量评分：９", 9.0)]
    #[case("总体质量评分：８.５", 8.5)]
    fn numbers_follow_label(#[case] text: &str, #[case] expected: f64) {
        assert_eq!(extract_number(text, "总体质量评分"), Some(expected));
    }

    #[test]
    fn first_match_wins() {
        let text = "总分：6.5\n复核后总分：9\n总分：8";
        assert_eq!(extract_number(text, "总分"), Some(6.5));
    }

    #[test]
    fn missing_label_is_distinct_from_zero() {
        assert_eq!(extract_number("总分：0", "总分"), Some(0.0));
        assert_eq!(extract_number("没有评分", "总分"), None);
        assert_eq!(extract_number("总分：暂无", "总分"), None);
    }

    #[test]
    fn ascii_colon_does_not_match() {
        assert_eq!(extract_number("总分:7", "总分"), None);
    }

    #[test]
    fn labels_are_literal() {
        assert_eq!(extract_number("A.B：3", "A.B"), Some(3.0));
        assert_eq!(extract_number("AxB：3", "A.B"), None);
        assert_eq!(
            extract_line("核心相关点/不相关点分析：相关", "核心相关点/不相关点分析").as_deref(),
            Some("相关")
        );
    }

    #[test]
    fn text_to_end_spans_lines() {
        let text = "总体质量评分：7\n评估理由：第一行\n第二行\n\n";
        assert_eq!(
            extract_text_to_end(text, "评估理由").as_deref(),
            Some("第一行\n第二行")
        );
    }

    #[test]
    fn line_stops_at_newline() {
        let text = "文章标题：学英语\r\n总分：8";
        assert_eq!(extract_line(text, "文章标题").as_deref(), Some("学英语"));
        assert_eq!(extract_line("文章标题：", "文章标题").as_deref(), Some(""));
    }

    #[rstest]
    #[case("核心用户痛点：\n时间不足、方法错误", "时间不足、方法错误")]
    #[case("核心用户痛点：  \r\n\n  没时间\n总分：6", "没时间")]
    #[case("核心用户痛点：\n总分：6", "")]
    #[case("核心用户痛点：\n\n", "")]
    fn line_value_may_start_on_next_line(#[case] text: &str, #[case] expected: &str) {
        assert_eq!(extract_line(text, "核心用户痛点").as_deref(), Some(expected));
    }

    #[test]
    fn labeled_numbers_skip_reserved_and_keep_order() {
        let text = "总体质量评分：7.5\n内容深度：8\n表达清晰度：6.5\n评估理由：整体不错";
        let pairs = extract_all_labeled_numbers(text, &["总体质量评分", "评估理由"]);
        assert_eq!(
            pairs,
            vec![("内容深度".to_string(), 8.0), ("表达清晰度".to_string(), 6.5)]
        );
    }

    #[test]
    fn labeled_numbers_accept_full_width_digits() {
        let pairs = extract_all_labeled_numbers("原创性：７\n互动性：6.5", &[]);
        assert_eq!(
            pairs,
            vec![("原创性".to_string(), 7.0), ("互动性".to_string(), 6.5)]
        );
    }

    #[test]
    fn labeled_numbers_keep_list_markers() {
        let pairs = extract_all_labeled_numbers("1. 原创性：9", &[]);
        assert_eq!(pairs, vec![("1. 原创性".to_string(), 9.0)]);
    }

    #[test]
    fn table_rows_are_independent() {
        const TABLE: &[FieldSpec] = &[
            FieldSpec::number("score", "总分"),
            FieldSpec::line("title", "文章标题"),
            FieldSpec::to_end("details", "评估详情"),
        ];
        let found = extract_fields("文章标题：标题\n评估详情：很好", TABLE);
        assert_eq!(found.number("score"), None);
        assert_eq!(found.text("title"), Some("标题"));
        assert_eq!(found.text("details"), Some("很好"));
        assert_eq!(found.number("title"), None);
    }
}
