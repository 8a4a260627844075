use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::config::TemplateOverrides;
use crate::error::EvalError;

pub const QUALITY_EVALUATION_PROMPT: &str = "你是一名资深内容运营专家。请评估以下内容的质量。

内容：
{content}

请从内容深度、信息准确性、表达清晰度、原创性四个方面分别打分（0-10分），并严格按以下格式输出：
内容深度：X
信息准确性：X
表达清晰度：X
原创性：X
总体质量评分：X
评估理由：简要说明理由";

pub const SPREAD_POTENTIAL_PROMPT: &str = "你是一名资深内容运营专家。请评估以下内容的传播潜力。

内容：
{content}

请从话题热度、情感共鸣、互动性、可分享性四个方面分别打分（0-10分），并严格按以下格式输出：
话题热度：X
情感共鸣：X
互动性：X
可分享性：X
总体传播潜力评分：X
评估理由：简要说明理由";

pub const OPERATION_VALUE_PROMPT: &str = "你是一名资深内容运营专家。请评估以下内容的运营价值。

内容：
{content}

请从用户价值、品牌契合度、转化潜力、可复用性四个方面分别打分（0-10分），并严格按以下格式输出：
用户价值：X
品牌契合度：X
转化潜力：X
可复用性：X
总体运营价值评分：X
评估理由：简要说明理由";

pub const COMPREHENSIVE_EVALUATION_PROMPT: &str = "你是一名资深内容运营专家。请对以下内容进行综合评估。

内容：
{content}

请分别给出内容质量、传播潜力、运营价值的评分（0-10分）以及综合总评分，并严格按以下格式输出：
内容质量评分：X
传播潜力评分：X
运营价值评分：X
综合总评分：X
评估详情：简要说明各维度的评估依据";

pub const ENGLISH_ARTICLE_PROMPT: &str = "你是一名英语学习产品的内容运营专家。请评估以下文章与英语学习产品的匹配程度。

文章标题：{title}
文章内容：
{content}

评分维度（0-10分）：目标人群相关性（权重50%）、产品定位相关性（权重30%）、学习建议与经历分享（权重20%）。
分级标准：总分9分及以上为S级，7分及以上为A级，5分及以上为B级，其余为C级。

请严格按以下格式输出：
文章标题：原文标题
目标人群相关性：X
产品定位相关性：X
学习建议与经历分享：X
总分：X
分级：S级/A级/B级/C级
核心相关点/不相关点分析：一句话分析
核心用户痛点：痛点1、痛点2";

/// A prompt with `{name}` placeholders.
///
/// Braces around anything that is not a declared variable are left alone, so
/// templates may contain literal `{...}` text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    template: String,
    input_variables: Vec<String>,
}

fn placeholder_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("placeholder pattern is valid")
    })
}

impl PromptTemplate {
    /// Creates a template, checking that every variable has a placeholder.
    pub fn new(template: impl Into<String>, input_variables: &[&str]) -> Result<Self, EvalError> {
        let template = template.into();
        for var in input_variables {
            if !template.contains(&format!("{{{var}}}")) {
                return Err(EvalError::Config(format!(
                    "prompt template is missing placeholder {{{var}}}"
                )));
            }
        }
        Ok(Self {
            template,
            input_variables: input_variables.iter().map(|v| v.to_string()).collect(),
        })
    }

    pub fn input_variables(&self) -> &[String] {
        &self.input_variables
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Substitutes every declared variable in one pass; substituted values are
    /// never rescanned.
    pub fn format(&self, values: &[(&str, &str)]) -> Result<String, EvalError> {
        let lookup = |name: &str| values.iter().find(|(k, _)| *k == name).map(|(_, v)| *v);

        if let Some(missing) = self.input_variables.iter().find(|v| lookup(v.as_str()).is_none()) {
            return Err(EvalError::Template(format!(
                "missing value for variable '{missing}'"
            )));
        }

        let rendered = placeholder_regex().replace_all(&self.template, |caps: &Captures| {
            let name = &caps[1];
            match lookup(name) {
                Some(value) if self.input_variables.iter().any(|v| v == name) => value.to_string(),
                _ => caps[0].to_string(),
            }
        });
        Ok(rendered.into_owned())
    }
}

/// The five templates the evaluator uses.
#[derive(Debug, Clone)]
pub struct PromptSet {
    pub quality: PromptTemplate,
    pub spread: PromptTemplate,
    pub operation: PromptTemplate,
    pub comprehensive: PromptTemplate,
    pub english_article: PromptTemplate,
}

const CONTENT: &[&str] = &["content"];
const TITLE_AND_CONTENT: &[&str] = &["title", "content"];

impl PromptSet {
    /// Built-in templates.
    pub fn defaults() -> Result<Self, EvalError> {
        Self::with_overrides(&TemplateOverrides::default())
    }

    /// Built-in templates with any configured replacements applied.
    pub fn with_overrides(overrides: &TemplateOverrides) -> Result<Self, EvalError> {
        let pick = |custom: &Option<String>, builtin: &str, vars: &[&str]| {
            PromptTemplate::new(custom.as_deref().unwrap_or(builtin), vars)
        };
        Ok(Self {
            quality: pick(&overrides.quality, QUALITY_EVALUATION_PROMPT, CONTENT)?,
            spread: pick(&overrides.spread, SPREAD_POTENTIAL_PROMPT, CONTENT)?,
            operation: pick(&overrides.operation, OPERATION_VALUE_PROMPT, CONTENT)?,
            comprehensive: pick(
                &overrides.comprehensive,
                COMPREHENSIVE_EVALUATION_PROMPT,
                CONTENT,
            )?,
            english_article: pick(
                &overrides.english_article,
                ENGLISH_ARTICLE_PROMPT,
                TITLE_AND_CONTENT,
            )?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_declared_variables() {
        let tmpl = PromptTemplate::new("标题：{title}\n内容：{content}", &["title", "content"]).unwrap();
        let out = tmpl
            .format(&[("content", "正文"), ("title", "学英语")])
            .unwrap();
        assert_eq!(out, "标题：学英语\n内容：正文");
    }

    #[test]
    fn substituted_values_are_not_rescanned() {
        let tmpl = PromptTemplate::new("{title} / {content}", &["title", "content"]).unwrap();
        let out = tmpl
            .format(&[("title", "{content}"), ("content", "x")])
            .unwrap();
        assert_eq!(out, "{content} / x");
    }

    #[test]
    fn undeclared_braces_are_kept() {
        let tmpl = PromptTemplate::new("输出 {score} 与 {content}", &["content"]).unwrap();
        let out = tmpl.format(&[("content", "c"), ("score", "9")]).unwrap();
        assert_eq!(out, "输出 {score} 与 c");
    }

    #[test]
    fn missing_value_is_template_error() {
        let tmpl = PromptTemplate::new("{title}{content}", &["title", "content"]).unwrap();
        let err = tmpl.format(&[("content", "c")]).unwrap_err();
        assert!(matches!(err, EvalError::Template(msg) if msg.contains("title")));
    }

    #[test]
    fn template_without_placeholder_is_rejected() {
        let err = PromptTemplate::new("没有占位符", &["content"]).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn default_set_declares_expected_variables() {
        let set = PromptSet::defaults().unwrap();
        assert_eq!(set.quality.input_variables(), ["content"]);
        assert_eq!(set.english_article.input_variables(), ["title", "content"]);
        assert!(set.quality.template().contains("总体质量评分："));
        assert!(set.spread.template().contains("总体传播潜力评分："));
        assert!(set.operation.template().contains("总体运营价值评分："));
        assert!(set.comprehensive.template().contains("综合总评分："));
    }

    #[test]
    fn overrides_replace_single_templates() {
        let overrides = TemplateOverrides {
            spread: Some("传播：{content}".to_string()),
            ..TemplateOverrides::default()
        };
        let set = PromptSet::with_overrides(&overrides).unwrap();
        assert_eq!(set.spread.template(), "传播：{content}");
        assert_eq!(set.quality.template(), QUALITY_EVALUATION_PROMPT);
    }

    #[test]
    fn invalid_override_fails_construction() {
        let overrides = TemplateOverrides {
            english_article: Some("只有{content}".to_string()),
            ..TemplateOverrides::default()
        };
        assert!(PromptSet::with_overrides(&overrides).unwrap_err().is_config());
    }
}
