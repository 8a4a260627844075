use crate::{
    chat::{ChatProvider, ChatResponse},
    config::EvaluatorConfig,
    error::EvalError,
};

use super::article::parse_english_article;
use super::comprehensive::parse_comprehensive;
use super::dimension::Dimension;
use super::prompt::{PromptSet, PromptTemplate};
use super::types::{ComprehensiveResult, EnglishArticleResult, SingleDimensionResult};

/// Scores content with an LLM along several rubrics.
///
/// Every evaluation makes exactly one model call. If rendering the prompt or
/// the call itself fails, the operation logs the error and returns the neutral
/// fallback record for that operation instead; evaluations never return
/// errors. Parsing a reply cannot fail: labels that are missing from it simply
/// keep their defaults.
///
/// The evaluator holds no mutable state and can be shared across tasks.
pub struct ContentEvaluator {
    llm: Box<dyn ChatProvider>,
    prompts: PromptSet,
}

impl ContentEvaluator {
    /// Builds the model client and templates described by `config`.
    ///
    /// Fails with [`EvalError::Config`] when required credentials or settings
    /// are absent.
    pub fn new(mut config: EvaluatorConfig) -> Result<Self, EvalError> {
        let prompts = PromptSet::with_overrides(&config.templates)?;
        log::info!(
            "Using {} model: {}",
            config.llm_type.display_name(),
            config.active_model().unwrap_or("<unset>")
        );
        let llm = config.to_builder().build()?;
        Ok(Self { llm, prompts })
    }

    /// Uses an already constructed provider with the built-in templates.
    pub fn with_provider(llm: Box<dyn ChatProvider>) -> Result<Self, EvalError> {
        Ok(Self {
            llm,
            prompts: PromptSet::defaults()?,
        })
    }

    /// Replaces the prompt templates.
    pub fn with_prompts(mut self, prompts: PromptSet) -> Self {
        self.prompts = prompts;
        self
    }

    pub fn prompts(&self) -> &PromptSet {
        &self.prompts
    }

    /// Evaluates content quality.
    pub async fn evaluate_quality(&self, content: &str) -> SingleDimensionResult {
        self.evaluate_dimension(Dimension::Quality, content).await
    }

    /// Evaluates how likely content is to spread.
    pub async fn evaluate_spread_potential(&self, content: &str) -> SingleDimensionResult {
        self.evaluate_dimension(Dimension::SpreadPotential, content)
            .await
    }

    /// Evaluates the operational value of content.
    pub async fn evaluate_operation_value(&self, content: &str) -> SingleDimensionResult {
        self.evaluate_dimension(Dimension::OperationValue, content)
            .await
    }

    pub async fn evaluate_dimension(
        &self,
        dimension: Dimension,
        content: &str,
    ) -> SingleDimensionResult {
        log::info!("Starting {} evaluation", dimension.key());
        let template = self.template_for(dimension);
        match self.complete(template, &[("content", content)]).await {
            Ok(reply) => {
                let result = dimension.parse(&reply);
                log::info!(
                    "{} evaluation finished: score={}",
                    dimension.key(),
                    result.score
                );
                result
            }
            Err(err) => {
                log::error!("{} evaluation failed: {err}", dimension.key());
                SingleDimensionResult::fallback(dimension.label())
            }
        }
    }

    /// Scores quality, spread and operation value in one call.
    pub async fn evaluate_comprehensive(&self, content: &str) -> ComprehensiveResult {
        log::info!("Starting comprehensive evaluation");
        match self
            .complete(&self.prompts.comprehensive, &[("content", content)])
            .await
        {
            Ok(reply) => {
                let result = parse_comprehensive(&reply);
                log::info!(
                    "comprehensive evaluation finished: total={}",
                    result.total_score
                );
                result
            }
            Err(err) => {
                log::error!("comprehensive evaluation failed: {err}");
                ComprehensiveResult::fallback()
            }
        }
    }

    /// Scores how well an article fits an English-learning product.
    ///
    /// When the reply does not restate the title, the given `title` is used.
    pub async fn evaluate_english_article(
        &self,
        title: &str,
        content: &str,
    ) -> EnglishArticleResult {
        log::info!("Starting English article evaluation");
        match self
            .complete(
                &self.prompts.english_article,
                &[("title", title), ("content", content)],
            )
            .await
        {
            Ok(reply) => {
                let mut result = parse_english_article(&reply);
                if result.title.is_empty() {
                    result.title = title.to_string();
                }
                log::info!(
                    "English article evaluation finished: total={} grade={}",
                    result.total_score,
                    result.grade
                );
                result
            }
            Err(err) => {
                log::error!("English article evaluation failed: {err}");
                EnglishArticleResult::fallback(title)
            }
        }
    }

    fn template_for(&self, dimension: Dimension) -> &PromptTemplate {
        match dimension {
            Dimension::Quality => &self.prompts.quality,
            Dimension::SpreadPotential => &self.prompts.spread,
            Dimension::OperationValue => &self.prompts.operation,
        }
    }

    async fn complete(
        &self,
        template: &PromptTemplate,
        values: &[(&str, &str)],
    ) -> Result<String, EvalError> {
        let prompt = template.format(values)?;
        let reply = self.llm.invoke(&prompt).await?;
        Ok(reply_text(reply.as_ref()))
    }
}

/// Message text when the reply carries one, otherwise its rendering.
fn reply_text(reply: &dyn ChatResponse) -> String {
    reply.text().unwrap_or_else(|| reply.to_string())
}
