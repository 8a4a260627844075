//! End-to-end evaluation runs against scripted and HTTP-mocked models.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use llm_evaluator::evaluator::{parse_single_dimension, FALLBACK_REASON};
use llm_evaluator::{
    ChatMessage, ChatProvider, ChatResponse, ComprehensiveResult, ContentEvaluator, ContentType,
    EnglishArticleResult, EvalError, EvaluatorConfig, Grade, LLMBackend, ScoreRecord, ScoreSink,
    SingleDimensionResult,
};
use secrecy::SecretString;

/// Returns replies in order, erroring once the script runs out.
struct ScriptedProvider {
    replies: Vec<Result<String, EvalError>>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedProvider {
    fn new(replies: Vec<Result<&str, EvalError>>) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let provider = Self {
            replies: replies
                .into_iter()
                .map(|r| r.map(str::to_string))
                .collect(),
            calls: Arc::clone(&calls),
        };
        (provider, calls)
    }
}

#[async_trait]
impl ChatProvider for ScriptedProvider {
    async fn chat(&self, _messages: &[ChatMessage]) -> Result<Box<dyn ChatResponse>, EvalError> {
        let i = self.calls.fetch_add(1, Ordering::SeqCst);
        match self.replies.get(i) {
            Some(Ok(text)) => Ok(Box::new(text.clone())),
            Some(Err(err)) => Err(EvalError::ProviderError(err.to_string())),
            None => Err(EvalError::ProviderError("script exhausted".to_string())),
        }
    }
}

fn evaluator(replies: Vec<Result<&str, EvalError>>) -> (ContentEvaluator, Arc<AtomicUsize>) {
    let (provider, calls) = ScriptedProvider::new(replies);
    (
        ContentEvaluator::with_provider(Box::new(provider)).unwrap(),
        calls,
    )
}

#[tokio::test]
async fn quality_score_and_reason_survive_surrounding_prose() {
    let reply = "好的，以下是我的评估。\n内容深度：8\n总体质量评分：7.5\n评估理由：这是理由";
    let (eval, _) = evaluator(vec![Ok(reply)]);
    let result = eval.evaluate_quality("内容").await;
    assert_eq!(result.score, 7.5);
    assert_eq!(result.reason, "这是理由");
    assert_eq!(result, parse_single_dimension(reply, "质量"));
}

#[tokio::test]
async fn unlabeled_reply_is_not_a_failure() {
    let (eval, _) = evaluator(vec![Ok("I cannot evaluate this.")]);
    let result = eval.evaluate_operation_value("内容").await;
    assert_eq!(result.score, 0.0);
    assert!(result.sub_scores.is_empty());
    assert_eq!(result.reason, "");
    assert!(!result.is_fallback());
}

#[tokio::test]
async fn every_operation_degrades_to_its_default_record() {
    let failures = (0..5)
        .map(|_| Err(EvalError::HttpError("timed out".to_string())))
        .collect();
    let (eval, calls) = evaluator(failures);

    assert_eq!(
        eval.evaluate_quality("c").await,
        SingleDimensionResult::fallback("质量")
    );
    assert_eq!(
        eval.evaluate_spread_potential("c").await,
        SingleDimensionResult::fallback("传播潜力")
    );
    let operation = eval.evaluate_operation_value("c").await;
    assert_eq!(operation.score, 5.0);
    assert_eq!(operation.reason, FALLBACK_REASON);
    assert_eq!(
        eval.evaluate_comprehensive("c").await,
        ComprehensiveResult::fallback()
    );
    let article = eval.evaluate_english_article("标题", "c").await;
    assert_eq!(article, EnglishArticleResult::fallback("标题"));
    assert_eq!(article.grade, Grade::B);

    assert_eq!(calls.load(Ordering::SeqCst), 5);
}

#[tokio::test]
async fn last_priority_match_analysis_label_is_read() {
    let (eval, _) = evaluator(vec![Ok("目标人群相关性：7\n核心匹配点分析：点A")]);
    let result = eval.evaluate_english_article("标题", "c").await;
    assert_eq!(result.match_analysis, "点A");
    assert_eq!(result.title, "标题");
}

#[tokio::test]
async fn article_result_flows_into_score_record() {
    let reply = "文章标题：零基础学英语\n目标人群相关性：9\n产品定位相关性：8\n学习建议与经历分享：7\n总分：8.3\n分级：A级\n核心相关点/不相关点分析：贴合产品\n核心用户痛点：时间不足、方法错误";
    let (eval, _) = evaluator(vec![Ok(reply)]);
    let result = eval.evaluate_english_article("输入标题", "c").await;
    assert_eq!(result.title, "零基础学英语");

    let mut sink: Vec<ScoreRecord> = Vec::new();
    sink.save(&ScoreRecord::from_english_article("q1", ContentType::Question, &result))
        .unwrap();
    let fields = sink[0].to_fields().unwrap();
    assert_eq!(fields["english_article_score"], 8.3);
    assert_eq!(fields["core_pain_points"], "时间不足,方法错误");
    assert_eq!(
        fields["evaluation_details"],
        "分级: A级, 匹配分析: 贴合产品, 核心痛点: 时间不足,方法错误"
    );
}

#[tokio::test]
async fn configured_openai_backend_round_trip() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .match_header("authorization", "Bearer sk-integration")
        .match_body(mockito::Matcher::PartialJson(serde_json::json!({
            "model": "gpt-4o-mini",
            "temperature": 0.3,
            "max_tokens": 500
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            serde_json::json!({
                "choices": [{ "message": { "role": "assistant", "content": "内容质量评分：8\n传播潜力评分：7\n运营价值评分：6\n综合总评分：7\n评估详情：结构清晰" } }]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let config = EvaluatorConfig {
        llm_type: LLMBackend::OpenAI,
        openai_api_key: Some(SecretString::new("sk-integration".to_string())),
        openai_model: "gpt-4o-mini".to_string(),
        openai_base_url: Some(format!("{}/v1", server.url())),
        ..EvaluatorConfig::default()
    };
    let eval = ContentEvaluator::new(config).unwrap();
    let result = eval.evaluate_comprehensive("c").await;

    mock.assert_async().await;
    assert_eq!(result.quality_score, 8.0);
    assert_eq!(result.details, "结构清晰");
}

#[tokio::test]
async fn vllm_rate_limit_yields_fallback() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .match_header("authorization", "Bearer EMPTY")
        .with_status(429)
        .with_body("slow down")
        .expect(1)
        .create_async()
        .await;

    let config = EvaluatorConfig::from_toml_str(&format!(
        "llm_type = \"vllm\"\nvllm_api_base = \"{}/v1\"\nvllm_model = \"qwen2\"\n",
        server.url()
    ))
    .unwrap();
    let eval = ContentEvaluator::new(config).unwrap();
    let result = eval.evaluate_spread_potential("c").await;

    mock.assert_async().await;
    assert!(result.is_fallback());
    assert_eq!(result.dimension, "传播潜力");
}

#[test]
fn vllm_without_model_fails_construction() {
    let config = EvaluatorConfig::from_toml_str("llm_type = \"vllm\"").unwrap();
    let err = ContentEvaluator::new(config).err().unwrap();
    assert!(err.is_config());
    assert!(err.to_string().contains("model"));
}
