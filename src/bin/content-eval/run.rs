use std::path::PathBuf;
use std::time::Duration;

use llm_evaluator::config::{default_config_file, default_data_dir, default_logs_dir};
use llm_evaluator::{ContentEvaluator, EvaluatorConfig, JsonLinesSink, ScoreRecord, ScoreSink};

use crate::args::{CliArgs, EvaluationKind};
use crate::items::{load_items, select, ContentItem};
use crate::logging::init_logging;

const DEFAULT_OUTPUT_FILE: &str = "scores.jsonl";

/// Outcome counts of a batch run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub saved: usize,
    pub failed: usize,
    /// Saved records that carry fallback scores.
    pub degraded: usize,
}

pub async fn run(args: CliArgs) -> anyhow::Result<()> {
    let _logger = init_logging(args.verbose, &default_logs_dir()?)?;
    let delay = args.delay()?;

    log::info!("=== content scoring ===");
    log::info!("input: {}", args.input.display());
    log::info!(
        "type: {:?}, limit: {}, offset: {}, delay: {:?}, evaluation: {:?}",
        args.content_type,
        args.limit,
        args.offset,
        delay,
        args.evaluation_type
    );

    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => default_config_file()?,
    };
    let evaluator = ContentEvaluator::new(EvaluatorConfig::load(&config_path)?)?;

    let items = select(
        &load_items(&args.input)?,
        args.content_type,
        args.offset,
        args.limit,
    );
    if items.is_empty() {
        log::warn!("no items to evaluate");
        return Ok(());
    }
    log::info!("loaded {} items", items.len());

    let output = match &args.output {
        Some(path) => path.clone(),
        None => default_output()?,
    };
    let mut sink = JsonLinesSink::create(&output)?;

    let summary = score_items(&evaluator, &items, args.evaluation_type, delay, &mut sink).await;
    sink.flush()?;

    log::info!(
        "done: {} items, {} saved ({} with fallback scores), {} failed; results in {}",
        summary.total,
        summary.saved,
        summary.degraded,
        summary.failed,
        output.display()
    );
    Ok(())
}

fn default_output() -> anyhow::Result<PathBuf> {
    Ok(default_data_dir()?.join(DEFAULT_OUTPUT_FILE))
}

/// Evaluates items one at a time, waiting `delay` between model calls.
pub async fn score_items(
    evaluator: &ContentEvaluator,
    items: &[ContentItem],
    kind: EvaluationKind,
    delay: Duration,
    sink: &mut dyn ScoreSink,
) -> Summary {
    let mut summary = Summary {
        total: items.len(),
        ..Summary::default()
    };

    for (i, item) in items.iter().enumerate() {
        if i > 0 && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        let title = item.display_title();
        log::info!(
            "--- {}/{}: {} ({} {}) ---",
            i + 1,
            summary.total,
            title,
            item.content_type,
            item.id
        );

        let (record, degraded) = score_item(evaluator, item, &title, kind).await;
        match sink.save(&record) {
            Ok(()) => {
                summary.saved += 1;
                if degraded {
                    summary.degraded += 1;
                }
                log::info!("saved, total score {:.2}", record.total_score);
            }
            Err(err) => {
                summary.failed += 1;
                log::error!("failed to save score for {}: {err}", item.id);
            }
        }
    }
    summary
}

async fn score_item(
    evaluator: &ContentEvaluator,
    item: &ContentItem,
    title: &str,
    kind: EvaluationKind,
) -> (ScoreRecord, bool) {
    let text = item.text();
    match kind {
        EvaluationKind::Comprehensive => {
            let result = evaluator.evaluate_comprehensive(&text).await;
            let record = ScoreRecord::from_comprehensive(&item.id, item.content_type, &result);
            (record, result.is_fallback())
        }
        EvaluationKind::EnglishArticle => {
            let result = evaluator.evaluate_english_article(title, &text).await;
            log::info!(
                "grade {}, audience {:.2}, product {:.2}, advice {:.2}",
                result.grade,
                result.target_audience_score,
                result.product_relevance_score,
                result.learning_advice_score
            );
            let record = ScoreRecord::from_english_article(&item.id, item.content_type, &result);
            (record, result.is_fallback())
        }
    }
}
