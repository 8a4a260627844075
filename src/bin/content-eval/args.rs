use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "content-eval",
    about = "Score questions and answers with an LLM and store the results"
)]
pub struct CliArgs {
    /// JSON array of items to evaluate
    #[arg(long, short = 'i')]
    pub input: PathBuf,
    /// Content type to evaluate
    #[arg(long = "type", short = 't', value_enum, default_value_t = TypeFilter::All)]
    pub content_type: TypeFilter,
    #[arg(long, short = 'l', default_value_t = 10)]
    pub limit: usize,
    #[arg(long, short = 'o', default_value_t = 0)]
    pub offset: usize,
    /// Seconds to wait between model calls
    #[arg(long, short = 'd', default_value_t = 2.0)]
    pub delay: f64,
    #[arg(long, short = 'e', value_enum, default_value_t = EvaluationKind::EnglishArticle)]
    pub evaluation_type: EvaluationKind,
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,
    /// Where score records are appended, one JSON object per line
    #[arg(long)]
    pub output: Option<PathBuf>,
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum TypeFilter {
    Question,
    Answer,
    All,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum EvaluationKind {
    Comprehensive,
    #[value(alias = "english_article")]
    EnglishArticle,
}

impl CliArgs {
    pub fn delay(&self) -> anyhow::Result<Duration> {
        Duration::try_from_secs_f64(self.delay)
            .map_err(|e| anyhow::anyhow!("invalid --delay {}: {e}", self.delay))
    }
}
