//! Hand-off of evaluation results to a persistence layer.
//!
//! The evaluator itself never persists anything; callers convert results into
//! [`ScoreRecord`]s and pass them to a [`ScoreSink`].

mod record;
mod sink;

pub use record::{ContentType, ScoreRecord};
pub use sink::{JsonLinesSink, ScoreSink};
