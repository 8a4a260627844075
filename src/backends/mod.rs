//! Chat-completion backends the evaluator can talk to.

pub mod openai;
