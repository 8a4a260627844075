use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::EvalError;

use super::record::ScoreRecord;

/// Destination for score records.
pub trait ScoreSink: Send {
    fn save(&mut self, record: &ScoreRecord) -> Result<(), EvalError>;

    fn flush(&mut self) -> Result<(), EvalError> {
        Ok(())
    }
}

/// Keeps one record per `(content_id, content_type)`; a later save replaces
/// the earlier record in place.
impl ScoreSink for Vec<ScoreRecord> {
    fn save(&mut self, record: &ScoreRecord) -> Result<(), EvalError> {
        match self.iter_mut().find(|existing| existing.same_key(record)) {
            Some(existing) => *existing = record.clone(),
            None => self.push(record.clone()),
        }
        Ok(())
    }
}

/// Writes each record as one JSON object per line.
pub struct JsonLinesSink<W: Write + Send> {
    writer: W,
    written: usize,
}

impl JsonLinesSink<BufWriter<File>> {
    /// Opens `path` for appending, creating it and its parent directory.
    pub fn create(path: &Path) -> Result<Self, EvalError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write + Send> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    /// Number of records written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> ScoreSink for JsonLinesSink<W> {
    fn save(&mut self, record: &ScoreRecord) -> Result<(), EvalError> {
        let line = serde_json::to_string(&record.to_fields()?)?;
        writeln!(self.writer, "{line}")?;
        self.written += 1;
        log::debug!(
            "saved score for {} {}",
            record.content_type,
            record.content_id
        );
        Ok(())
    }

    fn flush(&mut self) -> Result<(), EvalError> {
        self.writer.flush()?;
        Ok(())
    }
}
