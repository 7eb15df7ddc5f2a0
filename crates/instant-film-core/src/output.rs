//! Machine-readable result listings in JSON or JSON Lines.

use std::io::{self, Write};

use crate::types::{ProcessedResult, ResultRecord};

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One JSON array of all records
    Json,
    /// One JSON object per line
    JsonLines,
}

impl OutputFormat {
    /// Parse format from string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "jsonl" | "jsonlines" | "ndjson" => Some(Self::JsonLines),
            _ => None,
        }
    }
}

/// Writes [`ResultRecord`]s for processed results.
///
/// JSON Lines records are written as they arrive; JSON records are buffered
/// and written as one array by [`RecordWriter::finish`].
pub struct RecordWriter<W: Write> {
    writer: W,
    format: OutputFormat,
    pending: Vec<ResultRecord>,
    records_written: usize,
}

impl<W: Write> RecordWriter<W> {
    pub fn new(writer: W, format: OutputFormat) -> Self {
        Self {
            writer,
            format,
            pending: Vec::new(),
            records_written: 0,
        }
    }

    /// Record one result.
    pub fn record(&mut self, result: &ProcessedResult) -> io::Result<()> {
        let record = ResultRecord::from(result);
        match self.format {
            OutputFormat::Json => self.pending.push(record),
            OutputFormat::JsonLines => {
                serde_json::to_writer(&mut self.writer, &record).map_err(io::Error::other)?;
                writeln!(self.writer)?;
                self.records_written += 1;
            }
        }
        Ok(())
    }

    /// Flush buffered records and return the underlying writer.
    pub fn finish(mut self) -> io::Result<W> {
        if self.format == OutputFormat::Json {
            serde_json::to_writer_pretty(&mut self.writer, &self.pending)
                .map_err(io::Error::other)?;
            writeln!(self.writer)?;
            self.records_written += self.pending.len();
        }
        tracing::debug!("Wrote {} result record(s)", self.records_written);
        self.writer.flush()?;
        Ok(self.writer)
    }
}
