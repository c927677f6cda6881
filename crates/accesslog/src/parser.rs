//! Parser — the line parser component: grammar matching plus coercion.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::coerce::{coerce, DEFAULT_TIME_FORMAT};
use crate::conf::ParserConfig;
use crate::format::{FormatKind, LogFormat, COMBINED, COMMON};
use crate::metrics::ParserMetrics;
use crate::model::{ParseError, ParsedRecord};
use crate::scan::RawCaptures;
use crate::MAX_LINE_SIZE;

/// Parses access log lines against one of the built-in grammars.
///
/// Construct once and reuse across lines. Matching and coercion are pure
/// and hold no cross-line state, so a shared reference is safe to use from
/// multiple threads and parsing the same input twice yields identical
/// output.
#[derive(Debug, Clone)]
pub struct LineParser {
    kind: FormatKind,
    time_format: String,
    metrics: Option<Arc<ParserMetrics>>,
}

impl LineParser {
    /// Parser over a built-in grammar with the default timestamp layout.
    pub fn new(kind: FormatKind) -> Self {
        Self {
            kind,
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            metrics: None,
        }
    }

    pub fn from_config(config: &ParserConfig) -> Self {
        Self {
            kind: config.format,
            time_format: config.time_format.clone(),
            metrics: None,
        }
    }

    /// Override the strptime-style timestamp layout.
    pub fn with_time_format(mut self, layout: impl Into<String>) -> Self {
        self.time_format = layout.into();
        self
    }

    /// Attach shared counters for parse outcomes.
    pub fn with_metrics(mut self, metrics: Arc<ParserMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn format(&self) -> FormatKind {
        self.kind
    }

    pub fn time_format(&self) -> &str {
        &self.time_format
    }

    fn grammar(&self) -> &'static LogFormat {
        self.kind.grammar()
    }

    /// Match the grammar against the start of `line`.
    ///
    /// On success every declared field name maps to its raw capture
    /// (Combined's `extra` is present only when the grammar declares it).
    /// Returns `None` for non-conforming or oversized lines; never an
    /// error.
    pub fn match_line<'a>(&self, line: &'a str) -> Option<RawCaptures<'a>> {
        if line.len() > MAX_LINE_SIZE {
            return None;
        }
        self.grammar().match_line(line)
    }

    /// Match plus coercion. `None` for lines that do not conform; a record
    /// with `Missing` values for lines whose captures fail coercion.
    pub fn parse_line(&self, line: &str) -> Option<ParsedRecord> {
        if let Some(metrics) = &self.metrics {
            metrics.record_line();
        }

        let captures = match self.match_line(line) {
            Some(captures) => captures,
            None => {
                debug!(
                    format = self.kind.as_str(),
                    line_len = line.len(),
                    "skipping unmatched line"
                );
                if let Some(metrics) = &self.metrics {
                    metrics.record_skipped();
                }
                return None;
            }
        };

        let mut fields = Vec::with_capacity(captures.len());
        for (name, raw) in captures {
            let value = coerce(name, raw, &self.time_format);
            if value.is_missing() {
                debug!(field = name, raw, "field coercion failed");
                if let Some(metrics) = &self.metrics {
                    metrics.record_coercion_failure();
                }
            }
            fields.push((name, value));
        }

        if let Some(metrics) = &self.metrics {
            metrics.record_emitted();
        }
        Some(ParsedRecord::new(fields))
    }

    /// Parse an in-memory sequence of lines, preserving input order.
    /// Unmatched lines are skipped, never an error.
    pub fn parse_lines<'a, I>(&self, lines: I) -> Vec<ParsedRecord>
    where
        I: IntoIterator<Item = &'a str>,
    {
        lines
            .into_iter()
            .filter_map(|line| self.parse_line(line))
            .collect()
    }

    /// Drive a buffered line source to completion.
    ///
    /// Per-line problems are skipped; a read failure (including invalid
    /// UTF-8 from the source) is fatal and surfaces as `ParseError::Io`.
    pub fn parse_reader<R: BufRead>(&self, reader: R) -> Result<Vec<ParsedRecord>, ParseError> {
        let mut records = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if let Some(record) = self.parse_line(&line) {
                records.push(record);
            }
        }
        Ok(records)
    }

    /// Parse a UTF-8 log file, one entry per line. The file handle is
    /// released on all exit paths.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<Vec<ParsedRecord>, ParseError> {
        let file = File::open(path)?;
        self.parse_reader(BufReader::new(file))
    }
}

impl Default for LineParser {
    fn default() -> Self {
        Self::new(FormatKind::Combined)
    }
}

/// Guess which built-in grammar a sample line uses.
///
/// Tries Combined first (the richer layout, of which Common is a prefix),
/// then Common. `None` when the sample matches neither.
pub fn sniff(line: &str) -> Option<FormatKind> {
    if COMBINED.match_line(line).is_some() {
        return Some(FormatKind::Combined);
    }
    if COMMON.match_line(line).is_some() {
        return Some(FormatKind::Common);
    }
    None
}
