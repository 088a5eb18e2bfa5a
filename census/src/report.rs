//! Per-generation statistics and the text sink they are appended to.

use std::{
    fmt::Display,
    fs::OpenOptions,
    io::Write,
    path::{Path, PathBuf},
};

use chrono::{DateTime, FixedOffset, Local};

use crate::{catalog::Category, error::SinkError, scan::OccurrenceCounts};

const RULE: &str = "__________________________________________________";

/// Source of report timestamps.
pub trait Clock {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// The wall clock, in the local time zone.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

impl Clock for DateTime<FixedOffset> {
    fn now(&self) -> DateTime<FixedOffset> {
        *self
    }
}

/// A point in time rendered as `YYYY-MM-DD HH:MM:SS.ffffff` in its own
/// offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timestamp(pub DateTime<FixedOffset>);

impl Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d %H:%M:%S%.6f"))
    }
}

/// Snapshot of one generation's statistics.
#[derive(Clone, Debug, PartialEq)]
pub struct ReportRecord {
    pub timestamp: Timestamp,
    pub width: usize,
    pub height: usize,
    /// Zero-based; printed one-based.
    pub generation: usize,
    pub counts: OccurrenceCounts,
    pub percentages: [f64; Category::COUNT],
    pub total: usize,
}

impl ReportRecord {
    pub fn new(
        counts: OccurrenceCounts,
        (width, height): (usize, usize),
        generation: usize,
        clock: &dyn Clock,
    ) -> Self {
        let total = counts.total();
        let percentages = Category::ALL.map(|c| match total {
            0 => 0.0,
            _ => 100.0 * counts.get(c) as f64 / total as f64,
        });
        Self {
            timestamp: Timestamp(clock.now()),
            width,
            height,
            generation,
            counts,
            percentages,
            total,
        }
    }

    pub fn percentage(&self, category: Category) -> f64 {
        self.percentages[category.index()]
    }
}

impl Display for ReportRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Simulation: at {}", self.timestamp)?;
        writeln!(f, "Universe size {} x {}", self.width, self.height)?;
        writeln!(f, "Iteration:    {}", self.generation + 1)?;
        writeln!(f, "{RULE}")?;
        writeln!(f, "             |   Count   |   Percentage  |")?;
        writeln!(f, "{RULE}")?;
        for (category, count) in self.counts.iter() {
            writeln!(
                f,
                "{:<13}|     {count}     |     {:.2}%",
                category.label(),
                self.percentage(category)
            )?;
        }
        writeln!(f, "{RULE}")?;
        writeln!(f, "Total        |     {}", self.total)?;
        writeln!(f, "{RULE}")?;
        writeln!(f)
    }
}

/// Append-only destination for rendered records.
pub trait ReportSink {
    fn append(&mut self, text: &str) -> Result<(), SinkError>;
}

/// Appends to a file, opening and closing it for every record.
#[derive(Clone, Debug)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReportSink for FileSink {
    fn append(&mut self, text: &str) -> Result<(), SinkError> {
        let file_error = |source| SinkError::File {
            path: self.path.clone(),
            source,
        };
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(file_error)?;
        file.write_all(text.as_bytes()).map_err(file_error)
    }
}

/// Appends to any writer, flushing after every record.
#[derive(Debug)]
pub struct WriterSink<W>(pub W);

impl<W: Write> ReportSink for WriterSink<W> {
    fn append(&mut self, text: &str) -> Result<(), SinkError> {
        self.0.write_all(text.as_bytes())?;
        self.0.flush()?;
        Ok(())
    }
}

impl ReportSink for String {
    fn append(&mut self, text: &str) -> Result<(), SinkError> {
        self.push_str(text);
        Ok(())
    }
}

/// Renders `record` and appends it to `sink`.
pub fn emit(record: &ReportRecord, sink: &mut dyn ReportSink) -> Result<(), SinkError> {
    sink.append(&record.to_string())
}
