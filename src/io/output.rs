use crate::core::{Priority, ScoredTarget, ScoringError};
use crate::priority::{priority_counts, sort_by_priority};
use colored::*;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Terminal,
}

/// Scored targets of one run, highest score first, plus what was skipped
#[derive(Debug, Clone, Default)]
pub struct ScoreReport {
    pub targets: Vec<ScoredTarget>,
    pub skipped: Vec<ScoringError>,
}

impl ScoreReport {
    pub fn new(mut targets: Vec<ScoredTarget>, skipped: Vec<ScoringError>) -> Self {
        sort_by_priority(&mut targets);
        Self { targets, skipped }
    }

    /// Keep only the `n` highest-scored targets
    pub fn truncate(&mut self, n: usize) {
        self.targets.truncate(n);
    }
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &ScoreReport) -> anyhow::Result<()>;
}

/// Writes the `ScoredTarget[]` array
pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &ScoreReport) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(&report.targets)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &ScoreReport) -> anyhow::Result<()> {
        self.write_header()?;
        self.write_summary(report)?;
        self.write_targets(report)?;
        self.write_skipped(report)?;
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> TerminalWriter<W> {
    fn write_header(&mut self) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", "Testing Priority Report".bold().blue())?;
        writeln!(self.writer, "{}", "=======================".blue())?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_summary(&mut self, report: &ScoreReport) -> anyhow::Result<()> {
        let counts = priority_counts(&report.targets);
        writeln!(self.writer, "Summary:")?;
        writeln!(self.writer, "  Targets scored: {}", report.targets.len())?;
        let buckets: Vec<String> = counts
            .iter()
            .map(|(priority, count)| format!("{} {}", paint_priority(*priority), count))
            .collect();
        writeln!(self.writer, "  By priority: {}", buckets.join("  "))?;
        if !report.skipped.is_empty() {
            writeln!(
                self.writer,
                "  Skipped: {}",
                report.skipped.len().to_string().yellow()
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_targets(&mut self, report: &ScoreReport) -> anyhow::Result<()> {
        if report.targets.is_empty() {
            return Ok(());
        }
        writeln!(
            self.writer,
            "  {:<4} {:>6}  {:>2} {:>2} {:>2} {:>2} {:>3}  {:<12} TARGET",
            "PRI", "SCORE", "BC", "CC", "ER", "T", "DEP", "LAYER"
        )?;
        for target in &report.targets {
            let layer = target
                .layer_name
                .clone()
                .unwrap_or_else(|| target.layer().to_string());
            writeln!(
                self.writer,
                "  {:<4} {:>6.2}  {:>2} {:>2} {:>2} {:>2} {:>3}  {:<12} {}",
                paint_priority(target.priority),
                target.score,
                target.bc,
                target.cc,
                target.er,
                target.testability,
                target.dependency_count,
                layer,
                target.key()
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_skipped(&mut self, report: &ScoreReport) -> anyhow::Result<()> {
        if report.skipped.is_empty() {
            return Ok(());
        }
        writeln!(self.writer, "{}", "Skipped targets:".yellow())?;
        for err in &report.skipped {
            writeln!(self.writer, "  - {}", err)?;
        }
        Ok(())
    }
}

fn paint_priority(priority: Priority) -> ColoredString {
    let label = priority.label();
    match priority {
        Priority::P0 => label.red().bold(),
        Priority::P1 => label.yellow().bold(),
        Priority::P2 => label.cyan(),
        Priority::P3 => label.normal(),
    }
}

pub fn create_writer(format: OutputFormat, writer: Box<dyn Write>) -> Box<dyn OutputWriter> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer)),
    }
}
