use crate::analyzer::AnalysisResult;
use crate::catalog::{Comparison, ComparisonEntry, ProtocolDescriptor};
use crate::migration::MigrationOutcome;
use crate::scanner::Detection;
use colored::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{IsTerminal, Write};
use std::str::FromStr;

/// Recommendations shown in human-readable reports
const REPORT_RECOMMENDATIONS: usize = 3;
/// Pros and cons shown per recommendation
const REPORT_TRADEOFFS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Markdown,
    #[default]
    Text,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Markdown => "markdown",
            OutputFormat::Text => "text",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "text" | "terminal" => Ok(OutputFormat::Text),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}

pub trait OutputWriter {
    fn write_analysis(&mut self, result: &AnalysisResult) -> anyhow::Result<()>;
    fn write_detections(&mut self, detections: &[Detection]) -> anyhow::Result<()>;
    fn write_comparison(&mut self, comparison: &Comparison) -> anyhow::Result<()>;
    fn write_migration(&mut self, outcome: &MigrationOutcome) -> anyhow::Result<()>;
    fn write_catalog(&mut self, protocols: &[&ProtocolDescriptor]) -> anyhow::Result<()>;
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_json<T: Serialize + ?Sized>(&mut self, value: &T) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(self.writer, "{json}")?;
        Ok(())
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_analysis(&mut self, result: &AnalysisResult) -> anyhow::Result<()> {
        self.write_json(result)
    }

    fn write_detections(&mut self, detections: &[Detection]) -> anyhow::Result<()> {
        self.write_json(detections)
    }

    fn write_comparison(&mut self, comparison: &Comparison) -> anyhow::Result<()> {
        self.write_json(comparison)
    }

    fn write_migration(&mut self, outcome: &MigrationOutcome) -> anyhow::Result<()> {
        self.write_json(outcome)
    }

    fn write_catalog(&mut self, protocols: &[&ProtocolDescriptor]) -> anyhow::Result<()> {
        self.write_json(protocols)
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_analysis(&mut self, result: &AnalysisResult) -> anyhow::Result<()> {
        self.write_header(result)?;
        self.write_summary(result)?;
        self.write_warnings(result)?;
        self.write_detected_protocols(result)?;
        self.write_recommendations(result)?;
        writeln!(self.writer, "---")?;
        Ok(())
    }

    fn write_detections(&mut self, detections: &[Detection]) -> anyhow::Result<()> {
        writeln!(self.writer, "# Protocol Detections")?;
        writeln!(self.writer)?;
        if detections.is_empty() {
            writeln!(self.writer, "No protocols detected.")?;
            return Ok(());
        }
        writeln!(
            self.writer,
            "| File | Line | Protocol | Pattern | Confidence |"
        )?;
        writeln!(
            self.writer,
            "|------|------|----------|---------|------------|"
        )?;
        for d in detections {
            writeln!(
                self.writer,
                "| {} | {} | {} | `{}` | {:.2} |",
                d.file_path.display(),
                d.line_number,
                d.protocol,
                d.pattern_matched.replace('|', "\\|"),
                d.confidence
            )?;
        }
        Ok(())
    }

    fn write_comparison(&mut self, comparison: &Comparison) -> anyhow::Result<()> {
        writeln!(self.writer, "# Protocol Comparison")?;
        writeln!(self.writer)?;
        for (name, entry) in comparison.iter() {
            writeln!(self.writer, "## {name}")?;
            match entry {
                ComparisonEntry::NotFound { error } => {
                    writeln!(self.writer, "Error: {error}")?;
                }
                ComparisonEntry::Found(view) => {
                    writeln!(self.writer, "**Category:** {}", view.category)?;
                    writeln!(self.writer, "**Complexity:** {}/10", view.complexity)?;
                    writeln!(self.writer)?;
                    self.write_list("Pros", &view.pros, usize::MAX)?;
                    self.write_list("Cons", &view.cons, usize::MAX)?;
                }
            }
        }
        Ok(())
    }

    fn write_migration(&mut self, outcome: &MigrationOutcome) -> anyhow::Result<()> {
        let guide = match outcome {
            MigrationOutcome::NotFound { error } => {
                writeln!(self.writer, "Error: {error}")?;
                return Ok(());
            }
            MigrationOutcome::Guide(guide) => guide,
        };

        writeln!(self.writer, "# Migration Guide: {} -> {}", guide.from, guide.to)?;
        writeln!(self.writer)?;
        writeln!(self.writer, "**Difficulty:** {}", guide.difficulty)?;
        writeln!(self.writer, "**Estimated Time:** {}", guide.estimated_time)?;
        writeln!(self.writer)?;
        writeln!(self.writer, "## Steps")?;
        writeln!(self.writer)?;
        for step in &guide.steps {
            writeln!(self.writer, "- {step}")?;
        }
        writeln!(self.writer)?;
        writeln!(self.writer, "## Considerations")?;
        for consideration in &guide.considerations {
            writeln!(self.writer, "- {consideration}")?;
        }
        writeln!(self.writer)?;
        writeln!(self.writer, "## Breaking Changes")?;
        for change in &guide.breaking_changes {
            writeln!(self.writer, "- {change}")?;
        }
        Ok(())
    }

    fn write_catalog(&mut self, protocols: &[&ProtocolDescriptor]) -> anyhow::Result<()> {
        writeln!(self.writer, "# Known Protocols")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Protocol | Key | Category | Complexity | Use Cases |")?;
        writeln!(self.writer, "|----------|-----|----------|------------|-----------|")?;
        for desc in protocols {
            writeln!(
                self.writer,
                "| {} | `{}` | {} | {}/10 | {} |",
                desc.name,
                desc.key,
                desc.category,
                desc.complexity_base,
                desc.typical_use_cases.iter().take(2).copied().collect::<Vec<_>>().join(", ")
            )?;
        }
        Ok(())
    }
}

impl<W: Write> MarkdownWriter<W> {
    fn write_header(&mut self, result: &AnalysisResult) -> anyhow::Result<()> {
        writeln!(self.writer, "# Protocol Analysis Report")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "**Project:** {}", result.project_path.display())?;
        writeln!(
            self.writer,
            "**Analyzed:** {}",
            result.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(self.writer, "**Architecture:** {}", result.architecture_type)?;
        writeln!(
            self.writer,
            "**Total Complexity:** {:.1}",
            result.complexity_total
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_summary(&mut self, result: &AnalysisResult) -> anyhow::Result<()> {
        writeln!(self.writer, "## Summary")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "{}", result.summary)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_warnings(&mut self, result: &AnalysisResult) -> anyhow::Result<()> {
        if result.warnings.is_empty() {
            return Ok(());
        }

        writeln!(self.writer, "## Warnings")?;
        writeln!(self.writer)?;
        for warning in &result.warnings {
            writeln!(self.writer, "- [!] {warning}")?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_detected_protocols(&mut self, result: &AnalysisResult) -> anyhow::Result<()> {
        writeln!(self.writer, "## Detected Protocols")?;
        writeln!(self.writer)?;
        if !result.has_detections() {
            writeln!(self.writer, "No protocols detected.")?;
            writeln!(self.writer)?;
            return Ok(());
        }

        writeln!(
            self.writer,
            "| Protocol | Files | References | Complexity | Client | Server |"
        )?;
        writeln!(
            self.writer,
            "|----------|-------|------------|------------|--------|--------|"
        )?;
        for proto in &result.detected_protocols {
            writeln!(
                self.writer,
                "| {} | {} | {} | {:.1} | {} | {} |",
                proto.key,
                proto.file_count,
                proto.total_matches,
                proto.complexity_score,
                role_mark(proto.is_client),
                role_mark(proto.is_server)
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_recommendations(&mut self, result: &AnalysisResult) -> anyhow::Result<()> {
        writeln!(self.writer, "## Recommendations")?;
        writeln!(self.writer)?;

        for (i, rec) in result
            .recommendations
            .iter()
            .take(REPORT_RECOMMENDATIONS)
            .enumerate()
        {
            writeln!(
                self.writer,
                "### {}. {} (Score: {:.0}/100)",
                i + 1,
                rec.protocol,
                rec.score
            )?;
            writeln!(self.writer)?;
            writeln!(
                self.writer,
                "**Migration Complexity:** {}",
                rec.migration_complexity
            )?;
            writeln!(self.writer, "**Estimated Time:** {}", rec.estimated_time)?;
            writeln!(self.writer)?;
            self.write_list("Rationale", &rec.rationale, usize::MAX)?;
            self.write_list("Pros", &rec.pros, REPORT_TRADEOFFS)?;
            self.write_list("Cons", &rec.cons, REPORT_TRADEOFFS)?;
        }
        Ok(())
    }

    fn write_list(&mut self, title: &str, items: &[String], limit: usize) -> anyhow::Result<()> {
        writeln!(self.writer, "**{title}:**")?;
        for item in items.iter().take(limit) {
            writeln!(self.writer, "- {item}")?;
        }
        writeln!(self.writer)?;
        Ok(())
    }
}

fn role_mark(flag: bool) -> &'static str {
    if flag {
        "[OK]"
    } else {
        ""
    }
}

/// Plain-text writer with optional ANSI colors
pub struct TextWriter<W: Write> {
    writer: W,
    color: bool,
}

impl<W: Write> TextWriter<W> {
    pub fn new(writer: W, color: bool) -> Self {
        Self { writer, color }
    }
}

fn paint(color: bool, text: &str, style: fn(&str) -> ColoredString) -> String {
    if color {
        style(text).to_string()
    } else {
        text.to_string()
    }
}

impl<W: Write> OutputWriter for TextWriter<W> {
    fn write_analysis(&mut self, result: &AnalysisResult) -> anyhow::Result<()> {
        let title = paint(self.color, "Protocol Analysis Report", |s| s.bold().blue());
        writeln!(self.writer, "{title}")?;
        writeln!(self.writer, "{}", paint(self.color, "========================", |s| s.blue()))?;
        writeln!(self.writer, "Project: {}", result.project_path.display())?;
        writeln!(self.writer, "Architecture: {}", result.architecture_type)?;
        writeln!(self.writer, "Complexity: {:.1}", result.complexity_total)?;
        writeln!(self.writer)?;
        writeln!(self.writer, "Summary: {}", result.summary)?;
        writeln!(self.writer)?;

        writeln!(self.writer, "{}", paint(self.color, "Detected Protocols:", |s| s.bold()))?;
        for proto in &result.detected_protocols {
            writeln!(
                self.writer,
                "  - {}: {} files, {} refs, complexity {:.1}",
                proto.key, proto.file_count, proto.total_matches, proto.complexity_score
            )?;
        }

        if !result.warnings.is_empty() {
            writeln!(self.writer)?;
            writeln!(self.writer, "{}", paint(self.color, "Warnings:", |s| s.bold().yellow()))?;
            for warning in &result.warnings {
                let marker = paint(self.color, "[!]", |s| s.yellow());
                writeln!(self.writer, "  {marker} {warning}")?;
            }
        }

        writeln!(self.writer)?;
        writeln!(self.writer, "{}", paint(self.color, "Recommendations:", |s| s.bold()))?;
        for (i, rec) in result
            .recommendations
            .iter()
            .take(REPORT_RECOMMENDATIONS)
            .enumerate()
        {
            let name = paint(self.color, &rec.protocol, |s| s.green());
            writeln!(
                self.writer,
                "  {}. {} (score: {:.0}/100)",
                i + 1,
                name,
                rec.score
            )?;
            writeln!(
                self.writer,
                "     Migration: {}, Est: {}",
                rec.migration_complexity, rec.estimated_time
            )?;
        }
        Ok(())
    }

    fn write_detections(&mut self, detections: &[Detection]) -> anyhow::Result<()> {
        for d in detections {
            let protocol = paint(self.color, &d.protocol, |s| s.cyan());
            writeln!(
                self.writer,
                "{}:{} [{}] {} ({:.2})",
                d.file_path.display(),
                d.line_number,
                protocol,
                d.pattern_matched,
                d.confidence
            )?;
        }
        writeln!(self.writer, "{} detections", detections.len())?;
        Ok(())
    }

    fn write_comparison(&mut self, comparison: &Comparison) -> anyhow::Result<()> {
        for (name, entry) in comparison.iter() {
            writeln!(self.writer)?;
            writeln!(self.writer, "{}", paint(self.color, &format!("=== {name} ==="), |s| s.bold()))?;
            match entry {
                ComparisonEntry::NotFound { error } => {
                    writeln!(self.writer, "  {}", paint(self.color, &format!("Error: {error}"), |s| s.red()))?;
                }
                ComparisonEntry::Found(view) => {
                    writeln!(self.writer, "  Category: {}", view.category)?;
                    writeln!(self.writer, "  Complexity: {}/10", view.complexity)?;
                    writeln!(self.writer, "  Pros: {}", first_n(&view.pros, REPORT_TRADEOFFS))?;
                    writeln!(self.writer, "  Cons: {}", first_n(&view.cons, REPORT_TRADEOFFS))?;
                }
            }
        }
        Ok(())
    }

    fn write_migration(&mut self, outcome: &MigrationOutcome) -> anyhow::Result<()> {
        let guide = match outcome {
            MigrationOutcome::NotFound { error } => {
                writeln!(self.writer, "{}", paint(self.color, &format!("Error: {error}"), |s| s.red()))?;
                return Ok(());
            }
            MigrationOutcome::Guide(guide) => guide,
        };

        writeln!(self.writer)?;
        let title = format!("Migration: {} -> {}", guide.from, guide.to);
        writeln!(self.writer, "{}", paint(self.color, &title, |s| s.bold()))?;
        writeln!(self.writer, "Difficulty: {}", guide.difficulty)?;
        writeln!(self.writer, "Estimated Time: {}", guide.estimated_time)?;
        writeln!(self.writer)?;
        writeln!(self.writer, "Steps:")?;
        for step in &guide.steps {
            writeln!(self.writer, "  {step}")?;
        }
        Ok(())
    }

    fn write_catalog(&mut self, protocols: &[&ProtocolDescriptor]) -> anyhow::Result<()> {
        writeln!(self.writer)?;
        writeln!(self.writer, "{}", paint(self.color, "Known Protocols:", |s| s.bold().blue()))?;
        writeln!(self.writer, "{}", "=".repeat(50))?;
        for desc in protocols {
            writeln!(self.writer)?;
            writeln!(self.writer, "{}", paint(self.color, desc.name, |s| s.bold()))?;
            writeln!(self.writer, "  Category: {}", desc.category)?;
            writeln!(self.writer, "  Complexity: {}/10", desc.complexity_base)?;
            writeln!(
                self.writer,
                "  Use cases: {}",
                desc.typical_use_cases.iter().take(2).copied().collect::<Vec<_>>().join(", ")
            )?;
        }
        Ok(())
    }
}

fn first_n(items: &[String], n: usize) -> String {
    items.iter().take(n).cloned().collect::<Vec<_>>().join(", ")
}

/// Writer for `format` on stdout; text output is colored only on a terminal
pub fn create_writer(format: OutputFormat) -> Box<dyn OutputWriter> {
    let color = std::io::stdout().is_terminal();
    create_writer_for(format, std::io::stdout(), color)
}

pub fn create_writer_for<'a, W: Write + 'a>(
    format: OutputFormat,
    writer: W,
    color: bool,
) -> Box<dyn OutputWriter + 'a> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(writer)),
        OutputFormat::Text => Box::new(TextWriter::new(writer, color)),
    }
}

/// Render through a writer into an uncolored string
pub fn render<F>(format: OutputFormat, write: F) -> anyhow::Result<String>
where
    F: FnOnce(&mut dyn OutputWriter) -> anyhow::Result<()>,
{
    let mut buffer = Vec::new();
    {
        let mut writer = create_writer_for(format, &mut buffer, false);
        write(writer.as_mut())?;
    }
    Ok(String::from_utf8(buffer)?)
}
