//! End-to-end protocol analysis
//!
//! [`ProtocolAnalyzer`] owns the catalog, the compiled scanner and the
//! aggregator, and wires them into a single [`AnalysisResult`]:
//!
//! ```text
//! scan -> summarize -> score complexity -> pick requirement -> rank
//!      -> infer architecture -> warnings -> summary text
//! ```
//!
//! Nothing is cached between runs; each call starts from an empty summary.

use crate::aggregation::{Aggregator, UsageMap, UsageSummary};
use crate::catalog::{Catalog, Category, Comparison, ProtocolDescriptor};
use crate::complexity::ComplexityModel;
use crate::config::ScanConfig;
use crate::errors::{Error, Result};
use crate::migration::{MigrationAdvisor, MigrationOutcome};
use crate::recommendation::{Ranker, RecommendationRecord, Requirement};
use crate::scanner::{Detection, Scanner};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Recommendations kept in a result
pub const MAX_RECOMMENDATIONS: usize = 5;

const HIGH_COMPLEXITY_THRESHOLD: f64 = 50.0;
const SOCKET_IO_KEY: &str = "socket.io";

/// Which side of the wire the scanned code sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Architecture {
    FullStack,
    Backend,
    Frontend,
    Unknown,
}

impl Architecture {
    pub fn as_str(&self) -> &'static str {
        match self {
            Architecture::FullStack => "full-stack",
            Architecture::Backend => "backend",
            Architecture::Frontend => "frontend",
            Architecture::Unknown => "unknown",
        }
    }

    fn infer(protocols: &[ProtocolUsage]) -> Self {
        let client = protocols.iter().any(|p| p.is_client);
        let server = protocols.iter().any(|p| p.is_server);
        match (client, server) {
            (true, true) => Architecture::FullStack,
            (false, true) => Architecture::Backend,
            (true, false) => Architecture::Frontend,
            (false, false) => Architecture::Unknown,
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Usage of one detected protocol within the analyzed tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtocolUsage {
    /// Catalog key
    pub key: String,
    /// Display name
    pub name: String,
    pub category: Category,
    pub detections: Vec<Detection>,
    pub total_matches: usize,
    pub file_count: usize,
    pub complexity_score: f64,
    pub is_client: bool,
    pub is_server: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub project_path: PathBuf,
    pub timestamp: DateTime<Utc>,
    /// Requirement the ranking was made for, after auto-detection
    pub requirement: Category,
    /// Catalog order
    pub detected_protocols: Vec<ProtocolUsage>,
    pub architecture_type: Architecture,
    pub complexity_total: f64,
    pub recommendations: Vec<RecommendationRecord>,
    pub summary: String,
    pub warnings: Vec<String>,
}

impl AnalysisResult {
    pub fn has_detections(&self) -> bool {
        !self.detected_protocols.is_empty()
    }

    pub fn top_recommendation(&self) -> Option<&RecommendationRecord> {
        self.recommendations.first()
    }
}

pub struct ProtocolAnalyzer {
    catalog: Catalog,
    scanner: Scanner,
    aggregator: Aggregator,
}

impl ProtocolAnalyzer {
    pub fn new() -> Result<Self> {
        Self::with_config(ScanConfig::default())
    }

    pub fn with_config(config: ScanConfig) -> Result<Self> {
        Self::with_catalog(Catalog::builtin(), config)
    }

    pub fn with_catalog(catalog: Catalog, config: ScanConfig) -> Result<Self> {
        catalog.validate()?;
        let scanner = Scanner::with_config(&catalog, config)?;
        Ok(Self {
            catalog,
            scanner,
            aggregator: Aggregator::new()?,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Raw detections under `root`
    pub fn scan(&self, root: &Path) -> Result<Vec<Detection>> {
        self.scanner.scan(root)
    }

    /// Detect, score and rank protocol usage under `root`
    pub fn analyze(&self, root: &Path, requirement: Requirement) -> Result<AnalysisResult> {
        let project_path = std::path::absolute(root).map_err(|e| Error::io(root, e))?;
        let _span = tracing::info_span!("analyze", path = %project_path.display()).entered();

        let detections = self.scanner.scan(root)?;
        let usage = self.aggregator.summarize(detections);
        let detected_protocols = self.usages(&usage);

        let requirement = match requirement {
            Requirement::Category(category) => category,
            Requirement::Auto => {
                let inferred = infer_requirement(&detected_protocols);
                tracing::debug!("Auto-detected requirement: {}", inferred);
                inferred
            }
        };

        let mut recommendations = Ranker::new(&self.catalog).rank(&usage, requirement);
        let architecture_type = Architecture::infer(&detected_protocols);
        let warnings = warnings(&detected_protocols);
        let summary = summary_text(
            &detected_protocols,
            recommendations.first(),
            architecture_type,
        );
        recommendations.truncate(MAX_RECOMMENDATIONS);

        let complexity_total = detected_protocols
            .iter()
            .map(|p| p.complexity_score)
            .sum();

        tracing::info!(
            "Detected {} protocols, architecture {}",
            detected_protocols.len(),
            architecture_type
        );

        Ok(AnalysisResult {
            project_path,
            timestamp: Utc::now(),
            requirement,
            detected_protocols,
            architecture_type,
            complexity_total,
            recommendations,
            summary,
            warnings,
        })
    }

    pub fn compare<S: AsRef<str>>(&self, names: &[S]) -> Comparison {
        self.catalog.compare(names)
    }

    pub fn migrate(&self, from: &str, to: &str) -> MigrationOutcome {
        MigrationAdvisor::new(&self.catalog).guide(from, to)
    }

    pub fn list(&self, category: Option<Category>) -> Vec<&ProtocolDescriptor> {
        self.catalog.list(category)
    }

    fn usages(&self, usage: &UsageMap) -> Vec<ProtocolUsage> {
        let model = ComplexityModel::new(&self.catalog);
        self.catalog
            .iter()
            .filter_map(|desc| usage.get(desc.key).map(|summary| (desc, summary)))
            .map(|(desc, summary)| protocol_usage(desc, summary, &model))
            .collect()
    }
}

fn protocol_usage(
    desc: &ProtocolDescriptor,
    summary: &UsageSummary,
    model: &ComplexityModel<'_>,
) -> ProtocolUsage {
    ProtocolUsage {
        key: desc.key.to_string(),
        name: desc.name.to_string(),
        category: desc.category,
        detections: summary.detections.clone(),
        total_matches: summary.total_matches,
        file_count: summary.file_count(),
        complexity_score: model.score_summary(summary),
        is_client: summary.is_client,
        is_server: summary.is_server,
    }
}

/// Category with the most matches; the earliest in catalog order wins ties
fn infer_requirement(protocols: &[ProtocolUsage]) -> Category {
    let mut totals: Vec<(Category, usize)> = Vec::new();
    for usage in protocols {
        match totals.iter_mut().find(|(c, _)| *c == usage.category) {
            Some((_, total)) => *total += usage.total_matches,
            None => totals.push((usage.category, usage.total_matches)),
        }
    }

    totals
        .into_iter()
        .fold(None, |best: Option<(Category, usize)>, (category, total)| match best {
            Some((_, best_total)) if best_total >= total => best,
            _ => Some((category, total)),
        })
        .map_or(Category::RequestResponse, |(category, _)| category)
}

fn warnings(protocols: &[ProtocolUsage]) -> Vec<String> {
    let mut warnings = Vec::new();

    if protocols.iter().any(|p| p.key == SOCKET_IO_KEY) {
        warnings.push(
            "Socket.IO detected: Ensure client/server versions match (v4 client requires v4 server)"
                .to_string(),
        );
    }

    let realtime: Vec<&str> = protocols
        .iter()
        .filter(|p| p.category == Category::Realtime)
        .map(|p| p.key.as_str())
        .collect();
    if realtime.len() > 1 {
        warnings.push(format!(
            "Multiple real-time protocols detected: {}. Consider consolidating to reduce complexity.",
            realtime.join(", ")
        ));
    }

    let heavy: Vec<&str> = protocols
        .iter()
        .filter(|p| p.complexity_score > HIGH_COMPLEXITY_THRESHOLD)
        .map(|p| p.key.as_str())
        .collect();
    if !heavy.is_empty() {
        warnings.push(format!(
            "High complexity protocols: {}. Review if simpler alternatives exist.",
            heavy.join(", ")
        ));
    }

    warnings
}

fn summary_text(
    protocols: &[ProtocolUsage],
    top: Option<&RecommendationRecord>,
    architecture: Architecture,
) -> String {
    if protocols.is_empty() {
        return "No communication protocols detected. This project may not yet implement network communication."
            .to_string();
    }

    let names: Vec<&str> = protocols.iter().map(|p| p.key.as_str()).collect();
    let mut summary = format!(
        "Architecture: {}. Detected protocols: {}. ",
        architecture,
        names.join(", ")
    );
    if let Some(top) = top {
        summary.push_str(&format!(
            "Recommended approach: {} (score: {:.0}/100). ",
            top.protocol, top.score
        ));
        if let Some(first) = top.rationale.first() {
            summary.push_str(&format!("Rationale: {first}."));
        }
    }
    summary.trim_end().to_string()
}
