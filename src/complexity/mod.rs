//! Protocol complexity and migration cost model
//!
//! ```text
//! scale            = 1 + min(1, total_matches / 500)        1.0 - 2.0
//! confidence       = 0.5 + 0.5 * mean(confidence)           0.5 - 1.0
//! spread           = 1 + min(0.5, file_count / 20)          1.0 - 1.5
//! score            = clamp(base * scale * confidence * spread * 10, 0, 100)
//! ```
//!
//! Every factor is non-decreasing in its input, so the score never drops
//! when usage grows.

use crate::aggregation::UsageSummary;
use crate::catalog::Catalog;
use crate::scanner::Detection;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Score for protocols the catalog does not know
pub const UNKNOWN_PROTOCOL_SCORE: f64 = 50.0;

const SCALE_MATCHES: f64 = 500.0;
const SPREAD_FILES: f64 = 20.0;
const MAX_SPREAD_BONUS: f64 = 0.5;

/// Coarse migration effort tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MigrationComplexity {
    Low,
    Medium,
    High,
}

impl MigrationComplexity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }

    /// Baseline effort in hours, before scaling by file count
    pub fn hour_range(&self) -> (f64, f64) {
        match self {
            Self::Low => (0.5, 2.0),
            Self::Medium => (2.0, 8.0),
            Self::High => (8.0, 40.0),
        }
    }
}

impl fmt::Display for MigrationComplexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Complexity scoring against a catalog
#[derive(Debug, Clone, Copy)]
pub struct ComplexityModel<'a> {
    catalog: &'a Catalog,
}

impl<'a> ComplexityModel<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Normalized 0-100 complexity of one protocol's usage
    pub fn complexity_score(
        &self,
        protocol: &str,
        detections: &[Detection],
        file_count: usize,
        total_matches: usize,
    ) -> f64 {
        let Some(desc) = self.catalog.lookup(protocol) else {
            return UNKNOWN_PROTOCOL_SCORE;
        };

        let base = f64::from(desc.complexity_base);
        let scale = 1.0 + (total_matches as f64 / SCALE_MATCHES).min(1.0);
        let confidence_factor = if detections.is_empty() {
            0.5
        } else {
            let mean = detections.iter().map(|d| d.confidence).sum::<f64>()
                / detections.len() as f64;
            0.5 + mean * 0.5
        };
        let spread = 1.0 + (file_count as f64 / SPREAD_FILES).min(MAX_SPREAD_BONUS);

        (base * scale * confidence_factor * spread * 10.0).clamp(0.0, 100.0)
    }

    pub fn score_summary(&self, summary: &UsageSummary) -> f64 {
        self.complexity_score(
            &summary.protocol,
            &summary.detections,
            summary.file_count(),
            summary.total_matches,
        )
    }

    /// Effort tier for moving `current_usage` references from one protocol to another.
    ///
    /// Staying within a category is cheaper; unknown keys are `Medium`.
    pub fn migration_complexity(
        &self,
        from: &str,
        to: &str,
        current_usage: usize,
    ) -> MigrationComplexity {
        let (Some(from), Some(to)) = (self.catalog.lookup(from), self.catalog.lookup(to)) else {
            return MigrationComplexity::Medium;
        };

        if from.category == to.category {
            match current_usage {
                0..=9 => MigrationComplexity::Low,
                10..=49 => MigrationComplexity::Medium,
                _ => MigrationComplexity::High,
            }
        } else if current_usage < 5 {
            MigrationComplexity::Medium
        } else {
            MigrationComplexity::High
        }
    }
}

/// Human-readable effort estimate for a tier across `file_count` files.
///
/// Hour ranges scale by `1 + file_count / 10`; the upper bound picks the
/// unit (hours below 4h, days of 8h below 16h, otherwise weeks of 40h).
pub fn migration_time(tier: MigrationComplexity, file_count: usize) -> String {
    let (min_hours, max_hours) = tier.hour_range();
    let multiplier = 1.0 + file_count as f64 / 10.0;
    let (min_h, max_h) = (min_hours * multiplier, max_hours * multiplier);

    if max_h < 1.0 {
        "< 1 hour".to_string()
    } else if max_h < 4.0 {
        format!("{:.0}-{:.0} hours", min_h, max_h)
    } else if max_h < 16.0 {
        format!("{:.1}-{:.1} days", min_h / 8.0, max_h / 8.0)
    } else {
        format!("{:.1}-{:.1} weeks", min_h / 40.0, max_h / 40.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn detections(confidences: &[f64]) -> Vec<Detection> {
        confidences
            .iter()
            .map(|&confidence| Detection {
                protocol: "websocket".to_string(),
                file_path: PathBuf::from("a.js"),
                line_number: 1,
                pattern_matched: "x".to_string(),
                confidence,
                context: String::new(),
            })
            .collect()
    }

    #[test]
    fn unknown_protocol_is_neutral() {
        let catalog = Catalog::builtin();
        let model = ComplexityModel::new(&catalog);
        assert_eq!(model.complexity_score("carrier_pigeon", &[], 3, 10), 50.0);
    }

    #[test]
    fn websocket_light_usage_is_low() {
        let catalog = Catalog::builtin();
        let model = ComplexityModel::new(&catalog);
        let score = model.complexity_score("websocket", &detections(&[0.9; 10]), 2, 10);
        assert!((score - 3.0 * 1.02 * 0.95 * 1.1 * 10.0).abs() < 1e-9);
        assert!(score < 50.0);
    }

    #[test]
    fn grpc_heavy_usage_clamps_to_100() {
        let catalog = Catalog::builtin();
        let model = ComplexityModel::new(&catalog);
        let score = model.complexity_score("grpc", &detections(&[1.0; 4]), 40, 1000);
        assert_eq!(score, 100.0);
    }

    #[test]
    fn no_detections_uses_half_confidence() {
        let catalog = Catalog::builtin();
        let model = ComplexityModel::new(&catalog);
        let score = model.complexity_score("sse", &[], 0, 0);
        assert!((score - 10.0).abs() < 1e-9);
    }

    #[test]
    fn migration_same_category_tiers() {
        let catalog = Catalog::builtin();
        let model = ComplexityModel::new(&catalog);
        assert_eq!(
            model.migration_complexity("websocket", "socket.io", 9),
            MigrationComplexity::Low
        );
        assert_eq!(
            model.migration_complexity("websocket", "socket.io", 10),
            MigrationComplexity::Medium
        );
        assert_eq!(
            model.migration_complexity("websocket", "socket.io", 49),
            MigrationComplexity::Medium
        );
        assert_eq!(
            model.migration_complexity("websocket", "socket.io", 50),
            MigrationComplexity::High
        );
    }

    #[test]
    fn migration_cross_category_tiers() {
        let catalog = Catalog::builtin();
        let model = ComplexityModel::new(&catalog);
        assert_eq!(
            model.migration_complexity("http_rest", "grpc", 50),
            MigrationComplexity::High
        );
        assert_eq!(
            model.migration_complexity("http_rest", "grpc", 4),
            MigrationComplexity::Medium
        );
        assert_eq!(
            model.migration_complexity("http_rest", "grpc", 5),
            MigrationComplexity::High
        );
    }

    #[test]
    fn migration_unknown_is_medium() {
        let catalog = Catalog::builtin();
        let model = ComplexityModel::new(&catalog);
        assert_eq!(
            model.migration_complexity("smoke_signals", "grpc", 500),
            MigrationComplexity::Medium
        );
    }

    #[test]
    fn migration_time_units() {
        assert_eq!(migration_time(MigrationComplexity::Low, 2), "1-2 hours");
        assert_eq!(migration_time(MigrationComplexity::Low, 10), "0.1-0.5 days");
        assert_eq!(migration_time(MigrationComplexity::Medium, 5), "0.4-1.5 days");
        assert_eq!(migration_time(MigrationComplexity::High, 0), "0.2-1.0 weeks");
        assert!(migration_time(MigrationComplexity::Low, 0).contains("hour"));
    }

    #[test]
    fn tiers_serialize_uppercase() {
        assert_eq!(
            serde_json::to_string(&MigrationComplexity::High).unwrap(),
            "\"HIGH\""
        );
    }
}
