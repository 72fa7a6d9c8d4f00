//! Recommendation ranking
//!
//! Every catalog protocol is scored against the detected usage and a
//! requirement category. Scores start at 50 and move by fixed bonuses and
//! penalties; each rule that fires leaves a rationale line behind so the
//! ranking can be explained.

use crate::aggregation::{UsageMap, UsageSummary};
use crate::catalog::{Catalog, Category, ProtocolDescriptor};
use crate::complexity::{migration_time, ComplexityModel, MigrationComplexity};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const BASE_SCORE: f64 = 50.0;
const REQUIREMENT_MATCH_BONUS: f64 = 20.0;
const REALTIME_FIT_BONUS: f64 = 15.0;
const MAX_USAGE_BONUS: usize = 25;
const COMPLEXITY_PENALTY_PER_LEVEL: f64 = 3.0;
const COMPLEXITY_RATIONALE_THRESHOLD: f64 = 15.0;
const SAME_CATEGORY_BONUS: f64 = 10.0;
const SIMPLICITY_BONUS: f64 = 10.0;
const SIMPLE_COMPLEXITY_BASE: u8 = 3;

/// Communication requirement a ranking is made for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Requirement {
    /// Infer the category from detected usage
    #[default]
    Auto,
    Category(Category),
}

impl FromStr for Requirement {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("auto") {
            Ok(Requirement::Auto)
        } else {
            s.parse().map(Requirement::Category)
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Requirement::Auto => f.write_str("auto"),
            Requirement::Category(category) => category.fmt(f),
        }
    }
}

impl From<Category> for Requirement {
    fn from(category: Category) -> Self {
        Requirement::Category(category)
    }
}

/// A scored candidate protocol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRecord {
    /// Display name
    pub protocol: String,
    /// Within `0..=100`
    pub score: f64,
    /// One line per scoring rule that fired, in rule order
    pub rationale: Vec<String>,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub migration_complexity: MigrationComplexity,
    pub estimated_time: String,
}

pub struct Ranker<'a> {
    catalog: &'a Catalog,
    model: ComplexityModel<'a>,
}

impl<'a> Ranker<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            model: ComplexityModel::new(catalog),
        }
    }

    /// Rank the whole catalog, best first.
    ///
    /// The sort is stable, so equal scores keep catalog order.
    pub fn rank(&self, usage: &UsageMap, requirement: Category) -> Vec<RecommendationRecord> {
        let detected: Vec<&ProtocolDescriptor> = self
            .catalog
            .iter()
            .filter(|desc| usage.contains_key(desc.key))
            .collect();
        let main = self.most_used(usage);

        let mut records: Vec<RecommendationRecord> = self
            .catalog
            .iter()
            .map(|desc| {
                let (score, rationale) = score_candidate(desc, usage, &detected, requirement);
                let (migration_complexity, estimated_time) = self.migration_cost(desc, usage, main);
                RecommendationRecord {
                    protocol: desc.name.to_string(),
                    score,
                    rationale,
                    pros: desc.pros.iter().map(|s| s.to_string()).collect(),
                    cons: desc.cons.iter().map(|s| s.to_string()).collect(),
                    migration_complexity,
                    estimated_time,
                }
            })
            .collect();

        records.sort_by(|a, b| b.score.total_cmp(&a.score));
        tracing::debug!(
            "Ranked {} protocols for {} requirement",
            records.len(),
            requirement
        );
        records
    }

    /// Detected protocol with the most matches; earlier catalog entries win ties
    fn most_used<'u>(&self, usage: &'u UsageMap) -> Option<&'u UsageSummary> {
        self.catalog
            .iter()
            .filter_map(|desc| usage.get(desc.key))
            .fold(None, |best: Option<&UsageSummary>, summary| match best {
                Some(b) if b.total_matches >= summary.total_matches => Some(b),
                _ => Some(summary),
            })
    }

    fn migration_cost(
        &self,
        candidate: &ProtocolDescriptor,
        usage: &UsageMap,
        main: Option<&UsageSummary>,
    ) -> (MigrationComplexity, String) {
        if usage.contains_key(candidate.key) {
            return (MigrationComplexity::Low, "< 1 hour".to_string());
        }
        match main {
            Some(main) => {
                let tier = self.model.migration_complexity(
                    &main.protocol,
                    candidate.key,
                    main.total_matches,
                );
                (tier, migration_time(tier, main.file_count()))
            }
            None => (MigrationComplexity::Medium, "2-4 hours".to_string()),
        }
    }
}

fn score_candidate(
    desc: &ProtocolDescriptor,
    usage: &UsageMap,
    detected: &[&ProtocolDescriptor],
    requirement: Category,
) -> (f64, Vec<String>) {
    let mut score = BASE_SCORE;
    let mut rationale = Vec::new();

    if desc.category == requirement {
        score += REQUIREMENT_MATCH_BONUS;
        rationale.push(format!("Matches requirement: {requirement}"));
    } else if requirement == Category::Realtime
        && matches!(desc.category, Category::Realtime | Category::Streaming)
    {
        score += REALTIME_FIT_BONUS;
        rationale.push("Good for real-time communication".to_string());
    }

    if let Some(summary) = usage.get(desc.key) {
        score += (summary.total_matches.saturating_mul(2)).min(MAX_USAGE_BONUS) as f64;
        rationale.push(format!(
            "Already in use ({} references found)",
            summary.total_matches
        ));
    }

    let penalty = f64::from(desc.complexity_base.saturating_sub(1)) * COMPLEXITY_PENALTY_PER_LEVEL;
    score -= penalty;
    if penalty > COMPLEXITY_RATIONALE_THRESHOLD {
        rationale.push(format!(
            "Higher complexity (base: {}/10)",
            desc.complexity_base
        ));
    }

    // May cite the candidate itself when it is in use
    if let Some(existing) = detected.iter().find(|d| d.category == desc.category) {
        score += SAME_CATEGORY_BONUS;
        rationale.push(format!("Same category as existing {}", existing.key));
    }

    if desc.complexity_base <= SIMPLE_COMPLEXITY_BASE {
        score += SIMPLICITY_BONUS;
        rationale.push("Simple, low-overhead protocol".to_string());
    }

    if rationale.is_empty() {
        rationale.push("Standard option".to_string());
    }

    (score.clamp(0.0, 100.0), rationale)
}
