//! Pairwise migration guidance between catalog protocols

use crate::catalog::{Catalog, ProtocolDescriptor};
use crate::complexity::{migration_time, MigrationComplexity};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Files assumed when estimating a standalone migration
const GUIDE_FILE_COUNT: usize = 10;
/// Every guide is estimated from the same effort range, whatever its difficulty
const GUIDE_EFFORT: MigrationComplexity = MigrationComplexity::Medium;
const DIFFICULTY_SPREAD: i16 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MigrationDifficulty {
    Easy,
    Moderate,
    Hard,
}

impl MigrationDifficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "EASY",
            Self::Moderate => "MODERATE",
            Self::Hard => "HARD",
        }
    }

    fn between(from: &ProtocolDescriptor, to: &ProtocolDescriptor) -> Self {
        if from.category == to.category {
            return Self::Moderate;
        }
        let diff = i16::from(to.complexity_base) - i16::from(from.complexity_base);
        if diff > DIFFICULTY_SPREAD {
            Self::Hard
        } else if diff < -DIFFICULTY_SPREAD {
            Self::Easy
        } else {
            Self::Moderate
        }
    }
}

impl fmt::Display for MigrationDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MigrationGuide {
    /// Source display name
    pub from: String,
    /// Target display name
    pub to: String,
    pub difficulty: MigrationDifficulty,
    pub estimated_time: String,
    pub steps: Vec<String>,
    pub considerations: Vec<String>,
    pub breaking_changes: Vec<String>,
}

/// A guide, or the reason none could be produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MigrationOutcome {
    Guide(MigrationGuide),
    NotFound { error: String },
}

impl MigrationOutcome {
    pub fn guide(&self) -> Option<&MigrationGuide> {
        match self {
            MigrationOutcome::Guide(guide) => Some(guide),
            MigrationOutcome::NotFound { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            MigrationOutcome::Guide(_) => None,
            MigrationOutcome::NotFound { error } => Some(error),
        }
    }
}

pub struct MigrationAdvisor<'a> {
    catalog: &'a Catalog,
}

impl<'a> MigrationAdvisor<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Build a guide for moving from one protocol to another.
    ///
    /// Names go through the same resolution as comparisons; an unknown name
    /// yields [`MigrationOutcome::NotFound`] rather than an error.
    pub fn guide(&self, from: &str, to: &str) -> MigrationOutcome {
        let Some(source) = self.catalog.resolve(from) else {
            return MigrationOutcome::NotFound {
                error: format!("Source protocol not found: {from}"),
            };
        };
        let Some(target) = self.catalog.resolve(to) else {
            return MigrationOutcome::NotFound {
                error: format!("Target protocol not found: {to}"),
            };
        };

        let difficulty = MigrationDifficulty::between(source, target);
        tracing::debug!(
            "Migration {} -> {} rated {}",
            source.key,
            target.key,
            difficulty
        );

        MigrationOutcome::Guide(MigrationGuide {
            from: source.name.to_string(),
            to: target.name.to_string(),
            difficulty,
            estimated_time: migration_time(GUIDE_EFFORT, GUIDE_FILE_COUNT),
            steps: steps(source, target),
            considerations: considerations(source, target),
            breaking_changes: vec![
                "API differences will require code changes".to_string(),
                "Configuration format may differ".to_string(),
                "Error handling patterns may differ".to_string(),
            ],
        })
    }
}

fn steps(from: &ProtocolDescriptor, to: &ProtocolDescriptor) -> Vec<String> {
    let deps = first_two(to.dependencies);
    vec![
        format!("1. Review all {} usage in codebase", from.name),
        format!("2. Install {} dependencies: {}", to.name, deps),
        format!("3. Create adapter/wrapper for {} connections", to.name),
        "4. Migrate connection initialization code".to_string(),
        "5. Update event handlers/callbacks".to_string(),
        "6. Test all communication paths".to_string(),
        format!("7. Remove {} dependencies", from.name),
        "8. Update documentation".to_string(),
    ]
}

fn considerations(from: &ProtocolDescriptor, to: &ProtocolDescriptor) -> Vec<String> {
    let category = if from.category == to.category {
        "Same category - patterns similar".to_string()
    } else {
        format!("Category change: {} -> {}", from.category, to.category)
    };
    vec![
        category,
        format!("New pros: {}", first_two(to.pros)),
        format!("New cons: {}", first_two(to.cons)),
    ]
}

fn first_two(items: &[&str]) -> String {
    items.iter().take(2).copied().collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rest_to_grpc_is_hard() {
        let catalog = Catalog::builtin();
        let outcome = MigrationAdvisor::new(&catalog).guide("http_rest", "grpc");
        let guide = outcome.guide().unwrap();
        assert_eq!(guide.from, "HTTP/REST");
        assert_eq!(guide.to, "gRPC");
        // 7 - 2 > 3
        assert_eq!(guide.difficulty, MigrationDifficulty::Hard);
        assert_eq!(
            guide.considerations[0],
            "Category change: request-response -> rpc"
        );
        assert_eq!(guide.steps.len(), 8);
        assert_eq!(guide.steps[1], "2. Install gRPC dependencies: grpcio, grpc");
        assert_eq!(guide.steps[6], "7. Remove HTTP/REST dependencies");
        assert_eq!(guide.breaking_changes.len(), 3);
    }

    #[test]
    fn same_category_is_moderate() {
        let catalog = Catalog::builtin();
        let outcome = MigrationAdvisor::new(&catalog).guide("websocket", "socket.io");
        let guide = outcome.guide().unwrap();
        assert_eq!(guide.difficulty, MigrationDifficulty::Moderate);
        assert_eq!(guide.considerations[0], "Same category - patterns similar");
        assert_eq!(
            guide.estimated_time,
            migration_time(MigrationComplexity::Medium, 10)
        );
    }

    #[test]
    fn simpler_target_across_categories_is_easy() {
        let catalog = Catalog::builtin();
        let outcome = MigrationAdvisor::new(&catalog).guide("grpc", "sse");
        assert_eq!(
            outcome.guide().unwrap().difficulty,
            MigrationDifficulty::Easy
        );
    }

    #[test]
    fn estimate_does_not_depend_on_difficulty() {
        let catalog = Catalog::builtin();
        let advisor = MigrationAdvisor::new(&catalog);

        let easy = advisor.guide("grpc", "sse");
        let hard = advisor.guide("http_rest", "grpc");
        let moderate = advisor.guide("websocket", "mqtt");

        assert_eq!(easy.guide().unwrap().difficulty, MigrationDifficulty::Easy);
        assert_eq!(hard.guide().unwrap().difficulty, MigrationDifficulty::Hard);
        for outcome in [&easy, &hard, &moderate] {
            assert_eq!(outcome.guide().unwrap().estimated_time, "0.1-0.4 weeks");
        }
    }

    #[test]
    fn names_are_resolved_loosely() {
        let catalog = Catalog::builtin();
        let outcome = MigrationAdvisor::new(&catalog).guide("Socket IO", "WEBSOCKET");
        let guide = outcome.guide().unwrap();
        assert_eq!(guide.from, "Socket.IO");
        assert_eq!(guide.to, "WebSocket");
    }

    #[test]
    fn unknown_source_reported_first() {
        let catalog = Catalog::builtin();
        let advisor = MigrationAdvisor::new(&catalog);
        assert_eq!(
            advisor.guide("carrier_pigeon", "zzz").error(),
            Some("Source protocol not found: carrier_pigeon")
        );
        assert_eq!(
            advisor.guide("grpc", "zzz").error(),
            Some("Target protocol not found: zzz")
        );
    }

    #[test]
    fn not_found_serializes_as_error_object() {
        let outcome = MigrationOutcome::NotFound {
            error: "Source protocol not found: x".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&outcome).unwrap(),
            r#"{"error":"Source protocol not found: x"}"#
        );
    }
}
