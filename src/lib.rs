//! Communication protocol usage analysis.
//!
//! protomap scans a source tree for signs of WebSocket, Socket.IO, HTTP/REST,
//! long-polling, gRPC, GraphQL, SSE and MQTT usage, scores how complex that
//! usage is, and ranks candidate protocols for a communication requirement.
//!
//! ```no_run
//! use protomap::{ProtocolAnalyzer, Requirement};
//! use std::path::Path;
//!
//! let analyzer = ProtocolAnalyzer::new()?;
//! let result = analyzer.analyze(Path::new("."), Requirement::Auto)?;
//! println!("{}", result.summary);
//! # Ok::<(), protomap::Error>(())
//! ```

// Export modules for library usage
pub mod aggregation;
pub mod analyzer;
pub mod catalog;
pub mod cli;
pub mod commands;
pub mod complexity;
pub mod config;
pub mod errors;
pub mod io;
pub mod migration;
pub mod observability;
pub mod recommendation;
pub mod scanner;

// Re-export commonly used types
pub use crate::aggregation::{Aggregator, UsageMap, UsageSummary};
pub use crate::analyzer::{AnalysisResult, Architecture, ProtocolAnalyzer, ProtocolUsage};
pub use crate::catalog::{Catalog, Category, Comparison, ComparisonEntry, ProtocolDescriptor};
pub use crate::complexity::{migration_time, ComplexityModel, MigrationComplexity};
pub use crate::config::{ProtomapConfig, ScanConfig};
pub use crate::errors::{Error, Result};
pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};
pub use crate::migration::{MigrationAdvisor, MigrationDifficulty, MigrationGuide, MigrationOutcome};
pub use crate::recommendation::{Ranker, RecommendationRecord, Requirement};
pub use crate::scanner::{Detection, Scanner};
