//! Per-protocol usage aggregation
//!
//! Folds raw detections into one [`UsageSummary`] per protocol and infers
//! whether the code around the matches acts as a client, a server, or both.
//! Role inference looks only at each detection's context window, never at
//! the whole file, so a role call just outside the window goes unnoticed.

use crate::errors::Result;
use crate::scanner::patterns::compile_set;
use crate::scanner::Detection;
use regex::RegexSet;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

/// Call shapes typical of the connecting side
pub const CLIENT_PATTERNS: &[&str] = &[
    r"connect\s*\(",
    r"\.send\s*\(",
    r"\.emit\s*\(",
    r"fetch\s*\(",
    r"axios\.",
    r"new\s+WebSocket",
    r"io\s*\(",
    r"EventSource",
];

/// Call shapes typical of the listening side
pub const SERVER_PATTERNS: &[&str] = &[
    r"listen\s*\(",
    r"serve\s*\(",
    r"app\.(get|post|put|delete)",
    r"@app\.",
    r"AsyncServer",
    r"Server\(",
    r"createServer",
    r"bind\s*\(",
];

/// Usage summaries keyed by protocol key
pub type UsageMap = BTreeMap<String, UsageSummary>;

/// Aggregated detection statistics for one protocol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageSummary {
    pub protocol: String,
    pub total_matches: usize,
    /// Files with at least one detection for this protocol
    pub files: BTreeSet<PathBuf>,
    pub max_confidence: f64,
    pub avg_confidence: f64,
    pub is_client: bool,
    pub is_server: bool,
    pub detections: Vec<Detection>,
    #[serde(skip)]
    confidence_sum: f64,
}

impl UsageSummary {
    fn new(protocol: &str) -> Self {
        Self {
            protocol: protocol.to_string(),
            total_matches: 0,
            files: BTreeSet::new(),
            max_confidence: 0.0,
            avg_confidence: 0.0,
            is_client: false,
            is_server: false,
            detections: Vec::new(),
            confidence_sum: 0.0,
        }
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    fn record(&mut self, detection: Detection, roles: &RoleMatcher) {
        self.total_matches += 1;
        self.files.insert(detection.file_path.clone());
        self.max_confidence = self.max_confidence.max(detection.confidence);
        self.confidence_sum += detection.confidence;
        if !self.is_client {
            self.is_client = roles.is_client(&detection.context);
        }
        if !self.is_server {
            self.is_server = roles.is_server(&detection.context);
        }
        self.detections.push(detection);
    }

    fn finish(&mut self) {
        if self.total_matches > 0 {
            self.avg_confidence = self.confidence_sum / self.total_matches as f64;
        }
    }
}

/// Client/server call-shape matcher applied to context windows
#[derive(Debug, Clone)]
pub struct RoleMatcher {
    client: RegexSet,
    server: RegexSet,
}

impl RoleMatcher {
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: compile_set(CLIENT_PATTERNS)?,
            server: compile_set(SERVER_PATTERNS)?,
        })
    }

    pub fn is_client(&self, context: &str) -> bool {
        self.client.is_match(context)
    }

    pub fn is_server(&self, context: &str) -> bool {
        self.server.is_match(context)
    }
}

/// Groups detections by protocol
#[derive(Debug, Clone)]
pub struct Aggregator {
    roles: RoleMatcher,
}

impl Aggregator {
    pub fn new() -> Result<Self> {
        Ok(Self {
            roles: RoleMatcher::new()?,
        })
    }

    /// Summarize detections per protocol.
    ///
    /// Protocols without detections are absent from the result.
    pub fn summarize(&self, detections: impl IntoIterator<Item = Detection>) -> UsageMap {
        let mut summaries = UsageMap::new();
        for detection in detections {
            summaries
                .entry(detection.protocol.clone())
                .or_insert_with(|| UsageSummary::new(&detection.protocol))
                .record(detection, &self.roles);
        }
        summaries.values_mut().for_each(UsageSummary::finish);
        summaries
    }
}
