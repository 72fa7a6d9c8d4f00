//! Weighted-pattern source scanner
//!
//! Walks a tree (or reads a single file), matches every catalog pattern
//! against every line independently and emits one [`Detection`] per hit.
//! Matching is purely lexical; false positives are expected.
//!
//! Detections come out grouped by file (walk order), then by catalog
//! protocol, then by pattern, then by line. Aggregation does not depend on
//! this order, but reports list detections in it.

pub mod patterns;

pub use patterns::{PatternEntry, PatternTable};

use crate::catalog::Catalog;
use crate::config::ScanConfig;
use crate::errors::{Error, Result};
use crate::io::{read_lossy, FileWalker};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Lines of context kept on each side of a matching line
pub const CONTEXT_RADIUS: usize = 2;

/// A single pattern match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Catalog key of the protocol
    pub protocol: String,
    pub file_path: PathBuf,
    /// 1-based
    pub line_number: usize,
    pub pattern_matched: String,
    pub confidence: f64,
    /// The matching line with up to two lines either side, newline-joined
    pub context: String,
}

pub struct Scanner {
    table: PatternTable,
    config: ScanConfig,
}

impl Scanner {
    pub fn new(catalog: &Catalog) -> Result<Self> {
        Self::with_config(catalog, ScanConfig::default())
    }

    pub fn with_config(catalog: &Catalog, config: ScanConfig) -> Result<Self> {
        Ok(Self {
            table: PatternTable::compile(catalog)?,
            config,
        })
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Scan a directory tree or a single file.
    ///
    /// Fails only when `root` does not exist. Unreadable directories and
    /// files are skipped.
    pub fn scan(&self, root: &Path) -> Result<Vec<Detection>> {
        if !root.exists() {
            return Err(Error::not_found(root));
        }

        let _span = tracing::debug_span!("scan", root = %root.display()).entered();

        let files = FileWalker::new(root.to_path_buf())
            .with_skip_dirs(self.config.extra_skip_dirs.iter().cloned())
            .with_extensions(self.config.extra_extensions.iter().cloned())
            .walk();
        tracing::debug!("Scanning {} files", files.len());

        let per_file: Vec<Vec<Detection>> = if self.config.parallel {
            files.par_iter().map(|file| self.scan_file(file)).collect()
        } else {
            files.iter().map(|file| self.scan_file(file)).collect()
        };

        let detections: Vec<Detection> = per_file.into_iter().flatten().collect();
        tracing::info!(
            "Found {} detections in {} files under {}",
            detections.len(),
            files.len(),
            root.display()
        );
        Ok(detections)
    }

    /// Scan one file, yielding nothing when it cannot be read
    pub fn scan_file(&self, path: &Path) -> Vec<Detection> {
        match read_lossy(path) {
            Ok(content) => self.scan_source(path, &content),
            Err(err) => {
                tracing::debug!("Skipping unreadable file {}: {}", path.display(), err);
                Vec::new()
            }
        }
    }

    /// Scan in-memory source text attributed to `path`
    pub fn scan_source(&self, path: &Path, content: &str) -> Vec<Detection> {
        let lines: Vec<&str> = content.split('\n').collect();

        let mut hits: Vec<(usize, usize)> = lines
            .iter()
            .enumerate()
            .flat_map(|(line_idx, line)| {
                self.table
                    .matching(line)
                    .map(move |entry_idx| (entry_idx, line_idx))
            })
            .collect();
        hits.sort_unstable();

        hits.into_iter()
            .map(|(entry_idx, line_idx)| {
                let entry = self.table.entry(entry_idx);
                Detection {
                    protocol: entry.protocol.to_string(),
                    file_path: path.to_path_buf(),
                    line_number: line_idx + 1,
                    pattern_matched: entry.pattern.to_string(),
                    confidence: entry.confidence,
                    context: context_window(&lines, line_idx),
                }
            })
            .collect()
    }
}

fn context_window(lines: &[&str], line_idx: usize) -> String {
    let start = line_idx.saturating_sub(CONTEXT_RADIUS);
    let end = (line_idx + CONTEXT_RADIUS + 1).min(lines.len());
    lines[start..end].join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    fn scanner() -> Scanner {
        Scanner::new(&Catalog::builtin()).unwrap()
    }

    #[test]
    fn detects_websocket_import_and_connect() {
        let source = indoc! {r#"
            import websocket

            ws = websocket.connect("ws://localhost:8080")
        "#};
        let detections = scanner().scan_source(Path::new("client.py"), source);
        let ws: Vec<_> = detections.iter().filter(|d| d.protocol == "websocket").collect();
        assert!(ws.len() >= 3);
        assert!(ws.iter().any(|d| d.line_number == 1));
        assert!(ws.iter().any(|d| d.line_number == 3));
    }

    #[test]
    fn context_window_is_clamped() {
        let lines = vec!["a", "b", "c", "d", "e", "f"];
        assert_eq!(context_window(&lines, 0), "a\nb\nc");
        assert_eq!(context_window(&lines, 3), "b\nc\nd\ne\nf");
        assert_eq!(context_window(&lines, 5), "d\ne\nf");
    }

    #[test]
    fn detections_ordered_by_protocol_pattern_line() {
        let source = "socket.emit('x')\nimport websocket\nimport websocket\n";
        let detections = scanner().scan_source(Path::new("a.js"), source);
        let order: Vec<_> = detections
            .iter()
            .map(|d| (d.protocol.as_str(), d.line_number))
            .collect();
        assert_eq!(order[0], ("websocket", 2));
        assert_eq!(order[1], ("websocket", 3));
        assert!(order.iter().any(|(p, l)| *p == "socket.io" && *l == 1));
        let first_socketio = order.iter().position(|(p, _)| *p == "socket.io").unwrap();
        assert!(order[..first_socketio].iter().all(|(p, _)| *p == "websocket"));
    }

    #[test]
    fn matches_do_not_span_lines() {
        let detections = scanner().scan_source(Path::new("a.js"), "setInterval(() =>\n fetch('/x'))");
        assert!(!detections
            .iter()
            .any(|d| d.pattern_matched == r"setInterval.*fetch"));
    }

    #[test]
    fn graphql_schema_reports_escaped_pattern() {
        let detections = scanner().scan_source(Path::new("schema.js"), "type Query {\n  items: [Item]\n}");
        let query = detections
            .iter()
            .find(|d| d.protocol == "graphql")
            .unwrap();
        assert_eq!(query.line_number, 1);
        assert_eq!(query.pattern_matched, r"type\s+Query\s*\{");
        assert_eq!(query.confidence, 0.9);
    }

    #[test]
    fn every_detection_has_valid_confidence_and_line() {
        let source = "new WebSocket('wss://a')\nrequests.get(url).json()\nmqtt.Client()\n";
        for d in scanner().scan_source(Path::new("x.py"), source) {
            assert!((0.0..=1.0).contains(&d.confidence));
            assert!(d.line_number >= 1);
        }
    }

    #[test]
    fn missing_root_is_not_found() {
        let err = scanner()
            .scan(Path::new("/definitely/not/a/real/protomap/path"))
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
