use crate::analyzer::ProtocolAnalyzer;
use crate::config::ScanConfig;
use crate::io::{output, OutputFormat};
use anyhow::Result;
use std::path::Path;

pub fn handle_scan(path: &Path, format: OutputFormat, scan: ScanConfig) -> Result<()> {
    let analyzer = ProtocolAnalyzer::with_config(scan)?;
    let detections = analyzer.scan(path)?;
    output::create_writer(format).write_detections(&detections)
}
