use crate::analyzer::ProtocolAnalyzer;
use crate::config::ScanConfig;
use crate::io::{self, output, OutputFormat};
use crate::recommendation::Requirement;
use anyhow::Result;
use std::path::PathBuf;

pub struct AnalyzeConfig {
    pub path: PathBuf,
    pub requirement: Requirement,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub scan: ScanConfig,
}

pub fn handle_analyze(config: AnalyzeConfig) -> Result<()> {
    let analyzer = ProtocolAnalyzer::with_config(config.scan)?;
    let result = analyzer.analyze(&config.path, config.requirement)?;

    match config.output {
        Some(output_path) => {
            let report = output::render(config.format, |w| w.write_analysis(&result))?;
            io::write_file(&output_path, &report)?;
            println!("[OK] Report saved to: {}", output_path.display());
        }
        None => {
            let mut writer = output::create_writer(config.format);
            writer.write_analysis(&result)?;
        }
    }

    Ok(())
}
