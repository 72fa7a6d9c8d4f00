//! CLI command implementations for protomap.
//!
//! Each submodule handles one subcommand. Handlers return `anyhow::Result`
//! and print to stdout; logging goes to stderr.
//!
//! Available commands:
//! - **analyze**: detect protocols and rank recommendations
//! - **scan**: list raw detections
//! - **compare**: side-by-side catalog view
//! - **migrate**: pairwise migration guide
//! - **list**: known protocols
//! - **init**: write a default `.protomap.toml`

pub mod analyze;
pub mod compare;
pub mod init;
pub mod list;
pub mod migrate;
pub mod scan;

pub use analyze::{handle_analyze, AnalyzeConfig};
pub use compare::handle_compare;
pub use init::init_config;
pub use list::handle_list;
pub use migrate::handle_migrate;
pub use scan::handle_scan;

use crate::config::{self, ProtomapConfig};
use crate::io::OutputFormat;
use anyhow::{Context, Result};
use std::path::Path;

/// Explicit `--config` file, or discovery from the current directory
pub fn resolve_config(explicit: Option<&Path>) -> Result<ProtomapConfig> {
    match explicit {
        Some(path) => config::load_config_from(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(config::load_config()),
    }
}

/// `--format` if given, otherwise the configured default
pub fn effective_format(requested: Option<OutputFormat>, config: &ProtomapConfig) -> OutputFormat {
    requested
        .or(config.output.default_format)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requested_format_wins() {
        let mut config = ProtomapConfig::default();
        config.output.default_format = Some(OutputFormat::Markdown);
        assert_eq!(
            effective_format(Some(OutputFormat::Json), &config),
            OutputFormat::Json
        );
        assert_eq!(effective_format(None, &config), OutputFormat::Markdown);
        assert_eq!(
            effective_format(None, &ProtomapConfig::default()),
            OutputFormat::Text
        );
    }
}
