use crate::io::OutputFormat;
use serde::{Deserialize, Serialize};

/// Root configuration structure for protomap (`.protomap.toml`)
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ProtomapConfig {
    /// Scanner configuration
    #[serde(default)]
    pub scan: ScanConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Scanner tuning.
///
/// The defaults reproduce the built-in skip-set and extension list with
/// sequential scanning.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ScanConfig {
    /// Directory or file names pruned in addition to the built-in skip-set
    #[serde(default)]
    pub extra_skip_dirs: Vec<String>,

    /// Extensions scanned in addition to the built-in list
    #[serde(default)]
    pub extra_extensions: Vec<String>,

    /// Scan files on the rayon pool; output is identical to sequential scanning
    #[serde(default)]
    pub parallel: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct OutputConfig {
    /// Format used when `--format` is not given
    #[serde(default)]
    pub default_format: Option<OutputFormat>,
}

/// Contents written by `protomap init`
pub const DEFAULT_CONFIG_TOML: &str = r#"# Protomap Configuration

[scan]
# Names pruned in addition to node_modules, target, vendor, .git, ...
extra_skip_dirs = []
# Extensions scanned in addition to py, js, ts, jsx, tsx, java, go, rs
extra_extensions = []
# Scan files in parallel (results are identical)
parallel = false

[output]
# json | markdown | text
default_format = "text"
"#;
