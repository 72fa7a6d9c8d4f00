use std::fs;
use std::path::{Path, PathBuf};

use super::core::ProtomapConfig;
use crate::errors::{Error, Result};

pub const CONFIG_FILE_NAME: &str = ".protomap.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Parse config from a TOML string
pub fn parse_config(contents: &str) -> Result<ProtomapConfig> {
    Ok(toml::from_str::<ProtomapConfig>(contents)?)
}

/// Load an explicitly requested config file; missing or malformed is an error
pub fn load_config_from(path: &Path) -> Result<ProtomapConfig> {
    let contents = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    parse_config(&contents)
        .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
}

/// Try one candidate location, logging anything other than absence
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<ProtomapConfig> {
    let contents = match fs::read_to_string(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!(
                "Ignoring invalid config {}: {}. Using defaults.",
                config_path.display(),
                e
            );
            None
        }
    }
}

fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    // Only log actual errors, not "file not found"
    if error.kind() != std::io::ErrorKind::NotFound {
        log::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// `start` and its parents, nearest first, at most `max_depth` of them
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Find the nearest `.protomap.toml` at or above `start`
pub fn discover_config(start: PathBuf) -> ProtomapConfig {
    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            ProtomapConfig::default()
        })
}

/// Discover config starting from the current directory
pub fn load_config() -> ProtomapConfig {
    match std::env::current_dir() {
        Ok(dir) => discover_config(dir),
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            ProtomapConfig::default()
        }
    }
}
