pub mod output;
pub mod walker;

pub use output::{create_writer, OutputFormat, OutputWriter};
pub use walker::{FileWalker, DEFAULT_EXTENSIONS, DEFAULT_SKIP_DIRS};

use crate::errors::{Error, Result};
use std::fs;
use std::path::Path;

/// Read a file as text, replacing any byte sequence that is not valid UTF-8.
pub fn read_lossy(path: &Path) -> std::io::Result<String> {
    let bytes = fs::read(path)?;
    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    })
}

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| Error::io(path, e))
}
