use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Build, dependency, cache and version-control directory names never descended into
pub const DEFAULT_SKIP_DIRS: &[&str] = &[
    "node_modules",
    "__pycache__",
    ".git",
    ".venv",
    "venv",
    "env",
    ".env",
    "dist",
    "build",
    ".cache",
    "coverage",
    ".pytest_cache",
    ".mypy_cache",
    "target",
    "vendor",
];

/// Source extensions (without the dot) that are scanned
pub const DEFAULT_EXTENSIONS: &[&str] = &["py", "js", "ts", "jsx", "tsx", "java", "go", "rs"];

const HIDDEN_MARKER: char = '.';

/// Collects the source files a scan should read.
///
/// Entries named in the skip-set or starting with `.` are pruned, whole
/// subtrees included. Only files with an allowed extension are returned.
/// Unreadable directories are skipped rather than failing the walk.
/// Symlinked files are followed; symlinked directories are not descended.
pub struct FileWalker {
    root: PathBuf,
    skip_dirs: Vec<String>,
    extensions: Vec<String>,
}

impl FileWalker {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            skip_dirs: DEFAULT_SKIP_DIRS.iter().map(|s| s.to_string()).collect(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Add names to the skip-set
    pub fn with_skip_dirs(mut self, names: impl IntoIterator<Item = String>) -> Self {
        self.skip_dirs.extend(names);
        self
    }

    /// Add extensions to the allow-list; a leading dot is ignored
    pub fn with_extensions(mut self, extensions: impl IntoIterator<Item = String>) -> Self {
        self.extensions.extend(
            extensions
                .into_iter()
                .map(|e| e.trim_start_matches('.').to_string()),
        );
        self
    }

    /// Walk the root and return matching files in a stable, name-sorted order.
    ///
    /// A root that is itself a file is returned as-is without the extension
    /// filter.
    pub fn walk(&self) -> Vec<PathBuf> {
        if self.root.is_file() {
            return vec![self.root.clone()];
        }

        let mut skipped = 0usize;
        let files: Vec<PathBuf> = WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !self.is_pruned(entry))
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(err) => {
                    skipped += 1;
                    tracing::debug!("Skipping unreadable entry: {}", err);
                    None
                }
            })
            .filter(|entry| is_regular_or_linked_file(entry))
            .filter(|entry| self.has_allowed_extension(entry.path()))
            .map(|entry| entry.into_path())
            .collect();

        if skipped > 0 {
            tracing::debug!("Skipped {} unreadable entries under {}", skipped, self.root.display());
        }

        files
    }

    fn is_pruned(&self, entry: &DirEntry) -> bool {
        let name = entry.file_name().to_string_lossy();
        name.starts_with(HIDDEN_MARKER) || self.skip_dirs.iter().any(|skip| skip.as_str() == name.as_ref())
    }

    fn has_allowed_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| self.extensions.iter().any(|allowed| allowed == ext))
            .unwrap_or(false)
    }
}

fn is_regular_or_linked_file(entry: &DirEntry) -> bool {
    if entry.file_type().is_file() {
        return true;
    }
    entry.path_is_symlink()
        && std::fs::metadata(entry.path())
            .map(|meta| meta.is_file())
            .unwrap_or(false)
}
