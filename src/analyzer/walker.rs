use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

use super::exclude::ExclusionRules;
use super::records::{ExcludedFile, ExclusionReason};
use crate::error::{CensusError, Result};

/// Configuration for file discovery
#[derive(Debug, Clone)]
pub struct FilterConfig {
    /// Whether to include hidden files and directories
    pub include_hidden: bool,

    /// Follow symbolic links
    pub follow_symlinks: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            include_hidden: false,
            follow_symlinks: true,
        }
    }
}

/// Statistics about the file discovery process
#[derive(Debug, Default)]
pub struct WalkStats {
    pub total_entries_scanned: usize,
    pub directories_scanned: usize,
    pub files_found: usize,
    pub files_excluded: usize,
    pub files_skipped_language: usize,
    pub errors_encountered: usize,
}

impl WalkStats {
    /// Get a summary of the walk statistics
    pub fn summary(&self) -> String {
        format!(
            "Scanned {} entries, found {} Python files, excluded {}, {} errors",
            self.total_entries_scanned, self.files_found, self.files_excluded,
            self.errors_encountered
        )
    }
}

/// Result of discovery: candidate files plus the exclusion manifest
/// entries produced by path-pattern matching
#[derive(Debug)]
pub struct Discovery {
    pub files: Vec<PathBuf>,
    pub excluded: Vec<ExcludedFile>,
    pub stats: WalkStats,
}

/// Python file walker with gitignore support.
///
/// The walk itself is serial and the discovered paths are sorted, so
/// the manifest and every downstream report come out in the same order
/// run after run.
pub struct FileWalker {
    filter_config: FilterConfig,
}

impl FileWalker {
    /// Create a new file walker with default configuration
    pub fn new() -> Self {
        Self {
            filter_config: FilterConfig::default(),
        }
    }

    /// Create a file walker with custom filter configuration
    pub fn with_config(filter_config: FilterConfig) -> Self {
        Self { filter_config }
    }

    /// Get a reference to the filter configuration
    pub fn filter_config(&self) -> &FilterConfig {
        &self.filter_config
    }

    /// Discover Python files under a root, applying path-exclusion rules
    pub fn discover<P: AsRef<Path>>(&self, root: P, rules: &ExclusionRules) -> Result<Discovery> {
        let root = root.as_ref();

        if !root.exists() {
            return Err(CensusError::invalid_path(root));
        }

        // Handle single file analysis
        if root.is_file() {
            return self.discover_single_file(root, rules);
        }

        let mut builder = WalkBuilder::new(root);
        builder
            .hidden(!self.filter_config.include_hidden)
            .follow_links(self.filter_config.follow_symlinks)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .sort_by_file_path(|a, b| a.cmp(b));

        let mut files = Vec::new();
        let mut excluded = Vec::new();
        let mut stats = WalkStats::default();

        for result in builder.build() {
            stats.total_entries_scanned += 1;

            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    stats.errors_encountered += 1;
                    // Broken symlinks and unreadable files carry a
                    // path; those belong in the manifest like any
                    // other excluded file. Pathless errors only go to
                    // stderr.
                    match walk_error_path(&err) {
                        Some(path) if is_python_file(path) => {
                            stats.files_excluded += 1;
                            excluded.push(ExcludedFile {
                                path: path.to_path_buf(),
                                reason: ExclusionReason::Io {
                                    message: err.to_string(),
                                },
                            });
                        }
                        _ => eprintln!("Walk error: {err}"),
                    }
                    continue;
                }
            };

            let path = entry.path();
            if path.is_dir() {
                stats.directories_scanned += 1;
                continue;
            }

            if !is_python_file(path) {
                stats.files_skipped_language += 1;
                continue;
            }

            match rules.match_path(&path.to_string_lossy()) {
                Some(pattern) => {
                    stats.files_excluded += 1;
                    excluded.push(ExcludedFile {
                        path: path.to_path_buf(),
                        reason: ExclusionReason::PathPattern {
                            pattern: pattern.to_string(),
                        },
                    });
                }
                None => {
                    stats.files_found += 1;
                    files.push(path.to_path_buf());
                }
            }
        }

        // sort_by_file_path covers most of this, but symlinked
        // subtrees can still interleave
        files.sort();
        excluded.sort_by(|a, b| a.path.cmp(&b.path));

        Ok(Discovery {
            files,
            excluded,
            stats,
        })
    }

    /// Handle a root that is itself a single file
    fn discover_single_file(&self, file_path: &Path, rules: &ExclusionRules) -> Result<Discovery> {
        let mut stats = WalkStats {
            total_entries_scanned: 1,
            ..Default::default()
        };

        if !is_python_file(file_path) {
            return Err(CensusError::validation_error(format!(
                "Not a Python file: {}",
                file_path.display()
            )));
        }

        if let Some(pattern) = rules.match_path(&file_path.to_string_lossy()) {
            stats.files_excluded = 1;
            return Ok(Discovery {
                files: Vec::new(),
                excluded: vec![ExcludedFile {
                    path: file_path.to_path_buf(),
                    reason: ExclusionReason::PathPattern {
                        pattern: pattern.to_string(),
                    },
                }],
                stats,
            });
        }

        stats.files_found = 1;
        Ok(Discovery {
            files: vec![file_path.to_path_buf()],
            excluded: Vec::new(),
            stats,
        })
    }
}

impl Default for FileWalker {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract the path a walk error refers to, if it carries one
fn walk_error_path(err: &ignore::Error) -> Option<&Path> {
    match err {
        ignore::Error::WithPath { path, .. } => Some(path),
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
            walk_error_path(err)
        }
        _ => None,
    }
}

/// Check for a Python source extension
fn is_python_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| matches!(ext.to_lowercase().as_str(), "py" | "pyw" | "py3"))
        .unwrap_or(false)
}
