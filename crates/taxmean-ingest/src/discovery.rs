//! Input file discovery.

use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::{debug, trace};

use taxmean_model::ConfigError;

use crate::error::{IngestError, Result};

/// File extensions recognized as delimited text tables.
pub const TABLE_EXTENSIONS: [&str; 3] = ["csv", "tsv", "txt"];

/// Selects input files by name.
///
/// A filter is a regular expression matched anywhere in the file name, so a
/// plain substring such as `Silva` works as well.
#[derive(Debug, Clone, Default)]
pub struct FileFilter {
    pattern: Option<Regex>,
}

impl FileFilter {
    /// A filter that accepts every table file.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn new(pattern: Option<&str>) -> std::result::Result<Self, ConfigError> {
        let pattern = match pattern.filter(|p| !p.is_empty()) {
            Some(raw) => Some(Regex::new(raw).map_err(|e| ConfigError::InvalidPattern {
                option: "file filter",
                pattern: raw.to_string(),
                message: e.to_string(),
            })?),
            None => None,
        };
        Ok(Self { pattern })
    }

    pub fn matches(&self, file_name: &str) -> bool {
        self.pattern
            .as_ref()
            .is_none_or(|pattern| pattern.is_match(file_name))
    }

    pub fn describe(&self) -> String {
        self.pattern
            .as_ref()
            .map(|p| p.as_str().to_string())
            .unwrap_or_else(|| "*".to_string())
    }
}

fn is_table_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            TABLE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

fn walk(dir: &Path, filter: &FileFilter, files: &mut Vec<PathBuf>) -> Result<()> {
    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();

        if path.is_dir() {
            walk(&path, filter, files)?;
            continue;
        }
        if !path.is_file() || !is_table_file(&path) {
            continue;
        }

        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        if filter.matches(name) {
            trace!(file = %path.display(), "matched input file");
            files.push(path);
        }
    }
    Ok(())
}

/// Recursively lists table files under `dir` whose names match `filter`.
///
/// Paths listed in `exclude` (typically the output file of a previous run)
/// are skipped. Returns paths sorted for a stable processing order, and fails
/// when nothing matched.
pub fn discover_input_files(
    dir: &Path,
    filter: &FileFilter,
    exclude: &[PathBuf],
) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut files = Vec::new();
    walk(dir, filter, &mut files)?;

    let excluded: Vec<PathBuf> = exclude
        .iter()
        .filter_map(|p| std::fs::canonicalize(p).ok())
        .collect();
    files.retain(|path| {
        std::fs::canonicalize(path)
            .map(|canonical| !excluded.contains(&canonical))
            .unwrap_or(true)
    });
    files.sort();

    debug!(
        dir = %dir.display(),
        filter = %filter.describe(),
        file_count = files.len(),
        "discovered input files"
    );

    if files.is_empty() {
        return Err(IngestError::NoMatchingFiles {
            path: dir.to_path_buf(),
            filter: filter.describe(),
        });
    }
    Ok(files)
}
