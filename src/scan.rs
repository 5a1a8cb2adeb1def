//! Parallel export scan over a set of files.
//!
//! Each file is read, parsed and resolved independently; nothing is shared
//! between files. A file that fails does not stop the scan, it is reported as a
//! [`FileFailure`] instead.

use std::path::{Path, PathBuf};

use anyhow::Context;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::ScanConfig;
use crate::exports::{ExportSummary, ExportedEntity};
use crate::parser::ParsedModule;
use crate::source::SourceFile;

/// Exports found in one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileExports {
    /// Path relative to the scan root.
    pub path: String,
    /// Grammar the file was parsed with.
    pub language: String,
    pub exports: Vec<ExportSummary>,
    /// Tree-sitter recovered from syntax errors in this file.
    pub has_parse_errors: bool,
}

/// A file whose exports could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFailure {
    pub path: String,
    pub message: String,
}

/// Outcome of a scan, sorted by path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanResult {
    pub files: Vec<FileExports>,
    pub failures: Vec<FileFailure>,
}

impl ScanResult {
    pub fn files_scanned(&self) -> usize {
        self.files.len() + self.failures.len()
    }

    pub fn exports_found(&self) -> usize {
        self.files.iter().map(|f| f.exports.len()).sum()
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Resolve the exports of every file in `files`, in parallel.
///
/// Paths in the result are relative to `root` (or to its parent when `root` is
/// itself a file).
pub fn scan_paths(root: &Path, files: &[PathBuf], config: &ScanConfig) -> ScanResult {
    let base = if root.is_file() {
        root.parent().unwrap_or(root)
    } else {
        root
    };

    let results: Vec<_> = files
        .par_iter()
        .map(|path| (path, scan_file(path, config)))
        .collect();

    let mut result = ScanResult::default();
    for (path, outcome) in results {
        let rel_path = relative_path(base, path);
        match outcome {
            Ok(mut exports) => {
                debug!(path = %rel_path, exports = exports.exports.len(), "scanned file");
                exports.path = rel_path;
                result.files.push(exports);
            }
            Err(e) => {
                warn!(path = %rel_path, "failed to resolve exports: {:#}", e);
                result.failures.push(FileFailure {
                    path: rel_path,
                    message: format!("{:#}", e),
                });
            }
        }
    }

    // Sort by path for deterministic ordering
    result.files.sort_by(|a, b| a.path.cmp(&b.path));
    result.failures.sort_by(|a, b| a.path.cmp(&b.path));
    result
}

/// Read, parse and resolve a single file.
pub fn scan_file(path: &Path, config: &ScanConfig) -> anyhow::Result<FileExports> {
    let source = SourceFile::load(path, config)?;
    let dialect = source.dialect();

    let parsed = ParsedModule::parse(source.text, dialect)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    let exports = parsed
        .exports()
        .with_context(|| format!("failed to resolve exports of {}", path.display()))?;

    Ok(FileExports {
        path: path.to_string_lossy().into_owned(),
        language: dialect.name().to_string(),
        exports: exports.iter().map(ExportedEntity::summary).collect(),
        has_parse_errors: parsed.has_parse_errors(),
    })
}

fn relative_path(base: &Path, path: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .to_string_lossy()
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(dir: &Path, name: &str, content: impl AsRef<[u8]>) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_scan_sorts_and_collects_failures() {
        let dir = tempfile::tempdir().unwrap();
        let files = vec![
            write(dir.path(), "b.ts", "export function b(x: number) {}\n"),
            write(dir.path(), "a.tsx", "export default () => <div />;\n"),
            // not valid UTF-8
            write(dir.path(), "bad.ts", [0xff, 0xfe, 0x00]),
        ];

        let result = scan_paths(dir.path(), &files, &ScanConfig::default());

        let paths: Vec<_> = result.files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, vec!["a.tsx", "b.ts"]);
        assert_eq!(result.files[0].language, "tsx");
        assert_eq!(result.files[1].exports[0].parameters[0].type_name, "number");

        assert_eq!(result.failures.len(), 1);
        assert_eq!(result.failures[0].path, "bad.ts");
        assert_eq!(result.files_scanned(), 3);
        assert_eq!(result.exports_found(), 2);
        assert!(result.has_failures());
    }

    #[test]
    fn test_scan_single_file_root() {
        let dir = tempfile::tempdir().unwrap();
        let file = write(dir.path(), "only.ts", "export const only = 1;\n");

        let result = scan_paths(&file, &[file.clone()], &ScanConfig::default());
        assert_eq!(result.files[0].path, "only.ts");
        assert!(!result.has_failures());
    }

    #[test]
    fn test_test_file_is_a_failure() {
        let dir = tempfile::tempdir().unwrap();
        let file = write(dir.path(), "x.spec.ts", "export const x = 1;\n");

        let result = scan_paths(dir.path(), &[file], &ScanConfig::default());
        assert!(result.files.is_empty());
        assert!(result.failures[0].message.contains("already a test file"));
    }
}
