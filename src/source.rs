//! Source file acquisition.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::ScanConfig;
use crate::parser::Dialect;

/// Extension assumed for files whose name has none.
pub const DEFAULT_EXTENSION: &str = "js";

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file is itself a generated test file.
    #[error("{} is already a test file", .0.display())]
    AlreadyTestFile(PathBuf),

    #[error("{} is not a file", .0.display())]
    NotAFile(PathBuf),
}

/// A source file read from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub text: String,
    pub file_name: String,
    /// Lower-cased extension without the dot, `js` when the name has none.
    pub extension: String,
    pub directory: PathBuf,
}

impl SourceFile {
    /// Read `path`, rejecting generated test files unless the config includes them.
    pub fn load(path: &Path, config: &ScanConfig) -> Result<Self, SourceError> {
        let metadata = fs::metadata(path).map_err(|source| SourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if !metadata.is_file() {
            return Err(SourceError::NotAFile(path.to_path_buf()));
        }

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        if !config.include_test_files && config.is_test_file(&file_name) {
            return Err(SourceError::AlreadyTestFile(path.to_path_buf()));
        }

        let text = fs::read_to_string(path).map_err(|source| SourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            text,
            extension: extension_of(&file_name),
            directory: path.parent().map(Path::to_path_buf).unwrap_or_default(),
            file_name,
        })
    }

    /// The grammar for this file; unknown extensions parse as TSX.
    pub fn dialect(&self) -> Dialect {
        Dialect::from_extension(&self.extension).unwrap_or(Dialect::Tsx)
    }
}

/// Text after the last dot of `file_name`, or the default extension.
fn extension_of(file_name: &str) -> String {
    match file_name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => ext.to_ascii_lowercase(),
        _ => DEFAULT_EXTENSION.to_string(),
    }
}
