//! Scan configuration for exportlens.
//!
//! A config file controls which files a directory scan considers. Every field is
//! optional; a missing file means [`ScanConfig::default`].

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};

/// Config file names searched for, in order.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &[".exportlens.yaml", "exportlens.yaml"];

/// Commented config written by `exportlens init`.
pub const DEFAULT_TEMPLATE: &str = include_str!("templates/exportlens.yaml");

/// Top-level config definition.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScanConfig {
    #[serde(default)]
    pub version: String,
    /// File extensions to scan, without the dot.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    /// Glob patterns for paths to skip (e.g. "**/node_modules/**").
    #[serde(default = "default_excluded_paths")]
    pub excluded_paths: Vec<String>,
    /// File name fragments that mark a generated test file.
    #[serde(default = "default_test_markers")]
    pub test_markers: Vec<String>,
    /// Whether files carrying a test marker are scanned too (default: false).
    #[serde(default)]
    pub include_test_files: bool,
}

fn default_extensions() -> Vec<String> {
    ["ts", "tsx", "mts", "cts", "js", "jsx", "mjs", "cjs"]
        .iter()
        .map(|ext| ext.to_string())
        .collect()
}

fn default_excluded_paths() -> Vec<String> {
    vec!["**/node_modules/**".to_string(), "**/*.d.ts".to_string()]
}

fn default_test_markers() -> Vec<String> {
    vec![".test.".to_string(), ".spec.".to_string()]
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            version: String::new(),
            extensions: default_extensions(),
            excluded_paths: default_excluded_paths(),
            test_markers: default_test_markers(),
            include_test_files: false,
        }
    }
}

impl ScanConfig {
    /// Parse a config from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::parse_str(&content).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn parse_str(content: &str) -> anyhow::Result<Self> {
        // An empty document deserializes to null rather than an empty mapping.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load the config at `path`, or discover one in `dir`, or fall back to defaults.
    pub fn load(path: Option<&Path>, dir: &Path) -> anyhow::Result<(Self, Option<PathBuf>)> {
        let path = match path {
            Some(p) => Some(p.to_path_buf()),
            None => discover(dir),
        };
        match path {
            Some(p) => {
                let config = Self::parse_file(&p)?;
                validate(&config)?;
                Ok((config, Some(p)))
            }
            None => Ok((Self::default(), None)),
        }
    }

    /// Whether files with extension `ext` (no dot) are scanned.
    pub fn handles_extension(&self, ext: &str) -> bool {
        self.extensions
            .iter()
            .any(|e| e.trim_start_matches('.').eq_ignore_ascii_case(ext))
    }

    /// Whether `file_name` carries one of the test markers.
    pub fn is_test_file(&self, file_name: &str) -> bool {
        self.test_markers
            .iter()
            .any(|marker| !marker.is_empty() && file_name.contains(marker.as_str()))
    }

    /// Compile `excluded_paths` into a matcher.
    pub fn exclusions(&self) -> anyhow::Result<GlobSet> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.excluded_paths {
            let glob = Glob::new(pattern)
                .with_context(|| format!("invalid excluded_paths pattern {:?}", pattern))?;
            builder.add(glob);
        }
        Ok(builder.build()?)
    }

    /// Check if a path should be excluded based on `excluded_paths` patterns.
    pub fn is_path_excluded(&self, path: &Path) -> bool {
        match self.exclusions() {
            Ok(set) => set.is_match(path),
            Err(_) => false,
        }
    }
}

/// Find a config file in `dir`.
pub fn discover(dir: &Path) -> Option<PathBuf> {
    DEFAULT_CONFIG_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

/// Validate a config for correctness.
pub fn validate(config: &ScanConfig) -> anyhow::Result<()> {
    if config.extensions.is_empty() {
        anyhow::bail!("extensions must list at least one file extension");
    }
    for ext in &config.extensions {
        if ext.trim_start_matches('.').is_empty() {
            anyhow::bail!("invalid extension {:?}", ext);
        }
    }

    for pattern in &config.excluded_paths {
        Glob::new(pattern)
            .map_err(|e| anyhow::anyhow!("invalid excluded_paths pattern {:?}: {}", pattern, e))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let yaml = r#"
version: "1"
extensions: [ts]
excluded_paths:
  - "**/generated/**"
include_test_files: true
"#;
        let config = ScanConfig::parse_str(yaml).unwrap();
        assert_eq!(config.extensions, vec!["ts"]);
        assert_eq!(config.excluded_paths.len(), 1);
        assert!(config.include_test_files);
        // unset fields keep their defaults
        assert_eq!(config.test_markers, vec![".test.", ".spec."]);
    }

    #[test]
    fn test_empty_config_is_default() {
        let config = ScanConfig::parse_str("").unwrap();
        assert!(config.handles_extension("tsx"));
        assert!(!config.include_test_files);
    }

    #[test]
    fn test_default_template_parses() {
        let config = ScanConfig::parse_str(DEFAULT_TEMPLATE).unwrap();
        validate(&config).unwrap();
    }

    #[test]
    fn test_handles_extension() {
        let config = ScanConfig::default();
        assert!(config.handles_extension("ts"));
        assert!(config.handles_extension("JSX"));
        assert!(!config.handles_extension("rs"));
    }

    #[test]
    fn test_is_test_file() {
        let config = ScanConfig::default();
        assert!(config.is_test_file("user.test.ts"));
        assert!(config.is_test_file("user.spec.tsx"));
        assert!(!config.is_test_file("user.ts"));
        assert!(!config.is_test_file("contest.ts"));
    }

    #[test]
    fn test_path_exclusion() {
        let config = ScanConfig::default();
        assert!(config.is_path_excluded(Path::new("app/node_modules/lib/index.js")));
        assert!(config.is_path_excluded(Path::new("src/types.d.ts")));
        assert!(!config.is_path_excluded(Path::new("src/index.ts")));
    }

    #[test]
    fn test_validate_rejects_bad_config() {
        let config = ScanConfig {
            extensions: Vec::new(),
            ..ScanConfig::default()
        };
        assert!(validate(&config).is_err());

        let config = ScanConfig {
            excluded_paths: vec!["src/[".to_string()],
            ..ScanConfig::default()
        };
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_discover() {
        let dir = tempfile::tempdir().unwrap();
        assert!(discover(dir.path()).is_none());

        fs::write(dir.path().join("exportlens.yaml"), "extensions: [ts]\n").unwrap();
        let found = discover(dir.path()).unwrap();
        assert!(found.ends_with("exportlens.yaml"));

        let (config, path) = ScanConfig::load(None, dir.path()).unwrap();
        assert_eq!(config.extensions, vec!["ts"]);
        assert_eq!(path, Some(found));
    }
}
