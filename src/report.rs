//! Output formatting for scan results.
//!
//! Supports two output formats:
//! - Pretty: colored terminal output for human readability
//! - JSON: structured output for programmatic consumption (e.g. test generators)

use colored::*;
use serde::{Deserialize, Serialize};

use crate::exports::{ExportKind, ExportSummary, Parameter};
use crate::scan::{FileExports, FileFailure, ScanResult};

// =============================================================================
// JSON Format
// =============================================================================

/// Top-level JSON report.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonReport {
    pub version: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<String>,
    pub files_scanned: usize,
    pub exports_found: usize,
    pub files: Vec<FileExports>,
    #[serde(default)]
    pub failures: Vec<FileFailure>,
}

impl JsonReport {
    pub fn new(path: &str, config_path: Option<&str>, result: &ScanResult) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            path: path.to_string(),
            config: config_path.map(str::to_string),
            files_scanned: result.files_scanned(),
            exports_found: result.exports_found(),
            files: result.files.clone(),
            failures: result.failures.clone(),
        }
    }
}

/// Write results in JSON format.
pub fn write_json(path: &str, config_path: Option<&str>, result: &ScanResult) -> anyhow::Result<()> {
    let report = JsonReport::new(path, config_path, result);
    let json = serde_json::to_string_pretty(&report)?;
    println!("{}", json);
    Ok(())
}

// =============================================================================
// Pretty Format
// =============================================================================

/// Write results in pretty (human-readable) format.
pub fn write_pretty(path: &str, config_path: Option<&str>, result: &ScanResult) {
    // Header
    println!();
    print!("  ");
    print!("{}", "exportlens".cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();

    print!("  {}", "Scanning: ".dimmed());
    println!("{}", path);
    print!("  {}", "Config:   ".dimmed());
    println!("{}", config_path.unwrap_or("(defaults)"));
    println!();

    for file in &result.files {
        write_file(file);
    }

    if !result.failures.is_empty() {
        write_failures(&result.failures);
        println!();
    }

    write_summary(result);
    println!();
}

fn write_file(file: &FileExports) {
    print!("  {}", file.path.blue());
    if file.has_parse_errors {
        print!(" {}", "(syntax errors)".yellow());
    }
    println!();

    if file.exports.is_empty() {
        println!("    {}", "no exports".dimmed());
    }
    for export in &file.exports {
        println!("    {}", format_export(export));
    }
    println!();
}

/// One export as `kind name(params)` plus flags, e.g. `class Service(name: string, retries?: number)`.
fn format_export(export: &ExportSummary) -> String {
    let kind = match export.kind {
        ExportKind::Class => export.kind.as_str().magenta(),
        ExportKind::Function => export.kind.as_str().green(),
    };

    let params: Vec<String> = export.parameters.iter().map(format_parameter).collect();
    let mut line = format!(
        "{:<8} {}({})",
        kind,
        export.name.bold(),
        params.join(", ")
    );

    if export.is_default {
        line.push_str(&format!(" {}", "default".cyan()));
    }
    if export.degraded {
        line.push_str(&format!(" {}", "(pattern)".yellow()));
    }
    if export.line > 0 {
        line.push_str(&format!(" {}", format!(":{}", export.line).dimmed()));
    }
    line
}

fn format_parameter(param: &Parameter) -> String {
    let optional = if param.is_optional { "?" } else { "" };
    format!("{}{}: {}", param.name, optional, param.type_name)
}

fn write_failures(failures: &[FileFailure]) {
    println!("  {} ({}):", "Failed".red().bold(), failures.len());
    println!();
    for failure in failures {
        println!("    {}", failure.path.blue());
        println!("            {}", failure.message);
    }
}

fn write_summary(result: &ScanResult) {
    let files = result.files_scanned();
    let exports = result.exports_found();
    print!(
        "  {} file{}, {} export{}",
        files,
        if files == 1 { "" } else { "s" },
        exports,
        if exports == 1 { "" } else { "s" }
    );

    if result.has_failures() {
        print!("  {}", format!("{} FAILED", result.failures.len()).red());
    } else {
        print!("  {}", "OK".green());
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ScanResult {
        ScanResult {
            files: vec![FileExports {
                path: "src/user.ts".to_string(),
                language: "typescript".to_string(),
                exports: vec![ExportSummary {
                    name: "User".to_string(),
                    kind: ExportKind::Class,
                    is_default: true,
                    is_optional: false,
                    degraded: false,
                    line: 3,
                    parameters: vec![Parameter {
                        name: "age".to_string(),
                        type_name: "number".to_string(),
                        ts_type: "TSNumberKeyword".to_string(),
                        is_optional: true,
                    }],
                }],
                has_parse_errors: false,
            }],
            failures: vec![FileFailure {
                path: "src/bad.ts".to_string(),
                message: "could not identify node name for ClassDeclaration".to_string(),
            }],
        }
    }

    #[test]
    fn test_json_report_shape() {
        let report = JsonReport::new("src", None, &sample());
        assert_eq!(report.files_scanned, 2);
        assert_eq!(report.exports_found, 1);

        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("config").is_none());
        let param = &json["files"][0]["exports"][0]["parameters"][0];
        assert_eq!(param["type"], "number");
        assert_eq!(param["ts_type"], "TSNumberKeyword");
        assert_eq!(json["files"][0]["exports"][0]["kind"], "class");
        assert_eq!(json["failures"][0]["path"], "src/bad.ts");
    }

    #[test]
    fn test_json_report_round_trip() {
        let report = JsonReport::new("src", Some("exportlens.yaml"), &sample());
        let json = serde_json::to_string(&report).unwrap();
        let parsed: JsonReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.config.as_deref(), Some("exportlens.yaml"));
        assert_eq!(parsed.files, report.files);
    }

    #[test]
    fn test_format_export() {
        colored::control::set_override(false);
        let result = sample();
        let line = format_export(&result.files[0].exports[0]);
        assert_eq!(line, "class    User(age?: number) default :3");
    }
}
