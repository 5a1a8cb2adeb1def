//! Integration tests for directory scans over the fixture project.

use std::path::{Path, PathBuf};

use exportlens::cli::collect_files;
use exportlens::report::JsonReport;
use exportlens::{scan_paths, ExportKind, ExportSummary, FileExports, ScanConfig, ScanResult};

fn project_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("testdata/project")
}

fn scan_project() -> ScanResult {
    let root = project_dir();
    let (config, config_path) = ScanConfig::load(None, &root).expect("fixture config loads");
    assert!(config_path.is_some(), "fixture config should be discovered");

    let files = collect_files(&root, &config).expect("walk fixture project");
    scan_paths(&root, &files, &config)
}

fn file<'a>(result: &'a ScanResult, path: &str) -> &'a FileExports {
    result
        .files
        .iter()
        .find(|f| f.path.replace('\\', "/") == path)
        .unwrap_or_else(|| panic!("{} not scanned", path))
}

fn export<'a>(file: &'a FileExports, name: &str) -> &'a ExportSummary {
    file.exports
        .iter()
        .find(|e| e.name == name)
        .unwrap_or_else(|| panic!("{} has no export {}", file.path, name))
}

fn param_names(export: &ExportSummary) -> Vec<&str> {
    export.parameters.iter().map(|p| p.name.as_str()).collect()
}

#[test]
fn test_collect_skips_tests_and_declarations() {
    let root = project_dir();
    let (config, _) = ScanConfig::load(None, &root).unwrap();
    let files: Vec<String> = collect_files(&root, &config)
        .unwrap()
        .iter()
        .map(|p| {
            p.strip_prefix(&root)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect();

    assert_eq!(
        files,
        vec![
            "src/format.ts",
            "src/index.ts",
            "src/legacy.js",
            "src/service.ts",
            "src/widgets/button.tsx",
        ]
    );
}

#[test]
fn test_scan_project() {
    let result = scan_project();
    assert!(!result.has_failures(), "{:?}", result.failures);
    assert_eq!(result.files_scanned(), 5);
    assert_eq!(result.exports_found(), 15);
}

#[test]
fn test_service_exports() {
    let result = scan_project();
    let service = file(&result, "src/service.ts");
    assert_eq!(service.language, "typescript");
    assert!(!service.has_parse_errors);

    let names: Vec<_> = service.exports.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "ServiceOptions",
            "Handler",
            "UserService",
            "createUser",
            "handle",
            "host",
            "port",
        ]
    );

    // parameter properties are fields, not constructor inputs
    let class = export(service, "UserService");
    assert_eq!(class.kind, ExportKind::Class);
    assert_eq!(class.line, 9);
    assert_eq!(param_names(class), vec!["name", "age"]);
    assert!(class.parameters[1].is_optional);

    let create = export(service, "createUser");
    let types: Vec<_> = create.parameters.iter().map(|p| p.type_name.as_str()).collect();
    assert_eq!(types, vec!["string", "array", "typeReference"]);
    assert!(create.parameters[2].is_optional);

    let handle = export(service, "handle");
    assert_eq!(handle.kind, ExportKind::Function);
    assert_eq!(param_names(handle), vec!["event", "context"]);
    assert_eq!(handle.parameters[1].type_name, "typeLiteral");

    assert!(export(service, "host").parameters.is_empty());
}

#[test]
fn test_reexport_barrel() {
    let result = scan_project();
    let index = file(&result, "src/index.ts");
    let names: Vec<_> = index.exports.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Service", "default", "widgets"]);

    // `createUser as default` is a renamed specifier, not a default declaration
    assert!(!export(index, "default").is_default);
    assert!(index.exports.iter().all(|e| e.kind == ExportKind::Function));
}

#[test]
fn test_anonymous_default_function() {
    let result = scan_project();
    let format = file(&result, "src/format.ts");
    assert_eq!(format.exports.len(), 1);

    let default = &format.exports[0];
    assert_eq!(default.name, "default");
    assert!(default.is_default);
    assert_eq!(param_names(default), vec!["value"]);
    assert_eq!(default.parameters[0].type_name, "unknown");
    assert_eq!(default.parameters[0].ts_type, "TSUnknownKeyword");
}

#[test]
fn test_jsx_components() {
    let result = scan_project();
    let button = file(&result, "src/widgets/button.tsx");
    assert_eq!(button.language, "tsx");

    let component = export(button, "Button");
    assert!(component.is_default);
    assert!(component.parameters.is_empty());

    let icon = export(button, "Icon");
    assert_eq!(param_names(icon), vec!["name", "size"]);
    assert!(icon.parameters.iter().all(|p| p.type_name == "any"));
}

#[test]
fn test_plain_javascript() {
    let result = scan_project();
    let legacy = file(&result, "src/legacy.js");

    let add = export(legacy, "add");
    assert_eq!(param_names(add), vec!["a", "b"]);
    assert_eq!(add.parameters[0].ts_type, "TSAnyKeyword");

    let counter = export(legacy, "Counter");
    assert_eq!(counter.kind, ExportKind::Class);
    assert_eq!(param_names(counter), vec!["start"]);
}

#[test]
fn test_json_report() {
    let result = scan_project();
    let report = JsonReport::new("testdata/project", Some(".exportlens.yaml"), &result);
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["files_scanned"], 5);
    assert_eq!(json["config"], ".exportlens.yaml");

    let files = json["files"].as_array().unwrap();
    let format = files
        .iter()
        .find(|f| f["path"].as_str().unwrap().ends_with("format.ts"))
        .unwrap();
    let param = &format["exports"][0]["parameters"][0];
    assert_eq!(param["name"], "value");
    assert_eq!(param["type"], "unknown");
    assert_eq!(param["is_optional"], false);
}
