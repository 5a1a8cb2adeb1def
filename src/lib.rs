//! exportlens - export and parameter extraction for TypeScript/JavaScript modules.
//!
//! Given a module's source, exportlens answers "what does this module export, and
//! what does each export take as input?": the name of every exported function,
//! class and binding, whether it is a class or the default export, and the name,
//! type and optionality of its parameters (constructor parameters for classes).
//! Test-stub generators consume the result.
//!
//! # Architecture
//!
//! - `parser`: tree-sitter parsing and lowering into the typed tree
//! - `ast`: typed syntax tree and node shapes
//! - `classify`: shape predicates and checked casts
//! - `exports`: export and parameter resolution
//! - `source`, `config`, `scan`: file acquisition and parallel directory scans
//! - `report`: output formatting (pretty, JSON)
//!
//! # Example
//!
//! ```
//! let exports = exportlens::exports_from_source(
//!     "export class User { constructor(name: string, age?: number) {} }",
//! )
//! .unwrap();
//!
//! assert_eq!(exports[0].name, "User");
//! assert_eq!(exports[0].parameters[1].type_name, "number");
//! assert!(exports[0].parameters[1].is_optional);
//! ```

pub mod ast;
pub mod classify;
pub mod cli;
pub mod config;
pub mod error;
pub mod exports;
pub mod parser;
pub mod report;
pub mod scan;
pub mod source;

pub use ast::{Module, NodeRef, Shape};
pub use classify::{assert_shape, matches};
pub use config::ScanConfig;
pub use error::{ExportError, Result};
pub use exports::{
    extract_parameters, normalize, resolve_export_statement, resolve_module_exports,
    EntityName, ExportKind, ExportSummary, ExportedEntity, Parameter,
};
pub use parser::{exports_from_source, exports_from_source_with, Dialect, ParsedModule};
pub use scan::{scan_paths, FileExports, FileFailure, ScanResult};
pub use source::{SourceError, SourceFile};
