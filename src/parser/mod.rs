//! Tree-sitter parsing for TypeScript and JavaScript sources.
//!
//! This module provides:
//! - `Dialect`: which tree-sitter grammar to use for a file
//! - `ParsedModule`: the parse tree, its source, and the lowered [`Module`]
//! - `exports_from_source`: text in, owned export summaries out

mod lower;
mod types;

use std::fmt;

use tracing::trace;
use tree_sitter::{Language, Parser, Tree};

use crate::ast::{Module, Span};
use crate::error::{ExportError, Result};
use crate::exports::{resolve_module_exports, ExportSummary, ExportedEntity};

use lower::Lowerer;

/// The grammar a source file is parsed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dialect {
    /// Plain TypeScript (`.ts`, `.mts`, `.cts`).
    #[default]
    TypeScript,
    /// TypeScript with JSX. Also used for JavaScript, which it parses as a superset.
    Tsx,
}

impl Dialect {
    /// Pick a dialect from a file extension (with or without the leading dot).
    ///
    /// Returns `None` for extensions that are not TypeScript or JavaScript.
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.trim_start_matches('.').to_ascii_lowercase();
        match ext.as_str() {
            "ts" | "mts" | "cts" => Some(Dialect::TypeScript),
            "tsx" | "js" | "jsx" | "mjs" | "cjs" => Some(Dialect::Tsx),
            _ => None,
        }
    }

    pub fn language(&self) -> Language {
        match self {
            Dialect::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Dialect::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Dialect::TypeScript => "typescript",
            Dialect::Tsx => "tsx",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A parsed source file, ready for export resolution.
pub struct ParsedModule {
    /// The tree-sitter parse tree.
    pub tree: Tree,
    /// The original source (kept for node text extraction).
    pub source: String,
    pub dialect: Dialect,
    /// The lowered syntax tree.
    pub module: Module,
}

impl ParsedModule {
    /// Parse `source` and lower it into a [`Module`].
    ///
    /// Syntax errors do not fail the parse; tree-sitter recovers and the broken
    /// regions lower to opaque nodes. Check [`has_parse_errors`](Self::has_parse_errors).
    pub fn parse(source: impl Into<String>, dialect: Dialect) -> Result<Self> {
        let source = source.into();

        let mut parser = Parser::new();
        parser.set_language(&dialect.language())?;
        let tree = parser.parse(&source, None).ok_or(ExportError::Parse)?;

        let module = Lowerer::new(source.as_bytes()).module(tree.root_node())?;
        trace!(
            dialect = %dialect,
            statements = module.body.len(),
            "lowered module"
        );

        Ok(Self {
            tree,
            source,
            dialect,
            module,
        })
    }

    /// Whether tree-sitter had to recover from syntax errors.
    pub fn has_parse_errors(&self) -> bool {
        self.tree.root_node().has_error()
    }

    /// Resolve the module's exports.
    pub fn exports(&self) -> Result<Vec<ExportedEntity<'_>>> {
        resolve_module_exports(&self.module)
    }

    /// Source text covered by `span`.
    pub fn text(&self, span: Span) -> &str {
        self.source.get(span.start_byte..span.end_byte).unwrap_or("")
    }
}

/// Parse TypeScript `source` and return owned summaries of its exports.
pub fn exports_from_source(source: &str) -> Result<Vec<ExportSummary>> {
    exports_from_source_with(source, Dialect::TypeScript)
}

/// Like [`exports_from_source`], with an explicit dialect.
pub fn exports_from_source_with(source: &str, dialect: Dialect) -> Result<Vec<ExportSummary>> {
    let parsed = ParsedModule::parse(source, dialect)?;
    let exports = parsed.exports()?;
    Ok(exports.iter().map(ExportedEntity::summary).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Declaration, DefaultExport, ExportSpecifier, Pattern, Statement};
    use crate::exports::{EntityName, ExportKind};

    fn parse(source: &str) -> ParsedModule {
        ParsedModule::parse(source, Dialect::TypeScript).unwrap()
    }

    #[test]
    fn test_dialect_from_extension() {
        assert_eq!(Dialect::from_extension("ts"), Some(Dialect::TypeScript));
        assert_eq!(Dialect::from_extension(".mts"), Some(Dialect::TypeScript));
        assert_eq!(Dialect::from_extension("TSX"), Some(Dialect::Tsx));
        assert_eq!(Dialect::from_extension("js"), Some(Dialect::Tsx));
        assert_eq!(Dialect::from_extension("rs"), None);
    }

    #[test]
    fn test_lower_export_statements() {
        let parsed = parse(
            r#"
import { x } from "./x";
export const a = 1;
export { a as b };
export * from "./all";
export * as ns from "./ns";
export default class Foo {}
"#,
        );
        assert!(!parsed.has_parse_errors());

        let body = &parsed.module.body;
        assert_eq!(body.len(), 6);
        assert!(matches!(body[0], Statement::Import(_)));
        assert!(matches!(
            &body[1],
            Statement::ExportNamed(e) if matches!(e.declaration, Some(Declaration::Variable(_)))
        ));
        assert!(matches!(
            &body[2],
            Statement::ExportNamed(e) if e.specifiers.len() == 1 && e.declaration.is_none()
        ));
        match &body[3] {
            Statement::ExportAll(e) => assert_eq!(e.source.value, "./all"),
            other => panic!("expected export all, got {:?}", other),
        }
        match &body[4] {
            Statement::ExportNamed(e) => {
                assert!(matches!(e.specifiers[0], ExportSpecifier::Namespace(_)));
                assert_eq!(e.source.as_ref().map(|s| s.value.as_str()), Some("./ns"));
            }
            other => panic!("expected namespace export, got {:?}", other),
        }
        assert!(matches!(
            &body[5],
            Statement::ExportDefault(e)
                if matches!(e.declaration, DefaultExport::Declaration(Declaration::Class(_)))
        ));
    }

    #[test]
    fn test_anonymous_default_function_is_declaration() {
        let parsed = parse("export default function (a: string) {}");
        match &parsed.module.body[0] {
            Statement::ExportDefault(e) => match &e.declaration {
                DefaultExport::Declaration(Declaration::Function(f)) => {
                    assert!(f.id.is_none());
                    assert_eq!(f.params.len(), 1);
                }
                other => panic!("expected function declaration, got {:?}", other),
            },
            other => panic!("expected default export, got {:?}", other),
        }
    }

    #[test]
    fn test_lower_params() {
        let parsed = parse(
            "export function f(a: string, b?: number, c = 1, { d }: Opts, ...rest: any[]) {}",
        );
        let Statement::ExportNamed(export) = &parsed.module.body[0] else {
            panic!("expected named export");
        };
        let Some(Declaration::Function(f)) = &export.declaration else {
            panic!("expected function");
        };
        assert_eq!(f.params.len(), 5);
        assert_eq!(f.params[0].name(), Some("a"));
        assert_eq!(
            f.params[0].type_annotation.as_ref().map(|t| t.tag.as_str()),
            Some("TSStringKeyword")
        );
        assert!(f.params[1].optional);
        assert!(matches!(f.params[2].pattern, Pattern::Assignment(_)));
        assert!(matches!(f.params[3].pattern, Pattern::Object(_)));
        assert!(matches!(f.params[4].pattern, Pattern::Rest(_)));
    }

    #[test]
    fn test_parameter_properties() {
        let parsed = parse(
            "export class C { constructor(private readonly a: string, b: number) {} }",
        );
        let Statement::ExportNamed(export) = &parsed.module.body[0] else {
            panic!("expected named export");
        };
        let Some(Declaration::Class(class)) = &export.declaration else {
            panic!("expected class");
        };
        let ctor = class.constructor().expect("constructor");
        assert!(ctor.params[0].is_property);
        assert!(!ctor.params[1].is_property);
    }

    #[test]
    fn test_exports_from_source() {
        let exports = exports_from_source(
            r#"
export class Service {
    constructor(name: string, retries?: number) {}
}
export const handler = async (event: Event) => {};
"#,
        )
        .unwrap();

        assert_eq!(exports.len(), 2);
        assert_eq!(exports[0].name, "Service");
        assert_eq!(exports[0].kind, ExportKind::Class);
        assert_eq!(exports[0].line, 2);
        assert_eq!(exports[0].parameters.len(), 2);
        assert_eq!(exports[1].name, "handler");
        assert_eq!(exports[1].parameters[0].type_name, "typeReference");
    }

    #[test]
    fn test_jsx_source_with_tsx_dialect() {
        let exports = exports_from_source_with(
            "export default function App({ title }) { return <h1>{title}</h1>; }",
            Dialect::Tsx,
        )
        .unwrap();
        assert_eq!(exports.len(), 1);
        assert_eq!(exports[0].name, "App");
        assert!(exports[0].is_default);
    }

    #[test]
    fn test_syntax_errors_are_tolerated() {
        let parsed = parse("export const ok = 1;\nfunction broken( {\n");
        assert!(parsed.has_parse_errors());
        let exports = parsed.exports().unwrap();
        assert_eq!(exports[0].name, EntityName::Named("ok".to_string()));
    }

    #[test]
    fn test_text_by_span() {
        let parsed = parse("export const value = 42;");
        let span = parsed.module.body[0].span();
        assert_eq!(parsed.text(span), "export const value = 42;");
    }
}
