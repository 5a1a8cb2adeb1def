//! Typed syntax tree for ECMAScript/TypeScript modules.
//!
//! The tree-sitter CST is lowered into these types once, at ingestion (see
//! `parser::lower`). Everything downstream works on closed enums and exhaustive
//! `match`es; the string discriminant only survives as [`Shape`], reported by
//! each node for classification and error messages.
//!
//! Only the parts of the language that matter for export resolution are modelled
//! in detail. Everything else lowers to an [`OpaqueNode`] that still carries its
//! shape and span.

mod shape;

use std::fmt;

pub use shape::Shape;

/// Source location span with byte offsets and line/column positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Start byte offset (0-indexed).
    pub start_byte: usize,
    /// End byte offset (0-indexed, exclusive).
    pub end_byte: usize,
    /// Start line (1-indexed).
    pub start_line: usize,
    /// Start column (1-indexed).
    pub start_col: usize,
    /// End line (1-indexed).
    pub end_line: usize,
    /// End column (1-indexed).
    pub end_col: usize,
}

impl Span {
    /// Create a span from a tree-sitter node.
    pub fn from_node(node: tree_sitter::Node) -> Self {
        let start = node.start_position();
        let end = node.end_position();
        Self {
            start_byte: node.start_byte(),
            end_byte: node.end_byte(),
            start_line: start.row + 1, // tree-sitter is 0-indexed
            start_col: start.column + 1,
            end_line: end.row + 1,
            end_col: end.column + 1,
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start_line, self.start_col)
    }
}

/// A parsed module: the ordered top-level statements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Module {
    pub body: Vec<Statement>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub name: String,
    pub span: Span,
}

impl Identifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            span: Span::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StringLiteral {
    /// The unquoted value.
    pub value: String,
    pub span: Span,
}

impl StringLiteral {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            span: Span::default(),
        }
    }
}

/// A node the typed tree does not model beyond its shape.
#[derive(Debug, Clone, PartialEq)]
pub struct OpaqueNode {
    pub shape: Shape,
    /// The tree-sitter node kind it was lowered from.
    pub kind: String,
    pub span: Span,
}

// =============================================================================
// Statements
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    ExportNamed(ExportNamedDeclaration),
    ExportDefault(ExportDefaultDeclaration),
    ExportAll(ExportAllDeclaration),
    Import(ImportDeclaration),
    Declaration(Declaration),
    Other(OpaqueNode),
}

impl Statement {
    pub fn shape(&self) -> Shape {
        match self {
            Statement::ExportNamed(_) => Shape::ExportNamedDeclaration,
            Statement::ExportDefault(_) => Shape::ExportDefaultDeclaration,
            Statement::ExportAll(_) => Shape::ExportAllDeclaration,
            Statement::Import(_) => Shape::ImportDeclaration,
            Statement::Declaration(decl) => decl.shape(),
            Statement::Other(node) => node.shape,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Statement::ExportNamed(s) => s.span,
            Statement::ExportDefault(s) => s.span,
            Statement::ExportAll(s) => s.span,
            Statement::Import(s) => s.span,
            Statement::Declaration(decl) => decl.span(),
            Statement::Other(node) => node.span,
        }
    }
}

/// `export { a, b as c }`, `export { a } from "m"`, `export * as ns from "m"`,
/// or `export <declaration>`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExportNamedDeclaration {
    pub specifiers: Vec<ExportSpecifier>,
    pub declaration: Option<Declaration>,
    pub source: Option<StringLiteral>,
    /// `export type { ... }`
    pub type_only: bool,
    pub span: Span,
}

/// `export default <declaration | expression>`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportDefaultDeclaration {
    pub declaration: DefaultExport,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DefaultExport {
    Declaration(Declaration),
    Expression(Expression),
}

/// `export * from "m"`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportAllDeclaration {
    pub source: StringLiteral,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportDeclaration {
    pub source: Option<StringLiteral>,
    pub span: Span,
}

// =============================================================================
// Export specifiers
// =============================================================================

/// The name on either side of `as` in an export list.
#[derive(Debug, Clone, PartialEq)]
pub enum ModuleExportName {
    Identifier(Identifier),
    StringLiteral(StringLiteral),
}

impl ModuleExportName {
    pub fn as_str(&self) -> &str {
        match self {
            ModuleExportName::Identifier(id) => &id.name,
            ModuleExportName::StringLiteral(lit) => &lit.value,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            ModuleExportName::Identifier(id) => id.span,
            ModuleExportName::StringLiteral(lit) => lit.span,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExportSpecifier {
    /// `export v from "m"` (proposal syntax).
    Default(ExportDefaultSpecifier),
    /// `export { local as exported }`
    Named(ExportNamedSpecifier),
    /// `export * as exported from "m"`
    Namespace(ExportNamespaceSpecifier),
}

impl ExportSpecifier {
    pub fn shape(&self) -> Shape {
        match self {
            ExportSpecifier::Default(_) => Shape::ExportDefaultSpecifier,
            ExportSpecifier::Named(_) => Shape::ExportSpecifier,
            ExportSpecifier::Namespace(_) => Shape::ExportNamespaceSpecifier,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            ExportSpecifier::Default(s) => s.span,
            ExportSpecifier::Named(s) => s.span,
            ExportSpecifier::Namespace(s) => s.span,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportDefaultSpecifier {
    pub exported: Identifier,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportNamedSpecifier {
    pub local: ModuleExportName,
    pub exported: ModuleExportName,
    /// `export { type Foo }`
    pub type_only: bool,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportNamespaceSpecifier {
    pub exported: ModuleExportName,
    pub span: Span,
}

// =============================================================================
// Declarations
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    Variable(VariableDeclaration),
    Function(Function),
    Class(Class),
    /// A body-less function signature (`declare function f(): void;` or an overload).
    TsDeclareFunction(Function),
    TsInterface(TypeDeclaration),
    TsTypeAlias(TypeDeclaration),
    TsEnum(TypeDeclaration),
    TsModule(TsModuleDeclaration),
    Other(OpaqueNode),
}

/// How a declaration names itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeclarationId<'a> {
    Identifier(&'a Identifier),
    /// An `id` that is not an identifier, e.g. `declare module "fs"`.
    Other(&'a str),
    /// The declaration shape has no `id` at all.
    Absent,
}

impl Declaration {
    pub fn shape(&self) -> Shape {
        match self {
            Declaration::Variable(_) => Shape::VariableDeclaration,
            Declaration::Function(_) => Shape::FunctionDeclaration,
            Declaration::Class(_) => Shape::ClassDeclaration,
            Declaration::TsDeclareFunction(_) => Shape::TSDeclareFunction,
            Declaration::TsInterface(_) => Shape::TSInterfaceDeclaration,
            Declaration::TsTypeAlias(_) => Shape::TSTypeAliasDeclaration,
            Declaration::TsEnum(_) => Shape::TSEnumDeclaration,
            Declaration::TsModule(_) => Shape::TSModuleDeclaration,
            Declaration::Other(node) => node.shape,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Declaration::Variable(d) => d.span,
            Declaration::Function(f) | Declaration::TsDeclareFunction(f) => f.span,
            Declaration::Class(c) => c.span,
            Declaration::TsInterface(t) | Declaration::TsTypeAlias(t) | Declaration::TsEnum(t) => {
                t.span
            }
            Declaration::TsModule(m) => m.span,
            Declaration::Other(node) => node.span,
        }
    }

    /// The declaration's own `id`.
    ///
    /// Functions and classes may be anonymous (`export default function () {}`),
    /// in which case they have an id slot but nothing in it; that reports as
    /// `Absent` too.
    pub fn id(&self) -> DeclarationId<'_> {
        fn optional(id: &Option<Identifier>) -> DeclarationId<'_> {
            id.as_ref()
                .map_or(DeclarationId::Absent, DeclarationId::Identifier)
        }

        match self {
            Declaration::Function(f) | Declaration::TsDeclareFunction(f) => optional(&f.id),
            Declaration::Class(c) => optional(&c.id),
            Declaration::TsInterface(t) | Declaration::TsTypeAlias(t) | Declaration::TsEnum(t) => {
                DeclarationId::Identifier(&t.id)
            }
            Declaration::TsModule(m) => match &m.id {
                TsModuleName::Identifier(id) => DeclarationId::Identifier(id),
                TsModuleName::StringLiteral(lit) => DeclarationId::Other(&lit.value),
            },
            Declaration::Variable(_) | Declaration::Other(_) => DeclarationId::Absent,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableKind {
    Var,
    Let,
    Const,
}

impl VariableKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            VariableKind::Var => "var",
            VariableKind::Let => "let",
            VariableKind::Const => "const",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclaration {
    pub kind: VariableKind,
    pub declarations: Vec<VariableDeclarator>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclarator {
    pub id: Pattern,
    pub init: Option<Expression>,
    pub span: Span,
}

/// Function declarations, function expressions, arrows and signatures.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Function {
    pub id: Option<Identifier>,
    pub params: Vec<Param>,
    pub span: Span,
}

/// Class declarations and class expressions.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Class {
    pub id: Option<Identifier>,
    pub members: Vec<ClassMember>,
    pub is_abstract: bool,
    pub span: Span,
}

impl Class {
    /// The first method whose kind is `constructor`.
    pub fn constructor(&self) -> Option<&ClassMethod> {
        self.members.iter().find_map(|member| match member {
            ClassMember::Method(method) if method.kind == MethodKind::Constructor => Some(method),
            _ => None,
        })
    }
}

/// Interfaces, type aliases and enums: only the name matters here.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDeclaration {
    pub id: Identifier,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TsModuleName {
    Identifier(Identifier),
    StringLiteral(StringLiteral),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TsModuleDeclaration {
    pub id: TsModuleName,
    pub span: Span,
}

// =============================================================================
// Classes
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum ClassMember {
    Method(ClassMethod),
    /// Overload or abstract signature without a body.
    DeclareMethod(ClassMethod),
    Property(ClassProperty),
    Other(OpaqueNode),
}

impl ClassMember {
    pub fn shape(&self) -> Shape {
        match self {
            ClassMember::Method(_) => Shape::ClassMethod,
            ClassMember::DeclareMethod(_) => Shape::TSDeclareMethod,
            ClassMember::Property(_) => Shape::ClassProperty,
            ClassMember::Other(node) => node.shape,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            ClassMember::Method(m) | ClassMember::DeclareMethod(m) => m.span,
            ClassMember::Property(p) => p.span,
            ClassMember::Other(node) => node.span,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    Constructor,
    Method,
    Get,
    Set,
}

impl MethodKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MethodKind::Constructor => "constructor",
            MethodKind::Method => "method",
            MethodKind::Get => "get",
            MethodKind::Set => "set",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PropertyKey {
    Identifier(Identifier),
    StringLiteral(StringLiteral),
    /// Computed, numeric or private keys.
    Other(OpaqueNode),
}

impl PropertyKey {
    pub fn as_identifier(&self) -> Option<&Identifier> {
        match self {
            PropertyKey::Identifier(id) => Some(id),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassMethod {
    pub key: PropertyKey,
    pub kind: MethodKind,
    pub params: Vec<Param>,
    pub is_static: bool,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassProperty {
    pub key: PropertyKey,
    pub span: Span,
}

// =============================================================================
// Expressions
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Arrow(Function),
    Function(Function),
    Class(Class),
    Identifier(Identifier),
    StringLiteral(StringLiteral),
    Other(OpaqueNode),
}

impl Expression {
    pub fn shape(&self) -> Shape {
        match self {
            Expression::Arrow(_) => Shape::ArrowFunctionExpression,
            Expression::Function(_) => Shape::FunctionExpression,
            Expression::Class(_) => Shape::ClassExpression,
            Expression::Identifier(_) => Shape::Identifier,
            Expression::StringLiteral(_) => Shape::StringLiteral,
            Expression::Other(node) => node.shape,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Expression::Arrow(f) | Expression::Function(f) => f.span,
            Expression::Class(c) => c.span,
            Expression::Identifier(id) => id.span,
            Expression::StringLiteral(lit) => lit.span,
            Expression::Other(node) => node.span,
        }
    }

    /// The parameter list, for expressions that have one.
    pub fn params(&self) -> Option<&[Param]> {
        match self {
            Expression::Arrow(f) | Expression::Function(f) => Some(&f.params),
            _ => None,
        }
    }
}

// =============================================================================
// Patterns and parameters
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Pattern {
    Identifier(Identifier),
    Object(ObjectPattern),
    Array(ArrayPattern),
    Rest(RestElement),
    Assignment(AssignmentPattern),
}

impl Pattern {
    pub fn shape(&self) -> Shape {
        match self {
            Pattern::Identifier(_) => Shape::Identifier,
            Pattern::Object(_) => Shape::ObjectPattern,
            Pattern::Array(_) => Shape::ArrayPattern,
            Pattern::Rest(_) => Shape::RestElement,
            Pattern::Assignment(_) => Shape::AssignmentPattern,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Pattern::Identifier(id) => id.span,
            Pattern::Object(p) => p.span,
            Pattern::Array(p) => p.span,
            Pattern::Rest(p) => p.span,
            Pattern::Assignment(p) => p.span,
        }
    }

    /// Source text of the pattern, used when a binding has no single name.
    pub fn text(&self) -> String {
        match self {
            Pattern::Identifier(id) => id.name.clone(),
            Pattern::Object(p) => p.raw.clone(),
            Pattern::Array(p) => p.raw.clone(),
            Pattern::Rest(p) => p.raw.clone(),
            Pattern::Assignment(p) => p.raw.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectPattern {
    pub properties: Vec<ObjectPatternProperty>,
    pub raw: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ObjectPatternProperty {
    /// `{ key }` or `{ key: value }`, optionally with a default.
    Property(ObjectProperty),
    /// `{ ...rest }`
    Rest(RestElement),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectProperty {
    pub key: PropertyKey,
    pub value: Option<Box<Pattern>>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayPattern {
    pub raw: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RestElement {
    pub argument: Box<Pattern>,
    pub raw: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentPattern {
    pub left: Box<Pattern>,
    pub raw: String,
    pub span: Span,
}

/// A type annotation reduced to its raw Babel-style tag (`TSStringKeyword`,
/// `TSTypeReference`, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct TypeAnnotation {
    pub tag: String,
    /// Source text of the annotated type, without the leading colon.
    pub text: String,
    pub span: Span,
}

impl TypeAnnotation {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            text: String::new(),
            span: Span::default(),
        }
    }
}

/// A formal parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub pattern: Pattern,
    pub type_annotation: Option<TypeAnnotation>,
    /// Marked with `?`.
    pub optional: bool,
    /// Constructor parameter property (`private x: string`, `readonly y`).
    pub is_property: bool,
    pub span: Span,
}

impl Param {
    /// A plain identifier parameter.
    pub fn identifier(name: impl Into<String>) -> Self {
        Self {
            pattern: Pattern::Identifier(Identifier::new(name)),
            type_annotation: None,
            optional: false,
            is_property: false,
            span: Span::default(),
        }
    }

    pub fn with_type(mut self, tag: &str) -> Self {
        self.type_annotation = Some(TypeAnnotation::new(tag));
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn shape(&self) -> Shape {
        if self.is_property {
            Shape::TSParameterProperty
        } else {
            self.pattern.shape()
        }
    }

    /// The parameter's name, when it is a plain identifier.
    pub fn name(&self) -> Option<&str> {
        match (&self.pattern, self.is_property) {
            (Pattern::Identifier(id), false) if !id.name.is_empty() => Some(&id.name),
            _ => None,
        }
    }
}

// =============================================================================
// Node references
// =============================================================================

/// A borrowed handle to any node in the tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeRef<'a> {
    Module(&'a Module),
    Statement(&'a Statement),
    Declaration(&'a Declaration),
    Declarator(&'a VariableDeclarator),
    Expression(&'a Expression),
    Specifier(&'a ExportSpecifier),
    ClassMember(&'a ClassMember),
    Param(&'a Param),
    Pattern(&'a Pattern),
    Identifier(&'a Identifier),
}

impl<'a> NodeRef<'a> {
    /// The node's concrete shape.
    pub fn shape(&self) -> Shape {
        match self {
            NodeRef::Module(_) => Shape::Program,
            NodeRef::Statement(s) => s.shape(),
            NodeRef::Declaration(d) => d.shape(),
            NodeRef::Declarator(_) => Shape::VariableDeclarator,
            NodeRef::Expression(e) => e.shape(),
            NodeRef::Specifier(s) => s.shape(),
            NodeRef::ClassMember(m) => m.shape(),
            NodeRef::Param(p) => p.shape(),
            NodeRef::Pattern(p) => p.shape(),
            NodeRef::Identifier(_) => Shape::Identifier,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            NodeRef::Module(m) => m.span,
            NodeRef::Statement(s) => s.span(),
            NodeRef::Declaration(d) => d.span(),
            NodeRef::Declarator(d) => d.span,
            NodeRef::Expression(e) => e.span(),
            NodeRef::Specifier(s) => s.span(),
            NodeRef::ClassMember(m) => m.span(),
            NodeRef::Param(p) => p.span,
            NodeRef::Pattern(p) => p.span(),
            NodeRef::Identifier(id) => id.span,
        }
    }

    /// View a statement as the declaration it wraps, if any.
    pub fn as_declaration(&self) -> Option<&'a Declaration> {
        match *self {
            NodeRef::Declaration(d) => Some(d),
            NodeRef::Statement(Statement::Declaration(d)) => Some(d),
            _ => None,
        }
    }

    pub fn as_expression(&self) -> Option<&'a Expression> {
        match *self {
            NodeRef::Expression(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_name_only_for_plain_identifiers() {
        assert_eq!(Param::identifier("a").name(), Some("a"));

        let mut property = Param::identifier("b");
        property.is_property = true;
        assert_eq!(property.name(), None);
        assert_eq!(property.shape(), Shape::TSParameterProperty);

        let rest = Param {
            pattern: Pattern::Rest(RestElement {
                argument: Box::new(Pattern::Identifier(Identifier::new("args"))),
                raw: "...args".to_string(),
                span: Span::default(),
            }),
            ..Param::identifier("unused")
        };
        assert_eq!(rest.name(), None);
        assert_eq!(rest.shape(), Shape::RestElement);
    }

    #[test]
    fn test_declaration_id() {
        let anonymous = Declaration::Function(Function::default());
        assert_eq!(anonymous.id(), DeclarationId::Absent);

        let named = Declaration::Class(Class {
            id: Some(Identifier::new("Foo")),
            ..Class::default()
        });
        match named.id() {
            DeclarationId::Identifier(id) => assert_eq!(id.name, "Foo"),
            other => panic!("unexpected id {:?}", other),
        }

        let ambient = Declaration::TsModule(TsModuleDeclaration {
            id: TsModuleName::StringLiteral(StringLiteral::new("fs")),
            span: Span::default(),
        });
        assert_eq!(ambient.id(), DeclarationId::Other("fs"));
    }

    #[test]
    fn test_class_constructor_lookup() {
        let method = |name: &str, kind| {
            ClassMember::Method(ClassMethod {
                key: PropertyKey::Identifier(Identifier::new(name)),
                kind,
                params: vec![Param::identifier("x")],
                is_static: false,
                span: Span::default(),
            })
        };
        let class = Class {
            members: vec![
                method("run", MethodKind::Method),
                method("constructor", MethodKind::Constructor),
            ],
            ..Class::default()
        };
        let ctor = class.constructor().expect("constructor");
        assert_eq!(ctor.kind.as_str(), "constructor");
        assert!(Class::default().constructor().is_none());
    }

    #[test]
    fn test_statement_shape_passes_through_declarations() {
        let stmt = Statement::Declaration(Declaration::Function(Function::default()));
        assert_eq!(stmt.shape(), Shape::FunctionDeclaration);
        assert_eq!(NodeRef::Statement(&stmt).shape(), Shape::FunctionDeclaration);
        assert!(NodeRef::Statement(&stmt).as_declaration().is_some());
    }
}
