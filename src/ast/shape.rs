//! Node shape discriminants.
//!
//! Every node in the typed tree reports a concrete [`Shape`]. Shape names follow
//! the Babel/ESTree vocabulary (`ExportNamedDeclaration`, `ClassDeclaration`, ...)
//! so that results can be compared against other JavaScript tooling. A handful of
//! shapes are *categories* (`Expression`, `Declaration`, ...) which group concrete
//! shapes the same way Babel's aliases do.

use std::fmt;

use phf::phf_map;

/// A concrete node shape or a shape category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    // Module level
    Program,

    // Statements
    ExportNamedDeclaration,
    ExportDefaultDeclaration,
    ExportAllDeclaration,
    ImportDeclaration,
    ExpressionStatement,
    TSExportAssignment,
    TSNamespaceExportDeclaration,
    TSImportEqualsDeclaration,
    OpaqueStatement,

    // Declarations
    VariableDeclaration,
    VariableDeclarator,
    FunctionDeclaration,
    ClassDeclaration,
    TSDeclareFunction,
    TSInterfaceDeclaration,
    TSTypeAliasDeclaration,
    TSEnumDeclaration,
    TSModuleDeclaration,
    OpaqueDeclaration,

    // Expressions
    Identifier,
    StringLiteral,
    ArrowFunctionExpression,
    FunctionExpression,
    ClassExpression,
    CallExpression,
    MemberExpression,
    NewExpression,
    ObjectExpression,
    ArrayExpression,
    NumericLiteral,
    BooleanLiteral,
    NullLiteral,
    TemplateLiteral,
    BinaryExpression,
    ConditionalExpression,
    AwaitExpression,
    TSAsExpression,
    TSSatisfiesExpression,
    JSXElement,
    OpaqueExpression,

    // Patterns and parameters
    ObjectPattern,
    ObjectProperty,
    ArrayPattern,
    RestElement,
    AssignmentPattern,
    TSParameterProperty,

    // Specifiers
    ExportSpecifier,
    ExportDefaultSpecifier,
    ExportNamespaceSpecifier,

    // Class members
    ClassMethod,
    TSDeclareMethod,
    ClassProperty,
    OpaqueClassMember,

    // Categories
    Statement,
    Declaration,
    Expression,
    Pattern,
    Function,
    Class,
}

/// Lookup table from discriminant string to shape, used at the ingestion boundary.
static SHAPES_BY_NAME: phf::Map<&'static str, Shape> = phf_map! {
    "Program" => Shape::Program,
    "ExportNamedDeclaration" => Shape::ExportNamedDeclaration,
    "ExportDefaultDeclaration" => Shape::ExportDefaultDeclaration,
    "ExportAllDeclaration" => Shape::ExportAllDeclaration,
    "ImportDeclaration" => Shape::ImportDeclaration,
    "ExpressionStatement" => Shape::ExpressionStatement,
    "TSExportAssignment" => Shape::TSExportAssignment,
    "TSNamespaceExportDeclaration" => Shape::TSNamespaceExportDeclaration,
    "TSImportEqualsDeclaration" => Shape::TSImportEqualsDeclaration,
    "OpaqueStatement" => Shape::OpaqueStatement,
    "VariableDeclaration" => Shape::VariableDeclaration,
    "VariableDeclarator" => Shape::VariableDeclarator,
    "FunctionDeclaration" => Shape::FunctionDeclaration,
    "ClassDeclaration" => Shape::ClassDeclaration,
    "TSDeclareFunction" => Shape::TSDeclareFunction,
    "TSInterfaceDeclaration" => Shape::TSInterfaceDeclaration,
    "TSTypeAliasDeclaration" => Shape::TSTypeAliasDeclaration,
    "TSEnumDeclaration" => Shape::TSEnumDeclaration,
    "TSModuleDeclaration" => Shape::TSModuleDeclaration,
    "OpaqueDeclaration" => Shape::OpaqueDeclaration,
    "Identifier" => Shape::Identifier,
    "StringLiteral" => Shape::StringLiteral,
    "ArrowFunctionExpression" => Shape::ArrowFunctionExpression,
    "FunctionExpression" => Shape::FunctionExpression,
    "ClassExpression" => Shape::ClassExpression,
    "CallExpression" => Shape::CallExpression,
    "MemberExpression" => Shape::MemberExpression,
    "NewExpression" => Shape::NewExpression,
    "ObjectExpression" => Shape::ObjectExpression,
    "ArrayExpression" => Shape::ArrayExpression,
    "NumericLiteral" => Shape::NumericLiteral,
    "BooleanLiteral" => Shape::BooleanLiteral,
    "NullLiteral" => Shape::NullLiteral,
    "TemplateLiteral" => Shape::TemplateLiteral,
    "BinaryExpression" => Shape::BinaryExpression,
    "ConditionalExpression" => Shape::ConditionalExpression,
    "AwaitExpression" => Shape::AwaitExpression,
    "TSAsExpression" => Shape::TSAsExpression,
    "TSSatisfiesExpression" => Shape::TSSatisfiesExpression,
    "JSXElement" => Shape::JSXElement,
    "OpaqueExpression" => Shape::OpaqueExpression,
    "ObjectPattern" => Shape::ObjectPattern,
    "ObjectProperty" => Shape::ObjectProperty,
    "ArrayPattern" => Shape::ArrayPattern,
    "RestElement" => Shape::RestElement,
    "AssignmentPattern" => Shape::AssignmentPattern,
    "TSParameterProperty" => Shape::TSParameterProperty,
    "ExportSpecifier" => Shape::ExportSpecifier,
    "ExportDefaultSpecifier" => Shape::ExportDefaultSpecifier,
    "ExportNamespaceSpecifier" => Shape::ExportNamespaceSpecifier,
    "ClassMethod" => Shape::ClassMethod,
    "TSDeclareMethod" => Shape::TSDeclareMethod,
    "ClassProperty" => Shape::ClassProperty,
    "OpaqueClassMember" => Shape::OpaqueClassMember,
    "Statement" => Shape::Statement,
    "Declaration" => Shape::Declaration,
    "Expression" => Shape::Expression,
    "Pattern" => Shape::Pattern,
    "Function" => Shape::Function,
    "Class" => Shape::Class,
};

impl Shape {
    /// Look up a shape by its discriminant string.
    pub fn from_name(name: &str) -> Option<Shape> {
        SHAPES_BY_NAME.get(name).copied()
    }

    /// The discriminant string for this shape.
    pub fn as_str(&self) -> &'static str {
        match self {
            Shape::Program => "Program",
            Shape::ExportNamedDeclaration => "ExportNamedDeclaration",
            Shape::ExportDefaultDeclaration => "ExportDefaultDeclaration",
            Shape::ExportAllDeclaration => "ExportAllDeclaration",
            Shape::ImportDeclaration => "ImportDeclaration",
            Shape::ExpressionStatement => "ExpressionStatement",
            Shape::TSExportAssignment => "TSExportAssignment",
            Shape::TSNamespaceExportDeclaration => "TSNamespaceExportDeclaration",
            Shape::TSImportEqualsDeclaration => "TSImportEqualsDeclaration",
            Shape::OpaqueStatement => "OpaqueStatement",
            Shape::VariableDeclaration => "VariableDeclaration",
            Shape::VariableDeclarator => "VariableDeclarator",
            Shape::FunctionDeclaration => "FunctionDeclaration",
            Shape::ClassDeclaration => "ClassDeclaration",
            Shape::TSDeclareFunction => "TSDeclareFunction",
            Shape::TSInterfaceDeclaration => "TSInterfaceDeclaration",
            Shape::TSTypeAliasDeclaration => "TSTypeAliasDeclaration",
            Shape::TSEnumDeclaration => "TSEnumDeclaration",
            Shape::TSModuleDeclaration => "TSModuleDeclaration",
            Shape::OpaqueDeclaration => "OpaqueDeclaration",
            Shape::Identifier => "Identifier",
            Shape::StringLiteral => "StringLiteral",
            Shape::ArrowFunctionExpression => "ArrowFunctionExpression",
            Shape::FunctionExpression => "FunctionExpression",
            Shape::ClassExpression => "ClassExpression",
            Shape::CallExpression => "CallExpression",
            Shape::MemberExpression => "MemberExpression",
            Shape::NewExpression => "NewExpression",
            Shape::ObjectExpression => "ObjectExpression",
            Shape::ArrayExpression => "ArrayExpression",
            Shape::NumericLiteral => "NumericLiteral",
            Shape::BooleanLiteral => "BooleanLiteral",
            Shape::NullLiteral => "NullLiteral",
            Shape::TemplateLiteral => "TemplateLiteral",
            Shape::BinaryExpression => "BinaryExpression",
            Shape::ConditionalExpression => "ConditionalExpression",
            Shape::AwaitExpression => "AwaitExpression",
            Shape::TSAsExpression => "TSAsExpression",
            Shape::TSSatisfiesExpression => "TSSatisfiesExpression",
            Shape::JSXElement => "JSXElement",
            Shape::OpaqueExpression => "OpaqueExpression",
            Shape::ObjectPattern => "ObjectPattern",
            Shape::ObjectProperty => "ObjectProperty",
            Shape::ArrayPattern => "ArrayPattern",
            Shape::RestElement => "RestElement",
            Shape::AssignmentPattern => "AssignmentPattern",
            Shape::TSParameterProperty => "TSParameterProperty",
            Shape::ExportSpecifier => "ExportSpecifier",
            Shape::ExportDefaultSpecifier => "ExportDefaultSpecifier",
            Shape::ExportNamespaceSpecifier => "ExportNamespaceSpecifier",
            Shape::ClassMethod => "ClassMethod",
            Shape::TSDeclareMethod => "TSDeclareMethod",
            Shape::ClassProperty => "ClassProperty",
            Shape::OpaqueClassMember => "OpaqueClassMember",
            Shape::Statement => "Statement",
            Shape::Declaration => "Declaration",
            Shape::Expression => "Expression",
            Shape::Pattern => "Pattern",
            Shape::Function => "Function",
            Shape::Class => "Class",
        }
    }

    /// Whether this shape names a category rather than a concrete node.
    pub fn is_category(&self) -> bool {
        matches!(
            self,
            Shape::Statement
                | Shape::Declaration
                | Shape::Expression
                | Shape::Pattern
                | Shape::Function
                | Shape::Class
        )
    }

    /// Whether a node whose concrete shape is `concrete` satisfies `self`.
    ///
    /// A concrete shape covers only itself; a category covers each of its members.
    pub fn covers(&self, concrete: Shape) -> bool {
        match self {
            Shape::Statement => concrete.is_statement(),
            Shape::Declaration => concrete.is_declaration(),
            Shape::Expression => concrete.is_expression(),
            Shape::Pattern => concrete.is_pattern(),
            Shape::Function => matches!(
                concrete,
                Shape::FunctionDeclaration
                    | Shape::FunctionExpression
                    | Shape::ArrowFunctionExpression
                    | Shape::ClassMethod
            ),
            Shape::Class => matches!(concrete, Shape::ClassDeclaration | Shape::ClassExpression),
            _ => *self == concrete,
        }
    }

    fn is_declaration(&self) -> bool {
        matches!(
            self,
            Shape::VariableDeclaration
                | Shape::FunctionDeclaration
                | Shape::ClassDeclaration
                | Shape::TSDeclareFunction
                | Shape::TSInterfaceDeclaration
                | Shape::TSTypeAliasDeclaration
                | Shape::TSEnumDeclaration
                | Shape::TSModuleDeclaration
                | Shape::TSImportEqualsDeclaration
                | Shape::OpaqueDeclaration
                | Shape::ImportDeclaration
                | Shape::ExportNamedDeclaration
                | Shape::ExportDefaultDeclaration
                | Shape::ExportAllDeclaration
        )
    }

    fn is_statement(&self) -> bool {
        self.is_declaration()
            || matches!(
                self,
                Shape::ExpressionStatement
                    | Shape::TSExportAssignment
                    | Shape::TSNamespaceExportDeclaration
                    | Shape::OpaqueStatement
            )
    }

    fn is_expression(&self) -> bool {
        matches!(
            self,
            Shape::Identifier
                | Shape::StringLiteral
                | Shape::ArrowFunctionExpression
                | Shape::FunctionExpression
                | Shape::ClassExpression
                | Shape::CallExpression
                | Shape::MemberExpression
                | Shape::NewExpression
                | Shape::ObjectExpression
                | Shape::ArrayExpression
                | Shape::NumericLiteral
                | Shape::BooleanLiteral
                | Shape::NullLiteral
                | Shape::TemplateLiteral
                | Shape::BinaryExpression
                | Shape::ConditionalExpression
                | Shape::AwaitExpression
                | Shape::TSAsExpression
                | Shape::TSSatisfiesExpression
                | Shape::JSXElement
                | Shape::OpaqueExpression
        )
    }

    fn is_pattern(&self) -> bool {
        matches!(
            self,
            Shape::Identifier
                | Shape::ObjectPattern
                | Shape::ArrayPattern
                | Shape::RestElement
                | Shape::AssignmentPattern
        )
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
