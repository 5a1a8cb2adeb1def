//! Lowering of the tree-sitter CST into the typed tree in [`crate::ast`].
//!
//! Lowering is total for everything outside export statements: node kinds the
//! typed tree does not model become [`OpaqueNode`]s, and tree-sitter's error
//! recovery nodes (`ERROR`) are treated the same way. Inside an export statement
//! a missing required child is an error.

use phf::phf_map;
use tree_sitter::Node;

use crate::ast::{
    ArrayPattern, AssignmentPattern, Class, ClassMember, ClassMethod, ClassProperty,
    Declaration, DefaultExport, ExportAllDeclaration, ExportDefaultDeclaration,
    ExportNamedDeclaration, ExportNamedSpecifier, ExportNamespaceSpecifier, ExportSpecifier,
    Expression, Function, Identifier, ImportDeclaration, MethodKind, Module, ModuleExportName,
    ObjectPattern, ObjectPatternProperty, ObjectProperty, OpaqueNode, Param, Pattern,
    PropertyKey, RestElement, Shape, Span, Statement, StringLiteral, TsModuleDeclaration,
    TsModuleName, TypeAnnotation, TypeDeclaration, VariableDeclaration, VariableDeclarator,
    VariableKind,
};
use crate::error::{ExportError, Result};

use super::types;

/// Expression kinds that keep a recognizable shape when lowered opaquely.
static EXPRESSION_SHAPES: phf::Map<&'static str, Shape> = phf_map! {
    "call_expression" => Shape::CallExpression,
    "member_expression" => Shape::MemberExpression,
    "subscript_expression" => Shape::MemberExpression,
    "new_expression" => Shape::NewExpression,
    "object" => Shape::ObjectExpression,
    "array" => Shape::ArrayExpression,
    "number" => Shape::NumericLiteral,
    "true" => Shape::BooleanLiteral,
    "false" => Shape::BooleanLiteral,
    "null" => Shape::NullLiteral,
    "template_string" => Shape::TemplateLiteral,
    "binary_expression" => Shape::BinaryExpression,
    "ternary_expression" => Shape::ConditionalExpression,
    "await_expression" => Shape::AwaitExpression,
    "as_expression" => Shape::TSAsExpression,
    "satisfies_expression" => Shape::TSSatisfiesExpression,
    "jsx_element" => Shape::JSXElement,
    "jsx_self_closing_element" => Shape::JSXElement,
};

/// Lowers nodes of one parse tree, reading names from `source`.
pub(crate) struct Lowerer<'s> {
    source: &'s [u8],
}

impl<'s> Lowerer<'s> {
    pub(crate) fn new(source: &'s [u8]) -> Self {
        Self { source }
    }

    fn text(&self, node: Node) -> &'s str {
        node.utf8_text(self.source).unwrap_or("")
    }

    fn opaque(&self, node: Node, shape: Shape) -> OpaqueNode {
        OpaqueNode {
            shape,
            kind: node.kind().to_string(),
            span: Span::from_node(node),
        }
    }

    pub(crate) fn module(&self, root: Node) -> Result<Module> {
        let body = named_children(root)
            .into_iter()
            .filter(|child| !child.is_missing())
            .map(|child| self.statement(child))
            .collect::<Result<Vec<_>>>()?;

        Ok(Module {
            body,
            span: Span::from_node(root),
        })
    }

    // =========================================================================
    // Statements
    // =========================================================================

    fn statement(&self, node: Node) -> Result<Statement> {
        let statement = match node.kind() {
            "export_statement" => self.export_statement(node)?,
            "import_statement" => Statement::Import(ImportDeclaration {
                source: node
                    .child_by_field_name("source")
                    .map(|source| self.string_literal(source)),
                span: Span::from_node(node),
            }),
            "expression_statement" => {
                Statement::Other(self.opaque(node, Shape::ExpressionStatement))
            }
            "import_alias" => Statement::Other(self.opaque(node, Shape::TSImportEqualsDeclaration)),
            _ => match self.declaration(node) {
                Some(declaration) => Statement::Declaration(declaration),
                None => Statement::Other(self.opaque(node, Shape::OpaqueStatement)),
            },
        };
        Ok(statement)
    }

    fn export_statement(&self, node: Node) -> Result<Statement> {
        let span = Span::from_node(node);

        if has_token(node, "default") {
            let declaration = if let Some(decl) = node.child_by_field_name("declaration") {
                DefaultExport::Declaration(self.declaration_or_opaque(decl))
            } else if let Some(value) = node.child_by_field_name("value") {
                self.default_value(value)
            } else {
                return Err(ExportError::MissingNode {
                    expected: Shape::Declaration,
                });
            };
            return Ok(Statement::ExportDefault(ExportDefaultDeclaration {
                declaration,
                span,
            }));
        }

        let source = node
            .child_by_field_name("source")
            .map(|source| self.string_literal(source));

        if let Some(decl) = node.child_by_field_name("declaration") {
            if decl.kind() == "import_alias" {
                return Ok(Statement::Other(
                    self.opaque(node, Shape::TSImportEqualsDeclaration),
                ));
            }
            return Ok(Statement::ExportNamed(ExportNamedDeclaration {
                declaration: Some(self.declaration_or_opaque(decl)),
                source,
                span,
                ..ExportNamedDeclaration::default()
            }));
        }

        let children = named_children(node);

        if let Some(clause) = children.iter().find(|c| c.kind() == "export_clause") {
            let specifiers = named_children(*clause)
                .into_iter()
                .filter(|c| c.kind() == "export_specifier")
                .map(|spec| self.export_specifier(spec))
                .collect::<Result<Vec<_>>>()?;
            return Ok(Statement::ExportNamed(ExportNamedDeclaration {
                specifiers,
                declaration: None,
                source,
                type_only: has_token(node, "type"),
                span,
            }));
        }

        if let Some(namespace) = children.iter().find(|c| c.kind() == "namespace_export") {
            let name = named_children(*namespace)
                .into_iter()
                .next()
                .ok_or(ExportError::MissingNode {
                    expected: Shape::ExportNamespaceSpecifier,
                })?;
            let specifier = ExportSpecifier::Namespace(ExportNamespaceSpecifier {
                exported: self.module_export_name(name),
                span: Span::from_node(*namespace),
            });
            return Ok(Statement::ExportNamed(ExportNamedDeclaration {
                specifiers: vec![specifier],
                source,
                span,
                ..ExportNamedDeclaration::default()
            }));
        }

        if has_token(node, "*") {
            let source = source.ok_or(ExportError::MissingNode {
                expected: Shape::StringLiteral,
            })?;
            return Ok(Statement::ExportAll(ExportAllDeclaration { source, span }));
        }

        if has_token(node, "=") {
            return Ok(Statement::Other(self.opaque(node, Shape::TSExportAssignment)));
        }
        if has_token(node, "namespace") {
            return Ok(Statement::Other(
                self.opaque(node, Shape::TSNamespaceExportDeclaration),
            ));
        }

        Err(ExportError::MissingNode {
            expected: Shape::Declaration,
        })
    }

    /// `export default <value>`: anonymous functions and classes count as
    /// declarations, everything else is an expression.
    fn default_value(&self, value: Node) -> DefaultExport {
        match value.kind() {
            "function_expression" | "function" | "generator_function" => {
                DefaultExport::Declaration(Declaration::Function(self.function(value)))
            }
            "class" => DefaultExport::Declaration(Declaration::Class(self.class(value, false))),
            _ => DefaultExport::Expression(self.expression(value)),
        }
    }

    fn export_specifier(&self, node: Node) -> Result<ExportSpecifier> {
        let name = node
            .child_by_field_name("name")
            .ok_or(ExportError::MissingNode {
                expected: Shape::ExportSpecifier,
            })?;
        let local = self.module_export_name(name);
        let exported = match node.child_by_field_name("alias") {
            Some(alias) => self.module_export_name(alias),
            None => local.clone(),
        };

        Ok(ExportSpecifier::Named(ExportNamedSpecifier {
            local,
            exported,
            type_only: has_token(node, "type") || has_token(node, "typeof"),
            span: Span::from_node(node),
        }))
    }

    fn module_export_name(&self, node: Node) -> ModuleExportName {
        match node.kind() {
            "string" => ModuleExportName::StringLiteral(self.string_literal(node)),
            _ => ModuleExportName::Identifier(self.identifier(node)),
        }
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    fn declaration_or_opaque(&self, node: Node) -> Declaration {
        self.declaration(node)
            .unwrap_or_else(|| Declaration::Other(self.opaque(node, Shape::OpaqueDeclaration)))
    }

    /// Lower a declaration node; `None` when `node` is not a declaration.
    fn declaration(&self, node: Node) -> Option<Declaration> {
        let declaration = match node.kind() {
            "function_declaration" | "generator_function_declaration" => {
                Declaration::Function(self.function(node))
            }
            "function_signature" => Declaration::TsDeclareFunction(self.function(node)),
            "class_declaration" => Declaration::Class(self.class(node, false)),
            "abstract_class_declaration" => Declaration::Class(self.class(node, true)),
            "lexical_declaration" | "variable_declaration" => {
                Declaration::Variable(self.variable_declaration(node))
            }
            "interface_declaration" => self.type_declaration(node, Declaration::TsInterface),
            "type_alias_declaration" => self.type_declaration(node, Declaration::TsTypeAlias),
            "enum_declaration" => self.type_declaration(node, Declaration::TsEnum),
            "module" | "internal_module" => self.ts_module(node),
            "ambient_declaration" => self.ambient_declaration(node),
            _ => return None,
        };
        Some(declaration)
    }

    fn type_declaration(
        &self,
        node: Node,
        wrap: fn(TypeDeclaration) -> Declaration,
    ) -> Declaration {
        match node.child_by_field_name("name") {
            Some(name) => wrap(TypeDeclaration {
                id: self.identifier(name),
                span: Span::from_node(node),
            }),
            None => Declaration::Other(self.opaque(node, Shape::OpaqueDeclaration)),
        }
    }

    fn ts_module(&self, node: Node) -> Declaration {
        let Some(name) = node.child_by_field_name("name") else {
            return Declaration::Other(self.opaque(node, Shape::OpaqueDeclaration));
        };

        let id = match name.kind() {
            "string" => TsModuleName::StringLiteral(self.string_literal(name)),
            // `namespace A.B {}` is named after its outermost segment.
            "nested_identifier" => {
                let text = self.text(name);
                let outer = text.split('.').next().unwrap_or(text).trim();
                TsModuleName::Identifier(Identifier {
                    name: outer.to_string(),
                    span: Span::from_node(name),
                })
            }
            _ => TsModuleName::Identifier(self.identifier(name)),
        };

        Declaration::TsModule(TsModuleDeclaration {
            id,
            span: Span::from_node(node),
        })
    }

    /// `declare ...`: lowered as the wrapped declaration.
    fn ambient_declaration(&self, node: Node) -> Declaration {
        if let Some(inner) = named_children(node)
            .into_iter()
            .find_map(|child| self.declaration(child))
        {
            return inner;
        }

        if has_token(node, "global") {
            let global = children(node)
                .into_iter()
                .find(|child| child.kind() == "global");
            return Declaration::TsModule(TsModuleDeclaration {
                id: TsModuleName::Identifier(Identifier {
                    name: "global".to_string(),
                    span: global.map(Span::from_node).unwrap_or_default(),
                }),
                span: Span::from_node(node),
            });
        }

        Declaration::Other(self.opaque(node, Shape::OpaqueDeclaration))
    }

    fn variable_declaration(&self, node: Node) -> VariableDeclaration {
        let keyword = children(node)
            .into_iter()
            .find(|child| !child.is_named())
            .map(|child| child.kind())
            .unwrap_or("var");
        let kind = match keyword {
            "let" => VariableKind::Let,
            "const" => VariableKind::Const,
            _ => VariableKind::Var,
        };

        let declarations = named_children(node)
            .into_iter()
            .filter(|child| child.kind() == "variable_declarator")
            .map(|child| self.variable_declarator(child))
            .collect();

        VariableDeclaration {
            kind,
            declarations,
            span: Span::from_node(node),
        }
    }

    fn variable_declarator(&self, node: Node) -> VariableDeclarator {
        let id = match node.child_by_field_name("name") {
            Some(name) => self.pattern(name),
            None => Pattern::Identifier(Identifier {
                name: String::new(),
                span: Span::from_node(node),
            }),
        };

        VariableDeclarator {
            id,
            init: node
                .child_by_field_name("value")
                .map(|value| self.expression(value)),
            span: Span::from_node(node),
        }
    }

    // =========================================================================
    // Functions and classes
    // =========================================================================

    fn function(&self, node: Node) -> Function {
        Function {
            id: node
                .child_by_field_name("name")
                .map(|name| self.identifier(name)),
            params: self.params_of(node),
            span: Span::from_node(node),
        }
    }

    fn params_of(&self, node: Node) -> Vec<Param> {
        if let Some(params) = node.child_by_field_name("parameters") {
            return self.formal_parameters(params);
        }

        // `x => x`
        match node.child_by_field_name("parameter") {
            Some(param) => vec![Param {
                pattern: self.pattern(param),
                type_annotation: None,
                optional: false,
                is_property: false,
                span: Span::from_node(param),
            }],
            None => Vec::new(),
        }
    }

    fn formal_parameters(&self, node: Node) -> Vec<Param> {
        named_children(node)
            .into_iter()
            .filter_map(|child| match child.kind() {
                "required_parameter" => Some(self.param(child, false)),
                "optional_parameter" => Some(self.param(child, true)),
                _ => None,
            })
            .collect()
    }

    fn param(&self, node: Node, optional: bool) -> Param {
        let span = Span::from_node(node);

        let mut pattern = match node.child_by_field_name("pattern") {
            Some(pattern) => self.pattern(pattern),
            None => Pattern::Identifier(Identifier {
                name: String::new(),
                span,
            }),
        };
        if node.child_by_field_name("value").is_some() {
            pattern = Pattern::Assignment(AssignmentPattern {
                left: Box::new(pattern),
                raw: self.text(node).to_string(),
                span,
            });
        }

        let is_property = children(node).into_iter().any(|child| {
            matches!(
                child.kind(),
                "accessibility_modifier" | "override_modifier" | "readonly"
            )
        });

        let type_annotation = node.child_by_field_name("type").and_then(|annotation| {
            let tag = types::annotation_tag(annotation, self.source)?;
            Some(TypeAnnotation {
                tag,
                text: self
                    .text(annotation)
                    .trim_start_matches(':')
                    .trim()
                    .to_string(),
                span: Span::from_node(annotation),
            })
        });

        Param {
            pattern,
            type_annotation,
            optional,
            is_property,
            span,
        }
    }

    fn class(&self, node: Node, is_abstract: bool) -> Class {
        let members = node
            .child_by_field_name("body")
            .map(|body| {
                named_children(body)
                    .into_iter()
                    .map(|member| self.class_member(member))
                    .collect()
            })
            .unwrap_or_default();

        Class {
            id: node
                .child_by_field_name("name")
                .map(|name| self.identifier(name)),
            members,
            is_abstract,
            span: Span::from_node(node),
        }
    }

    fn class_member(&self, node: Node) -> ClassMember {
        match node.kind() {
            "method_definition" => ClassMember::Method(self.class_method(node)),
            "method_signature" | "abstract_method_signature" => {
                ClassMember::DeclareMethod(self.class_method(node))
            }
            "public_field_definition" => ClassMember::Property(ClassProperty {
                key: self.property_key_field(node),
                span: Span::from_node(node),
            }),
            _ => ClassMember::Other(self.opaque(node, Shape::OpaqueClassMember)),
        }
    }

    fn class_method(&self, node: Node) -> ClassMethod {
        let key = self.property_key_field(node);
        let is_static = has_token(node, "static");

        let kind = if has_token(node, "get") {
            MethodKind::Get
        } else if has_token(node, "set") {
            MethodKind::Set
        } else if !is_static && is_constructor_key(&key) {
            MethodKind::Constructor
        } else {
            MethodKind::Method
        };

        ClassMethod {
            key,
            kind,
            params: self.params_of(node),
            is_static,
            span: Span::from_node(node),
        }
    }

    fn property_key_field(&self, node: Node) -> PropertyKey {
        match node.child_by_field_name("name") {
            Some(name) => self.property_key(name),
            None => PropertyKey::Other(self.opaque(node, Shape::OpaqueExpression)),
        }
    }

    fn property_key(&self, node: Node) -> PropertyKey {
        match node.kind() {
            "property_identifier" | "identifier" | "shorthand_property_identifier_pattern" => {
                PropertyKey::Identifier(self.identifier(node))
            }
            "string" => PropertyKey::StringLiteral(self.string_literal(node)),
            _ => PropertyKey::Other(self.opaque(node, Shape::OpaqueExpression)),
        }
    }

    // =========================================================================
    // Expressions and patterns
    // =========================================================================

    fn expression(&self, node: Node) -> Expression {
        match node.kind() {
            "parenthesized_expression" => match named_children(node).into_iter().next() {
                Some(inner) => self.expression(inner),
                None => Expression::Other(self.opaque(node, Shape::OpaqueExpression)),
            },
            "arrow_function" => Expression::Arrow(self.function(node)),
            "function_expression" | "function" | "generator_function" => {
                Expression::Function(self.function(node))
            }
            "class" => Expression::Class(self.class(node, false)),
            "identifier" => Expression::Identifier(self.identifier(node)),
            "string" => Expression::StringLiteral(self.string_literal(node)),
            kind => {
                let shape = EXPRESSION_SHAPES
                    .get(kind)
                    .copied()
                    .unwrap_or(Shape::OpaqueExpression);
                Expression::Other(self.opaque(node, shape))
            }
        }
    }

    fn pattern(&self, node: Node) -> Pattern {
        let span = Span::from_node(node);
        let raw = || self.text(node).to_string();

        match node.kind() {
            "identifier" | "shorthand_property_identifier_pattern" | "this" => {
                Pattern::Identifier(self.identifier(node))
            }
            "object_pattern" => Pattern::Object(self.object_pattern(node)),
            "array_pattern" => Pattern::Array(ArrayPattern { raw: raw(), span }),
            "rest_pattern" => Pattern::Rest(self.rest_element(node)),
            "assignment_pattern" | "object_assignment_pattern" => {
                let left = match node.child_by_field_name("left") {
                    Some(left) => self.pattern(left),
                    None => Pattern::Identifier(Identifier {
                        name: String::new(),
                        span,
                    }),
                };
                Pattern::Assignment(AssignmentPattern {
                    left: Box::new(left),
                    raw: raw(),
                    span,
                })
            }
            // Member expressions and other assignment targets have no binding name.
            _ => Pattern::Identifier(Identifier {
                name: String::new(),
                span,
            }),
        }
    }

    fn object_pattern(&self, node: Node) -> ObjectPattern {
        let properties = named_children(node)
            .into_iter()
            .filter_map(|child| {
                let span = Span::from_node(child);
                let property = match child.kind() {
                    "shorthand_property_identifier_pattern" => {
                        ObjectPatternProperty::Property(ObjectProperty {
                            key: PropertyKey::Identifier(self.identifier(child)),
                            value: None,
                            span,
                        })
                    }
                    "pair_pattern" => ObjectPatternProperty::Property(ObjectProperty {
                        key: self.property_key_of(child, "key"),
                        value: child
                            .child_by_field_name("value")
                            .map(|value| Box::new(self.pattern(value))),
                        span,
                    }),
                    "object_assignment_pattern" => {
                        ObjectPatternProperty::Property(ObjectProperty {
                            key: self.property_key_of(child, "left"),
                            value: Some(Box::new(self.pattern(child))),
                            span,
                        })
                    }
                    "rest_pattern" => ObjectPatternProperty::Rest(self.rest_element(child)),
                    _ => return None,
                };
                Some(property)
            })
            .collect();

        ObjectPattern {
            properties,
            raw: self.text(node).to_string(),
            span: Span::from_node(node),
        }
    }

    fn property_key_of(&self, node: Node, field: &str) -> PropertyKey {
        match node.child_by_field_name(field) {
            Some(key) => self.property_key(key),
            None => PropertyKey::Other(self.opaque(node, Shape::OpaqueExpression)),
        }
    }

    fn rest_element(&self, node: Node) -> RestElement {
        let span = Span::from_node(node);
        let argument = match named_children(node).into_iter().next() {
            Some(inner) => self.pattern(inner),
            None => Pattern::Identifier(Identifier {
                name: String::new(),
                span,
            }),
        };
        RestElement {
            argument: Box::new(argument),
            raw: self.text(node).to_string(),
            span,
        }
    }

    fn identifier(&self, node: Node) -> Identifier {
        Identifier {
            name: self.text(node).to_string(),
            span: Span::from_node(node),
        }
    }

    fn string_literal(&self, node: Node) -> StringLiteral {
        let fragments: Vec<Node> = named_children(node)
            .into_iter()
            .filter(|child| matches!(child.kind(), "string_fragment" | "escape_sequence"))
            .collect();

        let value = if fragments.is_empty() {
            let text = self.text(node);
            text.trim_matches(|c| c == '"' || c == '\'').to_string()
        } else {
            fragments.iter().map(|fragment| self.text(*fragment)).collect()
        };

        StringLiteral {
            value,
            span: Span::from_node(node),
        }
    }
}

fn is_constructor_key(key: &PropertyKey) -> bool {
    match key {
        PropertyKey::Identifier(id) => id.name == "constructor",
        PropertyKey::StringLiteral(lit) => lit.value == "constructor",
        PropertyKey::Other(_) => false,
    }
}

/// Named, non-extra children (comments are extras).
fn named_children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    let nodes = node
        .named_children(&mut cursor)
        .filter(|child| !child.is_extra())
        .collect();
    nodes
}

fn children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    let nodes = node.children(&mut cursor).collect();
    nodes
}

/// Whether `node` has a direct anonymous child token of kind `token`.
fn has_token(node: Node, token: &str) -> bool {
    children(node)
        .into_iter()
        .any(|child| !child.is_named() && child.kind() == token)
}
