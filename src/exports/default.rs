use crate::ast::{DeclarationId, DefaultExport, ExportDefaultDeclaration, NodeRef, Shape};
use crate::classify;

use super::{extract_parameters, EntityName, ExportedEntity};

/// Resolve `export default ...` into its single entity.
///
/// Expressions are always reported as `default`. Function and class declarations
/// keep their own name when they have one.
pub(super) fn resolve_default_export(export: &ExportDefaultDeclaration) -> ExportedEntity<'_> {
    match &export.declaration {
        DefaultExport::Expression(expr) => {
            let node = NodeRef::Expression(expr);
            ExportedEntity::new(EntityName::Default, node)
                .default_export()
                .with_parameters(extract_parameters(node))
        }
        DefaultExport::Declaration(decl) => {
            let node = NodeRef::Declaration(decl);
            let name = match decl.id() {
                DeclarationId::Identifier(id) if !id.name.is_empty() => {
                    EntityName::Named(id.name.clone())
                }
                _ => EntityName::Default,
            };

            ExportedEntity::new(name, node)
                .class(classify::is(node, Shape::Class))
                .default_export()
                .with_parameters(extract_parameters(node))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::*;

    fn default_declaration(decl: Declaration) -> ExportDefaultDeclaration {
        ExportDefaultDeclaration {
            declaration: DefaultExport::Declaration(decl),
            span: Span::default(),
        }
    }

    #[test]
    fn test_named_class() {
        let export = default_declaration(Declaration::Class(Class {
            id: Some(Identifier::new("Foo")),
            ..Class::default()
        }));
        let entity = resolve_default_export(&export);
        assert_eq!(entity.name, "Foo");
        assert!(entity.is_class);
        assert!(entity.is_default);
    }

    #[test]
    fn test_anonymous_function() {
        let export = default_declaration(Declaration::Function(Function {
            params: vec![Param::identifier("x").with_type("TSNumberKeyword")],
            ..Function::default()
        }));
        let entity = resolve_default_export(&export);
        assert_eq!(entity.name, EntityName::Default);
        assert!(!entity.is_class);
        assert_eq!(entity.parameters.len(), 1);
        assert_eq!(entity.parameters[0].type_name, "number");
    }

    #[test]
    fn test_expression() {
        let export = ExportDefaultDeclaration {
            declaration: DefaultExport::Expression(Expression::Arrow(Function {
                params: vec![Param::identifier("a"), Param::identifier("b").optional()],
                ..Function::default()
            })),
            span: Span::default(),
        };
        let entity = resolve_default_export(&export);
        assert_eq!(entity.name, "default");
        assert!(entity.is_default);
        assert!(!entity.is_class);
        assert_eq!(entity.parameters.len(), 2);
        assert!(entity.parameters[1].is_optional);
    }

    #[test]
    fn test_identifier_expression_is_default() {
        let export = ExportDefaultDeclaration {
            declaration: DefaultExport::Expression(Expression::Identifier(Identifier::new(
                "handler",
            ))),
            span: Span::default(),
        };
        let entity = resolve_default_export(&export);
        assert_eq!(entity.name, EntityName::Default);
        assert!(entity.parameters.is_empty());
    }
}
