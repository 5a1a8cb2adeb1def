use crate::ast::{ExportSpecifier, ModuleExportName, NodeRef};

use super::{EntityName, ExportedEntity};

/// Resolve one entry of an export list.
///
/// A string-literal exported name (`export { a as "b-c" }`) has no identifier to
/// report and is treated as a default export.
pub(super) fn resolve_specifier(specifier: &ExportSpecifier) -> ExportedEntity<'_> {
    let node = NodeRef::Specifier(specifier);

    match specifier {
        ExportSpecifier::Default(spec) => {
            ExportedEntity::new(EntityName::Named(spec.exported.name.clone()), node)
                .default_export()
        }
        ExportSpecifier::Named(spec) => by_exported_name(&spec.exported, node),
        ExportSpecifier::Namespace(spec) => by_exported_name(&spec.exported, node),
    }
}

fn by_exported_name<'a>(exported: &ModuleExportName, node: NodeRef<'a>) -> ExportedEntity<'a> {
    match exported {
        ModuleExportName::Identifier(id) => {
            ExportedEntity::new(EntityName::Named(id.name.clone()), node)
        }
        ModuleExportName::StringLiteral(_) => {
            ExportedEntity::new(EntityName::Default, node).default_export()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::*;

    fn named(local: &str, exported: ModuleExportName) -> ExportSpecifier {
        ExportSpecifier::Named(ExportNamedSpecifier {
            local: ModuleExportName::Identifier(Identifier::new(local)),
            exported,
            type_only: false,
            span: Span::default(),
        })
    }

    #[test]
    fn test_named_specifier_uses_exported_name() {
        let spec = named("a", ModuleExportName::Identifier(Identifier::new("b")));
        let entity = resolve_specifier(&spec);
        assert_eq!(entity.name, "b");
        assert!(!entity.is_default);
        assert!(!entity.is_class);
        assert!(entity.parameters.is_empty());
        assert_eq!(entity.node, NodeRef::Specifier(&spec));
    }

    #[test]
    fn test_alias_to_default_is_not_default() {
        let spec = named("a", ModuleExportName::Identifier(Identifier::new("default")));
        let entity = resolve_specifier(&spec);
        assert_eq!(entity.name, "default");
        assert!(!entity.is_default);
    }

    #[test]
    fn test_string_literal_name_is_default() {
        let spec = named("a", ModuleExportName::StringLiteral(StringLiteral::new("a-b")));
        let entity = resolve_specifier(&spec);
        assert_eq!(entity.name, EntityName::Default);
        assert!(entity.is_default);
    }

    #[test]
    fn test_default_specifier() {
        let spec = ExportSpecifier::Default(ExportDefaultSpecifier {
            exported: Identifier::new("v"),
            span: Span::default(),
        });
        let entity = resolve_specifier(&spec);
        assert_eq!(entity.name, "v");
        assert!(entity.is_default);
    }

    #[test]
    fn test_namespace_specifier() {
        let spec = ExportSpecifier::Namespace(ExportNamespaceSpecifier {
            exported: ModuleExportName::Identifier(Identifier::new("utils")),
            span: Span::default(),
        });
        let entity = resolve_specifier(&spec);
        assert_eq!(entity.name, "utils");
        assert!(!entity.is_default);
    }
}
