//! Per-statement export resolution.

use tracing::debug;

use crate::ast::{
    Declaration, DeclarationId, ExportNamedDeclaration, NodeRef, ObjectPatternProperty, Pattern,
    Shape, Statement, VariableDeclarator,
};
use crate::classify;
use crate::error::{ExportError, Result};

use super::default::resolve_default_export;
use super::specifier::resolve_specifier;
use super::{extract_parameters, EntityName, ExportedEntity};

/// Resolve the entities exported by a single top-level statement.
///
/// Statements that are not named or default exports (including `export * from`)
/// resolve to nothing. Entities come back in source order.
pub fn resolve_export_statement(statement: &Statement) -> Result<Vec<ExportedEntity<'_>>> {
    let entities = match statement {
        Statement::ExportDefault(export) => {
            classify::assert_shape(
                Some(NodeRef::Statement(statement)),
                Shape::ExportDefaultDeclaration,
            )?;
            vec![resolve_default_export(export)]
        }
        Statement::ExportNamed(export) => {
            classify::assert_shape(
                Some(NodeRef::Statement(statement)),
                Shape::ExportNamedDeclaration,
            )?;
            resolve_named_export(export)?
        }
        Statement::ExportAll(_)
        | Statement::Import(_)
        | Statement::Declaration(_)
        | Statement::Other(_) => Vec::new(),
    };

    debug!(
        shape = %statement.shape(),
        line = statement.span().start_line,
        count = entities.len(),
        "resolved export statement"
    );
    Ok(entities)
}

fn resolve_named_export(export: &ExportNamedDeclaration) -> Result<Vec<ExportedEntity<'_>>> {
    match (export.specifiers.as_slice(), &export.declaration) {
        ([], None) => Ok(Vec::new()),
        (specifiers, None) => Ok(specifiers.iter().map(resolve_specifier).collect()),
        ([], Some(declaration)) => resolve_declaration(declaration),
        (_, Some(_)) => Err(ExportError::InvariantViolation(
            "This should not be possible!",
        )),
    }
}

fn resolve_declaration(declaration: &Declaration) -> Result<Vec<ExportedEntity<'_>>> {
    let node = NodeRef::Declaration(declaration);

    match declaration {
        Declaration::Variable(variable) => Ok(variable
            .declarations
            .iter()
            .flat_map(resolve_declarator)
            .collect()),
        Declaration::Class(class) => {
            classify::assert_shape(Some(node), Shape::ClassDeclaration)?;
            let name = class
                .id
                .as_ref()
                .filter(|id| !id.name.is_empty())
                .ok_or(ExportError::UnresolvableName {
                    shape: Shape::ClassDeclaration,
                })?;

            Ok(vec![ExportedEntity::new(EntityName::Named(name.name.clone()), node)
                .class(true)
                .with_parameters(extract_parameters(node))])
        }
        _ => Ok(match declaration.id() {
            DeclarationId::Identifier(id) if !id.name.is_empty() => {
                vec![ExportedEntity::new(EntityName::Named(id.name.clone()), node)
                    .with_parameters(extract_parameters(node))]
            }
            DeclarationId::Other(text) => {
                vec![ExportedEntity::new(EntityName::Degraded(text.to_string()), node)]
            }
            DeclarationId::Identifier(_) | DeclarationId::Absent => Vec::new(),
        }),
    }
}

fn resolve_declarator(declarator: &VariableDeclarator) -> Vec<ExportedEntity<'_>> {
    let node = NodeRef::Declarator(declarator);
    let is_class = classify::is(node, Shape::Class);

    match &declarator.id {
        Pattern::Identifier(id) => {
            vec![ExportedEntity::new(EntityName::Named(id.name.clone()), node)
                .class(is_class)
                .with_parameters(extract_parameters(node))]
        }
        Pattern::Object(pattern) => pattern
            .properties
            .iter()
            .filter_map(|property| match property {
                ObjectPatternProperty::Property(prop) => prop.key.as_identifier(),
                ObjectPatternProperty::Rest(_) => None,
            })
            .map(|key| {
                ExportedEntity::new(EntityName::Named(key.name.clone()), NodeRef::Identifier(key))
                    .class(is_class)
                    .with_parameters(extract_parameters(node))
            })
            .collect(),
        other => vec![ExportedEntity::new(
            EntityName::Degraded(other.text()),
            NodeRef::Pattern(other),
        )
        .class(is_class)],
    }
}
