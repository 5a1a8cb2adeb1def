//! Export resolution.
//!
//! Answers "what does this module export, and what does each export take as
//! input?" for a typed syntax tree:
//!
//! ```text
//! resolve_module_exports ──▶ resolve_export_statement ──▶ extract_parameters ──▶ normalize
//!                                      │
//!                                      └──▶ classify::{matches, assert_shape}
//! ```
//!
//! Every function here is pure over the borrowed tree. Results borrow the tree
//! through [`ExportedEntity::node`]; use [`ExportSummary`] for an owned,
//! serializable copy.

mod default;
mod parameters;
mod specifier;
mod statement;
pub mod type_name;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ast::{Module, NodeRef, Shape, Statement};
use crate::classify;
use crate::error::{ExportError, Result};

pub use parameters::extract_parameters;
pub use statement::resolve_export_statement;
pub use type_name::normalize;

/// Top-level statement shapes that carry exports.
const ACCEPTED_EXPORT_SHAPES: &[Shape] = &[
    Shape::ExportNamedDeclaration,
    Shape::ExportDefaultDeclaration,
];

/// The externally visible name of an export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityName {
    /// A confident identifier.
    Named(String),
    /// No better name was resolvable; reads as `"default"`.
    Default,
    /// Best-effort text of a binding pattern that has no single name.
    Degraded(String),
}

impl EntityName {
    pub fn as_str(&self) -> &str {
        match self {
            EntityName::Named(name) | EntityName::Degraded(name) => name,
            EntityName::Default => "default",
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, EntityName::Degraded(_))
    }
}

impl fmt::Display for EntityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PartialEq<&str> for EntityName {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

/// A formal parameter of an exported callable or constructor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    /// Normalized label, e.g. `string` or `typeReference`.
    #[serde(rename = "type")]
    pub type_name: String,
    /// Raw tag, e.g. `TSStringKeyword`.
    pub ts_type: String,
    pub is_optional: bool,
}

/// One exported binding.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedEntity<'a> {
    pub name: EntityName,
    pub is_class: bool,
    pub is_default: bool,
    /// Reserved; always false today.
    pub is_optional: bool,
    pub parameters: Vec<Parameter>,
    /// The node this entity was resolved from.
    pub node: NodeRef<'a>,
}

impl<'a> ExportedEntity<'a> {
    pub(crate) fn new(name: EntityName, node: NodeRef<'a>) -> Self {
        Self {
            name,
            is_class: false,
            is_default: false,
            is_optional: false,
            parameters: Vec::new(),
            node,
        }
    }

    pub(crate) fn class(mut self, is_class: bool) -> Self {
        self.is_class = is_class;
        self
    }

    pub(crate) fn default_export(mut self) -> Self {
        self.is_default = true;
        self
    }

    pub(crate) fn with_parameters(mut self, parameters: Vec<Parameter>) -> Self {
        self.parameters = parameters;
        self
    }

    /// Owned, serializable copy of this entity.
    pub fn summary(&self) -> ExportSummary {
        ExportSummary {
            name: self.name.as_str().to_string(),
            kind: if self.is_class {
                ExportKind::Class
            } else {
                ExportKind::Function
            },
            is_default: self.is_default,
            is_optional: self.is_optional,
            degraded: self.name.is_degraded(),
            line: self.node.span().start_line,
            parameters: self.parameters.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportKind {
    Class,
    Function,
}

impl ExportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportKind::Class => "class",
            ExportKind::Function => "function",
        }
    }
}

/// Owned projection of an [`ExportedEntity`], used by reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportSummary {
    pub name: String,
    pub kind: ExportKind,
    pub is_default: bool,
    pub is_optional: bool,
    /// The name is best-effort pattern text rather than an identifier.
    pub degraded: bool,
    /// Line of the resolved node (1-indexed, 0 for synthesized trees).
    pub line: usize,
    pub parameters: Vec<Parameter>,
}

/// Resolve every export of a module, in source order.
///
/// Only named and default export statements contribute; a module without them
/// yields an empty list. The first failing statement aborts the whole call.
pub fn resolve_module_exports(module: &Module) -> Result<Vec<ExportedEntity<'_>>> {
    let statements: Vec<&Statement> = module
        .body
        .iter()
        .filter(|statement| {
            matches!(
                statement,
                Statement::ExportNamed(_) | Statement::ExportDefault(_)
            )
        })
        .collect();

    let Some(first) = statements.first() else {
        return Ok(Vec::new());
    };

    let first = NodeRef::Statement(*first);
    if !ACCEPTED_EXPORT_SHAPES
        .iter()
        .any(|shape| classify::is(first, *shape))
    {
        return Err(ExportError::UnsupportedExportForm {
            shape: first.shape(),
        });
    }

    let mut entities = Vec::new();
    for statement in statements {
        entities.extend(resolve_export_statement(statement)?);
    }
    Ok(entities)
}
