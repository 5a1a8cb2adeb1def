//! Error types for export resolution.

use thiserror::Error;

use crate::ast::Shape;

/// Errors raised while lowering a syntax tree or resolving its exports.
///
/// Every variant is fatal to the resolution call that produced it: one malformed
/// export statement aborts the whole module.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExportError {
    /// A required node reference was absent.
    #[error("node is undefined (expected {expected})")]
    MissingNode { expected: Shape },

    /// A node's discriminant did not match the expected shape.
    #[error("expected {expected} but got {actual}")]
    ShapeMismatch { expected: Shape, actual: Shape },

    /// A class or declaration had no identifiable name.
    #[error("could not identify node name for {shape}")]
    UnresolvableName { shape: Shape },

    /// The first export statement is neither a named nor a default export.
    #[error(
        "only named or default exports are supported, found {shape}. \
         Please add a named or default export to the function or class."
    )]
    UnsupportedExportForm { shape: Shape },

    /// A branch assumed unreachable was reached.
    #[error("{0}")]
    InvariantViolation(&'static str),

    /// The tree-sitter grammar could not be loaded.
    #[error("failed to load grammar: {0}")]
    Language(String),

    /// Tree-sitter produced no tree.
    #[error("failed to parse source")]
    Parse,
}

impl From<tree_sitter::LanguageError> for ExportError {
    fn from(err: tree_sitter::LanguageError) -> Self {
        ExportError::Language(err.to_string())
    }
}

pub type Result<T, E = ExportError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = ExportError::ShapeMismatch {
            expected: Shape::ClassDeclaration,
            actual: Shape::FunctionDeclaration,
        };
        assert_eq!(
            err.to_string(),
            "expected ClassDeclaration but got FunctionDeclaration"
        );

        let err = ExportError::InvariantViolation("This should not be possible!");
        assert_eq!(err.to_string(), "This should not be possible!");

        let err = ExportError::MissingNode {
            expected: Shape::Expression,
        };
        assert!(err.to_string().contains("Expression"));
    }
}
