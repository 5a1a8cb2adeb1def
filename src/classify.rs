//! Shape predicates and checked casts over [`NodeRef`]s.

use crate::ast::{NodeRef, Shape};
use crate::error::{ExportError, Result};

/// Whether `node` satisfies every shape in `shapes`.
///
/// Shapes may be concrete or categories, and are combined conjunctively, so
/// `&[Shape::Expression, Shape::Class]` only matches class expressions. A missing
/// node or an empty shape list never matches.
pub fn matches(node: Option<NodeRef<'_>>, shapes: &[Shape]) -> bool {
    let Some(node) = node else {
        return false;
    };
    if shapes.is_empty() {
        return false;
    }
    let concrete = node.shape();
    shapes.iter().all(|shape| shape.covers(concrete))
}

/// Shorthand for [`matches`] with a single shape.
pub fn is(node: NodeRef<'_>, shape: Shape) -> bool {
    matches(Some(node), &[shape])
}

/// Check that `node` is present and has exactly the concrete shape `shape`.
///
/// Returns the same reference on success. The second check repeats the first
/// through the predicate; the two must agree for every shape, and a disagreement
/// is reported as a mismatch rather than silently trusted.
pub fn assert_shape<'a>(node: Option<NodeRef<'a>>, shape: Shape) -> Result<NodeRef<'a>> {
    let node = node.ok_or(ExportError::MissingNode { expected: shape })?;

    let actual = node.shape();
    if actual != shape {
        return Err(ExportError::ShapeMismatch {
            expected: shape,
            actual,
        });
    }

    if !matches(Some(node), &[shape]) {
        return Err(ExportError::ShapeMismatch {
            expected: shape,
            actual,
        });
    }

    Ok(node)
}
