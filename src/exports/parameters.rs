//! Formal parameter extraction for declaration-like nodes.

use crate::ast::{
    ClassMember, Declaration, NodeRef, ObjectPattern, ObjectPatternProperty, Param, Pattern,
    Shape,
};
use crate::classify;

use super::type_name::{normalize, ANY_TAG};
use super::Parameter;

/// Where a node's parameters come from.
enum ParamSource<'a> {
    List(&'a [Param]),
    /// A lone destructured object parameter, expanded into one parameter per key.
    Destructured(&'a ObjectPattern),
    Empty,
}

/// Extract the formal parameters of a function, arrow, method, class (via its
/// constructor) or variable declarator whose initializer is a function.
///
/// Never fails: nodes without a locatable parameter list yield an empty list.
/// Parameters without a plain identifier name (rest elements, defaults,
/// destructuring, parameter properties) are dropped.
pub fn extract_parameters(node: NodeRef<'_>) -> Vec<Parameter> {
    match locate(node) {
        ParamSource::List(params) => params.iter().filter_map(to_parameter).collect(),
        ParamSource::Destructured(pattern) => destructured_parameters(pattern),
        ParamSource::Empty => Vec::new(),
    }
}

fn locate(node: NodeRef<'_>) -> ParamSource<'_> {
    if let Some(params) = direct_params(node) {
        return ParamSource::List(params);
    }

    if let NodeRef::Declarator(declarator) = node {
        if let Some(params) = declarator.init.as_ref().and_then(|init| init.params()) {
            return match params {
                [Param {
                    pattern: Pattern::Object(pattern),
                    is_property: false,
                    ..
                }] => ParamSource::Destructured(pattern),
                _ => ParamSource::List(params),
            };
        }
    }

    if classify::is(node, Shape::Expression) {
        return ParamSource::Empty;
    }

    if let Some(Declaration::Class(class)) = node.as_declaration() {
        return match class.constructor() {
            Some(constructor) => ParamSource::List(&constructor.params),
            None => ParamSource::Empty,
        };
    }

    ParamSource::Empty
}

/// Parameter lists the node exposes itself.
fn direct_params(node: NodeRef<'_>) -> Option<&[Param]> {
    if let Some(declaration) = node.as_declaration() {
        return match declaration {
            Declaration::Function(f) | Declaration::TsDeclareFunction(f) => Some(&f.params),
            _ => None,
        };
    }

    match node {
        NodeRef::Expression(expr) => expr.params(),
        NodeRef::ClassMember(ClassMember::Method(m) | ClassMember::DeclareMethod(m)) => {
            Some(&m.params)
        }
        _ => None,
    }
}

fn to_parameter(param: &Param) -> Option<Parameter> {
    let name = param.name()?;
    let ts_type = param
        .type_annotation
        .as_ref()
        .map(|annotation| annotation.tag.as_str())
        .unwrap_or(ANY_TAG);

    Some(Parameter {
        name: name.to_string(),
        type_name: normalize(ts_type),
        ts_type: ts_type.to_string(),
        is_optional: param.optional,
    })
}

fn destructured_parameters(pattern: &ObjectPattern) -> Vec<Parameter> {
    pattern
        .properties
        .iter()
        .filter_map(|property| match property {
            ObjectPatternProperty::Property(prop) => prop.key.as_identifier(),
            ObjectPatternProperty::Rest(_) => None,
        })
        .map(|key| Parameter {
            name: key.name.clone(),
            type_name: normalize(ANY_TAG),
            ts_type: ANY_TAG.to_string(),
            is_optional: false,
        })
        .collect()
}
