//! Mapping from tree-sitter type nodes to Babel-style type tags.

use phf::phf_map;
use tree_sitter::Node;

/// Keyword types by source text.
static KEYWORD_TAGS: phf::Map<&'static str, &'static str> = phf_map! {
    "any" => "TSAnyKeyword",
    "unknown" => "TSUnknownKeyword",
    "number" => "TSNumberKeyword",
    "bigint" => "TSBigIntKeyword",
    "object" => "TSObjectKeyword",
    "boolean" => "TSBooleanKeyword",
    "string" => "TSStringKeyword",
    "symbol" => "TSSymbolKeyword",
    "undefined" => "TSUndefinedKeyword",
    "null" => "TSNullKeyword",
    "never" => "TSNeverKeyword",
    "void" => "TSVoidKeyword",
};

/// Type node kinds with a fixed tag.
static KIND_TAGS: phf::Map<&'static str, &'static str> = phf_map! {
    "nested_type_identifier" => "TSTypeReference",
    "generic_type" => "TSTypeReference",
    "array_type" => "TSArrayType",
    "tuple_type" => "TSTupleType",
    "union_type" => "TSUnionType",
    "intersection_type" => "TSIntersectionType",
    "function_type" => "TSFunctionType",
    "constructor_type" => "TSConstructorType",
    "type_query" => "TSTypeQuery",
    "index_type_query" => "TSTypeOperator",
    "readonly_type" => "TSTypeOperator",
    "lookup_type" => "TSIndexedAccessType",
    "conditional_type" => "TSConditionalType",
    "infer_type" => "TSInferType",
    "template_literal_type" => "TSTemplateLiteralType",
    "type_predicate" => "TSTypePredicate",
    "asserts" => "TSTypePredicate",
    "this_type" => "TSThisType",
    "optional_type" => "TSOptionalType",
    "rest_type" => "TSRestType",
};

/// Tag for the type inside a `type_annotation` node (`: T`).
pub(crate) fn annotation_tag(annotation: Node, source: &[u8]) -> Option<String> {
    let mut cursor = annotation.walk();
    let ty = annotation
        .named_children(&mut cursor)
        .find(|child| !child.is_extra())?;
    Some(type_tag(ty, source))
}

/// Tag for a type node.
pub(crate) fn type_tag(node: Node, source: &[u8]) -> String {
    let kind = node.kind();
    match kind {
        "parenthesized_type" => match first_named(node) {
            Some(inner) => type_tag(inner, source),
            None => fallback_tag(kind),
        },
        "predefined_type" | "type_identifier" => {
            let text = node.utf8_text(source).unwrap_or("");
            match KEYWORD_TAGS.get(text.trim()) {
                Some(tag) => tag.to_string(),
                None if kind == "type_identifier" => "TSTypeReference".to_string(),
                // `unique symbol`
                None => "TSTypeOperator".to_string(),
            }
        }
        "literal_type" => {
            let literal = first_named(node).map(|n| n.kind()).unwrap_or("");
            match literal {
                "null" => "TSNullKeyword".to_string(),
                "undefined" => "TSUndefinedKeyword".to_string(),
                _ => "TSLiteralType".to_string(),
            }
        }
        "object_type" => {
            if has_mapped_clause(node) {
                "TSMappedType".to_string()
            } else {
                "TSTypeLiteral".to_string()
            }
        }
        _ => match KIND_TAGS.get(kind) {
            Some(tag) => tag.to_string(),
            None => fallback_tag(kind),
        },
    }
}

fn first_named(node: Node) -> Option<Node> {
    let mut cursor = node.walk();
    let found = node
        .named_children(&mut cursor)
        .find(|child| !child.is_extra());
    found
}

fn has_mapped_clause(object_type: Node) -> bool {
    let mut cursor = object_type.walk();
    let found = object_type
        .named_children(&mut cursor)
        .filter(|member| member.kind() == "index_signature")
        .any(|member| {
            let mut inner = member.walk();
            let mapped = member
                .named_children(&mut inner)
                .any(|child| child.kind() == "mapped_type_clause");
            mapped
        });
    found
}

/// `"TS"` followed by the PascalCase form of a tree-sitter kind.
fn fallback_tag(kind: &str) -> String {
    let mut tag = String::from("TS");
    for part in kind.split('_').filter(|part| !part.is_empty()) {
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            tag.extend(first.to_uppercase());
            tag.push_str(chars.as_str());
        }
    }
    tag
}
