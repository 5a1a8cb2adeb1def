//! Normalization of raw type tags into short labels.

/// Tag used for parameters without a type annotation.
pub const ANY_TAG: &str = "TSAnyKeyword";

/// Tag-name suffixes, in priority order.
const SUFFIXES: &[&str] = &["Keyword", "Type", "Predicate", "Query"];

/// Map a raw type tag to a human-facing label.
///
/// `TSNumberKeyword` becomes `number` and `TSUnionType` becomes `union`: the `TS`
/// marker and the first matching suffix are stripped and the rest is lower-cased.
/// Tags without a known suffix keep their camel case, so `TSTypeReference` becomes
/// `typeReference`.
pub fn normalize(raw: &str) -> String {
    let core = raw.strip_prefix("TS").unwrap_or(raw);

    for suffix in SUFFIXES {
        if raw.ends_with(suffix) {
            let stripped = core.strip_suffix(suffix).unwrap_or(core);
            return stripped.trim().to_lowercase();
        }
    }

    let trimmed = core.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords() {
        let cases = [
            ("TSAnyKeyword", "any"),
            ("TSUnknownKeyword", "unknown"),
            ("TSNumberKeyword", "number"),
            ("TSBigIntKeyword", "bigint"),
            ("TSObjectKeyword", "object"),
            ("TSBooleanKeyword", "boolean"),
            ("TSStringKeyword", "string"),
            ("TSUndefinedKeyword", "undefined"),
            ("TSNullKeyword", "null"),
            ("TSNeverKeyword", "never"),
            ("TSVoidKeyword", "void"),
            ("TSIntrinsicKeyword", "intrinsic"),
        ];
        for (raw, expected) in cases {
            assert_eq!(normalize(raw), expected, "normalize({})", raw);
        }
    }

    #[test]
    fn test_type_suffix() {
        assert_eq!(normalize("TSArrayType"), "array");
        assert_eq!(normalize("TSUnionType"), "union");
        assert_eq!(normalize("TSFunctionType"), "function");
        assert_eq!(normalize("TSConstructorType"), "constructor");
    }

    #[test]
    fn test_predicate_and_query_suffixes() {
        assert_eq!(normalize("TSTypePredicate"), "type");
        assert_eq!(normalize("TSTypeQuery"), "type");
    }

    #[test]
    fn test_fallback_keeps_camel_case() {
        assert_eq!(normalize("TSTypeReference"), "typeReference");
        assert_eq!(normalize("TSTypeOperator"), "typeOperator");
        assert_eq!(normalize("TSTypeLiteral"), "typeLiteral");
        assert_eq!(normalize("TSLiteralType"), "literal");
    }

    #[test]
    fn test_total_on_odd_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("TS"), "");
        assert_eq!(normalize("Keyword"), "");
        assert_eq!(normalize("Custom"), "custom");
    }
}
