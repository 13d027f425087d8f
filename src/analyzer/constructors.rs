//! Constructor extraction and per-parameter type resolution.

use tree_sitter::Node;

use crate::syntax::{descendants_of_kind, ParsedUnit};

use super::{ConstructorParameter, ConstructorRecord, Span, UNKNOWN_TYPE};

/// Node kinds that can stand for a declared type in a parameter.
const TYPE_KINDS: &[&str] = &[
    "identifier",
    "generic_name",
    "nullable_type",
    "predefined_type",
];

/// Same set extended with array types, used by the positional fallback.
const TYPE_KINDS_WITH_ARRAY: &[&str] = &[
    "identifier",
    "generic_name",
    "nullable_type",
    "predefined_type",
    "array_type",
];

/// Extract every constructor declaration in the unit as a record.
///
/// The owning class is the nearest enclosing class declaration, so each
/// constructor yields exactly one record even when classes nest.
/// Parameters without a name field are dropped; parameters whose type
/// cannot be resolved keep their slot with the [`UNKNOWN_TYPE`] sentinel
/// so arity stays correct.
pub fn extract(unit: &ParsedUnit) -> Vec<ConstructorRecord> {
    let root = unit.root();
    let mut records = Vec::new();

    for ctor in descendants_of_kind(unit, root, "constructor_declaration") {
        let class_name = match enclosing_class_name(unit, ctor) {
            Some(name) => name,
            None => continue,
        };

        let mut parameters = Vec::new();
        if let Some(list) = ctor.child_by_field_name("parameters") {
            let mut cursor = list.walk();
            for child in list.named_children(&mut cursor) {
                if child.kind() != "parameter" {
                    continue;
                }
                let name_node = match child.child_by_field_name("name") {
                    Some(n) => n,
                    None => continue, // nameless parameters are dropped
                };
                // Error recovery can attach a zero-width MISSING name node;
                // that still counts as no resolvable name.
                let name = unit.node_text(name_node).trim().to_string();
                if name.is_empty() {
                    continue;
                }
                let type_text = normalize_type_text(resolve_type_text(unit, child));
                parameters.push(ConstructorParameter {
                    type_text,
                    name,
                    span: Span::from_node(child),
                });
            }
        }

        records.push(ConstructorRecord {
            class_name,
            parameters,
            span: Span::from_node(ctor),
        });
    }

    records
}

/// Name of the nearest enclosing class declaration, if any.
fn enclosing_class_name(unit: &ParsedUnit, node: Node) -> Option<String> {
    let mut current = node.parent();
    while let Some(n) = current {
        if n.kind() == "class_declaration" {
            return n
                .child_by_field_name("name")
                .map(|name| unit.node_text(name).to_string());
        }
        current = n.parent();
    }
    None
}

/// Resolve the declared type text of a parameter node.
///
/// Grammar variants represent "type with modifiers" differently, so this
/// degrades gracefully rather than failing the analysis:
/// 1. the designated `type` field,
/// 2. the first immediate child with a type-shaped kind,
/// 3. the last type-shaped child ending at or before the name's offset,
/// 4. empty (mapped to the sentinel by the caller).
fn resolve_type_text(unit: &ParsedUnit, param: Node) -> String {
    if let Some(type_node) = param.child_by_field_name("type") {
        return unit.node_text(type_node).trim().to_string();
    }

    let mut cursor = param.walk();
    for child in param.children(&mut cursor) {
        if TYPE_KINDS.contains(&child.kind()) {
            return unit.node_text(child).trim().to_string();
        }
    }

    if let Some(name_node) = param.child_by_field_name("name") {
        let limit = name_node.start_byte();
        let mut best = None;
        let mut cursor = param.walk();
        for child in param.children(&mut cursor) {
            if child.end_byte() <= limit && TYPE_KINDS_WITH_ARRAY.contains(&child.kind()) {
                best = Some(child);
            }
        }
        if let Some(node) = best {
            return unit.node_text(node).trim().to_string();
        }
    }

    String::new()
}

/// Map an empty resolver result to the sentinel.
pub fn normalize_type_text(text: String) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        UNKNOWN_TYPE.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::parse;

    fn extract_from(source: &str) -> Vec<ConstructorRecord> {
        extract(&parse(source).unwrap())
    }

    #[test]
    fn test_extracts_constructor_with_parameters() {
        let records = extract_from(
            r#"
class OrderService {
    public OrderService(ILogger logger, OrderRepository repo) { }
}
"#,
        );
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].class_name, "OrderService");
        let params = &records[0].parameters;
        assert_eq!(params.len(), 2);
        assert_eq!(params[0].type_text, "ILogger");
        assert_eq!(params[0].name, "logger");
        assert_eq!(params[1].type_text, "OrderRepository");
        assert_eq!(params[1].name, "repo");
    }

    #[test]
    fn test_zero_parameter_constructor() {
        let records = extract_from("class A { public A() { } }");
        assert_eq!(records.len(), 1);
        assert!(records[0].parameters.is_empty());
    }

    #[test]
    fn test_multiple_constructors_same_class() {
        let records = extract_from(
            r#"
class A {
    public A() { }
    public A(B b) { }
}
class B { }
"#,
        );
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.class_name == "A"));
    }

    #[test]
    fn test_nested_class_constructor_attributed_to_inner() {
        let records = extract_from(
            r#"
class Outer {
    class Inner {
        public Inner(int x) { }
    }
}
"#,
        );
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].class_name, "Inner");
    }

    #[test]
    fn test_generic_nullable_and_array_types() {
        let records = extract_from(
            r#"
class A {
    public A(List<string> items, int? count, byte[] buffer) { }
}
"#,
        );
        let params = &records[0].parameters;
        assert_eq!(params[0].type_text, "List<string>");
        assert_eq!(params[1].type_text, "int?");
        assert_eq!(params[2].type_text, "byte[]");
    }

    #[test]
    fn test_parameter_spans_are_ordered() {
        let records = extract_from("class A { public A(B b, C c) { } }");
        let params = &records[0].parameters;
        assert!(params[0].span.start_byte < params[1].span.start_byte);
    }

    #[test]
    fn test_no_parameter_survives_without_a_name() {
        // Recovery from a missing parameter name must never surface an
        // empty-named parameter, whatever shape the partial tree takes.
        for source in [
            "class A { public A(int ) { } }",
            "class A { public A(ref x) { } }",
            "class A { public A(B b, ) { } }",
        ] {
            let records = extract_from(source);
            for record in &records {
                for param in &record.parameters {
                    assert!(
                        !param.name.trim().is_empty(),
                        "empty parameter name from {:?}",
                        source
                    );
                }
            }
        }
    }

    #[test]
    fn test_normalize_maps_empty_to_sentinel() {
        assert_eq!(normalize_type_text(String::new()), UNKNOWN_TYPE);
        assert_eq!(normalize_type_text("  ".to_string()), UNKNOWN_TYPE);
        assert_eq!(normalize_type_text(" B ".to_string()), "B");
    }
}
