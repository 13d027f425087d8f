//! Collects the interface and class names declared in a unit.

use crate::syntax::{descendants_of_kind, ParsedUnit};

use super::DeclarationSets;

/// Gather every interface and class name declared anywhere in the unit,
/// including types nested inside namespaces or other types. Declarations
/// without a resolvable name are skipped; an empty unit yields empty sets.
pub fn collect(unit: &ParsedUnit) -> DeclarationSets {
    let root = unit.root();
    let mut sets = DeclarationSets::default();

    for node in descendants_of_kind(unit, root, "interface_declaration") {
        if let Some(name) = node.child_by_field_name("name") {
            sets.interfaces.insert(unit.node_text(name).to_string());
        }
    }
    for node in descendants_of_kind(unit, root, "class_declaration") {
        if let Some(name) = node.child_by_field_name("name") {
            sets.classes.insert(unit.node_text(name).to_string());
        }
    }

    sets
}
