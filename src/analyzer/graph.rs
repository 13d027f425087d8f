//! Intra-file dependency graph and cycle enumeration.

use std::collections::{BTreeMap, HashSet};

use super::{ConstructorRecord, DeclarationSets};

/// Class name to the list of class names its constructors depend on.
/// Ordered for deterministic traversal and output.
pub type DependencyGraph = BTreeMap<String, Vec<String>>;

/// Build the dependency graph from the extracted constructors.
///
/// Only parameter types declared as classes in the same unit qualify as
/// edges; interface-typed and externally-typed parameters are excluded.
/// Classes with no qualifying dependency get no entry.
pub fn build(records: &[ConstructorRecord], decls: &DeclarationSets) -> DependencyGraph {
    let mut graph = DependencyGraph::new();

    for record in records {
        let deps: Vec<String> = record
            .parameters
            .iter()
            .filter(|p| decls.classes.contains(&p.type_text))
            .map(|p| p.type_text.clone())
            .collect();
        if deps.is_empty() {
            continue;
        }
        graph.entry(record.class_name.clone()).or_default().extend(deps);
    }

    graph
}

/// Enumerate distinct cycles in the graph.
///
/// Depth-first traversal from every node, tracking the current path (for
/// cycle reconstruction) and a path-membership set (for O(1) back-edge
/// checks) separately from the traversal's visited set. Each traversal is
/// exhaustive for its start node, independent of other start nodes.
///
/// A cycle is spliced from the first occurrence of the revisited node to
/// the current node, closed by repeating the start name. Cycles with the
/// same participant set collapse to one report regardless of rotation or
/// direction; the first-encountered concrete path wins. Self-loops are a
/// valid one-element cycle.
pub fn find_cycles(graph: &DependencyGraph) -> Vec<Vec<String>> {
    let mut cycles = Vec::new();
    let mut seen_keys = HashSet::new();

    for start in graph.keys() {
        let mut visited = HashSet::new();
        let mut path = Vec::new();
        let mut on_path = HashSet::new();
        visit(
            graph,
            start,
            &mut visited,
            &mut path,
            &mut on_path,
            &mut seen_keys,
            &mut cycles,
        );
    }

    cycles
}

fn visit(
    graph: &DependencyGraph,
    node: &str,
    visited: &mut HashSet<String>,
    path: &mut Vec<String>,
    on_path: &mut HashSet<String>,
    seen_keys: &mut HashSet<String>,
    cycles: &mut Vec<Vec<String>>,
) {
    if on_path.contains(node) {
        if let Some(pos) = path.iter().position(|n| n == node) {
            let mut cycle: Vec<String> = path[pos..].to_vec();
            cycle.push(node.to_string());
            if seen_keys.insert(cycle_key(&cycle)) {
                cycles.push(cycle);
            }
        }
        return;
    }
    if !visited.insert(node.to_string()) {
        return;
    }

    path.push(node.to_string());
    on_path.insert(node.to_string());

    if let Some(deps) = graph.get(node) {
        for dep in deps {
            visit(graph, dep, visited, path, on_path, seen_keys, cycles);
        }
    }

    path.pop();
    on_path.remove(node);
}

/// Deduplication key: member names (without the repeated closing name)
/// sorted and joined.
fn cycle_key(cycle: &[String]) -> String {
    let mut members: Vec<&str> = cycle[..cycle.len() - 1].iter().map(String::as_str).collect();
    members.sort_unstable();
    members.join("->")
}
