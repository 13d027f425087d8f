//! Descendant search by node kind.
//!
//! Two interchangeable strategies behind one entry point: a tree-sitter
//! `Query` fast path and a manual recursive walk. The strategy is probed
//! once per process; both return the same nodes in document order, so
//! callers never need to know which one ran.

use once_cell::sync::Lazy;
use streaming_iterator::StreamingIterator;
use tree_sitter::{Node, Query, QueryCursor};

use super::{language, ParsedUnit};

/// How descendant lookups are executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStrategy {
    /// Indexed lookup through a compiled tree-sitter query.
    Query,
    /// Plain recursive traversal of the tree.
    Walk,
}

/// Probed once: if the grammar accepts a trivial kind query, the query
/// path is available; otherwise fall back to manual recursion.
static STRATEGY: Lazy<SearchStrategy> = Lazy::new(|| {
    match Query::new(language(), "(class_declaration) @node") {
        Ok(_) => SearchStrategy::Query,
        Err(_) => SearchStrategy::Walk,
    }
});

/// The strategy selected for this process.
pub fn strategy() -> SearchStrategy {
    *STRATEGY
}

/// Collect every descendant of `root` (including `root` itself) whose
/// kind is `kind`, in document order.
pub fn descendants_of_kind<'t>(unit: &'t ParsedUnit, root: Node<'t>, kind: &str) -> Vec<Node<'t>> {
    match *STRATEGY {
        SearchStrategy::Query => {
            query_search(unit, root, kind).unwrap_or_else(|| walk_search(root, kind))
        }
        SearchStrategy::Walk => walk_search(root, kind),
    }
}

/// Query-backed search. Returns None when the kind has no valid query
/// form, letting the caller fall back to the walk.
fn query_search<'t>(unit: &'t ParsedUnit, root: Node<'t>, kind: &str) -> Option<Vec<Node<'t>>> {
    let query = Query::new(language(), &format!("({kind}) @node")).ok()?;
    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(&query, root, unit.source.as_slice());

    let mut nodes = Vec::new();
    while let Some(m) = matches.next() {
        for capture in m.captures {
            nodes.push(capture.node);
        }
    }
    Some(nodes)
}

/// Recursive preorder fallback.
fn walk_search<'t>(node: Node<'t>, kind: &str) -> Vec<Node<'t>> {
    let mut nodes = Vec::new();
    collect(node, kind, &mut nodes);
    nodes
}

fn collect<'t>(node: Node<'t>, kind: &str, out: &mut Vec<Node<'t>>) {
    if node.kind() == kind {
        out.push(node);
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect(child, kind, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::parse;

    const NESTED: &str = r#"
namespace App {
    interface IRepo { }
    class Outer {
        class Inner { }
    }
}
"#;

    #[test]
    fn test_finds_nested_declarations() {
        let unit = parse(NESTED).unwrap();
        let classes = descendants_of_kind(&unit, unit.root(), "class_declaration");
        assert_eq!(classes.len(), 2);
        let interfaces = descendants_of_kind(&unit, unit.root(), "interface_declaration");
        assert_eq!(interfaces.len(), 1);
    }

    #[test]
    fn test_strategies_agree() {
        let unit = parse(NESTED).unwrap();
        let walked = walk_search(unit.root(), "class_declaration");
        let found = descendants_of_kind(&unit, unit.root(), "class_declaration");
        assert_eq!(
            walked.iter().map(|n| n.start_byte()).collect::<Vec<_>>(),
            found.iter().map(|n| n.start_byte()).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_document_order() {
        let unit = parse(NESTED).unwrap();
        let classes = descendants_of_kind(&unit, unit.root(), "class_declaration");
        let offsets: Vec<_> = classes.iter().map(|n| n.start_byte()).collect();
        let mut sorted = offsets.clone();
        sorted.sort_unstable();
        assert_eq!(offsets, sorted);
    }

    #[test]
    fn test_probe_selects_query_fast_path() {
        // The bundled grammar supports indexed kind lookup.
        assert_eq!(strategy(), SearchStrategy::Query);
    }

    #[test]
    fn test_unknown_kind_yields_nothing() {
        let unit = parse(NESTED).unwrap();
        assert!(descendants_of_kind(&unit, unit.root(), "no_such_kind").is_empty());
    }
}
