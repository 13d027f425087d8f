//! Syntax access layer over tree-sitter-c-sharp.
//!
//! The grammar is loaded once per process and shared as an immutable
//! `Language`. Every parse call creates its own `tree_sitter::Parser`
//! (parsers are cheap and not `Sync`), so each caller gets an
//! independently owned tree with no cross-call aliasing.

mod search;

pub use search::{descendants_of_kind, strategy, SearchStrategy};

use once_cell::sync::Lazy;
use thiserror::Error;
use tree_sitter::{Language, Node, Parser, Tree};

/// Errors from the parse boundary.
///
/// Note that *syntax errors in the source* are not errors here: tree-sitter
/// recovers and returns a tree containing ERROR nodes, which downstream
/// analysis handles best-effort.
#[derive(Debug, Error)]
pub enum SyntaxError {
    #[error("grammar version mismatch: {0}")]
    Language(#[from] tree_sitter::LanguageError),
    #[error("parser produced no tree")]
    NoTree,
}

/// Process-wide C# grammar, loaded on first use.
static LANGUAGE: Lazy<Language> = Lazy::new(|| tree_sitter_c_sharp::LANGUAGE.into());

/// The shared C# grammar configuration.
pub fn language() -> &'static Language {
    &LANGUAGE
}

/// A parsed compilation unit: the tree plus the source it was parsed from.
///
/// The source bytes are kept alongside the tree because node text
/// extraction needs them.
pub struct ParsedUnit {
    pub tree: Tree,
    pub source: Vec<u8>,
}

impl ParsedUnit {
    /// Root node of the unit.
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Get the source text covered by a node.
    pub fn node_text(&self, node: Node) -> &str {
        node.utf8_text(&self.source).unwrap_or("")
    }

    /// Whether the tree contains recovered syntax errors.
    pub fn has_errors(&self) -> bool {
        self.tree.root_node().has_error()
    }
}

/// Parse C# source into a [`ParsedUnit`].
///
/// Any string input yields a tree; malformed source comes back as a
/// partial tree with ERROR markers rather than a failure.
pub fn parse(source: &str) -> Result<ParsedUnit, SyntaxError> {
    let mut parser = Parser::new();
    parser.set_language(language())?;
    let tree = parser.parse(source, None).ok_or(SyntaxError::NoTree)?;
    Ok(ParsedUnit {
        tree,
        source: source.as_bytes().to_vec(),
    })
}
