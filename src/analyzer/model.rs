//! Value types produced by one analysis pass.
//!
//! Everything here is rebuilt from scratch on each `analyze` call; nothing
//! is shared or mutated across calls.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Sentinel type text for a parameter whose declared type could not be
/// resolved. The parameter is kept so constructor arity stays correct.
pub const UNKNOWN_TYPE: &str = "unknown";

/// Source location span with byte offsets and line/column positions.
///
/// Byte offsets are the contract; line/column are carried for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    /// Start byte offset (0-indexed).
    pub start_byte: usize,
    /// End byte offset (0-indexed, exclusive).
    pub end_byte: usize,
    /// Start line (1-indexed).
    pub start_line: usize,
    /// Start column (1-indexed).
    pub start_col: usize,
    /// End line (1-indexed).
    pub end_line: usize,
    /// End column (1-indexed).
    pub end_col: usize,
}

impl Span {
    /// Create a span from a tree-sitter node.
    pub fn from_node(node: tree_sitter::Node) -> Self {
        let start = node.start_position();
        let end = node.end_position();
        Self {
            start_byte: node.start_byte(),
            end_byte: node.end_byte(),
            start_line: start.row + 1, // tree-sitter is 0-indexed
            start_col: start.column + 1,
            end_line: end.row + 1,
            end_col: end.column + 1,
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start_line, self.start_col)
    }
}

/// One constructor parameter: its declared type as written, its name, and
/// where it sits in the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructorParameter {
    /// Literal declared type text, or [`UNKNOWN_TYPE`].
    pub type_text: String,
    /// Parameter name. Parameters without a resolvable name are dropped
    /// before this struct is built.
    pub name: String,
    pub span: Span,
}

/// One constructor declaration. A class with several constructors yields
/// several records sharing the same `class_name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructorRecord {
    /// Name of the class the constructor belongs to.
    pub class_name: String,
    /// Parameters in declaration order.
    pub parameters: Vec<ConstructorParameter>,
    pub span: Span,
}

/// Interface and class names declared anywhere in the unit, nested types
/// included. A name declared twice by malformed source can appear in both
/// sets; this is not guarded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclarationSets {
    pub interfaces: BTreeSet<String>,
    pub classes: BTreeSet<String>,
}

/// Severity levels for rendered findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// A single detected dependency-injection issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Issue {
    /// A constructor parameter typed as a class declared in the same unit
    /// instead of an interface.
    ConcreteType {
        class_name: String,
        param_type: String,
        param_name: String,
        span: Span,
    },
    /// Classes whose constructor dependencies form a closed loop. The
    /// first name is repeated at the end to close the cycle.
    CircularDependency { cycle: Vec<String> },
    /// A constructor parameter type with no `Add*<...>` registration call
    /// in the same file. Best-effort, single-file heuristic.
    MissingRegistration {
        class_name: String,
        param_type: String,
        span: Span,
    },
}

impl Issue {
    /// All issue kinds render as warnings.
    pub fn severity(&self) -> Severity {
        Severity::Warning
    }

    /// Start line for rendering, if the issue has a position.
    pub fn line(&self) -> Option<usize> {
        match self {
            Issue::ConcreteType { span, .. } | Issue::MissingRegistration { span, .. } => {
                Some(span.start_line)
            }
            Issue::CircularDependency { .. } => None,
        }
    }

    /// Stable rule identifier for reports.
    pub fn rule(&self) -> &'static str {
        match self {
            Issue::ConcreteType { .. } => "concrete_type",
            Issue::CircularDependency { .. } => "circular_dependency",
            Issue::MissingRegistration { .. } => "missing_registration",
        }
    }

    /// Human-readable description.
    pub fn message(&self) -> String {
        match self {
            Issue::ConcreteType {
                class_name,
                param_type,
                param_name,
                ..
            } => format!(
                "constructor of {} takes concrete type {} for parameter '{}'; prefer an interface",
                class_name, param_type, param_name
            ),
            Issue::CircularDependency { cycle } => {
                format!("circular constructor dependency: {}", cycle.join(" -> "))
            }
            Issue::MissingRegistration {
                class_name,
                param_type,
                ..
            } => format!(
                "{} is injected into {} but has no registration in this file",
                param_type, class_name
            ),
        }
    }
}
