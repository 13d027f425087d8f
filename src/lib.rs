//! Wirecheck - dependency-injection linter for C#.
//!
//! Wirecheck recovers constructor-injection dependency information from
//! C# source and flags DI anti-patterns: concrete-type parameters that
//! should be interfaces, circular constructor dependencies, and
//! dependencies without a container registration in the same file.
//!
//! # Architecture
//!
//! The codebase uses tree-sitter for AST-based analysis:
//!
//! - `syntax`: parse boundary and descendant search over tree-sitter-c-sharp
//! - `analyzer`: declaration/constructor extraction, dependency graph,
//!   cycle finding, heuristic detectors, registration suggestions
//! - `report`: output formatting (pretty, JSON)
//! - `cli`: command surface
//!
//! All heuristics are single-file and syntactic: cross-file resolution
//! and type-checking are explicitly out of scope, so missed issues for
//! externally declared types are expected.

pub mod analyzer;
pub mod cli;
pub mod report;
pub mod syntax;

pub use analyzer::{
    analyze, suggest_registrations, AnalysisResult, ConstructorParameter, ConstructorRecord,
    DeclarationSets, DependencyGraph, Issue, Severity, Span, UNKNOWN_TYPE,
};
pub use report::{FileReport, JsonReport};
pub use syntax::{parse, ParsedUnit, SearchStrategy};
