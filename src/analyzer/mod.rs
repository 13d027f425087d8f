//! Core analysis engine.
//!
//! Turns C# source text into constructor-injection facts and runs the
//! issue detectors over them. One call, one complete result: the analysis
//! is synchronous, stateless between invocations, and total for any
//! string input.

mod constructors;
mod declarations;
mod detectors;
mod graph;
mod model;
mod suggest;

pub use detectors::{detect_concrete_types, detect_missing_registrations, registered_types};
pub use graph::{build as build_dependency_graph, find_cycles, DependencyGraph};
pub use model::{
    ConstructorParameter, ConstructorRecord, DeclarationSets, Issue, Severity, Span, UNKNOWN_TYPE,
};
pub use suggest::suggest_registrations;

use serde::{Deserialize, Serialize};

use crate::syntax;

/// Complete result of analyzing one compilation unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Every constructor found, in document order.
    pub constructors: Vec<ConstructorRecord>,
    /// Advisory notes about recoverable parse problems.
    pub parse_warnings: Vec<String>,
    pub concrete_type_issues: Vec<Issue>,
    pub circular_dependency_issues: Vec<Issue>,
    pub missing_registration_issues: Vec<Issue>,
}

impl AnalysisResult {
    /// All issues across the three streams, in stream order.
    pub fn issues(&self) -> impl Iterator<Item = &Issue> {
        self.concrete_type_issues
            .iter()
            .chain(&self.circular_dependency_issues)
            .chain(&self.missing_registration_issues)
    }

    /// Whether any issue stream is non-empty.
    pub fn has_issues(&self) -> bool {
        self.issues().next().is_some()
    }
}

/// Analyze one C# source text.
///
/// Never fails: malformed or non-C# input yields a best-effort result
/// over whatever structure parsed, with an advisory entry in
/// `parse_warnings` when the tree contains recovered syntax errors.
pub fn analyze(source: &str) -> AnalysisResult {
    let mut result = AnalysisResult::default();

    let unit = match syntax::parse(source) {
        Ok(unit) => unit,
        Err(e) => {
            result.parse_warnings.push(format!("analysis skipped: {}", e));
            return result;
        }
    };

    if unit.has_errors() {
        result
            .parse_warnings
            .push("source contains syntax errors; results are best-effort".to_string());
    }

    let decls = declarations::collect(&unit);
    let records = constructors::extract(&unit);

    result.concrete_type_issues = detectors::detect_concrete_types(&records, &decls);

    let dependency_graph = graph::build(&records, &decls);
    result.circular_dependency_issues = graph::find_cycles(&dependency_graph)
        .into_iter()
        .map(|cycle| Issue::CircularDependency { cycle })
        .collect();

    result.missing_registration_issues = detectors::detect_missing_registrations(&records, source);
    result.constructors = records;

    result
}
