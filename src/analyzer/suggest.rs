//! Registration statement suggestions.
//!
//! A regex-oriented scan, deliberately separate from the syntax-tree
//! passes: base clauses are matched textually and interface names by the
//! `I` + uppercase convention. Replaceable by a stronger resolver without
//! touching the graph or detector logic.

use std::collections::{BTreeMap, BTreeSet};

use lazy_static::lazy_static;
use regex::Regex;

use super::ConstructorRecord;

lazy_static! {
    /// Class declaration with a base/implements clause, e.g.
    /// `class ConsoleLogger : ILogger, IDisposable {`.
    static ref CLASS_BASES_RE: Regex =
        Regex::new(r"class\s+([A-Za-z_]\w*)\s*(?:<[^>]*>)?\s*:\s*([^{]+)").unwrap();
    /// Interface naming convention: capital I followed by an uppercase letter.
    static ref INTERFACE_NAME_RE: Regex = Regex::new(r"^I[A-Z]").unwrap();
}

/// Derive a sorted, deduplicated list of suggested registration statements.
///
/// For every interface (by naming convention) with an implementing class
/// in the source, suggest a scoped interface-to-implementation
/// registration. Every other constructor-owning class gets a transient
/// self-registration. Pure function of its inputs.
pub fn suggest_registrations(records: &[ConstructorRecord], source: &str) -> Vec<String> {
    let mut implementations: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    let mut covered: BTreeSet<String> = BTreeSet::new();

    for caps in CLASS_BASES_RE.captures_iter(source) {
        let class_name = caps[1].to_string();
        for base in caps[2].split(',') {
            // Generic arguments and trailing constraint text ("where T :
            // class" rides along in the capture) are stripped down to the
            // leading identifier before matching the convention.
            let base = base.trim();
            let base = base.split('<').next().unwrap_or(base).trim();
            let base = base.split_whitespace().next().unwrap_or("");
            if INTERFACE_NAME_RE.is_match(base) {
                implementations
                    .entry(base.to_string())
                    .or_default()
                    .insert(class_name.clone());
                covered.insert(class_name.clone());
            }
        }
    }

    let mut suggestions: BTreeSet<String> = BTreeSet::new();
    for (interface, impls) in &implementations {
        for implementation in impls {
            suggestions.insert(format!(
                "services.AddScoped<{}, {}>();",
                interface, implementation
            ));
        }
    }
    for record in records {
        if !covered.contains(&record.class_name) {
            suggestions.insert(format!("services.AddTransient<{}>();", record.class_name));
        }
    }

    suggestions.into_iter().collect()
}
