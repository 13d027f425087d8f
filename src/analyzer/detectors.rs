//! Heuristic issue detectors over the extracted constructor data.
//!
//! These are purely local, syntactic heuristics. They cannot see other
//! compilation units, so false negatives are expected; the detectors are
//! kept independent so overlapping issues are reported separately.

use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;

use super::{ConstructorRecord, DeclarationSets, Issue, UNKNOWN_TYPE};

lazy_static! {
    /// Matches container registration call sites of the shape
    /// `AddScoped<IFoo, Foo>` / `AddTransient<Foo>` / any other `Add*<...>`.
    static ref ADD_CALL_RE: Regex = Regex::new(r"\bAdd\w+\s*<([^<>]+)>").unwrap();
}

/// Emit a [`Issue::ConcreteType`] for every parameter whose type is a
/// class declared in this unit and not an interface. The unknown sentinel
/// never fires.
pub fn detect_concrete_types(records: &[ConstructorRecord], decls: &DeclarationSets) -> Vec<Issue> {
    let mut issues = Vec::new();
    for record in records {
        for param in &record.parameters {
            if param.type_text == UNKNOWN_TYPE {
                continue;
            }
            if decls.classes.contains(&param.type_text)
                && !decls.interfaces.contains(&param.type_text)
            {
                issues.push(Issue::ConcreteType {
                    class_name: record.class_name.clone(),
                    param_type: param.type_text.clone(),
                    param_name: param.name.clone(),
                    span: param.span.clone(),
                });
            }
        }
    }
    issues
}

/// Emit a [`Issue::MissingRegistration`] for every parameter whose type
/// has no `Add*<...>` registration call in the same file.
///
/// Registration in another file is invisible here, so this under-reports by
/// design and must not be treated as authoritative.
pub fn detect_missing_registrations(records: &[ConstructorRecord], source: &str) -> Vec<Issue> {
    let registered = registered_types(source);

    let mut issues = Vec::new();
    for record in records {
        for param in &record.parameters {
            if registered.contains(param.type_text.as_str()) {
                continue;
            }
            issues.push(Issue::MissingRegistration {
                class_name: record.class_name.clone(),
                param_type: param.type_text.clone(),
                span: param.span.clone(),
            });
        }
    }
    issues
}

/// Every type name appearing as a generic argument of an `Add*<...>`
/// call in the source.
pub fn registered_types(source: &str) -> HashSet<String> {
    let mut types = HashSet::new();
    for caps in ADD_CALL_RE.captures_iter(source) {
        if let Some(args) = caps.get(1) {
            for arg in args.as_str().split(',') {
                let arg = arg.trim();
                if !arg.is_empty() {
                    types.insert(arg.to_string());
                }
            }
        }
    }
    types
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{constructors, declarations};
    use crate::syntax::parse;

    fn setup(source: &str) -> (Vec<ConstructorRecord>, DeclarationSets) {
        let unit = parse(source).unwrap();
        (constructors::extract(&unit), declarations::collect(&unit))
    }

    #[test]
    fn test_concrete_type_flagged() {
        let (records, decls) = setup("class A { public A(B b) { } } class B { }");
        let issues = detect_concrete_types(&records, &decls);
        assert_eq!(issues.len(), 1);
        match &issues[0] {
            Issue::ConcreteType {
                class_name,
                param_type,
                param_name,
                ..
            } => {
                assert_eq!(class_name, "A");
                assert_eq!(param_type, "B");
                assert_eq!(param_name, "b");
            }
            other => panic!("unexpected issue: {:?}", other),
        }
    }

    #[test]
    fn test_interface_parameter_not_flagged() {
        let (records, decls) = setup(
            "class A { public A(IThing t) { } } interface IThing { }",
        );
        assert!(detect_concrete_types(&records, &decls).is_empty());
    }

    #[test]
    fn test_external_type_not_flagged() {
        // HttpClient is not declared in this unit.
        let (records, decls) = setup("class A { public A(HttpClient http) { } }");
        assert!(detect_concrete_types(&records, &decls).is_empty());
    }

    #[test]
    fn test_registered_types_two_argument_form() {
        let types =
            registered_types("services.AddScoped<ILogger, ConsoleLogger>(); services.AddTransient<Widget>();");
        assert!(types.contains("ILogger"));
        assert!(types.contains("ConsoleLogger"));
        assert!(types.contains("Widget"));
        assert_eq!(types.len(), 3);
    }

    #[test]
    fn test_missing_registration_flags_unregistered_parameter() {
        let source = r#"
class Startup {
    public Startup() { }
    public void Configure(IServiceCollection services) {
        services.AddScoped<ILogger, ConsoleLogger>();
    }
}
class OrderService {
    public OrderService(ILogger logger, IClock clock) { }
}
"#;
        let (records, _) = setup(source);
        let issues = detect_missing_registrations(&records, source);
        let missing: Vec<_> = issues
            .iter()
            .filter_map(|i| match i {
                Issue::MissingRegistration { param_type, .. } => Some(param_type.as_str()),
                _ => None,
            })
            .collect();
        assert!(missing.contains(&"IClock"));
        assert!(!missing.contains(&"ILogger"));
    }

    #[test]
    fn test_detectors_overlap_is_allowed() {
        // Concrete and unregistered at the same time: both streams fire.
        let source = "class A { public A(B b) { } } class B { }";
        let (records, decls) = setup(source);
        assert_eq!(detect_concrete_types(&records, &decls).len(), 1);
        assert_eq!(detect_missing_registrations(&records, source).len(), 1);
    }
}
