//! Output formatting for wirecheck results.
//!
//! Two formats:
//! - Pretty: colored terminal output for human readability
//! - JSON: structured output for programmatic consumption

use colored::*;
use serde::{Deserialize, Serialize};

use crate::analyzer::{AnalysisResult, Severity};

/// Analysis of one file, paired with its path for rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileReport {
    pub file: String,
    #[serde(flatten)]
    pub result: AnalysisResult,
}

/// Top-level JSON report.
#[derive(Serialize, Deserialize)]
pub struct JsonReport {
    pub version: String,
    pub path: String,
    pub files_scanned: usize,
    pub issue_count: usize,
    pub files: Vec<FileReport>,
}

/// Build the JSON report structure.
pub fn build_json(path: &str, reports: Vec<FileReport>) -> JsonReport {
    let issue_count = reports.iter().map(|r| r.result.issues().count()).sum();
    JsonReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        path: path.to_string(),
        files_scanned: reports.len(),
        issue_count,
        files: reports,
    }
}

/// Write results in JSON format.
pub fn write_json(path: &str, reports: Vec<FileReport>) -> anyhow::Result<()> {
    let report = build_json(path, reports);
    let json = serde_json::to_string_pretty(&report)?;
    println!("{}", json);
    Ok(())
}

/// Write results in pretty (human-readable) format.
pub fn write_pretty(path: &str, reports: &[FileReport]) {
    println!();
    print!("  ");
    print!("{}", "wirecheck".cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();

    print!("  {}", "Scanning: ".dimmed());
    println!("{}", path);
    println!();

    let mut total_issues = 0;
    for report in reports {
        write_file_report(report);
        total_issues += report.result.issues().count();
    }

    if total_issues == 0 {
        println!("  {}  no dependency-injection issues found", "✓".green());
    } else {
        let plural = if total_issues != 1 { "s" } else { "" };
        println!(
            "  {}  {} issue{} across {} file(s)",
            "✗".red(),
            total_issues,
            plural,
            reports.len()
        );
    }
    println!();
}

fn write_file_report(report: &FileReport) {
    let result = &report.result;
    if result.constructors.is_empty() && !result.has_issues() && result.parse_warnings.is_empty() {
        return;
    }

    println!("  {}", report.file.blue());

    for warning in &result.parse_warnings {
        println!("    {} {}", "WARN ".yellow(), warning);
    }

    // The dependency listing itself is informational.
    for ctor in &result.constructors {
        let deps: Vec<&str> = ctor
            .parameters
            .iter()
            .map(|p| p.type_text.as_str())
            .collect();
        print!("    {} ", "INFO ".blue());
        print!("{}", format!(":{} ", ctor.span.start_line).dimmed());
        println!("{}({})", ctor.class_name, deps.join(", "));
    }

    for issue in result.issues() {
        write_severity_tag(issue.severity());
        print!("{}", format!("{:<22}", issue.rule()).dimmed());
        if let Some(line) = issue.line() {
            print!("{}", format!(":{}", line).dimmed());
        }
        println!();
        println!("          {}", issue.message());
    }
    println!();
}

fn write_severity_tag(severity: Severity) {
    match severity {
        Severity::Warning => print!("    {} ", "WARN ".yellow()),
        Severity::Info => print!("    {} ", "INFO ".blue()),
    }
}

/// Write registration suggestions, one statement per line.
pub fn write_suggestions(suggestions: &[String]) {
    if suggestions.is_empty() {
        println!("no registration suggestions");
        return;
    }
    for suggestion in suggestions {
        println!("{}", suggestion);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::analyze;

    #[test]
    fn test_json_report_shape() {
        let result = analyze("class A { public A(B b) { } } class B { }");
        let report = build_json(
            "test.cs",
            vec![FileReport {
                file: "test.cs".to_string(),
                result,
            }],
        );
        assert_eq!(report.files_scanned, 1);
        // One concrete-type issue plus one missing-registration issue.
        assert_eq!(report.issue_count, 2);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["files"][0]["file"], "test.cs");
        assert!(json["files"][0]["constructors"].is_array());
        assert!(json["files"][0]["concrete_type_issues"].is_array());
    }

    #[test]
    fn test_empty_report() {
        let report = build_json(".", vec![]);
        assert_eq!(report.files_scanned, 0);
        assert_eq!(report.issue_count, 0);
    }
}
