//! Command-line interface for wirecheck.

use clap::{Parser, Subcommand};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::analyzer;
use crate::report::{self, FileReport};

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ISSUES: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Dependency-injection linter for C#.
///
/// Wirecheck analyzes constructor-injection patterns in C# source files
/// and flags concrete-type parameters that should be interfaces, circular
/// constructor dependencies, and dependencies without a container
/// registration in the same file.
#[derive(Parser)]
#[command(name = "wirecheck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze C# files for dependency-injection issues
    #[command(visible_alias = "check")]
    Lint(LintArgs),
    /// Print suggested container registrations for a file
    Suggest(SuggestArgs),
}

/// Arguments for the lint command.
#[derive(Parser)]
pub struct LintArgs {
    /// Path to check (file or directory)
    pub path: PathBuf,

    /// Output format: pretty or json
    #[arg(short, long, default_value = "pretty")]
    pub format: String,

    /// Skip the single-file registration-coverage heuristic
    #[arg(long)]
    pub skip_registration_check: bool,
}

/// Arguments for the suggest command.
#[derive(Parser)]
pub struct SuggestArgs {
    /// C# file to derive registrations from
    pub path: PathBuf,
}

/// Collect .cs files under a directory, skipping hidden and build output
/// directories.
fn collect_files(root: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| {
            let name = e.file_name().to_string_lossy();
            // Depth 0 is the walk root itself; a caller-supplied path like
            // "." or ".checkout" must not be filtered as hidden.
            if e.depth() > 0 && e.file_type().is_dir() && name.starts_with('.') {
                return false;
            }
            if e.file_type().is_dir() && (name == "bin" || name == "obj" || name == "packages") {
                return false;
            }
            true
        })
    {
        let entry = entry?;
        if entry.file_type().is_file() {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some("cs") {
                files.push(path.to_path_buf());
            }
        }
    }

    files.sort();
    Ok(files)
}

/// Analyze one file into a report entry.
fn analyze_file(path: &Path, skip_registration_check: bool) -> anyhow::Result<FileReport> {
    let source = std::fs::read_to_string(path)?;
    let mut result = analyzer::analyze(&source);
    if skip_registration_check {
        result.missing_registration_issues.clear();
    }
    Ok(FileReport {
        file: path.to_string_lossy().to_string(),
        result,
    })
}

/// Run the lint command.
pub fn run_lint(args: &LintArgs) -> anyhow::Result<i32> {
    if args.format != "pretty" && args.format != "json" {
        eprintln!(
            "Error: invalid format {:?}, must be 'pretty' or 'json'",
            args.format
        );
        return Ok(EXIT_ERROR);
    }

    let metadata = match std::fs::metadata(&args.path) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Error: cannot access path {:?}: {}", args.path, e);
            return Ok(EXIT_ERROR);
        }
    };

    let files = if metadata.is_dir() {
        collect_files(&args.path)?
    } else {
        vec![args.path.clone()]
    };

    if files.is_empty() {
        eprintln!("Warning: no C# files to scan");
        return Ok(EXIT_SUCCESS);
    }

    // Per-file analyses are independent and stateless, so they fan out.
    let reports: Vec<FileReport> = files
        .par_iter()
        .map(|path| analyze_file(path, args.skip_registration_check))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let has_issues = reports.iter().any(|r| r.result.has_issues());
    let path_str = args.path.to_string_lossy().to_string();

    match args.format.as_str() {
        "json" => report::write_json(&path_str, reports)?,
        _ => report::write_pretty(&path_str, &reports),
    }

    if has_issues {
        Ok(EXIT_ISSUES)
    } else {
        Ok(EXIT_SUCCESS)
    }
}

/// Run the suggest command.
pub fn run_suggest(args: &SuggestArgs) -> anyhow::Result<i32> {
    let source = match std::fs::read_to_string(&args.path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: cannot read {:?}: {}", args.path, e);
            return Ok(EXIT_ERROR);
        }
    };

    let result = analyzer::analyze(&source);
    let suggestions = analyzer::suggest_registrations(&result.constructors, &source);
    report::write_suggestions(&suggestions);

    Ok(EXIT_SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_collect_files_skips_build_dirs() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Service.cs"), "class A { }").unwrap();
        fs::create_dir(dir.path().join("obj")).unwrap();
        fs::write(dir.path().join("obj").join("Gen.cs"), "class G { }").unwrap();
        fs::write(dir.path().join("notes.txt"), "hi").unwrap();

        let files = collect_files(dir.path()).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("Service.cs"));
    }

    #[test]
    fn test_collect_files_accepts_dot_prefixed_root() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join(".checkout");
        fs::create_dir(&root).unwrap();
        fs::write(root.join("Service.cs"), "class A { }").unwrap();
        fs::create_dir(root.join(".git")).unwrap();
        fs::write(root.join(".git").join("Hook.cs"), "class H { }").unwrap();

        // The root itself is never treated as hidden; nested hidden
        // directories still are.
        let files = collect_files(&root).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("Service.cs"));
    }

    #[test]
    fn test_analyze_file_reports_issues() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Order.cs");
        fs::write(&path, "class A { public A(B b) { } } class B { }").unwrap();

        let report = analyze_file(&path, false).unwrap();
        assert!(report.result.has_issues());

        let report = analyze_file(&path, true).unwrap();
        assert!(report.result.missing_registration_issues.is_empty());
        assert_eq!(report.result.concrete_type_issues.len(), 1);
    }
}
