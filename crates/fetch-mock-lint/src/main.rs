//! fetch-mock fixture linter CLI
//!
//! Validates fixture files before a test suite loads them.
//!
//! Usage:
//!   fetch-mock-lint <directory_or_file> [OPTIONS]

use clap::{Parser, ValueEnum};
use fetch_mock_lint::{lint_directory, lint_file, LintIssue, LintOptions, LintResult, Severity};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

// ANSI color codes
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// fetch-mock fixture linter
#[derive(Parser, Debug)]
#[command(name = "fetch-mock-lint")]
#[command(author, version, about = "Validate fetch-mock fixture files")]
struct Args {
    /// Fixture file, or directory of .yaml/.yml/.json fixture files
    #[arg(required = true)]
    path: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,

    /// Only show errors (hide warnings and hints)
    #[arg(short = 'e', long)]
    errors_only: bool,

    /// Also report info-level hints
    #[arg(short, long)]
    verbose: bool,

    /// Strict mode - treat warnings as errors
    #[arg(short, long)]
    strict: bool,
}

fn main() {
    let args = Args::parse();
    let options = LintOptions {
        verbose: args.verbose,
    };

    let result = if args.path.is_dir() {
        lint_directory(&args.path, &options)
    } else {
        lint_file(&args.path, &options)
    };

    match args.output {
        OutputFormat::Json => print_results_json(&result, args.errors_only),
        OutputFormat::Text => print_results(&result, &args),
    }

    std::process::exit(exit_code(&result, args.strict));
}

fn exit_code(result: &LintResult, strict: bool) -> i32 {
    let failed = result.has_errors() || (strict && result.has_warnings());
    i32::from(failed)
}

fn visible<'a>(result: &'a LintResult, errors_only: bool) -> impl Iterator<Item = &'a LintIssue> {
    result
        .issues
        .iter()
        .filter(move |i| !errors_only || i.severity == Severity::Error)
}

fn print_results_json(result: &LintResult, errors_only: bool) {
    let issues: Vec<&LintIssue> = visible(result, errors_only).collect();
    let report = serde_json::json!({
        "issues": issues,
        "filesChecked": result.files_checked,
        "errors": result.errors,
        "warnings": result.warnings,
    });
    match serde_json::to_string_pretty(&report) {
        Ok(output) => println!("{output}"),
        Err(e) => eprintln!("{RED}Failed to serialize report: {e}{RESET}"),
    }
}

fn print_results(result: &LintResult, args: &Args) {
    println!("{BOLD}{CYAN}fetch-mock Fixture Linter{RESET}");
    println!("{DIM}{RULE}{RESET}");
    println!("{DIM}Scanning:{RESET} {CYAN}{}{RESET}", args.path.display());
    println!(
        "{DIM}Found:{RESET}    {BOLD}{}{RESET} fixture file(s)\n",
        result.files_checked
    );

    let mut issues_by_file: BTreeMap<&Path, Vec<&LintIssue>> = BTreeMap::new();
    for issue in visible(result, args.errors_only) {
        issues_by_file.entry(issue.file.as_path()).or_default().push(issue);
    }

    if issues_by_file.is_empty() {
        println!("{GREEN}{BOLD}No issues found!{RESET}\n");
    }

    for (file, issues) in &issues_by_file {
        print_file(file, issues);
    }

    println!("{DIM}{RULE}{RESET}");
    println!("{BOLD}{CYAN}Summary{RESET}");
    println!("{DIM}{RULE}{RESET}");
    println!(
        "  {DIM}Files checked:{RESET} {BOLD}{}{RESET}",
        result.files_checked
    );
    if result.errors > 0 {
        println!("  {RED}Errors:{RESET}    {BOLD}{RED}{}{RESET}", result.errors);
    } else {
        println!("  {GREEN}Errors:{RESET}    {BOLD}{GREEN}0{RESET}");
    }
    if result.warnings > 0 {
        println!(
            "  {YELLOW}Warnings:{RESET}  {BOLD}{YELLOW}{}{RESET}",
            result.warnings
        );
    } else {
        println!("  {DIM}Warnings:{RESET}  {BOLD}0{RESET}");
    }
    println!();

    if result.errors == 0 && result.warnings == 0 {
        println!("{GREEN}{BOLD}All checks passed!{RESET}");
    } else if result.errors == 0 && !args.strict {
        println!("{YELLOW}{BOLD}Passed with warnings{RESET}");
    } else {
        println!("{RED}{BOLD}Linting failed{RESET}");
    }
}

fn print_file(file: &Path, issues: &[&LintIssue]) {
    let errors = issues.iter().filter(|i| i.severity == Severity::Error).count();
    let warnings = issues
        .iter()
        .filter(|i| i.severity == Severity::Warning)
        .count();

    let status = match (errors, warnings) {
        (0, 0) => format!("{CYAN}INFO{RESET}"),
        (0, _) => format!("{YELLOW}WARN{RESET}"),
        _ => format!("{RED}FAIL{RESET}"),
    };
    let mut counts = Vec::new();
    if errors > 0 {
        counts.push(format!("{RED}{errors} error(s){RESET}"));
    }
    if warnings > 0 {
        counts.push(format!("{YELLOW}{warnings} warning(s){RESET}"));
    }
    let counts = if counts.is_empty() {
        String::new()
    } else {
        let separator = format!("{DIM}, {RESET}");
        format!(" {DIM}({RESET}{}{DIM}){RESET}", counts.join(separator.as_str()))
    };

    let name = file
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_else(|| file.to_string_lossy());
    println!("{status} {BOLD}{CYAN}{name}{RESET}{counts}");

    for issue in issues {
        let color = severity_color(issue.severity);
        let marker = format!("{color}|{RESET}");
        let location = issue
            .location
            .as_ref()
            .map(|l| format!("{DIM}[{RESET}{CYAN}{l}{RESET}{DIM}]{RESET} "))
            .unwrap_or_default();

        println!(
            "  {marker} {location}{BOLD}{color}{}{RESET}: {} {DIM}({color}{}{DIM}){RESET}",
            issue.severity.label(),
            issue.message,
            issue.code
        );
        if let Some(suggestion) = &issue.suggestion {
            println!("  {marker}   {GREEN}-> {suggestion}{RESET}");
        }
    }
    println!();
}

fn severity_color(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => RED,
        Severity::Warning => YELLOW,
        Severity::Info => CYAN,
    }
}
