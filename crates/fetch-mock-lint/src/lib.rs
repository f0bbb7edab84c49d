//! Linter for fetch-mock fixture files.
//!
//! Catches the mistakes that would make `MockConfig` loading fail, plus a few
//! that load fine but do not do what was meant (shadowed persistent
//! fixtures, matchers that are silently ignored). Usable as a library or
//! through the `fetch-mock-lint` binary.
//!
//! # Example
//!
//! ```no_run
//! use fetch_mock_lint::{lint_directory, lint_file, LintOptions};
//! use std::path::Path;
//!
//! let result = lint_file(Path::new("fixtures.yaml"), &LintOptions::default());
//! let all = lint_directory(Path::new("./fixtures"), &LintOptions::default());
//!
//! if result.has_errors() || all.has_errors() {
//!     eprintln!("Found {} errors", result.errors + all.errors);
//! }
//! ```
//!
//! # Codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | E001 | File or directory cannot be read |
//! | E002 | Not valid YAML / JSON |
//! | E003 | `fixtures` missing or not a list |
//! | E004 | Unknown context kind |
//! | E005 | Invalid or missing `context.baseUrl` |
//! | E006 | Fixture with zero or several actions |
//! | E007 | Invalid regex in `match.pattern` |
//! | E008 | Status outside 200..=599 |
//! | E009 | Invalid header name or value |
//! | E010 | `match` with both or neither of `url` / `pattern` |
//! | W001 | `match` on a reject or abort fixture |
//! | W002 | Persistent fixture fully replaced by later ones |
//! | W003 | `counter` without `url` |
//! | I001 | Relative `match.url` under a resolving context |

mod types;
mod validator;

use serde_json::Value;
use std::path::Path;

pub use types::{LintIssue, LintOptions, LintResult, LoadError, Severity};
pub use validator::{
    validate_config, validate_context, validate_headers, validate_match, validate_respond,
};

/// Extensions picked up by [`lint_directory`].
pub const FIXTURE_EXTENSIONS: [&str; 3] = ["yaml", "yml", "json"];

pub fn is_fixture_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| FIXTURE_EXTENSIONS.contains(&ext))
}

/// Parse a document, as JSON when `source_name` ends in `.json` and as YAML
/// otherwise.
pub fn parse_document(content: &str, source_name: &Path) -> Result<Value, LoadError> {
    if source_name.extension().is_some_and(|ext| ext == "json") {
        Ok(serde_json::from_str(content)?)
    } else {
        Ok(serde_yaml::from_str(content)?)
    }
}

/// Lint a single fixture file.
pub fn lint_file(path: &Path, options: &LintOptions) -> LintResult {
    let loaded = std::fs::read_to_string(path)
        .map_err(LoadError::from)
        .and_then(|content| parse_document(&content, path));

    match loaded {
        Ok(value) => lint_value(&value, path, options),
        Err(e) => {
            let mut result = LintResult::new();
            result.files_checked = 1;
            result.add_issue(LintIssue::error(e.code(), e.to_string(), path));
            result
        }
    }
}

/// Lint every fixture file in a directory (non-recursive), in name order.
pub fn lint_directory(path: &Path, options: &LintOptions) -> LintResult {
    let mut result = LintResult::new();

    let entries = match std::fs::read_dir(path) {
        Ok(entries) => entries,
        Err(e) => {
            result.add_issue(LintIssue::error(
                "E001",
                format!("Failed to read directory: {e}"),
                path,
            ));
            return result;
        }
    };

    let mut files: Vec<_> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|p| p.is_file() && is_fixture_file(p))
        .collect();
    files.sort();

    for file in files {
        result.merge(lint_file(&file, options));
    }
    result
}

/// Lint in-memory content. `source_name` picks the format and labels issues.
pub fn lint_str(content: &str, source_name: impl AsRef<Path>, options: &LintOptions) -> LintResult {
    let source = source_name.as_ref();
    match parse_document(content, source) {
        Ok(value) => lint_value(&value, source, options),
        Err(e) => {
            let mut result = LintResult::new();
            result.files_checked = 1;
            result.add_issue(LintIssue::error(e.code(), e.to_string(), source));
            result
        }
    }
}

/// Lint an already parsed document.
pub fn lint_value(value: &Value, source_name: impl AsRef<Path>, options: &LintOptions) -> LintResult {
    let mut result = LintResult::new();
    result.files_checked = 1;
    validate_config(source_name.as_ref(), value, &mut result, options);
    result
}
