//! Issue and result types shared by the library and the CLI.

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Severity level of a lint issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The fixture file would be rejected when loaded.
    Error,
    /// Loads, but probably does not do what was intended.
    Warning,
    /// Hint, only reported in verbose mode.
    Info,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

/// A single finding.
#[derive(Debug, Clone, Serialize)]
pub struct LintIssue {
    pub severity: Severity,
    /// Stable code, e.g. "E007" or "W002".
    pub code: String,
    pub message: String,
    #[serde(serialize_with = "serialize_path")]
    pub file: PathBuf,
    /// Path inside the document, e.g. "fixtures[2].respond.status".
    pub location: Option<String>,
    pub suggestion: Option<String>,
}

fn serialize_path<S>(path: &Path, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&path.to_string_lossy())
}

impl LintIssue {
    fn new(
        severity: Severity,
        code: impl Into<String>,
        message: impl Into<String>,
        file: &Path,
    ) -> Self {
        Self {
            severity,
            code: code.into(),
            message: message.into(),
            file: file.to_path_buf(),
            location: None,
            suggestion: None,
        }
    }

    pub fn error(code: impl Into<String>, message: impl Into<String>, file: &Path) -> Self {
        Self::new(Severity::Error, code, message, file)
    }

    pub fn warning(code: impl Into<String>, message: impl Into<String>, file: &Path) -> Self {
        Self::new(Severity::Warning, code, message, file)
    }

    pub fn info(code: impl Into<String>, message: impl Into<String>, file: &Path) -> Self {
        Self::new(Severity::Info, code, message, file)
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl fmt::Display for LintIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.file.display())?;
        if let Some(location) = &self.location {
            write!(f, "[{location}] ")?;
        }
        write!(f, "{} {}: {}", self.severity.label(), self.code, self.message)
    }
}

/// Result of linting one or more files.
#[derive(Debug, Default, Serialize)]
pub struct LintResult {
    pub issues: Vec<LintIssue>,
    pub files_checked: usize,
    pub errors: usize,
    pub warnings: usize,
}

impl LintResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_issue(&mut self, issue: LintIssue) {
        match issue.severity {
            Severity::Error => self.errors += 1,
            Severity::Warning => self.warnings += 1,
            Severity::Info => {}
        }
        self.issues.push(issue);
    }

    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }

    pub fn has_warnings(&self) -> bool {
        self.warnings > 0
    }

    /// No errors. Warnings are allowed.
    pub fn is_valid(&self) -> bool {
        self.errors == 0
    }

    /// Codes of all issues, in the order they were found.
    pub fn codes(&self) -> Vec<&str> {
        self.issues.iter().map(|i| i.code.as_str()).collect()
    }

    pub fn merge(&mut self, other: LintResult) {
        self.issues.extend(other.issues);
        self.files_checked += other.files_checked;
        self.errors += other.errors;
        self.warnings += other.warnings;
    }
}

/// Options for validation.
#[derive(Debug, Clone, Default)]
pub struct LintOptions {
    /// Also report info-level hints.
    pub verbose: bool,
}

/// Failure to turn a file into a document.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to read file: {0}")]
    Read(#[from] std::io::Error),
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl LoadError {
    pub fn code(&self) -> &'static str {
        match self {
            LoadError::Read(_) => "E001",
            LoadError::Json(_) | LoadError::Yaml(_) => "E002",
        }
    }
}
