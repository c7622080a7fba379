//! CLI error types using miette for Rust-style diagnostics.
//!
//! Call-site diagnostics carry the file contents so miette can render the
//! offending call with a label underneath.

// Fields in these structs are read by miette's Diagnostic derive macro
#![allow(unused)]

use miette::{Diagnostic, NamedSource, SourceSpan};
use std::path::PathBuf;
use thiserror::Error;
use unloc::PatternError;
use unloc_toml::UnlocConfigError;

/// Error when the configuration file cannot be loaded.
#[derive(Debug, Diagnostic, Error)]
#[error("failed to load configuration from {}", .path.display())]
#[diagnostic(
    code(unloc::config::invalid),
    help(
        "unloc.toml accepts the following keys:\n\n  \
          include = [\"**/*.swift\"]\n  \
          exclude = []\n\n  \
          [call]\n  \
          qualifier = \"Steps4\"\n  \
          function = \"loc\"\n  \
          context = \"appLanguage\"\n"
    )
)]
pub struct ConfigError {
    /// The configuration file path.
    pub path: PathBuf,

    /// The underlying error.
    #[source]
    pub source: UnlocConfigError,
}

/// Error when an include or exclude glob cannot be parsed.
#[derive(Debug, Diagnostic, Error)]
#[error("invalid glob pattern: {pattern}")]
#[diagnostic(code(unloc::discovery::invalid_glob))]
pub struct InvalidGlobError {
    /// The rejected pattern.
    pub pattern: String,

    /// The glob parser's explanation.
    #[help]
    pub help: String,
}

/// A call site that `unloc rewrite` would still collapse.
#[derive(Debug, Diagnostic, Error)]
#[error("localization call not yet rewritten")]
#[diagnostic(
    code(unloc::check::remaining_call),
    severity(Error),
    help("run `unloc rewrite` to replace it with {replacement}")
)]
pub struct RemainingCallError {
    /// The source content of the file.
    #[source_code]
    pub src: NamedSource<String>,

    /// The full call expression.
    #[label("rewritable call")]
    pub span: SourceSpan,

    /// The literal the call would be replaced with.
    pub replacement: String,
}

/// A call site matching the pattern that cannot be rewritten automatically.
#[derive(Debug, Diagnostic, Error)]
#[error("localization call cannot be rewritten automatically")]
#[diagnostic(
    code(unloc::check::unrewritable_call),
    severity(Warning),
    help(
        "the argument after the context must be a string literal, followed by `)` \
         or by a second string literal and `)`; migrate this call by hand"
    )
)]
pub struct UnrewritableCallWarning {
    /// The source content of the file.
    #[source_code]
    pub src: NamedSource<String>,

    /// The matched call prefix.
    #[label("call starts here")]
    pub span: SourceSpan,
}

/// A check issue (either error or warning).
#[derive(Debug, Diagnostic, Error)]
pub enum CheckIssue {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Remaining(#[from] RemainingCallError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Unrewritable(#[from] UnrewritableCallWarning),
}

impl CheckIssue {
    /// Sort key for deterministic ordering: file, then offset.
    pub fn sort_key(&self) -> (String, usize) {
        match self {
            CheckIssue::Remaining(e) => (e.src.name().to_string(), e.span.offset()),
            CheckIssue::Unrewritable(e) => (e.src.name().to_string(), e.span.offset()),
        }
    }
}

/// Aggregated check report.
#[derive(Debug, Diagnostic, Error)]
#[error(
    "found {remaining_count} rewritable and {unrewritable_count} unrewritable call(s) in {file_count} file(s)"
)]
#[diagnostic(code(unloc::check::report))]
pub struct CheckReport {
    /// Number of call sites `rewrite` would still collapse.
    pub remaining_count: usize,

    /// Number of call sites that need manual migration.
    pub unrewritable_count: usize,

    /// Number of files with at least one issue.
    pub file_count: usize,

    /// Per-call diagnostics.
    #[related]
    pub issues: Vec<CheckIssue>,
}

/// Error when a single file cannot be read or written back.
#[derive(Debug, Diagnostic, Error)]
#[error("failed to rewrite {path}")]
#[diagnostic(code(unloc::rewrite::failed))]
pub struct RewriteFileError {
    /// The path to the file, relative to the project root.
    pub path: String,

    /// The underlying error.
    #[help]
    pub help: String,
}

/// Report for rewrite command failures.
#[derive(Debug, Diagnostic, Error)]
#[error("rewrote {rewritten_count} file(s), {error_count} error(s)")]
#[diagnostic(code(unloc::rewrite::report))]
pub struct RewriteReport {
    /// Number of files rewritten.
    pub rewritten_count: usize,

    /// Number of errors.
    pub error_count: usize,

    /// Related per-file errors.
    #[related]
    pub errors: Vec<RewriteFileError>,
}

/// Main CLI error type.
#[derive(Debug, Diagnostic, Error)]
pub enum CliError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    InvalidGlob(#[from] InvalidGlobError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Check(#[from] CheckReport),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Rewrite(#[from] RewriteReport),

    #[error("invalid call pattern: {0}")]
    #[diagnostic(code(unloc::pattern))]
    Pattern(#[from] PatternError),

    #[error("IO error: {0}")]
    #[diagnostic(code(unloc::io))]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    #[diagnostic(code(unloc::other))]
    Other(String),
}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::Other(format!("{:#}", err))
    }
}

/// Calculate 1-based line and column (in characters) from a byte offset.
pub fn line_col_from_offset(source: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(source.len());
    let before = &source[..offset];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let col = before[line_start..].chars().count() + 1;
    (line, col)
}

/// Build a `SourceSpan` from a byte range.
pub fn span_from_range(range: &std::ops::Range<usize>) -> SourceSpan {
    SourceSpan::new(range.start.into(), range.end - range.start)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_col_from_offset() {
        let source = "line1\nline2\nline3";
        assert_eq!(line_col_from_offset(source, 0), (1, 1));
        assert_eq!(line_col_from_offset(source, 6), (2, 1));
        assert_eq!(line_col_from_offset(source, 8), (2, 3));
        assert_eq!(line_col_from_offset(source, 100), (3, 6));
    }

    #[test]
    fn test_line_col_counts_characters() {
        let source = "let a = \"Привет\"; loc(";
        let offset = source.find("loc").unwrap();
        assert_eq!(line_col_from_offset(source, offset), (1, 19));
    }

    #[test]
    fn test_span_from_range() {
        let span = span_from_range(&(4..10));
        assert_eq!(span.offset(), 4);
        assert_eq!(span.len(), 6);
    }

    #[test]
    fn test_check_issue_sort_key() {
        let issue = CheckIssue::Unrewritable(UnrewritableCallWarning {
            src: NamedSource::new("Views/Home.swift", "loc(appLanguage, x)".to_string()),
            span: SourceSpan::new(0.into(), 17),
        });
        assert_eq!(issue.sort_key(), ("Views/Home.swift".to_string(), 0));
    }
}
