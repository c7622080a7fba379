//! Rewrite command: collapses every matching call site to its first literal.
//!
//! Files are processed one at a time. A file is only written back when at
//! least one call was replaced, and never in dry-run mode.

use crate::commands::{DryRunDiff, Project, ProjectArgs, read_source};
use crate::core::{
    CliError, DiscardedLiteral, RewriteFileError, RewriteReport, SourceFile, line_col_from_offset,
};
use crate::utils::ui;
use anyhow::Context as _;
use clap::Parser;
use fs_err as fs;
use std::path::{Path, PathBuf};
use unloc::Rewriter;

/// Arguments for the rewrite command.
#[derive(Debug, Parser)]
pub struct RewriteArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Dry run - show what would be rewritten without making changes.
    #[arg(long)]
    pub dry_run: bool,

    /// Print a diff of every file that changes.
    #[arg(long)]
    pub diff: bool,

    /// Write the discarded secondary-language literals to this JSON file.
    #[arg(long, value_name = "FILE")]
    pub audit: Option<PathBuf>,
}

/// Result of rewriting a single file.
#[derive(Debug)]
pub enum FileOutcome {
    /// No call site was rewritten.
    Unchanged,
    /// The file is not valid UTF-8 and was left alone.
    NotUtf8,
    /// One or more call sites were rewritten.
    Rewritten {
        /// Number of replaced call sites.
        count: usize,
        /// Before/after contents.
        diff: DryRunDiff,
        /// Secondary literals removed from three-argument calls.
        discarded: Vec<DiscardedLiteral>,
    },
}

/// Run the rewrite command.
pub fn run_rewrite(args: RewriteArgs) -> Result<(), CliError> {
    let project = Project::discover(args.project)?;

    if !project.print_discovery(ui::print_rewrite_header) {
        ui::print_no_files_found();
        return Ok(());
    }

    let mut total_replacements = 0;
    let mut rewritten_files = 0;
    let mut discarded: Vec<DiscardedLiteral> = Vec::new();
    let mut errors: Vec<RewriteFileError> = Vec::new();

    let pb = ui::create_progress_bar(project.files.len() as u64, "Rewriting files...");

    for file in &project.files {
        pb.set_message(format!("Rewriting {}", file.relative));

        match rewrite_file(&project.rewriter, file, args.dry_run) {
            Ok(FileOutcome::Unchanged) => {},
            Ok(FileOutcome::NotUtf8) => {
                pb.suspend(|| ui::print_skipped_non_utf8(&file.relative));
            },
            Ok(FileOutcome::Rewritten {
                count,
                diff,
                discarded: file_discarded,
            }) => {
                total_replacements += count;
                rewritten_files += 1;
                discarded.extend(file_discarded);
                pb.suspend(|| {
                    if args.dry_run {
                        ui::print_would_rewrite(&file.relative, count);
                    } else {
                        ui::print_rewritten(&file.relative, count);
                    }
                    if args.diff {
                        diff.print(&file.relative);
                    }
                });
            },
            Err(e) => {
                tracing::error!("Failed to rewrite {}: {}", file.relative, e);
                errors.push(RewriteFileError {
                    path: file.relative.clone(),
                    help: e.to_string(),
                });
            },
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    if let Some(audit_path) = &args.audit {
        write_audit(audit_path, &discarded)?;
        ui::print_audit_written(audit_path, discarded.len());
    }

    if args.dry_run {
        ui::print_rewrite_dry_run_summary(
            total_replacements,
            rewritten_files,
            project.function_name(),
        );
    } else {
        ui::print_rewrite_summary(total_replacements, project.function_name());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(CliError::Rewrite(RewriteReport {
            rewritten_count: rewritten_files,
            error_count: errors.len(),
            errors,
        }))
    }
}

/// Rewrite a single file, writing it back unless `dry_run` is set.
pub fn rewrite_file(
    rewriter: &Rewriter,
    file: &SourceFile,
    dry_run: bool,
) -> std::io::Result<FileOutcome> {
    let Some(content) = read_source(file)? else {
        return Ok(FileOutcome::NotUtf8);
    };

    let rewrite = rewriter.rewrite(&content);
    if !rewrite.is_changed() {
        return Ok(FileOutcome::Unchanged);
    }

    if !dry_run {
        fs::write(&file.path, &rewrite.content)?;
    }

    let discarded = rewrite
        .replacements
        .iter()
        .filter_map(|replacement| {
            let secondary = replacement.discarded(&content)?;
            let (line, column) = line_col_from_offset(&content, replacement.call.start);
            Some(DiscardedLiteral {
                path: file.relative.clone(),
                line,
                column,
                primary: replacement.text(&content).to_string(),
                discarded: secondary.to_string(),
            })
        })
        .collect();

    Ok(FileOutcome::Rewritten {
        count: rewrite.count(),
        diff: DryRunDiff::new(content, rewrite.content),
        discarded,
    })
}

fn write_audit(path: &Path, discarded: &[DiscardedLiteral]) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(discarded)
        .context("Failed to serialize discarded literals")?;
    fs::write(path, format!("{}\n", json))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use unloc::CallPattern;

    fn source_file(dir: &Path, name: &str, content: &str) -> SourceFile {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        SourceFile {
            relative: name.to_string(),
            path,
        }
    }

    fn rewriter() -> Rewriter {
        Rewriter::new(CallPattern::default()).unwrap()
    }

    #[test]
    fn test_rewrite_file_writes_back() {
        let temp = tempfile::tempdir().unwrap();
        let file = source_file(
            temp.path(),
            "View.swift",
            "Text(loc(appLanguage, \"Save\", \"Сохранить\"))\n",
        );

        let (count, discarded) = match rewrite_file(&rewriter(), &file, false).unwrap() {
            FileOutcome::Rewritten {
                count, discarded, ..
            } => (count, discarded),
            other => panic!("expected a rewrite, got {:?}", other),
        };
        assert_eq!(count, 1);
        assert_eq!(
            discarded,
            vec![DiscardedLiteral {
                path: "View.swift".to_string(),
                line: 1,
                column: 6,
                primary: "\"Save\"".to_string(),
                discarded: "\"Сохранить\"".to_string(),
            }]
        );
        assert_eq!(
            std::fs::read_to_string(&file.path).unwrap(),
            "Text(\"Save\")\n"
        );
    }

    #[test]
    fn test_rewrite_file_dry_run_leaves_file() {
        let temp = tempfile::tempdir().unwrap();
        let original = "Text(loc(appLanguage, \"Cancel\"))\n";
        let file = source_file(temp.path(), "View.swift", original);

        let outcome = rewrite_file(&rewriter(), &file, true).unwrap();

        assert!(matches!(outcome, FileOutcome::Rewritten { count: 1, .. }));
        assert_eq!(std::fs::read_to_string(&file.path).unwrap(), original);
    }

    #[test]
    fn test_rewrite_file_unchanged() {
        let temp = tempfile::tempdir().unwrap();
        let file = source_file(temp.path(), "Plain.swift", "let x = \"Cancel\"\n");

        let outcome = rewrite_file(&rewriter(), &file, false).unwrap();
        assert!(matches!(outcome, FileOutcome::Unchanged));
    }

    #[test]
    fn test_rewrite_file_missing() {
        let temp = tempfile::tempdir().unwrap();
        let file = SourceFile {
            relative: "Gone.swift".to_string(),
            path: temp.path().join("Gone.swift"),
        };

        assert!(rewrite_file(&rewriter(), &file, false).is_err());
    }

    #[test]
    fn test_write_audit() {
        let temp = tempfile::tempdir().unwrap();
        let audit_path = temp.path().join("audit.json");
        let entries = vec![DiscardedLiteral {
            path: "View.swift".to_string(),
            line: 3,
            column: 9,
            primary: "\"Save\"".to_string(),
            discarded: "\"Сохранить\"".to_string(),
        }];

        write_audit(&audit_path, &entries).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&audit_path).unwrap()).unwrap();
        assert_eq!(written[0]["line"], 3);
        assert_eq!(written[0]["discarded"], "\"Сохранить\"");
    }
}
