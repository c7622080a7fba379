//! Check command: reports call sites that are still present.
//!
//! Rewritable calls are reported as errors, calls matching the pattern that
//! the rewriter has to skip are reported as warnings. Either one fails the
//! command, since the migration is not complete while they remain.

use crate::commands::{Project, ProjectArgs, read_source};
use crate::core::{
    CheckIssue, CheckReport, CliError, RemainingCallError, SourceFile, UnrewritableCallWarning,
    span_from_range,
};
use crate::utils::ui;
use clap::Parser;
use miette::NamedSource;
use unloc::Rewriter;

/// Arguments for the check command.
#[derive(Debug, Parser)]
pub struct CheckArgs {
    #[command(flatten)]
    pub project: ProjectArgs,
}

/// Run the check command.
pub fn run_check(args: CheckArgs) -> Result<(), CliError> {
    let project = Project::discover(args.project)?;

    if !project.print_discovery(ui::print_check_header) {
        ui::print_no_files_found();
        return Ok(());
    }

    let mut all_issues: Vec<CheckIssue> = Vec::new();
    let mut file_count = 0;

    let pb = ui::create_progress_bar(project.files.len() as u64, "Checking files...");

    for file in &project.files {
        pb.set_message(format!("Checking {}", file.relative));

        let Some(issues) = check_file(&project.rewriter, file)? else {
            pb.suspend(|| ui::print_skipped_non_utf8(&file.relative));
            pb.inc(1);
            continue;
        };

        if !issues.is_empty() {
            let rewritable = issues
                .iter()
                .filter(|i| matches!(i, CheckIssue::Remaining(_)))
                .count();
            pb.suspend(|| {
                ui::print_remaining(&file.relative, rewritable, issues.len() - rewritable);
            });
            file_count += 1;
            all_issues.extend(issues);
        }
        pb.inc(1);
    }

    pb.finish_and_clear();

    if all_issues.is_empty() {
        ui::print_check_success();
        return Ok(());
    }

    all_issues.sort_by_cached_key(|issue| issue.sort_key());

    let remaining_count = all_issues
        .iter()
        .filter(|i| matches!(i, CheckIssue::Remaining(_)))
        .count();

    Err(CliError::Check(CheckReport {
        remaining_count,
        unrewritable_count: all_issues.len() - remaining_count,
        file_count,
        issues: all_issues,
    }))
}

/// Collect the issues of a single file. Returns `None` for non-UTF-8 files.
pub fn check_file(
    rewriter: &Rewriter,
    file: &SourceFile,
) -> Result<Option<Vec<CheckIssue>>, CliError> {
    let Some(content) = read_source(file)? else {
        return Ok(None);
    };

    let mut issues: Vec<CheckIssue> = rewriter
        .find_replacements(&content)
        .into_iter()
        .map(|replacement| {
            CheckIssue::Remaining(RemainingCallError {
                src: NamedSource::new(&file.relative, content.clone()),
                span: span_from_range(&replacement.call),
                replacement: replacement.text(&content).to_string(),
            })
        })
        .collect();

    issues.extend(rewriter.find_unrewritable(&content).into_iter().map(|prefix| {
        CheckIssue::Unrewritable(UnrewritableCallWarning {
            src: NamedSource::new(&file.relative, content.clone()),
            span: span_from_range(&prefix),
        })
    }));

    Ok(Some(issues))
}

#[cfg(test)]
mod tests {
    use super::*;
    use unloc::CallPattern;

    #[test]
    fn test_check_file_reports_both_kinds() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("View.swift");
        std::fs::write(
            &path,
            "Text(loc(appLanguage, title))\nText(loc(appLanguage, \"Done\", \"Готово\"))\n",
        )
        .unwrap();
        let file = SourceFile {
            relative: "View.swift".to_string(),
            path,
        };
        let rewriter = Rewriter::new(CallPattern::default()).unwrap();

        let mut issues = check_file(&rewriter, &file).unwrap().unwrap();
        issues.sort_by_cached_key(|issue| issue.sort_key());

        assert_eq!(issues.len(), 2);
        match &issues[0] {
            CheckIssue::Unrewritable(warning) => assert_eq!(warning.span.offset(), 5),
            other => panic!("unexpected issue {:?}", other),
        }
        match &issues[1] {
            CheckIssue::Remaining(error) => {
                assert_eq!(error.replacement, "\"Done\"");
                assert_eq!(error.span.offset(), 35);
            },
            other => panic!("unexpected issue {:?}", other),
        }
    }

    #[test]
    fn test_check_file_clean() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("View.swift");
        std::fs::write(&path, "Text(\"Done\")\n").unwrap();
        let file = SourceFile {
            relative: "View.swift".to_string(),
            path,
        };
        let rewriter = Rewriter::new(CallPattern::default()).unwrap();

        assert!(check_file(&rewriter, &file).unwrap().unwrap().is_empty());
    }
}
