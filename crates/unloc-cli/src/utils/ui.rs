// CLI output formatting with consistent styling using indicatif and colored.
// Textual output goes through println!/eprintln!; tracing is reserved for diagnostics logs.

use colored::Colorize as _;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const PD_TICK: Duration = Duration::from_millis(100);

/// Environment variable holding the tracing filter (e.g. `UNLOC_LOG=debug`).
pub const LOG_ENV: &str = "UNLOC_LOG";

static E2E_MODE: AtomicBool = AtomicBool::new(false);

/// Enable E2E mode for deterministic output (no colors, hidden progress bars).
pub fn set_e2e_mode(enabled: bool) {
    E2E_MODE.store(enabled, Ordering::SeqCst);
    if enabled {
        colored::control::set_override(false);
    }
}

pub fn is_e2e() -> bool {
    E2E_MODE.load(Ordering::SeqCst)
}

/// Install the stderr tracing subscriber, filtered by `UNLOC_LOG` (default `warn`).
pub fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .with_ansi(!is_e2e())
        .try_init();
}

pub fn create_progress_bar(len: u64, msg: &str) -> ProgressBar {
    if is_e2e() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} {msg} [{bar:40.cyan/blue}] {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(PD_TICK);
    pb
}

pub fn print_rewrite_header() {
    println!("{}", "Localization Call Rewriter".dimmed());
}

pub fn print_check_header() {
    println!("{}", "Localization Call Checker".dimmed());
}

pub fn print_discovered(count: usize) {
    println!(
        "{} {}",
        "Discovered".dimmed(),
        format!("{} file(s)", count).green()
    );
}

pub fn print_no_files_found() {
    eprintln!("{}", "No files matched the include patterns.".red());
}

pub fn print_skipped_non_utf8(path: &str) {
    println!(
        "{} {}",
        "Skipping".dimmed(),
        format!("{} (not valid UTF-8)", path).yellow()
    );
}

pub fn print_rewritten(path: &str, count: usize) {
    println!("  {}: {} replacements", path, count.to_string().cyan());
}

pub fn print_would_rewrite(path: &str, count: usize) {
    println!(
        "  {} {}: {} replacements",
        "Would rewrite".yellow(),
        path,
        count.to_string().cyan()
    );
}

pub fn print_rewrite_summary(total: usize, function: &str) {
    println!();
    println!(
        "{} {} {}() calls replaced",
        "Total:".green(),
        total,
        function
    );
}

pub fn print_rewrite_dry_run_summary(total: usize, files: usize, function: &str) {
    println!();
    println!(
        "{} {} {}() call(s) would be replaced in {} file(s)",
        "Dry run:".yellow(),
        total,
        function,
        files
    );
}

pub fn print_audit_written(path: &Path, count: usize) {
    println!(
        "{} {} discarded literal(s) to {}",
        "Wrote".dimmed(),
        count.to_string().cyan(),
        path.display()
    );
}

pub fn print_remaining(path: &str, rewritable: usize, unrewritable: usize) {
    println!(
        "  {}: {} rewritable, {} unrewritable",
        path,
        rewritable.to_string().red(),
        unrewritable.to_string().yellow()
    );
}

pub fn print_check_success() {
    println!("{}", "No call sites found!".green());
}

pub fn print_diff(path: &str, old: &str, new: &str) {
    use similar::{ChangeTag, TextDiff};

    println!("{} {}", "---".dimmed(), path.bold());

    let diff = TextDiff::from_lines(old, new);

    for (idx, group) in diff.grouped_ops(2).iter().enumerate() {
        if idx > 0 {
            println!("{}", "  ...".dimmed());
        }
        for op in group {
            for change in diff.iter_changes(op) {
                let sign = match change.tag() {
                    ChangeTag::Delete => "-",
                    ChangeTag::Insert => "+",
                    ChangeTag::Equal => " ",
                };
                let line = format!("{} {}", sign, change);
                let line = if change.missing_newline() {
                    format!("{}\n", line)
                } else {
                    line
                };
                match change.tag() {
                    ChangeTag::Delete => print!("{}", line.red()),
                    ChangeTag::Insert => print!("{}", line.green()),
                    ChangeTag::Equal => print!("{}", line.dimmed()),
                }
            }
        }
    }
}
