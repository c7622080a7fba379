use crate::core::{CliError, InvalidGlobError, SourceFile};
use glob::{MatchOptions, Pattern};
use path_slash::PathExt as _;
use std::collections::BTreeSet;
use std::path::Path;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Resolves `include` globs relative to `root`, drops anything matching an
/// `exclude` glob, and returns the remaining regular files sorted by path.
///
/// Unreadable directory entries are logged and skipped.
pub fn discover_files(
    root: &Path,
    include: &[String],
    exclude: &[String],
) -> Result<Vec<SourceFile>, CliError> {
    let excluded = exclude
        .iter()
        .map(String::as_str)
        .map(compile)
        .collect::<Result<Vec<_>, _>>()?;

    let escaped_root = Pattern::escape(&root.to_string_lossy());
    let mut files = BTreeSet::new();

    for pattern in include {
        let full_pattern = format!("{}/{}", escaped_root, pattern.trim_start_matches("./"));
        let entries = glob::glob_with(&full_pattern, MATCH_OPTIONS).map_err(|e| {
            InvalidGlobError {
                pattern: pattern.clone(),
                help: e.to_string(),
            }
        })?;

        for entry in entries {
            let path = match entry {
                Ok(path) => path,
                Err(e) => {
                    tracing::warn!("Skipping unreadable path {}: {}", e.path().display(), e);
                    continue;
                },
            };

            if !path.is_file() {
                continue;
            }

            let Ok(relative) = path.strip_prefix(root) else {
                continue;
            };
            let relative = relative.to_slash_lossy().into_owned();

            if excluded
                .iter()
                .any(|pattern| pattern.matches_with(&relative, MATCH_OPTIONS))
            {
                tracing::debug!("Excluded {}", relative);
                continue;
            }

            files.insert(SourceFile { relative, path });
        }
    }

    tracing::debug!("Discovered {} file(s) under {}", files.len(), root.display());

    Ok(files.into_iter().collect())
}

fn compile(pattern: &str) -> Result<Pattern, InvalidGlobError> {
    Pattern::new(pattern.trim_start_matches("./")).map_err(|e| InvalidGlobError {
        pattern: pattern.to_string(),
        help: e.to_string(),
    })
}
