use crate::core::{CliError, ConfigError, SourceFile};
use crate::utils::{discover_files, ui};
use anyhow::Context as _;
use clap::Args;
use fs_err as fs;
use std::path::PathBuf;
use unloc::Rewriter;
use unloc_toml::{CONFIG_FILE_NAME, UnlocConfig};

#[derive(Debug, Clone, Args)]
pub struct ProjectArgs {
    /// Project root that globs are resolved against (defaults to current directory).
    #[arg(short, long)]
    pub path: Option<PathBuf>,

    /// Configuration file (defaults to `unloc.toml` in the project root, if present).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Glob selecting files to process. Replaces the configured `include` list.
    /// Can be specified multiple times.
    #[arg(short, long, value_name = "GLOB")]
    pub include: Vec<String>,

    /// Glob excluding files. Added to the configured `exclude` list.
    /// Can be specified multiple times.
    #[arg(short = 'x', long, value_name = "GLOB")]
    pub exclude: Vec<String>,
}

/// A resolved project: configuration, rewriter, and the files to process.
#[derive(Debug)]
pub struct Project {
    /// Canonical project root.
    pub root: PathBuf,
    /// The effective configuration after command-line overrides.
    pub config: UnlocConfig,
    /// Rewriter built from the configured call pattern.
    pub rewriter: Rewriter,
    /// Files selected by the include/exclude globs, sorted by path.
    pub files: Vec<SourceFile>,
}

impl Project {
    /// Load configuration, apply overrides, and discover files.
    pub fn discover(args: ProjectArgs) -> Result<Self, CliError> {
        let path = args.path.unwrap_or_else(|| PathBuf::from("."));
        let root = path
            .canonicalize()
            .with_context(|| format!("Failed to canonicalize root directory {}", path.display()))?;

        let mut config = load_config(&root, args.config)?;
        if !args.include.is_empty() {
            config.include = args.include;
        }
        config.exclude.extend(args.exclude);

        let rewriter = Rewriter::new(config.call_pattern())?;
        let files = discover_files(&root, &config.include, &config.exclude)?;

        tracing::debug!(
            "Using call pattern {} on {} file(s)",
            rewriter.pattern(),
            files.len()
        );

        Ok(Self {
            root,
            config,
            rewriter,
            files,
        })
    }

    /// Print a standardized discovery summary.
    ///
    /// Returns `false` when no files were discovered to allow early-exit flows.
    pub fn print_discovery(&self, header: impl Fn()) -> bool {
        header();

        if self.files.is_empty() {
            return false;
        }

        ui::print_discovered(self.files.len());
        true
    }

    /// The function name used in summaries, e.g. `loc`.
    pub fn function_name(&self) -> &str {
        &self.rewriter.pattern().function
    }
}

fn load_config(root: &std::path::Path, explicit: Option<PathBuf>) -> Result<UnlocConfig, CliError> {
    let result = match &explicit {
        Some(path) => UnlocConfig::read_from_path(path),
        None => UnlocConfig::read_from_dir(root),
    };

    result.map_err(|source| {
        CliError::Config(ConfigError {
            path: explicit.unwrap_or_else(|| root.join(CONFIG_FILE_NAME)),
            source,
        })
    })
}

/// Read a source file, returning `None` when it is not valid UTF-8.
pub fn read_source(file: &SourceFile) -> std::io::Result<Option<String>> {
    let bytes = fs::read(&file.path)?;
    Ok(String::from_utf8(bytes).ok())
}
