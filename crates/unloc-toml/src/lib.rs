#![doc = include_str!("../README.md")]

use fs_err as fs;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use unloc::{CallPattern, PatternError};

/// The file name looked up in the project root.
pub const CONFIG_FILE_NAME: &str = "unloc.toml";

/// The include glob used when none is configured.
pub const DEFAULT_INCLUDE: &str = "**/*.swift";

#[derive(Debug, Error)]
pub enum UnlocConfigError {
    /// Configuration file not found.
    #[error("unloc.toml configuration file not found")]
    NotFound,
    /// Failed to read configuration file.
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse configuration file.
    #[error("Failed to parse configuration file: {0}")]
    ParseError(#[from] toml::de::Error),
    /// The `[call]` table does not describe a usable call pattern.
    #[error("Invalid [call] configuration: {0}")]
    InvalidCall(#[from] PatternError),
    /// No include globs were configured.
    #[error("`include` must list at least one glob pattern")]
    EmptyInclude,
}

/// The `[call]` table.
///
/// When the table is omitted entirely the default `[Steps4.]loc(appLanguage, ...)`
/// pattern is used. When it is present, a missing `qualifier` means calls are
/// only matched unqualified.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CallConfig {
    /// Optional prefix accepted before the function name (e.g. `Steps4`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualifier: Option<String>,
    /// Name of the localization helper.
    #[serde(default = "default_function")]
    pub function: String,
    /// Name of the language-context argument.
    #[serde(default = "default_context")]
    pub context: String,
}

impl Default for CallConfig {
    fn default() -> Self {
        let CallPattern {
            qualifier,
            function,
            context,
        } = CallPattern::default();
        Self {
            qualifier,
            function,
            context,
        }
    }
}

impl From<&CallConfig> for CallPattern {
    fn from(config: &CallConfig) -> Self {
        Self {
            qualifier: config.qualifier.clone(),
            function: config.function.clone(),
            context: config.context.clone(),
        }
    }
}

fn default_function() -> String {
    CallPattern::default().function
}

fn default_context() -> String {
    CallPattern::default().context
}

fn default_include() -> Vec<String> {
    vec![DEFAULT_INCLUDE.to_string()]
}

/// The configuration for `unloc`.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct UnlocConfig {
    /// Glob patterns, relative to the project root, selecting files to rewrite.
    #[serde(default = "default_include")]
    pub include: Vec<String>,
    /// Glob patterns removing files from the included set.
    #[serde(default)]
    pub exclude: Vec<String>,
    /// The call to collapse.
    #[serde(default)]
    pub call: CallConfig,
}

impl Default for UnlocConfig {
    fn default() -> Self {
        Self {
            include: default_include(),
            exclude: Vec::new(),
            call: CallConfig::default(),
        }
    }
}

impl UnlocConfig {
    /// Reads the configuration from a path.
    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self, UnlocConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(UnlocConfigError::NotFound);
        }

        let content = fs::read_to_string(path)?;
        let config: UnlocConfig = toml::from_str(&content)?;
        config.validate()?;

        Ok(config)
    }

    /// Reads `unloc.toml` from `dir`, falling back to the defaults when the
    /// file does not exist.
    pub fn read_from_dir(dir: &Path) -> Result<Self, UnlocConfigError> {
        match Self::read_from_path(dir.join(CONFIG_FILE_NAME)) {
            Err(UnlocConfigError::NotFound) => Ok(Self::default()),
            result => result,
        }
    }

    /// Checks that the configuration can be used as-is.
    pub fn validate(&self) -> Result<(), UnlocConfigError> {
        if self.include.is_empty() {
            return Err(UnlocConfigError::EmptyInclude);
        }
        self.call_pattern().validate()?;
        Ok(())
    }

    /// The call pattern described by the `[call]` table.
    pub fn call_pattern(&self) -> CallPattern {
        CallPattern::from(&self.call)
    }
}
