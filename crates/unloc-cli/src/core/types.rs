use serde::Serialize;
use std::path::PathBuf;

/// A file selected by the include/exclude globs.
#[derive(Clone, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub struct SourceFile {
    /// Path relative to the project root, with `/` separators. Used for output.
    pub relative: String,
    /// Full path used for reading and writing.
    pub path: PathBuf,
}

/// A secondary-language literal dropped by a three-argument call rewrite.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct DiscardedLiteral {
    /// File path relative to the project root.
    pub path: String,
    /// 1-based line of the call in the original file.
    pub line: usize,
    /// 1-based column of the call in the original file.
    pub column: usize,
    /// The literal the call was replaced with.
    pub primary: String,
    /// The literal that was removed.
    pub discarded: String,
}
