use thiserror::Error;

#[derive(Debug, Error)]
pub enum PatternError {
    /// A required component of the call pattern is empty.
    #[error("call pattern {component} must not be empty")]
    EmptyComponent {
        /// Which component was empty (`function`, `context`, `qualifier`).
        component: &'static str,
    },

    /// A component is not a plain identifier (or dotted path, for the qualifier).
    #[error("call pattern {component} '{value}' is not a valid identifier")]
    InvalidIdentifier {
        /// Which component was rejected.
        component: &'static str,
        /// The rejected text.
        value: String,
    },

    /// The generated regular expression failed to compile.
    #[error("failed to compile call pattern: {0}")]
    Regex(#[from] regex::Error),
}
