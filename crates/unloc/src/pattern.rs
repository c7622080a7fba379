use crate::error::PatternError;
use regex::Regex;
use std::fmt;

/// The localization call to collapse: `[<qualifier>.]<function>(<context>, ...)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallPattern {
    /// Optional type or namespace prefix, e.g. `Steps4` in `Steps4.loc(...)`.
    /// Dotted paths are accepted.
    pub qualifier: Option<String>,
    /// The helper function name.
    pub function: String,
    /// The language-context argument that always comes first.
    pub context: String,
}

impl Default for CallPattern {
    fn default() -> Self {
        Self {
            qualifier: Some("Steps4".to_string()),
            function: "loc".to_string(),
            context: "appLanguage".to_string(),
        }
    }
}

impl CallPattern {
    /// Creates an unqualified pattern.
    pub fn new(function: impl Into<String>, context: impl Into<String>) -> Self {
        Self {
            qualifier: None,
            function: function.into(),
            context: context.into(),
        }
    }

    /// Sets the optional qualifier accepted before the function name.
    pub fn with_qualifier(mut self, qualifier: impl Into<String>) -> Self {
        self.qualifier = Some(qualifier.into());
        self
    }

    /// Checks that every component is a plain identifier.
    pub fn validate(&self) -> Result<(), PatternError> {
        ensure_identifier("function", &self.function)?;
        ensure_identifier("context", &self.context)?;

        if let Some(qualifier) = &self.qualifier {
            if qualifier.is_empty() {
                return Err(PatternError::EmptyComponent {
                    component: "qualifier",
                });
            }
            for segment in qualifier.split('.') {
                if !is_identifier(segment) {
                    return Err(PatternError::InvalidIdentifier {
                        component: "qualifier",
                        value: qualifier.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Compiles the regex matching a call prefix up to the first argument after
    /// the context, trailing whitespace included.
    pub fn to_regex(&self) -> Result<Regex, PatternError> {
        self.validate()?;

        let qualifier = self
            .qualifier
            .as_deref()
            .map(|q| format!(r"(?:{}\.)?", regex::escape(q)))
            .unwrap_or_default();

        let pattern = format!(
            r"\b{}{}\(\s*{}\s*,\s*",
            qualifier,
            regex::escape(&self.function),
            regex::escape(&self.context),
        );

        Ok(Regex::new(&pattern)?)
    }
}

impl fmt::Display for CallPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(qualifier) = &self.qualifier {
            write!(f, "[{}.]", qualifier)?;
        }
        write!(f, "{}({}, ...)", self.function, self.context)
    }
}

fn ensure_identifier(component: &'static str, value: &str) -> Result<(), PatternError> {
    if value.is_empty() {
        return Err(PatternError::EmptyComponent { component });
    }
    if !is_identifier(value) {
        return Err(PatternError::InvalidIdentifier {
            component,
            value: value.to_string(),
        });
    }
    Ok(())
}

fn is_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) if first == '_' || first.is_alphabetic() => {
            chars.all(|c| c == '_' || c.is_alphanumeric())
        },
        _ => false,
    }
}
