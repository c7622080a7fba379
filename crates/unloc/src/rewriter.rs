//! Call-site matching and rewriting.

use crate::error::PatternError;
use crate::pattern::CallPattern;
use crate::scanner::literal_span;
use regex::Regex;
use std::ops::Range;

/// One rewritable call site.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Replacement {
    /// The whole call expression, closing parenthesis included.
    pub call: Range<usize>,
    /// The first string literal, quotes included. This is the replacement text.
    pub literal: Range<usize>,
    /// The second string literal of a three-argument call, which is dropped.
    pub secondary: Option<Range<usize>>,
}

impl Replacement {
    /// The text the call is replaced with.
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.literal.clone()]
    }

    /// The secondary-language literal removed by this replacement, if any.
    pub fn discarded<'a>(&self, source: &'a str) -> Option<&'a str> {
        self.secondary.clone().map(|span| &source[span])
    }
}

/// The outcome of rewriting one buffer.
#[derive(Clone, Debug)]
pub struct Rewrite {
    /// The rewritten text. Equal to the input when nothing matched.
    pub content: String,
    /// Applied replacements, in source order, with offsets into the original text.
    pub replacements: Vec<Replacement>,
}

impl Rewrite {
    pub fn count(&self) -> usize {
        self.replacements.len()
    }

    pub fn is_changed(&self) -> bool {
        !self.replacements.is_empty()
    }
}

enum Candidate {
    Rewritable(Replacement),
    Malformed(Range<usize>),
}

/// Rewrites calls matching a [`CallPattern`] to their first string literal.
#[derive(Clone, Debug)]
pub struct Rewriter {
    pattern: CallPattern,
    regex: Regex,
}

impl Rewriter {
    pub fn new(pattern: CallPattern) -> Result<Self, PatternError> {
        let regex = pattern.to_regex()?;
        Ok(Self { pattern, regex })
    }

    pub fn pattern(&self) -> &CallPattern {
        &self.pattern
    }

    /// Finds every well-formed call site, left to right and non-overlapping.
    pub fn find_replacements(&self, source: &str) -> Vec<Replacement> {
        self.candidates(source)
            .into_iter()
            .filter_map(|candidate| match candidate {
                Candidate::Rewritable(replacement) => Some(replacement),
                Candidate::Malformed(_) => None,
            })
            .collect()
    }

    /// Finds call prefixes that could not be rewritten: a non-literal first
    /// argument, an unterminated literal, or a missing `,`/`)`.
    pub fn find_unrewritable(&self, source: &str) -> Vec<Range<usize>> {
        self.candidates(source)
            .into_iter()
            .filter_map(|candidate| match candidate {
                Candidate::Rewritable(_) => None,
                Candidate::Malformed(prefix) => Some(prefix),
            })
            .collect()
    }

    /// Rewrites every well-formed call site in `source`.
    pub fn rewrite(&self, source: &str) -> Rewrite {
        let replacements = self.find_replacements(source);
        let content = apply_replacements(source, &replacements);
        Rewrite {
            content,
            replacements,
        }
    }

    fn candidates(&self, source: &str) -> Vec<Candidate> {
        let mut candidates = Vec::new();
        let mut resume = 0;

        for prefix in self.regex.find_iter(source) {
            // Calls nested inside an interpolation of a call already matched.
            if prefix.start() < resume {
                continue;
            }

            match match_call(source, prefix.start(), prefix.end()) {
                Some(replacement) => {
                    resume = replacement.call.end;
                    candidates.push(Candidate::Rewritable(replacement));
                },
                None => {
                    tracing::trace!(
                        offset = prefix.start(),
                        call = prefix.as_str(),
                        "skipping unrewritable call site"
                    );
                    candidates.push(Candidate::Malformed(prefix.range()));
                },
            }
        }

        candidates
    }
}

/// Matches the arguments following a call prefix ending at `args`.
///
/// Accepts `"a")` and `"a", "b")`; anything else is rejected as a whole.
fn match_call(source: &str, start: usize, args: usize) -> Option<Replacement> {
    let bytes = source.as_bytes();
    let literal = literal_span(source, args)?;
    let next = skip_whitespace(bytes, literal.end);

    match bytes.get(next)? {
        b')' => Some(Replacement {
            call: start..next + 1,
            literal,
            secondary: None,
        }),
        b',' => {
            let secondary = literal_span(source, skip_whitespace(bytes, next + 1))?;
            let close = skip_whitespace(bytes, secondary.end);
            (bytes.get(close) == Some(&b')')).then(|| Replacement {
                call: start..close + 1,
                literal,
                secondary: Some(secondary),
            })
        },
        _ => None,
    }
}

fn skip_whitespace(bytes: &[u8], mut index: usize) -> usize {
    while index < bytes.len() && matches!(bytes[index], b' ' | b'\t' | b'\n' | b'\r') {
        index += 1;
    }
    index
}

/// Splices each replacement into `source`, highest offset first so that the
/// offsets of the remaining (lower) replacements stay valid.
///
/// Replacements must not overlap.
pub fn apply_replacements(source: &str, replacements: &[Replacement]) -> String {
    let mut ordered: Vec<&Replacement> = replacements.iter().collect();
    ordered.sort_by(|a, b| b.call.start.cmp(&a.call.start));

    let mut content = source.to_string();
    for replacement in ordered {
        content.replace_range(replacement.call.clone(), replacement.text(source));
    }
    content
}
