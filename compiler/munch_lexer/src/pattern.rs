//! Anchored pattern matching.
//!
//! The driver never looks inside a pattern. All it asks is: does this
//! pattern match the text starting at byte 0, and if so, how long is the
//! match? [`PatternMatcher`] is that question. [`RegexPattern`] answers it
//! with the `regex` crate; [`Literal`] and plain closures cover the cases
//! where a regex is overkill.

use regex::Regex;

/// Anchored match query used by the driver for every rule.
pub trait PatternMatcher: Send + Sync {
    /// Returns the byte length of the match starting at offset 0 of `text`,
    /// or `None` if the pattern does not match there.
    ///
    /// A zero-length match (`Some(0)`) is a successful match.
    fn match_at(&self, text: &str) -> Option<usize>;
}

impl<F> PatternMatcher for F
where
    F: Fn(&str) -> Option<usize> + Send + Sync,
{
    fn match_at(&self, text: &str) -> Option<usize> {
        self(text)
    }
}

/// A regular expression matched only at the start of the text.
#[derive(Clone, Debug)]
pub struct RegexPattern {
    source: String,
    anchored: Regex,
}

impl RegexPattern {
    /// Compile `pattern`.
    ///
    /// The pattern is validated on its own before being wrapped in
    /// `\A(?:...)`, so an unbalanced group can't be "repaired" by the
    /// wrapper.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Regex::new(pattern)?;
        let anchored = Regex::new(&format!(r"\A(?:{pattern})"))?;
        Ok(Self {
            source: pattern.to_owned(),
            anchored,
        })
    }

    /// The pattern as written by the caller.
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl PatternMatcher for RegexPattern {
    #[inline]
    fn match_at(&self, text: &str) -> Option<usize> {
        self.anchored.find(text).map(|m| m.end())
    }
}

/// Exact prefix match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Literal(pub String);

impl Literal {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }
}

impl PatternMatcher for Literal {
    #[inline]
    fn match_at(&self, text: &str) -> Option<usize> {
        text.starts_with(self.0.as_str()).then_some(self.0.len())
    }
}
