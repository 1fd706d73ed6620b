//! Ordered rule tables.
//!
//! A table is built once with [`RuleTableBuilder`] and is read-only from
//! then on. Registration order is priority order: when two rules match the
//! same number of bytes, the one added first wins.

use std::fmt;

use crate::cursor::Cursor;
use crate::error::SetupError;
use crate::pattern::{PatternMatcher, RegexPattern};

/// Callback invoked when a rule fires (or when input runs out).
///
/// Reads the matched text through [`Cursor::text`] and returns the token
/// code to hand to the caller.
pub type Action<T> = Box<dyn Fn(&Cursor) -> T + Send + Sync>;

/// One `(pattern, action)` entry.
pub struct Rule<T> {
    matcher: Box<dyn PatternMatcher>,
    action: Option<Action<T>>,
    priority: usize,
}

impl<T> Rule<T> {
    /// Registration index; lower wins ties.
    pub fn priority(&self) -> usize {
        self.priority
    }

    /// Anchored match length of this rule's pattern against `text`.
    #[inline]
    pub fn match_at(&self, text: &str) -> Option<usize> {
        self.matcher.match_at(text)
    }

    /// `None` for rules that consume their match silently.
    pub fn action(&self) -> Option<&Action<T>> {
        self.action.as_ref()
    }
}

impl<T> fmt::Debug for Rule<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("priority", &self.priority)
            .field("has_action", &self.action.is_some())
            .finish_non_exhaustive()
    }
}

/// Immutable rule set shared by any number of drivers.
pub struct RuleTable<T> {
    rules: Vec<Rule<T>>,
    ignore_code: T,
    end_of_input: Action<T>,
}

impl<T> RuleTable<T> {
    /// Start configuring a new table.
    pub fn builder() -> RuleTableBuilder<T> {
        RuleTableBuilder::new()
    }

    /// Rules in priority order.
    pub fn rules(&self) -> &[Rule<T>] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The code that actions return to mean "keep scanning".
    pub fn ignore_code(&self) -> &T {
        &self.ignore_code
    }

    /// Run the end-of-input action.
    pub fn end_of_input(&self, cursor: &Cursor) -> T {
        (self.end_of_input)(cursor)
    }
}

impl<T: PartialEq> RuleTable<T> {
    /// Returns `true` if `code` is the ignore code.
    #[inline]
    pub fn is_ignored(&self, code: &T) -> bool {
        *code == self.ignore_code
    }
}

impl<T: fmt::Debug> fmt::Debug for RuleTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleTable")
            .field("rules", &self.rules)
            .field("ignore_code", &self.ignore_code)
            .finish_non_exhaustive()
    }
}

/// Append-only configuration for a [`RuleTable`].
///
/// Pattern errors surface from the `add_*` call that registered the bad
/// pattern; a missing ignore code or end-of-input action surfaces from
/// [`build()`](Self::build).
pub struct RuleTableBuilder<T> {
    rules: Vec<Rule<T>>,
    ignore_code: Option<T>,
    end_of_input: Option<Action<T>>,
}

impl<T> Default for RuleTableBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RuleTableBuilder<T> {
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            ignore_code: None,
            end_of_input: None,
        }
    }

    /// Set the code that means "produced, but don't return it".
    ///
    /// Required: token codes are caller-defined and have no natural
    /// "nothing" value, so [`build()`](Self::build) fails with
    /// [`SetupError::MissingIgnoreCode`] if this was never called.
    pub fn set_ignore_code(&mut self, code: T) -> &mut Self {
        self.ignore_code = Some(code);
        self
    }

    /// Set the action run on every `next_token()` call once input is
    /// exhausted.
    pub fn set_end_of_input<F>(&mut self, action: F) -> &mut Self
    where
        F: Fn(&Cursor) -> T + Send + Sync + 'static,
    {
        self.end_of_input = Some(Box::new(action));
        self
    }

    /// Add a regex rule whose matches are turned into a token code by
    /// `action`.
    pub fn add_rule<F>(&mut self, pattern: &str, action: F) -> Result<&mut Self, SetupError>
    where
        F: Fn(&Cursor) -> T + Send + Sync + 'static,
    {
        let matcher = self.compile(pattern)?;
        Ok(self.add_matcher(matcher, Some(Box::new(action))))
    }

    /// Add a regex rule whose matches are consumed without producing
    /// anything, such as whitespace.
    pub fn add_silent_rule(&mut self, pattern: &str) -> Result<&mut Self, SetupError> {
        let matcher = self.compile(pattern)?;
        Ok(self.add_matcher(matcher, None))
    }

    /// Add a rule backed by any matcher. A `None` action consumes the
    /// match silently.
    pub fn add_matcher(
        &mut self,
        matcher: impl PatternMatcher + 'static,
        action: Option<Action<T>>,
    ) -> &mut Self {
        let priority = self.rules.len();
        self.rules.push(Rule {
            matcher: Box::new(matcher),
            action,
            priority,
        });
        self
    }

    /// Number of rules registered so far.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Finish configuration.
    pub fn build(self) -> Result<RuleTable<T>, SetupError> {
        let ignore_code = self.ignore_code.ok_or(SetupError::MissingIgnoreCode)?;
        let end_of_input = self.end_of_input.ok_or(SetupError::MissingEndOfInput)?;
        Ok(RuleTable {
            rules: self.rules,
            ignore_code,
            end_of_input,
        })
    }

    fn compile(&self, pattern: &str) -> Result<RegexPattern, SetupError> {
        RegexPattern::new(pattern).map_err(|source| SetupError::InvalidPattern {
            index: self.rules.len(),
            pattern: pattern.to_owned(),
            source: Box::new(source),
        })
    }
}
