//! The maximal-munch scanning loop.
//!
//! At each position every rule is tried against the remainder of the
//! current line. The longest match wins; among equally long matches the
//! earliest registered rule wins. The winner's action turns the match into
//! a token code, and codes equal to the table's ignore code are swallowed
//! without returning to the caller.
//!
//! # Progress
//!
//! Every iteration moves the cursor forward by at least one character:
//!
//! - A zero-width match ranks as a one-byte match and steps over one
//!   character, while still reporting `""` as its text. At the end of a
//!   line this is what moves the cursor onto the next line.
//! - A position where nothing matches is skipped silently, one character
//!   at a time.
//!
//! # States
//!
//! A driver is either scanning or exhausted. Exhaustion is absorbing: each
//! `next_token()` call after the line source runs dry re-runs the
//! end-of-input action and returns its result.

use std::io::{BufReader, Read};
use std::sync::Arc;

use tracing::{trace, warn};

use crate::cursor::Cursor;
use crate::error::ScanError;
use crate::line_source::{IterLines, LineSource, ReadLines};
use crate::rule_table::RuleTable;

/// The rule chosen at one position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Selection {
    /// Index (and priority) of the winning rule.
    pub rule: usize,
    /// True match length in bytes.
    pub matched: usize,
    /// Bytes the cursor moves forward. Equals `matched` except for
    /// zero-width matches.
    pub consumed: usize,
}

/// Pick the rule that fires on `remainder`, if any.
///
/// Rules are tried in registration order and a candidate only replaces
/// the current best when it is strictly longer, so ties go to the rule
/// registered first. Zero-width matches compete as length 1.
///
/// A matcher reporting a length past the end of `remainder`, or inside a
/// UTF-8 character, is treated as not matching.
pub fn select_rule<T>(rules: &RuleTable<T>, remainder: &str) -> Option<Selection> {
    let mut best: Option<(usize, Selection)> = None;
    for rule in rules.rules() {
        let Some(len) = rule.match_at(remainder) else {
            continue;
        };
        if !remainder.is_char_boundary(len) {
            warn!(
                rule = rule.priority(),
                len,
                available = remainder.len(),
                "matcher length is not a character boundary; ignoring match"
            );
            continue;
        }
        let rank = len.max(1);
        let better = match &best {
            None => true,
            Some((best_rank, _)) => rank > *best_rank,
        };
        if better {
            best = Some((
                rank,
                Selection {
                    rule: rule.priority(),
                    matched: len,
                    consumed: len,
                },
            ));
        }
    }
    best.map(|(_, mut sel)| {
        if sel.matched == 0 {
            sel.consumed = remainder.chars().next().map_or(1, char::len_utf8);
        }
        sel
    })
}

/// Token producer for one input stream.
///
/// Owns its [`Cursor`] exclusively and shares the [`RuleTable`] with any
/// other drivers built from it.
#[derive(Debug)]
pub struct Driver<T> {
    rules: Arc<RuleTable<T>>,
    cursor: Cursor,
}

impl<T> Driver<T> {
    /// Create a driver that scans lines from `source`.
    pub fn new(rules: impl Into<Arc<RuleTable<T>>>, source: impl LineSource + 'static) -> Self {
        Self {
            rules: rules.into(),
            cursor: Cursor::new(source),
        }
    }

    /// Create a driver over a byte reader, split into lines on `\n` (a
    /// preceding `\r` is dropped).
    pub fn from_reader(
        rules: impl Into<Arc<RuleTable<T>>>,
        reader: impl Read + Send + 'static,
    ) -> Self {
        Self::new(rules, ReadLines::new(BufReader::new(reader)))
    }

    /// Create a driver over in-memory lines.
    pub fn from_lines<I>(rules: impl Into<Arc<RuleTable<T>>>, lines: I) -> Self
    where
        I: IntoIterator,
        I::IntoIter: Send + 'static,
        I::Item: Into<String>,
    {
        Self::new(rules, IterLines::new(lines))
    }

    /// Text matched by the rule that produced the most recent token.
    /// Empty after end of input.
    pub fn text(&self) -> &str {
        self.cursor.text()
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn rules(&self) -> &RuleTable<T> {
        &self.rules
    }
}

impl<T: PartialEq> Driver<T> {
    /// Produce the next token code.
    ///
    /// Runs rules until one yields a code other than the ignore code. Once
    /// input is exhausted, returns whatever the end-of-input action returns,
    /// on this call and every later one. A line-source I/O failure is
    /// indistinguishable from the end of input here; use
    /// [`try_next_token()`](Self::try_next_token) to observe it.
    pub fn next_token(&mut self) -> T {
        loop {
            if !self.cursor.ensure_available() {
                return self.rules.end_of_input(&self.cursor);
            }
            if let Some(code) = self.step() {
                return code;
            }
        }
    }

    /// Like [`next_token()`](Self::next_token), but reports a line-source
    /// I/O failure as an error, once. Later calls behave as at end of
    /// input.
    pub fn try_next_token(&mut self) -> Result<T, ScanError> {
        loop {
            if !self.cursor.ensure_available() {
                if let Some(source) = self.cursor.take_error() {
                    return Err(ScanError::Io {
                        line: self.cursor.line_number() + 1,
                        source,
                    });
                }
                return Ok(self.rules.end_of_input(&self.cursor));
            }
            if let Some(code) = self.step() {
                return Ok(code);
            }
        }
    }

    /// One match-and-advance at the current position. Returns a code only
    /// when it should reach the caller.
    fn step(&mut self) -> Option<T> {
        let Some(sel) = select_rule(&self.rules, self.cursor.remainder()) else {
            trace!(
                line = self.cursor.line_number(),
                column = self.cursor.offset(),
                "no rule matched; skipping character"
            );
            self.cursor.skip_char();
            return None;
        };
        self.cursor.advance(sel.consumed, sel.matched);
        trace!(
            line = self.cursor.line_number(),
            column = self.cursor.column(),
            rule = sel.rule,
            matched = sel.matched,
            consumed = sel.consumed,
            "rule fired"
        );
        let action = self.rules.rules()[sel.rule].action()?;
        let code = action(&self.cursor);
        if self.rules.is_ignored(&code) {
            None
        } else {
            Some(code)
        }
    }
}
