//! Line-buffered input cursor.
//!
//! The cursor holds one line of input at a time and a byte offset into it.
//! All matching happens against [`remainder()`](Cursor::remainder), the
//! unconsumed suffix of the current line, so no token ever spans a line
//! boundary.
//!
//! # End of Line
//!
//! The offset may sit one position *past* the end of the line. That is the
//! signal for [`ensure_available()`](Cursor::ensure_available) to pull the
//! next line. An offset equal to the line length is still "on" the line:
//! the remainder is empty there, which is where a zero-width `$` rule gets
//! its chance to fire before the line is left behind.

use std::fmt;
use std::io;
use std::ops::Range;

use tracing::{debug, warn};

use crate::line_source::LineSource;

/// Input state for one scan: the current line, the scan offset, and the
/// range of the most recent match.
pub struct Cursor {
    source: Box<dyn LineSource>,
    line: String,
    /// Byte offset into `line`. May exceed `line.len()` by one.
    offset: usize,
    /// True (un-normalized) range of the last match within `line`.
    last_match: Range<usize>,
    /// 1-based number of `line`; 0 before the first line is read.
    line_number: usize,
    exhausted: bool,
    /// I/O failure that ended the source, kept until someone asks for it.
    pending_error: Option<io::Error>,
}

impl Cursor {
    /// Create a cursor that has not read anything yet.
    ///
    /// The offset starts past the end of the (empty) current line so the
    /// first [`ensure_available()`](Self::ensure_available) pulls a line.
    pub fn new(source: impl LineSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            line: String::new(),
            offset: 1,
            last_match: 0..0,
            line_number: 0,
            exhausted: false,
            pending_error: None,
        }
    }

    /// Make sure there is a line to scan, refilling from the source if the
    /// offset has moved past the end of the current one.
    ///
    /// Returns `false` once the source is exhausted. After that the source
    /// is never polled again and every call returns `false`. An I/O error
    /// from the source counts as exhaustion; it is kept for
    /// [`take_error()`](Self::take_error).
    ///
    /// Resets the last match to empty, so [`text()`](Self::text) is `""`
    /// until the next advance.
    pub fn ensure_available(&mut self) -> bool {
        self.last_match = self.offset..self.offset;
        if self.offset <= self.line.len() {
            return true;
        }
        if self.exhausted {
            return false;
        }
        match self.source.next_line() {
            Ok(Some(line)) => {
                self.line = line;
                self.offset = 0;
                self.last_match = 0..0;
                self.line_number += 1;
                debug!(line = self.line_number, len = self.line.len(), "line refilled");
                true
            }
            Ok(None) => {
                self.exhausted = true;
                debug!(lines = self.line_number, "line source exhausted");
                false
            }
            Err(err) => {
                warn!(line = self.line_number + 1, error = %err, "line source failed; treating as end of input");
                self.exhausted = true;
                self.pending_error = Some(err);
                false
            }
        }
    }

    /// The unconsumed suffix of the current line. Empty at (or past) the
    /// end of the line.
    #[inline]
    pub fn remainder(&self) -> &str {
        self.line.get(self.offset..).unwrap_or("")
    }

    /// Record a match of `matched` bytes and move the offset forward by
    /// `consumed` bytes.
    ///
    /// `consumed` differs from `matched` only for zero-width matches, which
    /// still have to move the cursor.
    pub fn advance(&mut self, consumed: usize, matched: usize) {
        debug_assert!(matched <= consumed, "advance {consumed} shorter than match {matched}");
        self.last_match = self.offset..self.offset + matched;
        self.offset += consumed;
    }

    /// Byte width of the first character of the remainder, or 1 when the
    /// remainder is empty (stepping past the end of the line).
    #[inline]
    pub fn char_width(&self) -> usize {
        self.remainder().chars().next().map_or(1, char::len_utf8)
    }

    /// Step over one character without matching anything.
    pub fn skip_char(&mut self) {
        self.advance(self.char_width(), 0);
    }

    /// Text of the most recent match, exactly as it appeared in the
    /// remainder before the cursor moved past it.
    #[inline]
    pub fn text(&self) -> &str {
        self.line.get(self.last_match.clone()).unwrap_or("")
    }

    /// The whole current line, without its terminator.
    pub fn line(&self) -> &str {
        &self.line
    }

    /// 1-based number of the current line; 0 before any line is read.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// 0-based byte column where the most recent match starts.
    pub fn column(&self) -> usize {
        self.last_match.start
    }

    /// Current byte offset into the line.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Returns `true` once the line source has run dry.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Take the I/O error that ended the source, if there was one.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.pending_error.take()
    }
}

impl fmt::Debug for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("line", &self.line)
            .field("offset", &self.offset)
            .field("last_match", &self.last_match)
            .field("line_number", &self.line_number)
            .field("exhausted", &self.exhausted)
            .finish_non_exhaustive()
    }
}
