//! Error types for rule-table setup and scanning.
//!
//! Setup errors are fatal and surface before any input is read. Scanning
//! itself never fails: unmatched characters are skipped and the end of
//! input is handled by the table's end-of-input action. The only scan-time
//! error is a line-source I/O failure, and only callers that opt in through
//! [`Driver::try_next_token`](crate::Driver::try_next_token) ever see it.

use std::io;

/// A rule table could not be configured.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    /// The pattern of rule `index` is not a valid regular expression.
    #[error("invalid pattern `{pattern}` for rule {index}: {source}")]
    InvalidPattern {
        index: usize,
        pattern: String,
        #[source]
        source: Box<regex::Error>,
    },
    /// `build()` was called without an ignore code.
    #[error("rule table has no ignore code")]
    MissingIgnoreCode,
    /// `build()` was called without an end-of-input action.
    #[error("rule table has no end-of-input action")]
    MissingEndOfInput,
}

/// A failure surfaced by [`Driver::try_next_token`](crate::Driver::try_next_token).
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// Reading the next line failed. Scanning is exhausted afterwards.
    #[error("failed to read line {line}: {source}")]
    Io {
        /// 1-based number of the line that could not be read.
        line: usize,
        #[source]
        source: io::Error,
    },
}
