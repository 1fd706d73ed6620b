//! Rule-driven maximal-munch tokenizer.
//!
//! A [`RuleTable`] is an ordered list of `(pattern, action)` rules plus an
//! ignore code and an end-of-input action. A [`Driver`] runs the table over
//! a stream of lines and produces one caller-defined token code per
//! [`next_token()`](Driver::next_token) call:
//!
//! - The rule with the longest anchored match at the current position
//!   fires; ties go to the rule registered first.
//! - Zero-width matches still step over one character, so `$` can be used
//!   to detect the end of a line.
//! - Characters no rule matches are skipped silently.
//! - Actions returning the ignore code (and rules without an action) are
//!   consumed without returning to the caller.
//! - Once input is exhausted, every call returns the end-of-input action's
//!   result.
//!
//! ```
//! use munch_lexer::{Driver, RuleTable};
//!
//! const IGNORE: i32 = 0;
//! const EOF: i32 = 1;
//! const WORD: i32 = 2;
//!
//! let mut rules = RuleTable::builder();
//! rules.set_ignore_code(IGNORE).set_end_of_input(|_| EOF);
//! rules.add_silent_rule("[ \t]+")?;
//! rules.add_rule("[_a-zA-Z][_a-zA-Z0-9]*", |_| WORD)?;
//! rules.add_rule(".", |cur| i32::from(cur.text().as_bytes()[0]))?;
//!
//! let mut lexer = Driver::from_lines(rules.build()?, ["a, b"]);
//! assert_eq!(lexer.next_token(), WORD);
//! assert_eq!(lexer.text(), "a");
//! assert_eq!(lexer.next_token(), i32::from(b','));
//! assert_eq!(lexer.next_token(), WORD);
//! assert_eq!(lexer.next_token(), EOF);
//! # Ok::<(), munch_lexer::SetupError>(())
//! ```

mod cursor;
mod driver;
mod error;
mod line_source;
mod pattern;
mod rule_table;

pub use cursor::Cursor;
pub use driver::{select_rule, Driver, Selection};
pub use error::{ScanError, SetupError};
pub use line_source::{IterLines, LineSource, ReadLines};
pub use pattern::{Literal, PatternMatcher, RegexPattern};
pub use rule_table::{Action, Rule, RuleTable, RuleTableBuilder};
