//! Sequential line suppliers.
//!
//! The cursor pulls one line at a time and never seeks or pushes back.
//! Lines are handed over without their terminator, so patterns see
//! `"abc"` for an input line `"abc\r\n"` and `$` matches at its end.

use std::io::{self, BufRead};

/// A pull-based source of input lines.
///
/// Sources are `Send` so a driver can be handed to another thread.
pub trait LineSource: Send {
    /// Returns the next line without its terminator, `Ok(None)` once the
    /// source is exhausted, or the I/O error that stopped it.
    fn next_line(&mut self) -> io::Result<Option<String>>;
}

impl<S: LineSource + ?Sized> LineSource for Box<S> {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        (**self).next_line()
    }
}

/// Lines read from a [`BufRead`], split on `\n` with an optional `\r`
/// stripped before it.
///
/// A final line without a terminator is still returned; an empty reader
/// yields no lines at all. Bytes that are not valid UTF-8 become U+FFFD,
/// so they reach the rules as ordinary (usually unmatched) characters and
/// only genuine read failures end the source.
#[derive(Debug)]
pub struct ReadLines<R> {
    reader: R,
    buf: Vec<u8>,
}

impl<R: BufRead> ReadLines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
        }
    }
}

impl<R: BufRead + Send> LineSource for ReadLines<R> {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        self.buf.clear();
        if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(None);
        }
        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
            if self.buf.last() == Some(&b'\r') {
                self.buf.pop();
            }
        }
        Ok(Some(String::from_utf8_lossy(&self.buf).into_owned()))
    }
}

/// Lines taken from an in-memory iterator. Never fails.
#[derive(Clone, Debug)]
pub struct IterLines<I> {
    iter: I,
}

impl<I> IterLines<I>
where
    I: Iterator,
    I::Item: Into<String>,
{
    pub fn new(lines: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            iter: lines.into_iter(),
        }
    }
}

impl<I> LineSource for IterLines<I>
where
    I: Iterator + Send,
    I::Item: Into<String>,
{
    fn next_line(&mut self) -> io::Result<Option<String>> {
        Ok(self.iter.next().map(Into::into))
    }
}
