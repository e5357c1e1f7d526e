//! Single-pass splitting of SQL scripts into statements.
//!
//! The scan walks the script once, left to right, and resolves the overlap
//! between escapes, quoted literals, separators, comments and whitespace with
//! a fixed precedence:
//!
//! 1. a character following a backslash is always copied literally;
//! 2. single and double quotes toggle their literal state;
//! 3. outside literals, the separator ends a statement, then the line comment
//!    prefix skips to the end of the line, then the block comment start skips
//!    past the matching end delimiter;
//! 4. outside literals, runs of spaces, tabs and newlines collapse to a single
//!    space, and are dropped entirely at the start of a statement;
//! 5. everything else is copied.

use alloc::string::String;
use alloc::vec::Vec;
use core::iter::FusedIterator;

use crate::delimiters::Delimiters;
use crate::errors::Error;

const ESCAPE: char = '\\';
const SINGLE_QUOTE: char = '\'';
const DOUBLE_QUOTE: char = '"';

/// Mutable state of one scan.
#[derive(Debug, Default)]
struct ScanState {
    /// Byte offset of the next character, always on a char boundary.
    pos: usize,
    in_single_quote: bool,
    in_double_quote: bool,
    in_escape: bool,
    /// Statement being accumulated.
    buffer: String,
}

impl ScanState {
    fn in_quotes(&self) -> bool {
        self.in_single_quote || self.in_double_quote
    }

    /// Append `c` to the statement and move past `width` bytes of input.
    fn push(&mut self, c: char, width: usize) {
        self.buffer.push(c);
        self.pos += width;
    }

    /// Hand out the accumulated statement, if any.
    fn take_statement(&mut self) -> Option<String> {
        if self.buffer.is_empty() {
            None
        } else {
            Some(core::mem::take(&mut self.buffer))
        }
    }
}

/// Whether `rest` starts with `token`. Empty tokens never match.
fn starts_with_token(rest: &str, token: &str) -> bool {
    !token.is_empty() && rest.starts_with(token)
}

/// Lazy iterator over the statements of a script.
///
/// Statements are produced in script order. After an error has been yielded
/// the iterator is exhausted, so collecting into a `Result<Vec<_>, _>` never
/// observes a partial result.
///
/// # Examples
///
/// ```
/// use sql_statement_splitter::{Delimiters, Statements};
///
/// let delimiters = Delimiters::default();
/// let mut statements = Statements::new("SELECT 1; SELECT 2", &delimiters);
/// assert_eq!(statements.next(), Some(Ok("SELECT 1".into())));
/// assert_eq!(statements.next(), Some(Ok("SELECT 2".into())));
/// assert_eq!(statements.next(), None);
/// ```
#[derive(Debug)]
pub struct Statements<'a> {
    script: &'a str,
    separator: &'a str,
    comment_prefix: &'a str,
    block_comment_start: &'a str,
    block_comment_end: &'a str,
    state: ScanState,
    finished: bool,
}

impl<'a> Statements<'a> {
    /// Create an iterator over the statements of `script`.
    #[must_use]
    pub fn new(script: &'a str, delimiters: &'a Delimiters) -> Self {
        Self::from_tokens(
            script,
            delimiters.separator(),
            delimiters.comment_prefix(),
            delimiters.block_comment_start(),
            delimiters.block_comment_end(),
        )
    }

    /// Create an iterator from unvalidated tokens. Empty tokens are disabled.
    pub(crate) fn from_tokens(
        script: &'a str,
        separator: &'a str,
        comment_prefix: &'a str,
        block_comment_start: &'a str,
        block_comment_end: &'a str,
    ) -> Self {
        Self {
            script,
            separator,
            comment_prefix,
            block_comment_start,
            block_comment_end,
            state: ScanState::default(),
            finished: false,
        }
    }

    /// Byte offset of the scan in the script.
    #[must_use]
    pub fn position(&self) -> usize {
        self.state.pos
    }

    /// Process the character `c` found at the cursor.
    ///
    /// Returns a statement when `c` starts a separator that closes a
    /// non-empty buffer.
    fn step(&mut self, c: char) -> Result<Option<String>, Error> {
        let width = c.len_utf8();
        let state = &mut self.state;

        if state.in_escape {
            state.in_escape = false;
            state.push(c, width);
            return Ok(None);
        }
        // MySQL style escapes, honored inside and outside literals.
        if c == ESCAPE {
            state.in_escape = true;
            state.push(c, width);
            return Ok(None);
        }

        if !state.in_double_quote && c == SINGLE_QUOTE {
            state.in_single_quote = !state.in_single_quote;
        } else if !state.in_single_quote && c == DOUBLE_QUOTE {
            state.in_double_quote = !state.in_double_quote;
        }
        if state.in_quotes() {
            state.push(c, width);
            return Ok(None);
        }

        let rest = &self.script[state.pos..];

        if starts_with_token(rest, self.separator) {
            state.pos += self.separator.len();
            let statement = state.take_statement();
            if let Some(statement) = &statement {
                tracing::trace!(end = state.pos, len = statement.len(), "statement complete");
            }
            return Ok(statement);
        }

        if starts_with_token(rest, self.comment_prefix) {
            // The newline itself is left for the next step, as whitespace.
            match rest[width..].find('\n') {
                Some(offset) => state.pos += width + offset,
                None => state.pos = self.script.len(),
            }
            tracing::trace!(end = state.pos, "skipped line comment");
            return Ok(None);
        }

        if starts_with_token(rest, self.block_comment_start) {
            let Some(offset) = rest[width..].find(self.block_comment_end) else {
                tracing::debug!(
                    position = state.pos,
                    expected = self.block_comment_end,
                    "unterminated block comment"
                );
                return Err(Error::UnterminatedBlockComment {
                    expected_delimiter: self.block_comment_end.into(),
                    position: state.pos,
                });
            };
            state.pos += width + offset + self.block_comment_end.len();
            tracing::trace!(end = state.pos, "skipped block comment");
            return Ok(None);
        }

        if matches!(c, ' ' | '\n' | '\t') {
            if state.buffer.is_empty() || state.buffer.ends_with(' ') {
                state.pos += width;
            } else {
                state.push(' ', width);
            }
            return Ok(None);
        }

        state.push(c, width);
        Ok(None)
    }
}

impl Iterator for Statements<'_> {
    type Item = Result<String, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        while let Some(c) = self.script[self.state.pos..].chars().next() {
            match self.step(c) {
                Ok(Some(statement)) => return Some(Ok(statement)),
                Ok(None) => {}
                Err(err) => {
                    self.finished = true;
                    return Some(Err(err));
                }
            }
        }
        self.finished = true;
        let statement = self.state.take_statement()?;
        tracing::trace!(len = statement.len(), "final statement complete");
        Some(Ok(statement))
    }
}

impl FusedIterator for Statements<'_> {}

/// Split `script` into statements using validated `delimiters`.
///
/// # Errors
///
/// Returns [`Error::UnterminatedBlockComment`] if a block comment is opened
/// outside a quoted literal and never closed.
pub fn split(script: &str, delimiters: &Delimiters) -> Result<Vec<String>, Error> {
    Statements::new(script, delimiters).collect()
}

/// Split `script` into statements using raw, unvalidated tokens.
///
/// An empty token never matches: an empty `separator` keeps the whole script
/// as one statement, and an empty comment token disables that comment kind.
///
/// # Errors
///
/// Returns [`Error::UnterminatedBlockComment`] if a block comment is opened
/// outside a quoted literal and never closed.
pub fn split_sql_script(
    script: &str,
    separator: &str,
    comment_prefix: &str,
    block_comment_start: &str,
    block_comment_end: &str,
) -> Result<Vec<String>, Error> {
    Statements::from_tokens(
        script,
        separator,
        comment_prefix,
        block_comment_start,
        block_comment_end,
    )
    .collect()
}
