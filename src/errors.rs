//! Submodule defining the errors used across the crate.

use alloc::string::String;

/// Errors that can occur while splitting a script into statements.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A block comment was opened but its end delimiter never appears in the
    /// rest of the script.
    #[error(
        "Missing block comment end delimiter [{expected_delimiter}] for comment starting at byte {position}"
    )]
    UnterminatedBlockComment {
        /// The end delimiter that was searched for.
        expected_delimiter: String,
        /// Byte offset of the opening delimiter in the script.
        position: usize,
    },
}

/// Errors raised when building a [`Delimiters`](crate::Delimiters) configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DelimiterError {
    /// The statement separator is empty.
    #[error("The statement separator must not be empty")]
    EmptySeparator,
    /// The line comment prefix is empty.
    #[error("The line comment prefix must not be empty")]
    EmptyCommentPrefix,
    /// The block comment start delimiter is empty.
    #[error("The block comment start delimiter must not be empty")]
    EmptyBlockCommentStart,
    /// The block comment end delimiter is empty.
    #[error("The block comment end delimiter must not be empty")]
    EmptyBlockCommentEnd,
}
