//! Configuration of the tokens that structure a SQL script.

use alloc::string::{String, ToString};

use crate::errors::DelimiterError;

/// Default statement separator.
pub const DEFAULT_SEPARATOR: &str = ";";
/// Default line comment prefix.
pub const DEFAULT_COMMENT_PREFIX: &str = "--";
/// Default block comment start delimiter.
pub const DEFAULT_BLOCK_COMMENT_START: &str = "/*";
/// Default block comment end delimiter.
pub const DEFAULT_BLOCK_COMMENT_END: &str = "*/";

/// The four tokens recognized by the splitter outside quoted literals.
///
/// Every token is guaranteed to be non-empty. Overlapping tokens are allowed,
/// in which case the separator wins over the line comment prefix, which wins
/// over the block comment start.
///
/// # Examples
///
/// ```
/// use sql_statement_splitter::Delimiters;
///
/// let delimiters = Delimiters::default().with_separator("GO").unwrap();
/// assert_eq!(delimiters.separator(), "GO");
/// assert_eq!(delimiters.comment_prefix(), "--");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawDelimiters")
)]
pub struct Delimiters {
    separator: String,
    comment_prefix: String,
    block_comment_start: String,
    block_comment_end: String,
}

impl Default for Delimiters {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
            comment_prefix: DEFAULT_COMMENT_PREFIX.to_string(),
            block_comment_start: DEFAULT_BLOCK_COMMENT_START.to_string(),
            block_comment_end: DEFAULT_BLOCK_COMMENT_END.to_string(),
        }
    }
}

impl Delimiters {
    /// Create a new set of delimiters.
    ///
    /// # Errors
    ///
    /// Returns the [`DelimiterError`] matching the first empty argument.
    pub fn new(
        separator: impl Into<String>,
        comment_prefix: impl Into<String>,
        block_comment_start: impl Into<String>,
        block_comment_end: impl Into<String>,
    ) -> Result<Self, DelimiterError> {
        Self {
            separator: separator.into(),
            comment_prefix: comment_prefix.into(),
            block_comment_start: block_comment_start.into(),
            block_comment_end: block_comment_end.into(),
        }
        .validated()
    }

    /// Replace the statement separator.
    ///
    /// # Errors
    ///
    /// Returns [`DelimiterError::EmptySeparator`] if `separator` is empty.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Result<Self, DelimiterError> {
        self.separator = separator.into();
        self.validated()
    }

    /// Replace the line comment prefix.
    ///
    /// # Errors
    ///
    /// Returns [`DelimiterError::EmptyCommentPrefix`] if `prefix` is empty.
    pub fn with_comment_prefix(mut self, prefix: impl Into<String>) -> Result<Self, DelimiterError> {
        self.comment_prefix = prefix.into();
        self.validated()
    }

    /// Replace the block comment delimiters.
    ///
    /// # Errors
    ///
    /// Returns [`DelimiterError::EmptyBlockCommentStart`] or
    /// [`DelimiterError::EmptyBlockCommentEnd`] if either delimiter is empty.
    pub fn with_block_comment(
        mut self,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> Result<Self, DelimiterError> {
        self.block_comment_start = start.into();
        self.block_comment_end = end.into();
        self.validated()
    }

    /// The statement separator.
    #[must_use]
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// The line comment prefix.
    #[must_use]
    pub fn comment_prefix(&self) -> &str {
        &self.comment_prefix
    }

    /// The block comment start delimiter.
    #[must_use]
    pub fn block_comment_start(&self) -> &str {
        &self.block_comment_start
    }

    /// The block comment end delimiter.
    #[must_use]
    pub fn block_comment_end(&self) -> &str {
        &self.block_comment_end
    }

    fn validated(self) -> Result<Self, DelimiterError> {
        if self.separator.is_empty() {
            return Err(DelimiterError::EmptySeparator);
        }
        if self.comment_prefix.is_empty() {
            return Err(DelimiterError::EmptyCommentPrefix);
        }
        if self.block_comment_start.is_empty() {
            return Err(DelimiterError::EmptyBlockCommentStart);
        }
        if self.block_comment_end.is_empty() {
            return Err(DelimiterError::EmptyBlockCommentEnd);
        }
        Ok(self)
    }
}

/// Wire shape of [`Delimiters`]; missing fields fall back to the defaults.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(default)]
struct RawDelimiters {
    separator: String,
    comment_prefix: String,
    block_comment_start: String,
    block_comment_end: String,
}

#[cfg(feature = "serde")]
impl Default for RawDelimiters {
    fn default() -> Self {
        let Delimiters {
            separator,
            comment_prefix,
            block_comment_start,
            block_comment_end,
        } = Delimiters::default();
        Self {
            separator,
            comment_prefix,
            block_comment_start,
            block_comment_end,
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<RawDelimiters> for Delimiters {
    type Error = DelimiterError;

    fn try_from(raw: RawDelimiters) -> Result<Self, Self::Error> {
        Self::new(
            raw.separator,
            raw.comment_prefix,
            raw.block_comment_start,
            raw.block_comment_end,
        )
    }
}

// Arbitrary implementations for testing
#[cfg(feature = "testing")]
mod arbitrary_impl {
    use super::{Delimiters, String, ToString};
    use arbitrary::{Arbitrary, Unstructured};

    /// Draw a non-empty token, mostly from the ones seen in real scripts.
    fn token(u: &mut Unstructured<'_>, common: &[&str]) -> arbitrary::Result<String> {
        if u.ratio(3, 4)? {
            return Ok((*u.choose(common)?).to_string());
        }
        let token: String = u.arbitrary()?;
        if token.is_empty() {
            Ok((*u.choose(common)?).to_string())
        } else {
            Ok(token)
        }
    }

    impl<'a> Arbitrary<'a> for Delimiters {
        fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
            Ok(Self {
                separator: token(u, &[";", "GO", "\n", "$$", "/"])?,
                comment_prefix: token(u, &["--", "#", "//", "REM"])?,
                block_comment_start: token(u, &["/*", "{", "(*", "<!--"])?,
                block_comment_end: token(u, &["*/", "}", "*)", "-->"])?,
            })
        }
    }
}
