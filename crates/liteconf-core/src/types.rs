//! The key/value data model.
//!
//! An [`Entry`] is one persisted pair; a [`Delimiter`] separates its halves
//! on disk.

use serde::Deserialize;

use crate::error::Error;

/// A single key/value pair, one line of the backing file.
///
/// Two entries are equal only when both key and value match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Entry {
    pub key: String,
    pub value: String,
}

impl Entry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl<K: Into<String>, V: Into<String>> From<(K, V)> for Entry {
    fn from((key, value): (K, V)) -> Self {
        Self::new(key, value)
    }
}

/// Character separating key from value in the persisted form.
///
/// Only `=` and `:` are accepted; anything else is rejected with
/// [`Error::InvalidDelimiter`] at conversion time, so a `Delimiter` value is
/// always valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "char")]
pub enum Delimiter {
    #[default]
    Equals,
    Colon,
}

impl Delimiter {
    /// Every accepted delimiter, in the order they are tried.
    pub const ALLOWED: [Delimiter; 2] = [Delimiter::Equals, Delimiter::Colon];

    pub fn as_char(self) -> char {
        match self {
            Delimiter::Equals => '=',
            Delimiter::Colon => ':',
        }
    }
}

impl TryFrom<char> for Delimiter {
    type Error = Error;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Self::ALLOWED
            .into_iter()
            .find(|d| d.as_char() == c)
            .ok_or(Error::InvalidDelimiter(c))
    }
}

impl From<Delimiter> for char {
    fn from(d: Delimiter) -> Self {
        d.as_char()
    }
}

impl std::fmt::Display for Delimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case('=', Delimiter::Equals)]
    #[case(':', Delimiter::Colon)]
    fn allowed_delimiters_convert(#[case] c: char, #[case] expected: Delimiter) {
        assert_eq!(Delimiter::try_from(c).unwrap(), expected);
        assert_eq!(char::from(expected), c);
    }

    #[rstest]
    #[case('#')]
    #[case(',')]
    #[case(' ')]
    #[case('\t')]
    fn other_delimiters_are_rejected(#[case] c: char) {
        let err = Delimiter::try_from(c).unwrap_err();
        assert!(matches!(err, Error::InvalidDelimiter(got) if got == c));
    }

    #[test]
    fn default_delimiter_is_equals() {
        assert_eq!(Delimiter::default(), Delimiter::Equals);
        assert_eq!(Delimiter::default().to_string(), "=");
    }

    #[test]
    fn equality_requires_key_and_value() {
        assert_eq!(Entry::new("a", "1"), Entry::from(("a", "1")));
        assert_ne!(Entry::new("a", "1"), Entry::new("a", "2"));
        assert_ne!(Entry::new("a", "1"), Entry::new("b", "1"));
    }
}
