//! Line codec: one line of text ⇄ one [`Entry`].
//!
//! There is no quoting or escaping. An entry only round-trips when its key
//! and value are non-empty, neither holds a line break, and the key does not
//! contain the delimiter. [`validate`] checks exactly that before anything
//! is written.

use crate::error::{DecodeError, Error};
use crate::types::{Delimiter, Entry};

/// Decode a single line, splitting on the first occurrence of `delimiter`.
///
/// A trailing `\r` is stripped so files written on Windows decode cleanly.
pub fn decode(line: &str, delimiter: Delimiter) -> Result<Entry, DecodeError> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let (key, value) = line
        .split_once(delimiter.as_char())
        .ok_or(DecodeError::MissingDelimiter(delimiter.as_char()))?;
    check(key, value, delimiter)?;
    Ok(Entry::new(key, value))
}

/// Reject an entry that [`decode`] could not read back after [`encode`].
pub fn validate(entry: &Entry, delimiter: Delimiter) -> crate::Result<()> {
    check(&entry.key, &entry.value, delimiter).map_err(|source| Error::InvalidEntry {
        key: entry.key.clone(),
        value: entry.value.clone(),
        source,
    })
}

fn check(key: &str, value: &str, delimiter: Delimiter) -> Result<(), DecodeError> {
    if key.is_empty() {
        return Err(DecodeError::EmptyKey);
    }
    if value.is_empty() {
        return Err(DecodeError::EmptyValue);
    }
    if [key, value].iter().any(|s| s.contains(['\n', '\r'])) {
        return Err(DecodeError::LineBreak);
    }
    if key.contains(delimiter.as_char()) {
        return Err(DecodeError::DelimiterInKey(delimiter.as_char()));
    }
    Ok(())
}

/// Encode an entry as `key<delimiter>value`, without a line terminator.
pub fn encode(entry: &Entry, delimiter: Delimiter) -> String {
    let mut line = String::with_capacity(entry.key.len() + entry.value.len() + 1);
    line.push_str(&entry.key);
    line.push(delimiter.as_char());
    line.push_str(&entry.value);
    line
}

/// Encode a whole collection, one `\n`-terminated line per entry.
pub fn encode_all<'a, I>(entries: I, delimiter: Delimiter) -> String
where
    I: IntoIterator<Item = &'a Entry>,
{
    entries.into_iter().fold(String::new(), |mut out, entry| {
        out.push_str(&encode(entry, delimiter));
        out.push('\n');
        out
    })
}
