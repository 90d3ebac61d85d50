//! Static file corpora used across harnesses.
//!
//! Each corpus is the full text of a backing file, exactly as it would sit on
//! disk, so harnesses exercise the real reader rather than pre-split lines.

/// Three lines, the last an exact repeat of the first.
pub const FILE_WITH_DUPLICATE: &str = "a=1\nb=2\na=1\n";

/// A realistic `=`-delimited application config.
pub const FILE_APP_EQUALS: &str = "\
host=localhost
port=8080
log_level=info
db_url=postgres://user:pw@db.internal:5432/app?sslmode=require
";

/// The same settings with `:` as the delimiter.
pub const FILE_APP_COLON: &str = "\
host:localhost
port:8080
log_level:info
";

/// Valid lines interleaved with blank lines, CRLF endings and junk.
pub const FILE_MESSY: &str = "a=1\r\n\nnot a pair\n=orphan\nempty=\n\r\nb=2\n";

/// Entries that [`FILE_MESSY`] should decode to when malformed lines are skipped.
pub const FILE_MESSY_VALID: &[(&str, &str)] = &[("a", "1"), ("b", "2")];

/// A file whose keys repeat with different values.
pub const FILE_REPEATED_KEYS: &str = "x=1\ny=2\nx=3\n";

/// Generate `n` distinct `key_i=value_i` pairs.
pub fn numbered_pairs(n: usize) -> Vec<(String, String)> {
    (0..n)
        .map(|i| (format!("key_{i}"), format!("value_{i}")))
        .collect()
}
