//! Error taxonomy shared by every liteconf crate.
//!
//! Validation failures (duplicates, missing keys, bad indices, bad
//! delimiters, unbound stores) are always returned to the caller. Whole-file
//! I/O failures surface as [`Error::Io`] unless the store was configured with
//! [`IoPolicy::Swallow`](crate::IoPolicy::Swallow).

use std::path::PathBuf;

/// Why a single persisted line could not be decoded into an [`Entry`](crate::Entry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("delimiter {0:?} not found")]
    MissingDelimiter(char),
    #[error("empty key segment")]
    EmptyKey,
    #[error("empty value segment")]
    EmptyValue,
    #[error("line break inside entry")]
    LineBreak,
    #[error("key contains the delimiter {0:?}")]
    DelimiterInKey(char),
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("entry {key:?} = {value:?} already exists")]
    DuplicateEntry { key: String, value: String },

    #[error("key {key:?} already exists in {}", .path.display())]
    DuplicateKey { key: String, path: PathBuf },

    #[error("no entry with key {0:?}")]
    KeyNotFound(String),

    #[error("store is empty")]
    EmptyStore,

    #[error("index {index} out of range for store of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("invalid delimiter {0:?}, expected '=' or ':'")]
    InvalidDelimiter(char),

    #[error("no file bound to store")]
    UnboundFile,

    #[error("target file path must not be empty")]
    NullTarget,

    /// The entry would not read back as written.
    #[error("entry {key:?} = {value:?} cannot be stored: {source}")]
    InvalidEntry {
        key: String,
        value: String,
        #[source]
        source: DecodeError,
    },

    #[error("malformed line {line_no} {line:?}: {source}")]
    MalformedLine {
        /// 1-based line number within the file.
        line_no: usize,
        line: String,
        #[source]
        source: DecodeError,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid store options: {0}")]
    Config(#[from] ::config::ConfigError),
}

impl Error {
    /// True for errors caused by the filesystem rather than by the caller.
    pub fn is_io(&self) -> bool {
        matches!(self, Error::Io(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
