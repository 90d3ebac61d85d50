//! Per-store options.
//!
//! [`StoreOptions::defaults`] returns the built-in defaults without touching
//! the filesystem. [`StoreOptions::load`] and [`StoreOptions::from_toml`]
//! layer user TOML on top of the same defaults.

use serde::Deserialize;
use std::path::Path;

use crate::error::Result;
use crate::types::Delimiter;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_OPTIONS: &str = r#"
delimiter         = "="
io_errors         = "propagate"
malformed         = "skip"
atomic_writes     = true
create_if_missing = true
"#;

// ---------------------------------------------------------------------------
// Public option types
// ---------------------------------------------------------------------------

/// What a store does when a whole-file read or write fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IoPolicy {
    /// Return [`Error::Io`](crate::Error::Io) to the caller.
    #[default]
    Propagate,
    /// Log a warning and carry on as if the file were empty (reads) or the
    /// write had been skipped (writes).
    Swallow,
}

/// What reconciliation does with a persisted line that fails to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedPolicy {
    /// Log a warning and ignore the line.
    #[default]
    Skip,
    /// Abort with [`Error::MalformedLine`](crate::Error::MalformedLine).
    Fail,
}

/// Options shared by the cached and the direct store.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StoreOptions {
    #[serde(default)]
    pub delimiter: Delimiter,
    #[serde(default)]
    pub io_errors: IoPolicy,
    #[serde(default)]
    pub malformed: MalformedPolicy,
    #[serde(default = "default_true")]
    pub atomic_writes: bool,
    #[serde(default = "default_true")]
    pub create_if_missing: bool,
}

fn default_true() -> bool { true }

impl Default for StoreOptions {
    fn default() -> Self {
        Self::defaults()
    }
}

impl StoreOptions {
    /// Load from a TOML file, layered on top of the built-in defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path: &Path = path.as_ref();
        ::config::Config::builder()
            .add_source(::config::File::from_str(DEFAULT_OPTIONS, ::config::FileFormat::Toml))
            .add_source(::config::File::from(path).format(::config::FileFormat::Toml))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Parse TOML text, layered on top of the built-in defaults.
    pub fn from_toml(text: &str) -> Result<Self> {
        ::config::Config::builder()
            .add_source(::config::File::from_str(DEFAULT_OPTIONS, ::config::FileFormat::Toml))
            .add_source(::config::File::from_str(text, ::config::FileFormat::Toml))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        Self {
            delimiter: Delimiter::Equals,
            io_errors: IoPolicy::Propagate,
            malformed: MalformedPolicy::Skip,
            atomic_writes: true,
            create_if_missing: true,
        }
    }

    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_io_errors(mut self, policy: IoPolicy) -> Self {
        self.io_errors = policy;
        self
    }

    pub fn with_malformed(mut self, policy: MalformedPolicy) -> Self {
        self.malformed = policy;
        self
    }

    pub fn with_atomic_writes(mut self, atomic: bool) -> Self {
        self.atomic_writes = atomic;
        self
    }

    pub fn with_create_if_missing(mut self, create: bool) -> Self {
        self.create_if_missing = create;
        self
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
