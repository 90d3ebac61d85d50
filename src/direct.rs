//! DirectStore — the file is the only copy.
//!
//! Nothing is cached between calls: every operation reads the whole file,
//! and every mutation either appends one line ([`DirectStore::set`]) or
//! rewrites the file. One mutex per instance serializes all calls, so a
//! `DirectStore` can be shared behind an `Arc`. Other instances or processes
//! touching the same file are not coordinated.
//!
//! Keys are unique on insert. Key-based edits apply to every matching line,
//! which only matters for files that already contain repeated keys.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use liteconf_core::{codec, Delimiter, Entry, Error, Result, StoreOptions};
use liteconf_file::{FileBackend, Line};

use crate::policy;

/// Lock-guarded store with no in-memory state beyond the target path.
#[derive(Debug)]
pub struct DirectStore {
    backend: Mutex<FileBackend>,
    delimiter: Delimiter,
    options: StoreOptions,
}

impl DirectStore {
    /// Bind to `path` with default options (`=` delimiter).
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        Self::with_options(path, StoreOptions::defaults())
    }

    pub fn with_options(path: impl Into<PathBuf>, options: StoreOptions) -> Result<Self> {
        let backend = Self::bind(path, &options)?;
        Ok(Self {
            backend: Mutex::new(backend),
            delimiter: options.delimiter,
            options,
        })
    }

    pub fn delimiter(&self) -> Delimiter {
        self.delimiter
    }

    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    pub fn target(&self) -> PathBuf {
        self.lock().path().to_path_buf()
    }

    /// Point the store at a different file. Fails with
    /// [`Error::NullTarget`] for an empty path.
    pub fn set_target(&self, path: impl Into<PathBuf>) -> Result<()> {
        let backend = Self::bind(path, &self.options)?;
        *self.lock() = backend;
        Ok(())
    }

    /// Append `key`/`value` as a new line.
    ///
    /// Fails with [`Error::DuplicateKey`] if any line already has `key`, and
    /// with [`Error::InvalidEntry`] if the pair could not be read back. The
    /// check and the append happen under one lock acquisition.
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) -> Result<()> {
        let entry = Entry::new(key, value);
        codec::validate(&entry, self.delimiter)?;
        let backend = self.lock();
        if self.lookup(&backend, &entry.key)?.is_some() {
            return Err(Error::DuplicateKey {
                key: entry.key,
                path: backend.path().to_path_buf(),
            });
        }
        self.guard(
            backend.path(),
            "append",
            backend.append(&entry, self.delimiter),
        )?;
        Ok(())
    }

    /// Value of the first line with `key`, top to bottom.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let backend = self.lock();
        self.lookup(&backend, key)
    }

    /// Every decoded line, in file order.
    pub fn entries(&self) -> Result<Vec<Entry>> {
        let backend = self.lock();
        Ok(self.read_all(&backend)?.unwrap_or_default())
    }

    /// Drop every line with `key`. Returns how many were removed.
    pub fn remove(&self, key: &str) -> Result<usize> {
        self.rewrite(|entry| {
            if entry.key == key {
                Edit::Drop
            } else {
                Edit::Keep
            }
        })
    }

    /// Rename `old` to `new` on every matching line. Returns how many lines
    /// changed.
    pub fn update_key(&self, old: &str, new: &str) -> Result<usize> {
        self.rewrite(|entry| {
            if entry.key != old {
                return Edit::Keep;
            }
            entry.key = new.to_string();
            Edit::Changed
        })
    }

    /// Replace the value on every line with `key`. Returns how many lines
    /// changed.
    pub fn update_value(&self, key: &str, new: &str) -> Result<usize> {
        self.rewrite(|entry| {
            if entry.key != key {
                return Edit::Keep;
            }
            entry.value = new.to_string();
            Edit::Changed
        })
    }

    /// Truncate the file to empty.
    pub fn clear(&self) -> Result<()> {
        let backend = self.lock();
        self.guard(backend.path(), "truncate", backend.truncate())?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn bind(path: impl Into<PathBuf>, options: &StoreOptions) -> Result<FileBackend> {
        let backend = FileBackend::new(path)?.with_atomic_writes(options.atomic_writes);
        if options.create_if_missing {
            policy::apply(
                options.io_errors,
                backend.path(),
                "create",
                backend.ensure_exists(),
            )?;
        }
        Ok(backend)
    }

    // The guarded value is a path; a panic elsewhere cannot leave it torn.
    fn lock(&self) -> MutexGuard<'_, FileBackend> {
        self.backend.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn guard<T>(&self, path: &Path, op: &'static str, result: Result<T>) -> Result<Option<T>> {
        policy::apply(self.options.io_errors, path, op, result)
    }

    /// `None` when the read failed and the policy swallowed it.
    fn read_all(&self, backend: &FileBackend) -> Result<Option<Vec<Entry>>> {
        self.guard(
            backend.path(),
            "read",
            backend.read(self.delimiter, self.options.malformed),
        )
    }

    fn lookup(&self, backend: &FileBackend, key: &str) -> Result<Option<String>> {
        Ok(self
            .read_all(backend)?
            .unwrap_or_default()
            .into_iter()
            .find(|e| e.key == key)
            .map(|e| e.value))
    }

    /// Read, apply `edit` to every decoded entry, and write back if anything
    /// changed or was dropped. Returns that count.
    ///
    /// Blank lines and lines skipped as malformed are written back verbatim
    /// in their original position. A changed entry that could not be read
    /// back fails with [`Error::InvalidEntry`] before anything is written. A
    /// swallowed read failure skips the write entirely, so an unreadable file
    /// is never replaced by an empty one.
    fn rewrite<F>(&self, mut edit: F) -> Result<usize>
    where
        F: FnMut(&mut Entry) -> Edit,
    {
        let backend = self.lock();
        let read = backend.read_lines(self.delimiter, self.options.malformed);
        let Some(lines) = self.guard(backend.path(), "read", read)? else {
            return Ok(0);
        };

        let mut changed = 0;
        let mut kept = Vec::with_capacity(lines.len());
        for line in lines {
            let mut entry = match line {
                Line::Entry(entry) => entry,
                raw => {
                    kept.push(raw);
                    continue;
                }
            };
            match edit(&mut entry) {
                Edit::Keep => kept.push(Line::Entry(entry)),
                Edit::Changed => {
                    codec::validate(&entry, self.delimiter)?;
                    changed += 1;
                    kept.push(Line::Entry(entry));
                }
                Edit::Drop => changed += 1,
            }
        }

        if changed > 0 {
            self.guard(
                backend.path(),
                "overwrite",
                backend.overwrite_lines(&kept, self.delimiter),
            )?;
        }
        Ok(changed)
    }
}

/// What an edit did to one entry during a rewrite.
enum Edit {
    Keep,
    Changed,
    Drop,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
