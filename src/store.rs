//! Store — ordered in-memory mirror of a delimited key/value file.
//!
//! The in-memory sequence is the working copy. Reads that need the file's
//! view ([`Store::all`], [`Store::get`], [`Store::update`]) reconcile first:
//! the sequence is deduplicated by exact `(key, value)` pair, then every
//! decoded file entry not already present is appended. Edits stay in memory
//! until [`Store::write`] overwrites the file with the whole sequence.
//!
//! Mutating methods take `&mut self`, so a `Store` has one writer at a time.
//! Wrap it in a `Mutex` to share it across threads.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use liteconf_core::{codec, Delimiter, Entry, Error, Result, StoreOptions};
use liteconf_file::FileBackend;

use crate::policy;

/// Cached key/value store bound to at most one file.
#[derive(Debug, Clone)]
pub struct Store {
    backend: Option<FileBackend>,
    delimiter: Delimiter,
    options: StoreOptions,
    entries: Vec<Entry>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    /// An empty store with no file bound and the `=` delimiter.
    ///
    /// Bind a file with [`Store::set_file`] before any I/O operation; until
    /// then they fail with [`Error::UnboundFile`].
    pub fn new() -> Self {
        Self {
            backend: None,
            delimiter: Delimiter::default(),
            options: StoreOptions::defaults(),
            entries: Vec::new(),
        }
    }

    /// Bind to `path` with `delimiter` (`=` or `:`) and load its contents.
    pub fn open(path: impl Into<PathBuf>, delimiter: char) -> Result<Self> {
        let delimiter = Delimiter::try_from(delimiter)?;
        Self::with_options(path, StoreOptions::defaults().with_delimiter(delimiter))
    }

    /// Bind to `path` using `options` and load its contents.
    pub fn with_options(path: impl Into<PathBuf>, options: StoreOptions) -> Result<Self> {
        let mut store = Self {
            backend: None,
            delimiter: options.delimiter,
            options,
            entries: Vec::new(),
        };
        store.set_file(path)?;
        store.reconcile()?;
        Ok(store)
    }

    // -----------------------------------------------------------------------
    // Binding
    // -----------------------------------------------------------------------

    pub fn file(&self) -> Result<&Path> {
        self.backend().map(FileBackend::path)
    }

    /// Bind (or rebind) the backing file. Nothing is read; the next
    /// reconciliation merges the new file into the current contents.
    ///
    /// Fails with [`Error::NullTarget`] for an empty path. Creates the file
    /// when `create_if_missing` is set.
    pub fn set_file(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        let backend = FileBackend::new(path)?.with_atomic_writes(self.options.atomic_writes);
        if self.options.create_if_missing {
            policy::apply(
                self.options.io_errors,
                backend.path(),
                "create",
                backend.ensure_exists(),
            )?;
        }
        self.backend = Some(backend);
        Ok(())
    }

    pub fn delimiter(&self) -> Delimiter {
        self.delimiter
    }

    /// Change the delimiter used for subsequent reads and writes.
    ///
    /// Anything other than `=` or `:` fails with
    /// [`Error::InvalidDelimiter`] and leaves the current delimiter in place.
    pub fn set_delimiter(&mut self, delimiter: char) -> Result<()> {
        self.delimiter = Delimiter::try_from(delimiter)?;
        Ok(())
    }

    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    // -----------------------------------------------------------------------
    // In-memory operations
    // -----------------------------------------------------------------------

    /// Append `entry` unless an identical `(key, value)` pair is present.
    ///
    /// A different value under an existing key is accepted. An entry that
    /// could not be read back from the file fails with
    /// [`Error::InvalidEntry`].
    pub fn insert(&mut self, entry: impl Into<Entry>) -> Result<()> {
        let entry = entry.into();
        codec::validate(&entry, self.delimiter)?;
        if self.contains(&entry) {
            return Err(Error::DuplicateEntry {
                key: entry.key,
                value: entry.value,
            });
        }
        self.entries.push(entry);
        Ok(())
    }

    /// Remove and return the last entry.
    pub fn remove_last(&mut self) -> Result<Entry> {
        self.entries.pop().ok_or(Error::EmptyStore)
    }

    pub fn at(&self, index: usize) -> Result<&Entry> {
        self.entries.get(index).ok_or(Error::IndexOutOfRange {
            index,
            len: self.entries.len(),
        })
    }

    /// Replace the entry at `index`, returning the previous one.
    pub fn replace_at(&mut self, index: usize, entry: impl Into<Entry>) -> Result<Entry> {
        let entry = entry.into();
        let len = self.entries.len();
        let slot = self
            .entries
            .get_mut(index)
            .ok_or(Error::IndexOutOfRange { index, len })?;
        codec::validate(&entry, self.delimiter)?;
        Ok(std::mem::replace(slot, entry))
    }

    /// Set the value of the first entry with `key`.
    pub fn set_value(&mut self, key: &str, value: impl Into<String>) -> Result<()> {
        let delimiter = self.delimiter;
        let slot = self.first_mut(key)?;
        let edited = Entry::new(slot.key.clone(), value);
        codec::validate(&edited, delimiter)?;
        *slot = edited;
        Ok(())
    }

    /// Rename the first entry with `old_key`.
    ///
    /// `new_key` is not checked against other entries, so this can leave two
    /// entries sharing a key.
    pub fn set_key(&mut self, old_key: &str, new_key: impl Into<String>) -> Result<()> {
        let delimiter = self.delimiter;
        let slot = self.first_mut(old_key)?;
        let edited = Entry::new(new_key, slot.value.clone());
        codec::validate(&edited, delimiter)?;
        *slot = edited;
        Ok(())
    }

    /// Remove the first entry whose key matches `entry.key`; the value is not
    /// compared.
    pub fn remove(&mut self, entry: &Entry) -> Result<Entry> {
        let pos = self
            .entries
            .iter()
            .position(|e| e.key == entry.key)
            .ok_or_else(|| Error::KeyNotFound(entry.key.clone()))?;
        Ok(self.entries.remove(pos))
    }

    /// Empty the in-memory sequence. The file is untouched until
    /// [`Store::write`].
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Exact `(key, value)` membership.
    pub fn contains(&self, entry: &Entry) -> bool {
        self.entries.iter().any(|e| e == entry)
    }

    /// Current in-memory contents, without reconciling.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // -----------------------------------------------------------------------
    // File-backed operations
    // -----------------------------------------------------------------------

    /// Reconcile with the file, then return every entry in order.
    pub fn all(&mut self) -> Result<&[Entry]> {
        self.reconcile()?;
        Ok(&self.entries)
    }

    /// Reconcile with the file, then return the value of the first entry
    /// with `key`. A missing key is `Ok(None)`, never an error.
    pub fn get(&mut self, key: &str) -> Result<Option<String>> {
        self.reconcile()?;
        Ok(self
            .entries
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.value.clone()))
    }

    /// Reconcile with the file.
    pub fn update(&mut self) -> Result<()> {
        self.reconcile()
    }

    /// Overwrite the file with the whole in-memory sequence.
    ///
    /// Every entry is checked against the current delimiter first; if one
    /// fails, nothing is written.
    pub fn write(&self) -> Result<()> {
        let backend = self.backend()?;
        for entry in &self.entries {
            codec::validate(entry, self.delimiter)?;
        }
        policy::apply(
            self.options.io_errors,
            backend.path(),
            "write",
            backend.overwrite(&self.entries, self.delimiter),
        )?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn backend(&self) -> Result<&FileBackend> {
        self.backend.as_ref().ok_or(Error::UnboundFile)
    }

    fn first_mut(&mut self, key: &str) -> Result<&mut Entry> {
        self.entries
            .iter_mut()
            .find(|e| e.key == key)
            .ok_or_else(|| Error::KeyNotFound(key.to_string()))
    }

    fn reconcile(&mut self) -> Result<()> {
        let backend = self.backend()?;
        let read = policy::apply(
            self.options.io_errors,
            backend.path(),
            "read",
            backend.read(self.delimiter, self.options.malformed),
        )?;

        let mut seen = HashSet::with_capacity(self.entries.len());
        self.entries.retain(|e| seen.insert(e.clone()));

        let before = self.entries.len();
        for entry in read.unwrap_or_default() {
            if !seen.contains(&entry) {
                seen.insert(entry.clone());
                self.entries.push(entry);
            }
        }
        tracing::debug!(
            kept = before,
            merged = self.entries.len() - before,
            "reconciled store with file"
        );
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Store {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
