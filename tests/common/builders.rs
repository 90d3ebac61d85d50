//! Test builders — a temporary directory with a named store file in it.
//!
//! These builders are designed for readability in test bodies, not for
//! production use. They panic on I/O failure rather than returning `Result`.

use liteconf::{DirectStore, Store, StoreOptions};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// StoreFile
// ---------------------------------------------------------------------------

/// A store file inside its own temporary directory.
///
/// # Example
///
/// ```rust
/// let file = StoreFile::with_contents("a=1\nb=2\n");
/// let mut store = file.open_cached('=');
/// assert_eq!(store.get("b").unwrap().as_deref(), Some("2"));
/// ```
pub struct StoreFile {
    dir: tempfile::TempDir,
    path: PathBuf,
}

impl StoreFile {
    /// A path that does not exist yet.
    pub fn missing() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("store.conf");
        Self { dir, path }
    }

    pub fn empty() -> Self {
        Self::with_contents("")
    }

    pub fn with_contents(contents: &str) -> Self {
        let file = Self::missing();
        file.write(contents);
        file
    }

    /// A "file" path that is actually a directory, so every read and
    /// overwrite fails with an I/O error.
    pub fn unreadable() -> Self {
        let file = Self::missing();
        std::fs::create_dir(&file.path).expect("create directory in place of file");
        file
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, contents: &str) {
        std::fs::write(&self.path, contents).expect("write store file");
    }

    pub fn contents(&self) -> String {
        std::fs::read_to_string(&self.path).expect("read store file")
    }

    pub fn open_cached(&self, delimiter: char) -> Store {
        Store::open(&self.path, delimiter).expect("open cached store")
    }

    pub fn open_cached_with(&self, options: StoreOptions) -> Store {
        Store::with_options(&self.path, options).expect("open cached store")
    }

    pub fn open_direct(&self) -> DirectStore {
        DirectStore::new(&self.path).expect("open direct store")
    }

    pub fn open_direct_with(&self, options: StoreOptions) -> DirectStore {
        DirectStore::with_options(&self.path, options).expect("open direct store")
    }
}
