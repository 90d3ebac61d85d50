//! liteconf-file — the file backend for liteconf.
//!
//! [`FileBackend`] owns a target path and performs the only four things the
//! stores ever do to disk: read every line, overwrite the whole file, append
//! one line, and truncate. Decoding goes through
//! [`liteconf_core::codec`]; nothing here knows about deduplication or key
//! discipline.
//!
//! [`FileBackend::read`] yields decoded entries only. [`FileBackend::read_lines`]
//! also keeps blank and undecodable lines as [`Line::Raw`], so an edit can
//! write them back untouched with [`FileBackend::overwrite_lines`].
//!
//! Overwrites are atomic by default: the new content is written to a
//! temporary file in the same directory, synced, then renamed over the
//! target. With atomic writes disabled the target is truncated and rewritten
//! in place, and a crash mid-write leaves it partially written.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use liteconf_core::{codec, Delimiter, Entry, Error, MalformedPolicy, Result};

/// One line of a store file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Entry(Entry),
    /// Blank or undecodable text, verbatim, without its `\n`.
    Raw(String),
}

/// Whole-file access to one delimited key/value file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileBackend {
    path: PathBuf,
    atomic_writes: bool,
}

impl FileBackend {
    /// Bind to `path`. Fails with [`Error::NullTarget`] for an empty path.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return Err(Error::NullTarget);
        }
        Ok(Self {
            path,
            atomic_writes: true,
        })
    }

    pub fn with_atomic_writes(mut self, atomic: bool) -> Self {
        self.atomic_writes = atomic;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn atomic_writes(&self) -> bool {
        self.atomic_writes
    }

    /// Create the target as an empty file if it does not exist yet.
    pub fn ensure_exists(&self) -> Result<()> {
        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
        {
            Ok(_) => {
                tracing::debug!(path = %self.path.display(), "created empty store file");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Read and decode every line, in file order.
    ///
    /// Blank lines are ignored. Lines that fail to decode are either skipped
    /// with a warning or turned into [`Error::MalformedLine`], depending on
    /// `malformed`. Duplicates are returned as they appear.
    pub fn read(&self, delimiter: Delimiter, malformed: MalformedPolicy) -> Result<Vec<Entry>> {
        let entries: Vec<Entry> = self
            .read_lines(delimiter, malformed)?
            .into_iter()
            .filter_map(|line| match line {
                Line::Entry(entry) => Some(entry),
                Line::Raw(_) => None,
            })
            .collect();
        tracing::debug!(path = %self.path.display(), entries = entries.len(), "read store file");
        Ok(entries)
    }

    /// Like [`FileBackend::read`], but keeps blank and skipped lines in place
    /// as [`Line::Raw`].
    pub fn read_lines(&self, delimiter: Delimiter, malformed: MalformedPolicy) -> Result<Vec<Line>> {
        let reader = BufReader::new(File::open(&self.path)?);
        let mut lines = Vec::new();

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim_end_matches('\r').is_empty() {
                lines.push(Line::Raw(line));
                continue;
            }
            match codec::decode(&line, delimiter) {
                Ok(entry) => lines.push(Line::Entry(entry)),
                Err(source) => match malformed {
                    MalformedPolicy::Skip => {
                        tracing::warn!(
                            path = %self.path.display(),
                            line_no = idx + 1,
                            error = %source,
                            "skipping malformed line"
                        );
                        lines.push(Line::Raw(line));
                    }
                    MalformedPolicy::Fail => {
                        return Err(Error::MalformedLine {
                            line_no: idx + 1,
                            line,
                            source,
                        });
                    }
                },
            }
        }
        Ok(lines)
    }

    /// Replace the whole file with `entries`, one line each.
    pub fn overwrite(&self, entries: &[Entry], delimiter: Delimiter) -> Result<()> {
        self.replace_content(&codec::encode_all(entries, delimiter))?;
        tracing::debug!(
            path = %self.path.display(),
            entries = entries.len(),
            atomic = self.atomic_writes,
            "rewrote store file"
        );
        Ok(())
    }

    /// Replace the whole file with `lines`; raw lines are written verbatim.
    pub fn overwrite_lines(&self, lines: &[Line], delimiter: Delimiter) -> Result<()> {
        let content = lines.iter().fold(String::new(), |mut out, line| {
            match line {
                Line::Entry(entry) => out.push_str(&codec::encode(entry, delimiter)),
                Line::Raw(text) => out.push_str(text),
            }
            out.push('\n');
            out
        });
        self.replace_content(&content)?;
        tracing::debug!(
            path = %self.path.display(),
            lines = lines.len(),
            atomic = self.atomic_writes,
            "rewrote store file"
        );
        Ok(())
    }

    /// Append a single entry to the end of the file, creating it if needed.
    ///
    /// A last line without its `\n` is terminated first, so the new entry
    /// always starts on a line of its own.
    pub fn append(&self, entry: &Entry, delimiter: Delimiter) -> Result<()> {
        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(&self.path)?;
        let mut line = String::new();
        if !ends_with_newline(&mut file)? {
            line.push('\n');
        }
        line.push_str(&codec::encode(entry, delimiter));
        line.push('\n');
        file.write_all(line.as_bytes())?;
        tracing::debug!(path = %self.path.display(), key = %entry.key, "appended entry");
        Ok(())
    }

    /// Empty the file.
    pub fn truncate(&self) -> Result<()> {
        File::create(&self.path)?;
        tracing::debug!(path = %self.path.display(), "truncated store file");
        Ok(())
    }

    fn replace_content(&self, content: &str) -> Result<()> {
        if self.atomic_writes {
            self.replace_atomically(content.as_bytes())
        } else {
            let mut file = File::create(&self.path)?;
            file.write_all(content.as_bytes())?;
            file.flush()?;
            Ok(())
        }
    }

    fn replace_atomically(&self, content: &[u8]) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        // Dropping an unpersisted temp file removes it, so a failed write
        // leaves the target untouched.
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(content)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

/// True for an empty file or one whose last byte is `\n`.
fn ends_with_newline(file: &mut File) -> Result<bool> {
    if file.metadata()?.len() == 0 {
        return Ok(true);
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
