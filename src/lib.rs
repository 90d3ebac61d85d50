//! liteconf — flat delimited key/value files with an in-memory mirror.
//!
//! Each line of the backing file is `key<delimiter>value`, with the
//! delimiter restricted to `=` or `:`. Two stores sit on top of the
//! [`FileBackend`]:
//!
//! - [`Store`] keeps an ordered in-memory copy, merges the file into it on
//!   every read (`all`, `get`, `update`), and persists only on an explicit
//!   [`Store::write`]. Collisions are exact `(key, value)` pairs; key-based
//!   edits touch the first match only.
//! - [`DirectStore`] keeps nothing in memory. Every call reads the file and
//!   every mutation rewrites (or appends to) it, serialized by a lock. Keys
//!   are unique on insert; key-based edits touch every match.
//!
//! # Architecture
//!
//! ```text
//! Entry / Delimiter ──► codec ──► FileBackend ──► Store
//!                                     │
//!                                     └─────────► DirectStore
//! ```
//!
//! Whole-file I/O failures follow [`IoPolicy`]; undecodable lines follow
//! [`MalformedPolicy`]. Both live in [`StoreOptions`].

pub mod direct;
mod policy;
pub mod store;

pub use direct::DirectStore;
pub use liteconf_core::{
    codec, Delimiter, DecodeError, Entry, Error, IoPolicy, MalformedPolicy, Result, StoreOptions,
};
pub use liteconf_file::FileBackend;
pub use store::Store;
