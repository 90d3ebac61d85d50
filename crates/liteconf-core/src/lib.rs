//! liteconf-core — shared building blocks for liteconf.
//!
//! This crate holds everything that does not touch the filesystem: the
//! [`Entry`] and [`Delimiter`] data model, the single-line [`codec`], the
//! [`Error`] taxonomy and the per-store [`StoreOptions`].
//!
//! # Layout
//!
//! ```text
//! types ──► codec ──► liteconf-file ──► Store / DirectStore
//!   │                      │
//!   └── config ────────────┘
//! ```

pub mod codec;
pub mod config;
pub mod error;
pub mod types;

pub use config::{IoPolicy, MalformedPolicy, StoreOptions};
pub use error::{DecodeError, Error, Result};
pub use types::{Delimiter, Entry};
