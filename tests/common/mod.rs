//! Shared test utilities for liteconf integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file. Every fixture lives in its own temporary directory, so
//! harnesses can run in parallel.

pub mod assertions;
pub mod builders;
pub mod fixtures;

pub use assertions::*;
pub use builders::*;
pub use fixtures::*;

/// Install a test-writer subscriber once per test binary.
///
/// Filter with `RUST_LOG`; defaults to debug output from the liteconf crates,
/// visible with `-- --nocapture`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG").unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("liteconf=debug,liteconf_file=debug")
            }),
        )
        .try_init();
}
