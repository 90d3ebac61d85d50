//! Applies [`IoPolicy`] to the result of a whole-file operation.

use std::path::Path;

use liteconf_core::{IoPolicy, Result};

/// Pass `result` through, unless it is an I/O failure and the policy says to
/// swallow it, in which case a warning is logged and `None` is returned.
///
/// Only [`Error::Io`](liteconf_core::Error::Io) is ever swallowed;
/// validation and decode errors always reach the caller.
pub(crate) fn apply<T>(
    policy: IoPolicy,
    path: &Path,
    op: &'static str,
    result: Result<T>,
) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_io() && policy == IoPolicy::Swallow => {
            tracing::warn!(path = %path.display(), op, error = %e, "ignoring I/O failure");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use liteconf_core::Error;

    fn io_err() -> Result<u32> {
        Err(std::io::Error::from(std::io::ErrorKind::PermissionDenied).into())
    }

    #[test]
    fn propagate_returns_io_errors() {
        let out = apply(IoPolicy::Propagate, Path::new("x"), "read", io_err());
        assert!(matches!(out, Err(Error::Io(_))));
    }

    #[test]
    fn swallow_turns_io_errors_into_none() {
        let out = apply(IoPolicy::Swallow, Path::new("x"), "read", io_err()).unwrap();
        assert_eq!(out, None);
    }

    #[test]
    fn swallow_never_hides_validation_errors() {
        let out = apply::<u32>(IoPolicy::Swallow, Path::new("x"), "read", Err(Error::EmptyStore));
        assert!(matches!(out, Err(Error::EmptyStore)));
    }

    #[test]
    fn success_is_wrapped() {
        let out = apply(IoPolicy::Propagate, Path::new("x"), "read", Ok(7)).unwrap();
        assert_eq!(out, Some(7));
    }
}
