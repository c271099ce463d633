//! Error types for fragment splitting and lookahead sources.
//!
//! - [`SplitError`] covers everything the partitioner and fragment readers can fail with.
//! - [`LookaheadError`] wraps the error type of a user-provided [`RecordSource`]
//!   verbatim and adds the two conditions the coordinator itself can report.
//!
//! [`RecordSource`]: crate::source::RecordSource

use std::io;
use std::sync::Arc;
use thiserror::Error;

/// Result alias used by the splitting APIs.
pub type SplitResult<T> = std::result::Result<T, SplitError>;

/// Errors raised while planning splits or reading fragments.
///
/// `SplitError` is `Clone` so it can flow through a [`LookaheadSource`](crate::LookaheadSource)
/// (which hands out copies of cached errors on `peek`).
#[derive(Error, Debug, Clone)]
pub enum SplitError {
    /// Opening, seeking or reading the underlying file failed.
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: Arc<io::Error>,
    },

    /// Non-positive partition count, zero-sized scan buffer, or a file whose size
    /// changed while it was being scanned.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A serialized split plan could not be read or written.
    #[error("split plan: {0}")]
    Plan(String),
}

impl SplitError {
    /// Wrap an [`io::Error`] with a short description of the failed operation.
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source: Arc::new(source),
        }
    }

    /// The [`io::ErrorKind`] of an I/O failure, if this is one.
    #[must_use]
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            Self::Io { source, .. } => Some(source.kind()),
            _ => None,
        }
    }
}

/// Attach an operation description to an `io::Result`, `anyhow::Context` style.
pub(crate) trait IoContext<T> {
    fn io_context<C: Into<String>>(self, f: impl FnOnce() -> C) -> SplitResult<T>;
}

impl<T> IoContext<T> for io::Result<T> {
    fn io_context<C: Into<String>>(self, f: impl FnOnce() -> C) -> SplitResult<T> {
        self.map_err(|e| SplitError::io(f(), e))
    }
}

/// Errors returned by [`LookaheadSource`](crate::LookaheadSource) calls.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookaheadError<E> {
    /// The wrapped source failed; the error is passed through unchanged.
    #[error("record source failed: {0}")]
    Source(E),

    /// The lookahead source was closed (or its coordinator stopped) before the call.
    #[error("lookahead source is closed")]
    Closed,

    /// No reply arrived within the requested timeout. The slot is left consistent.
    #[error("timed out waiting for the lookahead coordinator")]
    Timeout,
}

impl<E> LookaheadError<E> {
    /// Borrow the wrapped source error, if any.
    pub fn source_error(&self) -> Option<&E> {
        match self {
            Self::Source(e) => Some(e),
            _ => None,
        }
    }

    /// Unwrap into the source error, if any.
    pub fn into_source_error(self) -> Option<E> {
        match self {
            Self::Source(e) => Some(e),
            _ => None,
        }
    }
}
