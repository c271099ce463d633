//! # Ironshard
//!
//! Building blocks for **parallel ingestion pipelines**: split a large line-oriented file
//! into independently readable pieces, and put a peekable, thread-safe front on any
//! sequential record source.
//!
//! ## Key Features
//!
//! - **Line-aligned splitting** - fragments never cut a line in half
//! - **Independent cursors** - every fragment owns its own file handle, so workers read
//!   in parallel without locking
//! - **All-or-nothing** - a split either opens every fragment or returns an error
//! - **Lookahead sources** - `peek` at the next record without consuming it, from any
//!   number of threads, with exactly-once delivery
//! - **Serializable plans** - compute split ranges once, ship them to workers as JSON
//!
//! ## Quick Start
//!
//! ```no_run
//! use ironshard::*;
//! use std::io::{BufRead, BufReader};
//! # use anyhow::Result;
//!
//! # fn main() -> Result<()> {
//! // At most 8 fragments, each starting on a fresh line
//! let fragments = split_file_lines("events.log", 8)?;
//!
//! // Hand each fragment to a worker
//! let counts = process_fragments_par(fragments, |frag| {
//!     Ok(BufReader::new(frag).lines().count())
//! })?;
//! println!("{} lines", counts.iter().sum::<usize>());
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Concepts
//!
//! ### Fragments
//!
//! A [`FileFragment`] reads the byte range `[start, end)` of a file and implements
//! [`std::io::Read`]. Reads never cross `end`. Closing or dropping a fragment never
//! affects its siblings.
//!
//! ### Splitting
//!
//! [`FileSplitter`] divides a file into nominal chunks of `len / partitions` bytes and
//! pushes each boundary forward to just past the next line terminator. The result has
//! **at most** `partitions` fragments:
//! - a file with fewer lines than partitions yields one fragment per line;
//! - an empty file yields exactly one empty fragment `[0, 0)`;
//! - empty fragments are never used as padding.
//!
//! ### Record Sources
//!
//! A [`RecordSource`] produces one record per call and `Ok(None)` at end-of-data.
//! [`LookaheadSource`] wraps one behind a single coordinator thread:
//! - [`peek`](LookaheadSource::peek) returns the next record and keeps it buffered;
//! - [`next_record`](LookaheadSource::next_record) consumes it.
//!
//! ```
//! use ironshard::{LookaheadSource, source::IterSource};
//!
//! let src = LookaheadSource::new(IterSource::new(vec![Ok::<_, String>('A'), Ok('B')]));
//! assert_eq!(src.peek().unwrap(), Some('A'));
//! assert_eq!(src.peek().unwrap(), Some('A'));
//! assert_eq!(src.next_record().unwrap(), Some('A'));
//! assert_eq!(src.next_record().unwrap(), Some('B'));
//! assert_eq!(src.next_record().unwrap(), None);
//! assert_eq!(src.next_record().unwrap(), None);
//! ```
//!
//! ## Errors
//!
//! - [`SplitError`] - I/O failures (with context) and invalid arguments such as a zero
//!   partition count or a file that changed size while being split.
//! - [`LookaheadError`] - the wrapped source's own error, passed through verbatim, plus
//!   `Closed` and `Timeout`.
//!
//! Nothing is retried or swallowed; every failure reaches the caller.
//!
//! ## Feature Flags
//!
//! - `parallel-io` - [`process_fragments_par`] on the rayon pool
//! - `glob` - split every file matching a pattern ([`io::glob`])
//!
//! ## Module Overview
//!
//! - [`io`] - fragment readers, boundary search and split planning
//! - [`source`] - the record source trait, adapters and [`LookaheadSource`]
//! - [`config`] - [`SplitConfig`]
//! - [`error`] - error types
//! - [`testing`] - fixtures, mock sources and assertions for tests

pub mod config;
pub mod error;
pub mod io;
pub mod source;
pub mod testing;

// General re-exports
pub use config::SplitConfig;
pub use error::{LookaheadError, SplitError, SplitResult};
pub use io::fragment::{ByteRange, FileFragment};
pub use io::split::{
    Aligned, FileSplitter, SplitPlan, plan_splits, seek_and_search, split_file_lines,
};
pub use source::{LookaheadSource, RecordSource};

// Gated re-exports
#[cfg(feature = "parallel-io")]
pub use io::par::process_fragments_par;

#[cfg(feature = "glob")]
pub use io::glob::split_glob_lines;
