//! Testing utilities for code built on fragments and record sources.
//!
//! - **Fixtures**: temporary line files ([`write_lines_file`], [`numbered_lines`],
//!   [`TempFilePath`])
//! - **Mock sources**: [`ScriptedSource`], a [`RecordSource`](crate::RecordSource)
//!   that replays a fixed script and counts how often it was polled
//! - **Assertions**: check that a set of fragments covers a file exactly and only
//!   breaks at line boundaries ([`assert_fragments_cover`])
//!
//! # Quick Start
//!
//! ```
//! use ironshard::split_file_lines;
//! use ironshard::testing::*;
//!
//! # fn main() -> anyhow::Result<()> {
//! let file = write_lines_file(&numbered_lines(10))?;
//! let fragments = split_file_lines(file.path(), 3)?;
//! assert_fragments_cover(file.path(), &fragments, b'\n');
//! # Ok(())
//! # }
//! ```

pub mod assertions;
pub mod fixtures;
pub mod mock_source;

pub use assertions::*;
pub use fixtures::*;
pub use mock_source::*;
