//! Line-aligned splitting of files into independently readable fragments.
//!
//! This module provides:
//! - **Boundary search**: [`seek_and_search`] skips ahead and rounds up to the next line
//!   terminator; [`search_reader`] is the underlying fixed-buffer scan.
//! - **Planning**: [`plan_splits`] computes the ranges over any `Read + Seek`;
//!   [`SplitPlan`] records them for a file and can be serialized for remote workers.
//! - **Splitting**: [`FileSplitter`] and [`split_file_lines`] plan and open one
//!   [`FileFragment`] per range.
//!
//! # Notes
//! - The nominal fragment size is `file_len / partitions`. Each boundary is pushed
//!   forward to just past the next terminator, so a split yields **at most**
//!   `partitions` fragments and may yield fewer.
//! - Empty fragments are never produced, except for an empty file which yields exactly
//!   one fragment `[0, 0)`.
//! - Splitting is all-or-nothing: if any fragment fails to open, no fragments are
//!   returned.

use crate::config::SplitConfig;
use crate::error::{IoContext, SplitError, SplitResult};
use crate::io::fragment::{ByteRange, FileFragment};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

/// Outcome of a terminator search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Aligned {
    /// A terminator was found; the value is the offset just past it.
    Boundary(u64),
    /// The stream ended before a terminator was found; the value is the stream end.
    EndOfStream(u64),
}

impl Aligned {
    #[must_use]
    pub const fn offset(self) -> u64 {
        match self {
            Self::Boundary(o) | Self::EndOfStream(o) => o,
        }
    }

    #[must_use]
    pub const fn is_end_of_stream(self) -> bool {
        matches!(self, Self::EndOfStream(_))
    }
}

/// Count the bytes up to and including the next `terminator` in `reader`.
///
/// Returned offsets are relative to the reader's position on entry. Reads in chunks of
/// `scan_buffer` bytes regardless of line length, so the reader is usually left past
/// the terminator; callers that care about the position must re-seek.
///
/// # Errors
/// Propagates read errors other than `Interrupted`.
pub fn search_reader<R: Read + ?Sized>(
    reader: &mut R,
    terminator: u8,
    scan_buffer: usize,
) -> io::Result<Aligned> {
    let mut buf = vec![0u8; scan_buffer.max(1)];
    let mut idx: u64 = 0;
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => return Ok(Aligned::EndOfStream(idx)),
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        if let Some(i) = buf[..n].iter().position(|&b| b == terminator) {
            return Ok(Aligned::Boundary(idx + i as u64 + 1));
        }
        idx += n as u64;
    }
}

/// Skip `skip` bytes forward, then round up to just past the next `terminator`.
///
/// On [`Aligned::Boundary`] the reader is left positioned at the returned offset. On
/// [`Aligned::EndOfStream`] the returned offset is the length of the stream. The call
/// moves the reader, so it is not idempotent: capture the result immediately.
///
/// # Errors
/// Propagates seek and read errors.
pub fn seek_and_search<R: Read + Seek + ?Sized>(
    reader: &mut R,
    skip: u64,
    terminator: u8,
    scan_buffer: usize,
) -> io::Result<Aligned> {
    let skip = i64::try_from(skip)
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "skip distance overflows"))?;
    let off = reader.seek(SeekFrom::Current(skip))?;
    match search_reader(reader, terminator, scan_buffer)? {
        Aligned::Boundary(idx) => {
            let boundary = reader.seek(SeekFrom::Start(off + idx))?;
            Ok(Aligned::Boundary(boundary))
        }
        Aligned::EndOfStream(_) => {
            let end = reader.seek(SeekFrom::End(0))?;
            Ok(Aligned::EndOfStream(end))
        }
    }
}

/// Compute line-aligned ranges covering the first `total_len` bytes of `reader`.
///
/// The reader is rewound to the start first. `total_len` is the size the caller
/// observed (usually from file metadata); if scanning disagrees with it, the file
/// changed underneath us and the split is rejected.
///
/// # Errors
/// - [`SplitError::InvalidArgument`] for an invalid `config` or a size mismatch.
/// - [`SplitError::Io`] for seek/read failures.
pub fn plan_splits<R: Read + Seek + ?Sized>(
    reader: &mut R,
    total_len: u64,
    config: &SplitConfig,
) -> SplitResult<Vec<ByteRange>> {
    config.validate()?;
    let nominal = total_len / config.partitions as u64;
    reader
        .seek(SeekFrom::Start(0))
        .io_context(|| "rewind before splitting")?;

    let mut ranges = Vec::new();
    let mut start = 0u64;
    loop {
        let aligned = seek_and_search(reader, nominal, config.terminator, config.scan_buffer)
            .io_context(|| format!("search for split point after offset {start}"))?;
        match aligned {
            Aligned::Boundary(end) => {
                if end > total_len {
                    return Err(size_changed(total_len, end));
                }
                ranges.push(ByteRange::new(start, end));
                start = end;
            }
            Aligned::EndOfStream(end) => {
                if end != total_len {
                    return Err(size_changed(total_len, end));
                }
                if end > start || ranges.is_empty() {
                    ranges.push(ByteRange::new(start, end));
                }
                break;
            }
        }
    }
    tracing::debug!(
        total_len,
        requested = config.partitions,
        planned = ranges.len(),
        "planned line-aligned splits"
    );
    Ok(ranges)
}

fn size_changed(expected: u64, observed: u64) -> SplitError {
    SplitError::InvalidArgument(format!(
        "file size changed during splitting: expected {expected} bytes, scanned to {observed}"
    ))
}

/// The ranges computed for one file.
///
/// A plan can be serialized (e.g. with [`SplitPlan::to_json`]) and reopened later, or on
/// another worker, with [`SplitPlan::open`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitPlan {
    /// Source file path.
    pub path: PathBuf,
    /// File length when the plan was computed.
    pub file_len: u64,
    /// Contiguous ranges in file order.
    pub ranges: Vec<ByteRange>,
}

impl SplitPlan {
    #[must_use]
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Open one fragment per range, each with its own handle.
    ///
    /// # Errors
    /// - [`SplitError::InvalidArgument`] if the file length no longer matches the plan.
    /// - [`SplitError::Io`] if any fragment fails to open; already opened fragments are
    ///   released and nothing is returned.
    pub fn open(&self) -> SplitResult<Vec<FileFragment>> {
        let len = std::fs::metadata(&self.path)
            .io_context(|| format!("stat {}", self.path.display()))?
            .len();
        if len != self.file_len {
            return Err(size_changed(self.file_len, len));
        }
        self.ranges
            .iter()
            .map(|r| FileFragment::open_range(&self.path, *r))
            .collect()
    }

    /// Serialize the plan as JSON.
    ///
    /// # Errors
    /// Returns [`SplitError::Plan`] if serialization fails.
    pub fn to_json(&self) -> SplitResult<String> {
        serde_json::to_string(self).map_err(|e| SplitError::Plan(e.to_string()))
    }

    /// Parse a plan produced by [`SplitPlan::to_json`].
    ///
    /// # Errors
    /// Returns [`SplitError::Plan`] if the JSON is malformed or the ranges are not
    /// contiguous from `0` to `file_len`.
    pub fn from_json(json: &str) -> SplitResult<Self> {
        let plan: Self = serde_json::from_str(json).map_err(|e| SplitError::Plan(e.to_string()))?;
        plan.check_contiguous()?;
        Ok(plan)
    }

    fn check_contiguous(&self) -> SplitResult<()> {
        let mut expected = 0u64;
        for r in &self.ranges {
            if r.start != expected || r.end < r.start {
                return Err(SplitError::Plan(format!(
                    "range {}..{} does not continue from offset {expected}",
                    r.start, r.end
                )));
            }
            expected = r.end;
        }
        if expected != self.file_len {
            return Err(SplitError::Plan(format!(
                "ranges end at {expected} but file is {} bytes",
                self.file_len
            )));
        }
        Ok(())
    }
}

/// Splits files into line-aligned fragments according to a [`SplitConfig`].
///
/// # Example
/// ```no_run
/// use ironshard::{FileSplitter, SplitConfig};
///
/// let splitter = FileSplitter::new(SplitConfig::default().with_partitions(4));
/// for frag in splitter.split("events.log")? {
///     println!("{}..{}", frag.start(), frag.end());
/// }
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct FileSplitter {
    config: SplitConfig,
}

impl FileSplitter {
    #[must_use]
    pub const fn new(config: SplitConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &SplitConfig {
        &self.config
    }

    /// Compute the split plan for `path` without opening any fragments.
    ///
    /// # Errors
    /// See [`plan_splits`]; also fails if the file cannot be opened.
    pub fn plan(&self, path: impl AsRef<Path>) -> SplitResult<SplitPlan> {
        let path = path.as_ref();
        self.config.validate()?;
        let file = File::open(path).io_context(|| format!("open {}", path.display()))?;
        self.plan_file(&file, path)
    }

    /// Split the file at `path` into fragments.
    ///
    /// # Errors
    /// See [`FileSplitter::plan`] and [`SplitPlan::open`].
    pub fn split(&self, path: impl AsRef<Path>) -> SplitResult<Vec<FileFragment>> {
        self.plan(path)?.open()
    }

    /// Split an already open file. `path` must name the same file; it is used to open
    /// the per-fragment handles.
    ///
    /// Scanning moves the cursor of `file`; its position afterwards is unspecified.
    ///
    /// # Errors
    /// - [`SplitError::InvalidArgument`] if `file` and `path` differ in length or
    ///   modification time.
    /// - See [`FileSplitter::split`].
    pub fn split_file(
        &self,
        file: &File,
        path: impl AsRef<Path>,
    ) -> SplitResult<Vec<FileFragment>> {
        let path = path.as_ref();
        self.config.validate()?;
        let opened = file
            .metadata()
            .io_context(|| format!("stat open handle for {}", path.display()))?;
        let named = std::fs::metadata(path).io_context(|| format!("stat {}", path.display()))?;
        if opened.len() != named.len() || opened.modified().ok() != named.modified().ok() {
            return Err(SplitError::InvalidArgument(format!(
                "open file does not match {} ({} vs {} bytes)",
                path.display(),
                opened.len(),
                named.len()
            )));
        }
        self.plan_file(file, path)?.open()
    }

    fn plan_file(&self, mut file: &File, path: &Path) -> SplitResult<SplitPlan> {
        let file_len = file
            .metadata()
            .io_context(|| format!("stat {}", path.display()))?
            .len();
        let ranges = plan_splits(&mut file, file_len, &self.config)?;
        Ok(SplitPlan {
            path: path.to_path_buf(),
            file_len,
            ranges,
        })
    }
}

/// Split `path` into at most `partitions` line-aligned fragments using `\n`.
///
/// # Errors
/// - [`SplitError::InvalidArgument`] if `partitions == 0`.
/// - [`SplitError::Io`] if the file cannot be opened, scanned, or any fragment opened.
pub fn split_file_lines(
    path: impl AsRef<Path>,
    partitions: usize,
) -> SplitResult<Vec<FileFragment>> {
    FileSplitter::new(SplitConfig::default().with_partitions(partitions)).split(path)
}
