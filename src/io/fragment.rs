//! Bounded, independently positioned readers over part of a file.
//!
//! A [`FileFragment`] reads the byte range `[start, end)` of a file through its own
//! file handle. Fragments over the same file never share a cursor, so any number of
//! them can be read from different threads without coordination.

use crate::error::{IoContext, SplitError, SplitResult};
use crate::source::LineSource;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

/// A half-open byte range `[start, end)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ByteRange {
    pub start: u64,
    pub end: u64,
}

impl ByteRange {
    #[must_use]
    pub const fn new(start: u64, end: u64) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub const fn len(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// Reads only `[start, end)` of a file, through a handle it owns.
///
/// Implements [`Read`]; wrap it in a [`BufReader`] (or call [`FileFragment::lines`])
/// for line-oriented parsing.
///
/// # Example
/// ```no_run
/// use ironshard::FileFragment;
/// use std::io::Read;
///
/// let mut frag = FileFragment::open("events.log", 0, 4096)?;
/// let mut buf = String::new();
/// frag.read_to_string(&mut buf)?;
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Debug)]
pub struct FileFragment {
    path: PathBuf,
    file: File,
    range: ByteRange,
    pos: u64,
}

impl FileFragment {
    /// Open a new handle on `path` positioned at `start`, bounded by `end`.
    ///
    /// # Errors
    /// - [`SplitError::InvalidArgument`] if `start > end`.
    /// - [`SplitError::Io`] if the file cannot be opened or inspected, or if `start`
    ///   lies past the current end of the file (`ErrorKind::InvalidInput`).
    pub fn open(path: impl AsRef<Path>, start: u64, end: u64) -> SplitResult<Self> {
        Self::open_range(path, ByteRange::new(start, end))
    }

    /// Same as [`FileFragment::open`], taking a [`ByteRange`].
    ///
    /// # Errors
    /// See [`FileFragment::open`].
    pub fn open_range(path: impl AsRef<Path>, range: ByteRange) -> SplitResult<Self> {
        let path = path.as_ref();
        if range.start > range.end {
            return Err(SplitError::InvalidArgument(format!(
                "fragment start {} is after end {} for {}",
                range.start,
                range.end,
                path.display()
            )));
        }
        let mut file =
            File::open(path).io_context(|| format!("open fragment of {}", path.display()))?;
        let len = file
            .metadata()
            .io_context(|| format!("stat {}", path.display()))?
            .len();
        if range.start > len {
            return Err(SplitError::io(
                format!("seek to {} in {}", range.start, path.display()),
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("offset is past end of file ({len} bytes)"),
                ),
            ));
        }
        file.seek(SeekFrom::Start(range.start))
            .io_context(|| format!("seek to {} in {}", range.start, path.display()))?;
        tracing::trace!(
            path = %path.display(),
            start = range.start,
            end = range.end,
            "opened file fragment"
        );
        Ok(Self {
            path: path.to_path_buf(),
            file,
            range,
            pos: range.start,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub const fn range(&self) -> ByteRange {
        self.range
    }

    /// First byte of the fragment (inclusive).
    #[must_use]
    pub const fn start(&self) -> u64 {
        self.range.start
    }

    /// One past the last byte of the fragment (exclusive).
    #[must_use]
    pub const fn end(&self) -> u64 {
        self.range.end
    }

    #[must_use]
    pub const fn len(&self) -> u64 {
        self.range.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    /// Absolute file offset of the next byte to be read.
    #[must_use]
    pub const fn position(&self) -> u64 {
        self.pos
    }

    /// Bytes left before the end of the fragment.
    #[must_use]
    pub const fn remaining(&self) -> u64 {
        self.range.end.saturating_sub(self.pos)
    }

    /// Stream the fragment as lines, using `\n` as the terminator.
    #[must_use]
    pub fn lines(self) -> LineSource<BufReader<Self>> {
        LineSource::new(BufReader::new(self))
    }

    /// Release the underlying handle. Sibling fragments are unaffected.
    ///
    /// Dropping the fragment has the same effect; this spells it out at call sites.
    pub fn close(self) {
        tracing::trace!(
            path = %self.path.display(),
            start = self.range.start,
            "closed file fragment"
        );
        drop(self);
    }
}

impl Read for FileFragment {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let remaining = self.remaining();
        if remaining == 0 || buf.is_empty() {
            return Ok(0);
        }
        let want = usize::try_from(remaining).map_or(buf.len(), |r| r.min(buf.len()));
        let n = self.file.read(&mut buf[..want])?;
        self.pos += n as u64;
        Ok(n)
    }
}
