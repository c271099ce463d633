//! Sequential record sources.
//!
//! A [`RecordSource`] produces one record (or a failure) per call and reports
//! end-of-data with `Ok(None)`. Sources are pulled by a single consumer; to let several
//! callers share one, or to look ahead without consuming, wrap it in a
//! [`LookaheadSource`].
//!
//! Adapters:
//! - [`IterSource`] turns any `Iterator<Item = Result<R, E>>` into a source.
//! - [`LineSource`] yields the lines of a [`BufRead`], e.g. a
//!   [`FileFragment`](crate::FileFragment).

pub mod lookahead;

pub use lookahead::LookaheadSource;

use crate::error::{SplitError, SplitResult};
use std::io::BufRead;

/// Something that yields records one at a time.
///
/// Records and errors must be `Clone` so a [`LookaheadSource`] can hand out a peeked
/// value while keeping it buffered for the consuming call.
pub trait RecordSource: Send + 'static {
    type Record: Clone + Send + 'static;
    type Error: Clone + Send + 'static;

    /// Produce the next record, `Ok(None)` at end-of-data, or an error.
    ///
    /// # Errors
    /// Implementation-defined.
    fn next_record(&mut self) -> Result<Option<Self::Record>, Self::Error>;
}

impl<S: RecordSource + ?Sized> RecordSource for Box<S> {
    type Record = S::Record;
    type Error = S::Error;

    fn next_record(&mut self) -> Result<Option<Self::Record>, Self::Error> {
        (**self).next_record()
    }
}

/// Adapts an iterator of results into a [`RecordSource`].
///
/// ```
/// use ironshard::source::{IterSource, RecordSource};
///
/// let mut src = IterSource::new(vec![Ok::<_, String>(1), Ok(2)]);
/// assert_eq!(src.next_record(), Ok(Some(1)));
/// assert_eq!(src.next_record(), Ok(Some(2)));
/// assert_eq!(src.next_record(), Ok(None));
/// ```
#[derive(Debug)]
pub struct IterSource<I> {
    iter: I,
}

impl<I> IterSource<I> {
    pub fn new<T>(iter: T) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        Self {
            iter: iter.into_iter(),
        }
    }
}

impl<I, R, E> RecordSource for IterSource<I>
where
    I: Iterator<Item = Result<R, E>> + Send + 'static,
    R: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    type Record = R;
    type Error = E;

    fn next_record(&mut self) -> Result<Option<R>, E> {
        self.iter.next().transpose()
    }
}

/// Yields lines from a [`BufRead`], without their terminator.
///
/// Both `\n` and `\r\n` endings are stripped. A final line without a terminator is
/// still yielded. Invalid UTF-8 is replaced lossily rather than failing the stream.
#[derive(Debug)]
pub struct LineSource<B> {
    reader: B,
    line_no: u64,
    buf: Vec<u8>,
}

impl<B: BufRead> LineSource<B> {
    pub const fn new(reader: B) -> Self {
        Self {
            reader,
            line_no: 0,
            buf: Vec::new(),
        }
    }

    /// Number of lines yielded so far.
    #[must_use]
    pub const fn lines_read(&self) -> u64 {
        self.line_no
    }

    pub fn into_inner(self) -> B {
        self.reader
    }
}

impl<B: BufRead + Send + 'static> RecordSource for LineSource<B> {
    type Record = String;
    type Error = SplitError;

    fn next_record(&mut self) -> SplitResult<Option<String>> {
        self.buf.clear();
        let n = self
            .reader
            .read_until(b'\n', &mut self.buf)
            .map_err(|e| SplitError::io(format!("read line {}", self.line_no + 1), e))?;
        if n == 0 {
            return Ok(None);
        }
        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
            if self.buf.last() == Some(&b'\r') {
                self.buf.pop();
            }
        }
        self.line_no += 1;
        Ok(Some(String::from_utf8_lossy(&self.buf).into_owned()))
    }
}
