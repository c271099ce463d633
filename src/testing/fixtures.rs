//! Temporary files holding line-oriented test data.

use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// A temporary file that is deleted when dropped.
pub struct TempFilePath {
    #[allow(dead_code)]
    temp_file: NamedTempFile,
    path: PathBuf,
}

impl TempFilePath {
    /// Create an empty temporary file.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary file cannot be created.
    pub fn new() -> std::io::Result<Self> {
        let temp_file = NamedTempFile::new()?;
        let path = temp_file.path().to_path_buf();
        Ok(Self { temp_file, path })
    }

    /// Create a temporary file holding `bytes`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written.
    pub fn with_bytes(bytes: &[u8]) -> std::io::Result<Self> {
        let mut temp_file = NamedTempFile::new()?;
        temp_file.write_all(bytes)?;
        temp_file.flush()?;
        let path = temp_file.path().to_path_buf();
        Ok(Self { temp_file, path })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Write `lines` to a temporary file, each followed by `\n`.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
///
/// # Example
///
/// ```
/// use ironshard::testing::write_lines_file;
///
/// let f = write_lines_file(&["a", "b"]).unwrap();
/// assert_eq!(std::fs::read(f.path()).unwrap(), b"a\nb\n");
/// ```
pub fn write_lines_file<S: AsRef<str>>(lines: &[S]) -> std::io::Result<TempFilePath> {
    let mut bytes = Vec::new();
    for line in lines {
        bytes.extend_from_slice(line.as_ref().as_bytes());
        bytes.push(b'\n');
    }
    TempFilePath::with_bytes(&bytes)
}

/// `n` lines of the form `line-0000`, `line-0001`, ...
#[must_use]
pub fn numbered_lines(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("line-{i:04}")).collect()
}

/// Lines whose lengths cycle through `lengths`, filled with a repeating alphabet.
///
/// Handy for exercising boundaries that fall in the middle of long lines.
#[must_use]
pub fn ragged_lines(n: usize, lengths: &[usize]) -> Vec<String> {
    (0..n)
        .map(|i| {
            let len = lengths.get(i % lengths.len().max(1)).copied().unwrap_or(1);
            (0..len).map(|j| char::from(b'a' + ((i + j) % 26) as u8)).collect()
        })
        .collect()
}
