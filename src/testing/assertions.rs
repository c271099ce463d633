//! Assertions over split results.

use crate::io::fragment::{ByteRange, FileFragment};
use std::io::Read;
use std::path::Path;

/// Read every fragment to the end and return the contents, in order.
///
/// # Panics
///
/// Panics if any fragment fails to read.
pub fn read_fragments_to_vec(fragments: Vec<FileFragment>) -> Vec<Vec<u8>> {
    fragments
        .into_iter()
        .map(|mut f| {
            let mut buf = Vec::new();
            f.read_to_end(&mut buf)
                .unwrap_or_else(|e| panic!("read fragment {:?}: {e}", f.range()));
            buf
        })
        .collect()
}

/// Assert that `ranges` are contiguous, start at 0, end at `file_len`, and that each
/// interior boundary immediately follows `terminator` in `content`.
///
/// # Panics
///
/// Panics with a description of the first violated property.
pub fn assert_ranges_line_aligned(content: &[u8], ranges: &[ByteRange], terminator: u8) {
    assert!(!ranges.is_empty(), "no ranges produced");
    assert_eq!(ranges[0].start, 0, "first range must start at 0: {ranges:?}");
    assert_eq!(
        ranges[ranges.len() - 1].end,
        content.len() as u64,
        "last range must end at file length {}: {ranges:?}",
        content.len()
    );
    for pair in ranges.windows(2) {
        assert_eq!(
            pair[0].end, pair[1].start,
            "ranges must be contiguous: {:?} then {:?}",
            pair[0], pair[1]
        );
    }
    for r in &ranges[..ranges.len() - 1] {
        let end = usize::try_from(r.end).expect("offset fits in usize");
        assert!(end > 0, "interior range ends at 0: {ranges:?}");
        assert_eq!(
            content[end - 1],
            terminator,
            "boundary at {end} does not follow a terminator: {ranges:?}"
        );
    }
}

/// Assert that `fragments` cover the file at `path` exactly, break only after
/// `terminator`, and concatenate back to the original bytes.
///
/// Does not consume the fragments; contents are re-read through fresh handles.
///
/// # Panics
///
/// Panics if the file cannot be read or any property is violated.
pub fn assert_fragments_cover(path: impl AsRef<Path>, fragments: &[FileFragment], terminator: u8) {
    let path = path.as_ref();
    let content =
        std::fs::read(path).unwrap_or_else(|e| panic!("read {}: {e}", path.display()));
    let ranges: Vec<ByteRange> = fragments.iter().map(FileFragment::range).collect();
    assert_ranges_line_aligned(&content, &ranges, terminator);

    let reopened = ranges
        .iter()
        .map(|r| FileFragment::open_range(path, *r))
        .collect::<Result<Vec<_>, _>>()
        .unwrap_or_else(|e| panic!("reopen fragments of {}: {e}", path.display()));
    let joined: Vec<u8> = read_fragments_to_vec(reopened).concat();
    assert_eq!(joined, content, "fragments do not reconstruct {}", path.display());
}
