use anyhow::Result;
use ironshard::testing::*;
use ironshard::*;
use std::fs::File;
use std::io::{BufRead, BufReader};

fn line_counts(fragments: Vec<FileFragment>) -> Vec<usize> {
    read_fragments_to_vec(fragments)
        .iter()
        .map(|bytes| bytes.iter().filter(|&&b| b == b'\n').count())
        .collect()
}

#[test]
fn ten_lines_into_three_fragments() -> Result<()> {
    let file = write_lines_file(&numbered_lines(10))?;
    let fragments = split_file_lines(file.path(), 3)?;
    assert_eq!(fragments.len(), 3);
    assert_fragments_cover(file.path(), &fragments, b'\n');

    let counts = line_counts(fragments);
    assert_eq!(counts.iter().sum::<usize>(), 10);
    Ok(())
}

#[test]
fn empty_file_yields_single_empty_fragment() -> Result<()> {
    let file = TempFilePath::new()?;
    let fragments = split_file_lines(file.path(), 4)?;
    assert_eq!(fragments.len(), 1);
    assert_eq!(fragments[0].range(), ByteRange::new(0, 0));
    assert!(fragments[0].is_empty());
    Ok(())
}

#[test]
fn zero_partitions_is_invalid_argument() -> Result<()> {
    let file = write_lines_file(&["a"])?;
    let err = split_file_lines(file.path(), 0).unwrap_err();
    assert!(matches!(err, SplitError::InvalidArgument(_)), "{err}");
    Ok(())
}

#[test]
fn missing_file_is_io_error() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let err = split_file_lines(dir.path().join("absent.log"), 2).unwrap_err();
    assert_eq!(err.io_kind(), Some(std::io::ErrorKind::NotFound));
    Ok(())
}

#[test]
fn never_more_fragments_than_requested() -> Result<()> {
    let lengths = [1, 7, 0, 40, 3, 120, 9];
    for n_lines in [1, 2, 5, 17, 64, 300] {
        let lines = ragged_lines(n_lines, &lengths);
        let file = write_lines_file(&lines)?;
        for parts in [1, 2, 3, 4, 7, 16, 100, 1000] {
            let fragments = split_file_lines(file.path(), parts)?;
            assert!(
                fragments.len() <= parts,
                "{n_lines} lines into {parts}: got {}",
                fragments.len()
            );
            assert!(fragments.len() <= n_lines.max(1));
            assert_fragments_cover(file.path(), &fragments, b'\n');
        }
    }
    Ok(())
}

#[test]
fn no_trailing_newline_keeps_last_line() -> Result<()> {
    let file = TempFilePath::with_bytes(b"alpha\nbeta\ngamma")?;
    let fragments = split_file_lines(file.path(), 2)?;
    assert_fragments_cover(file.path(), &fragments, b'\n');
    let last = read_fragments_to_vec(fragments).pop().unwrap();
    assert!(last.ends_with(b"gamma"));
    Ok(())
}

#[test]
fn single_long_line_is_one_fragment() -> Result<()> {
    let line = "x".repeat(50_000);
    let file = write_lines_file(&[line])?;
    let fragments = FileSplitter::new(
        SplitConfig::default()
            .with_partitions(8)
            .with_scan_buffer(16),
    )
    .split(file.path())?;
    assert_eq!(fragments.len(), 1);
    assert_eq!(fragments[0].len(), 50_001);
    Ok(())
}

#[test]
fn custom_terminator() -> Result<()> {
    let file = TempFilePath::with_bytes(b"a;bb;ccc;dddd;eeeee;")?;
    let splitter = FileSplitter::new(
        SplitConfig::default()
            .with_partitions(3)
            .with_terminator(b';'),
    );
    let fragments = splitter.split(file.path())?;
    assert_fragments_cover(file.path(), &fragments, b';');
    Ok(())
}

#[test]
fn split_already_open_file() -> Result<()> {
    let file = write_lines_file(&numbered_lines(100))?;
    let handle = File::open(file.path())?;
    let fragments = FileSplitter::new(SplitConfig::default().with_partitions(4))
        .split_file(&handle, file.path())?;
    assert_eq!(fragments.len(), 4);
    assert_fragments_cover(file.path(), &fragments, b'\n');
    Ok(())
}

#[test]
fn split_file_rejects_handle_for_another_file() -> Result<()> {
    let file = write_lines_file(&numbered_lines(100))?;
    let other = write_lines_file(&numbered_lines(3))?;
    let handle = File::open(other.path())?;
    let err = FileSplitter::new(SplitConfig::default().with_partitions(4))
        .split_file(&handle, file.path())
        .unwrap_err();
    assert!(matches!(err, SplitError::InvalidArgument(_)));
    Ok(())
}

#[test]
fn huge_partition_count_yields_one_fragment_per_line() -> Result<()> {
    let file = write_lines_file(&numbered_lines(5))?;
    let fragments = split_file_lines(file.path(), usize::MAX)?;
    assert_eq!(line_counts(fragments), vec![1; 5]);
    Ok(())
}

#[test]
fn fragments_parse_back_to_all_lines() -> Result<()> {
    let lines = numbered_lines(257);
    let file = write_lines_file(&lines)?;
    let mut seen = Vec::new();
    for frag in split_file_lines(file.path(), 6)? {
        for line in BufReader::new(frag).lines() {
            seen.push(line?);
        }
    }
    assert_eq!(seen, lines);
    Ok(())
}
