use anyhow::Result;
use ironshard::testing::*;
use ironshard::{FileFragment, RecordSource, SplitError};
use std::io::{ErrorKind, Read};

#[test]
fn fragment_reads_are_bounded() -> Result<()> {
    let file = TempFilePath::with_bytes(b"hello\nworld\n")?;
    let mut frag = FileFragment::open(file.path(), 6, 12)?;
    assert_eq!(frag.len(), 6);

    let mut buf = [0u8; 64];
    let n = frag.read(&mut buf)?;
    assert_eq!(&buf[..n], b"world\n");
    assert_eq!(frag.read(&mut buf)?, 0);
    Ok(())
}

#[test]
fn small_reads_walk_the_range() -> Result<()> {
    let file = TempFilePath::with_bytes(b"0123456789")?;
    let mut frag = FileFragment::open(file.path(), 1, 8)?;
    let mut out = Vec::new();
    let mut buf = [0u8; 3];
    loop {
        let n = frag.read(&mut buf)?;
        if n == 0 {
            break;
        }
        out.extend_from_slice(&buf[..n]);
    }
    assert_eq!(out, b"1234567");
    assert_eq!(frag.position(), 8);
    Ok(())
}

#[test]
fn fragments_read_concurrently() -> Result<()> {
    let lines = numbered_lines(2000);
    let file = write_lines_file(&lines)?;
    let len = std::fs::metadata(file.path())?.len();
    let mid = len / 2 / 10 * 10;

    let a = FileFragment::open(file.path(), 0, mid)?;
    let b = FileFragment::open(file.path(), mid, len)?;
    let (ra, rb) = std::thread::scope(|s| {
        let ha = s.spawn(move || read_fragments_to_vec(vec![a]));
        let hb = s.spawn(move || read_fragments_to_vec(vec![b]));
        (ha.join().unwrap(), hb.join().unwrap())
    });
    let mut joined = ra.concat();
    joined.extend(rb.concat());
    assert_eq!(joined, std::fs::read(file.path())?);
    Ok(())
}

#[test]
fn closing_one_fragment_leaves_siblings_readable() -> Result<()> {
    let file = write_lines_file(&["aaa", "bbb"])?;
    let first = FileFragment::open(file.path(), 0, 4)?;
    let mut second = FileFragment::open(file.path(), 4, 8)?;
    first.close();
    let mut s = String::new();
    second.read_to_string(&mut s)?;
    assert_eq!(s, "bbb\n");
    Ok(())
}

#[test]
fn fragment_lines_source() -> Result<()> {
    let file = write_lines_file(&["one", "two", "three"])?;
    let mut lines = FileFragment::open(file.path(), 4, 14)?.lines();
    assert_eq!(lines.next_record()?.as_deref(), Some("two"));
    assert_eq!(lines.next_record()?.as_deref(), Some("three"));
    assert_eq!(lines.next_record()?, None);
    Ok(())
}

#[test]
fn open_past_end_of_file_fails() -> Result<()> {
    let file = TempFilePath::with_bytes(b"abc")?;
    match FileFragment::open(file.path(), 4, 8) {
        Err(err @ SplitError::Io { .. }) => {
            assert_eq!(err.io_kind(), Some(ErrorKind::InvalidInput));
        }
        other => panic!("expected I/O error, got {other:?}"),
    }
    Ok(())
}
