use anyhow::Result;
use ironshard::testing::*;
use ironshard::*;
use std::io::Write;

#[test]
fn plan_round_trips_through_json_and_reopens() -> Result<()> {
    let file = write_lines_file(&numbered_lines(40))?;
    let splitter = FileSplitter::new(SplitConfig::default().with_partitions(5));
    let plan = splitter.plan(file.path())?;
    assert_eq!(plan.len(), 5);

    let json = plan.to_json()?;
    let back = SplitPlan::from_json(&json)?;
    assert_eq!(back, plan);

    let fragments = back.open()?;
    let ranges: Vec<ByteRange> = fragments.iter().map(FileFragment::range).collect();
    assert_eq!(ranges, plan.ranges);
    assert_fragments_cover(file.path(), &fragments, b'\n');
    Ok(())
}

#[test]
fn stale_plan_is_rejected() -> Result<()> {
    let file = write_lines_file(&numbered_lines(10))?;
    let plan = FileSplitter::new(SplitConfig::default().with_partitions(2)).plan(file.path())?;

    let mut f = std::fs::OpenOptions::new().append(true).open(file.path())?;
    f.write_all(b"appended\n")?;
    f.flush()?;

    let err = plan.open().unwrap_err();
    assert!(matches!(err, SplitError::InvalidArgument(_)), "{err}");
    Ok(())
}

#[test]
fn malformed_plan_json_is_plan_error() {
    let err = SplitPlan::from_json("{not json").unwrap_err();
    assert!(matches!(err, SplitError::Plan(_)));
}

#[test]
fn plan_splits_over_in_memory_reader() -> Result<()> {
    let content: Vec<u8> = numbered_lines(33)
        .iter()
        .flat_map(|l| format!("{l}\n").into_bytes())
        .collect();
    let cfg = SplitConfig::default().with_partitions(4).with_scan_buffer(7);
    let ranges = plan_splits(&mut std::io::Cursor::new(&content), content.len() as u64, &cfg)?;
    assert!(ranges.len() <= 4);
    assert_ranges_line_aligned(&content, &ranges, b'\n');
    Ok(())
}

#[test]
fn seek_and_search_from_mid_line() -> Result<()> {
    let mut r = std::io::Cursor::new(b"first line\nsecond\n".to_vec());
    let aligned = seek_and_search(&mut r, 3, b'\n', 4)?;
    assert_eq!(aligned, Aligned::Boundary(11));
    let aligned = seek_and_search(&mut r, 0, b'\n', 4)?;
    assert_eq!(aligned, Aligned::Boundary(18));
    let aligned = seek_and_search(&mut r, 0, b'\n', 4)?;
    assert_eq!(aligned, Aligned::EndOfStream(18));
    Ok(())
}
