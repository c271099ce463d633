use anyhow::Result;
use ironshard::io::glob::{expand_glob, plan_glob};
use ironshard::testing::*;
use ironshard::{SplitConfig, split_glob_lines};
use std::fs;

fn seed(dir: &std::path::Path, name: &str, lines: usize) -> Result<()> {
    let body: String = numbered_lines(lines).iter().map(|l| format!("{l}\n")).collect();
    fs::write(dir.join(name), body)?;
    Ok(())
}

#[test]
fn splits_every_match_in_path_order() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    seed(tmp.path(), "b.log", 20)?;
    seed(tmp.path(), "a.log", 20)?;
    seed(tmp.path(), "skip.txt", 5)?;
    fs::create_dir(tmp.path().join("dir.log"))?;

    let pattern = format!("{}/*.log", tmp.path().display());
    let files = expand_glob(&pattern)?;
    assert_eq!(files, vec![tmp.path().join("a.log"), tmp.path().join("b.log")]);

    let fragments = split_glob_lines(&pattern, 2)?;
    assert_eq!(fragments.len(), 4);
    assert!(fragments[..2].iter().all(|f| f.path().ends_with("a.log")));
    assert!(fragments[2..].iter().all(|f| f.path().ends_with("b.log")));
    assert_fragments_cover(tmp.path().join("a.log"), &fragments[..2], b'\n');
    Ok(())
}

#[test]
fn no_matches_is_an_error() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let pattern = format!("{}/*.missing", tmp.path().display());
    assert!(expand_glob(&pattern)?.is_empty());
    assert!(plan_glob(&pattern, &SplitConfig::default()).is_err());
    Ok(())
}
