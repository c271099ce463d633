//! Splitting every file that matches a glob pattern.
//!
//! Batch ingestion usually starts from a file set (`logs/*.log`,
//! `events/day=*/part-*.jsonl`) rather than a single file. These helpers expand the
//! pattern in sorted order and split each match with the same [`SplitConfig`].
//!
//! # Examples
//!
//! ```no_run
//! use ironshard::io::glob::split_glob_lines;
//!
//! // Up to 4 fragments per matching file, in path order
//! let fragments = split_glob_lines("logs/*.log", 4)?;
//! # use anyhow::Error; Ok::<(), Error>(())
//! ```

use crate::config::SplitConfig;
use crate::io::fragment::FileFragment;
use crate::io::split::{FileSplitter, SplitPlan};
use anyhow::{Context, Result, bail};
use glob::glob;
use std::path::PathBuf;

/// Expand a glob pattern into a sorted list of matching files.
///
/// Directories are skipped. Zero matches is not an error.
///
/// # Errors
/// Returns an error if the pattern is invalid or a directory cannot be read.
pub fn expand_glob(pattern: &str) -> Result<Vec<PathBuf>> {
    let paths = glob(pattern).with_context(|| format!("invalid glob pattern: {pattern}"))?;

    let mut result = Vec::new();
    for entry in paths {
        let path =
            entry.with_context(|| format!("error reading glob entry for pattern: {pattern}"))?;
        if path.is_file() {
            result.push(path);
        }
    }
    result.sort();
    Ok(result)
}

/// Compute a [`SplitPlan`] for every file matching `pattern`.
///
/// # Errors
/// Returns an error if the pattern matches nothing, or if any file fails to plan.
pub fn plan_glob(pattern: &str, config: &SplitConfig) -> Result<Vec<SplitPlan>> {
    let files = expand_glob(pattern)?;
    if files.is_empty() {
        bail!("no files found matching pattern: {pattern}");
    }
    let splitter = FileSplitter::new(config.clone());
    files
        .iter()
        .map(|f| {
            splitter
                .plan(f)
                .with_context(|| format!("plan splits for {}", f.display()))
        })
        .collect()
}

/// Split every file matching `pattern` into at most `partitions` fragments each.
///
/// Fragments come back in path order, then file order. Nothing is returned unless
/// every fragment opened.
///
/// # Errors
/// See [`plan_glob`]; also fails if any fragment cannot be opened.
pub fn split_glob_lines(pattern: &str, partitions: usize) -> Result<Vec<FileFragment>> {
    let config = SplitConfig::default().with_partitions(partitions);
    let mut out = Vec::new();
    for plan in plan_glob(pattern, &config)? {
        let fragments = plan
            .open()
            .with_context(|| format!("open fragments of {}", plan.path.display()))?;
        out.extend(fragments);
    }
    Ok(out)
}
