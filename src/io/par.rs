//! Parallel fragment processing on the rayon pool.

use crate::io::fragment::FileFragment;
use anyhow::{Context, Result};
use rayon::prelude::*;

/// Run `f` over every fragment in parallel and collect the results in fragment order.
///
/// Each fragment is moved to exactly one worker, which owns it (and its file handle)
/// for the duration of `f`. The first error wins; remaining results are discarded.
///
/// # Example
/// ```no_run
/// use ironshard::{process_fragments_par, split_file_lines};
/// use std::io::{BufRead, BufReader};
///
/// let fragments = split_file_lines("events.log", 8)?;
/// let counts = process_fragments_par(fragments, |frag| {
///     Ok(BufReader::new(frag).lines().count())
/// })?;
/// let total: usize = counts.iter().sum();
/// # Ok::<(), anyhow::Error>(())
/// ```
///
/// # Errors
/// Returns the first error produced by `f`, annotated with the fragment's range.
///
/// # Feature
/// Requires the `parallel-io` feature.
pub fn process_fragments_par<T, F>(fragments: Vec<FileFragment>, f: F) -> Result<Vec<T>>
where
    T: Send,
    F: Fn(FileFragment) -> Result<T> + Send + Sync,
{
    fragments
        .into_par_iter()
        .map(|frag| {
            let (start, end) = (frag.start(), frag.end());
            let path = frag.path().to_path_buf();
            f(frag).with_context(|| format!("process {}[{start}..{end})", path.display()))
        })
        .collect()
}
