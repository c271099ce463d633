//! In-memory record sources for exercising lookahead behavior.

use crate::source::RecordSource;
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Replays a fixed script of records and errors, then reports end-of-data forever.
///
/// Every poll is counted in a shared counter so tests can verify how often a wrapper
/// touched the source. An optional per-poll delay simulates a slow upstream.
///
/// # Example
///
/// ```
/// use ironshard::RecordSource;
/// use ironshard::testing::ScriptedSource;
///
/// let mut src: ScriptedSource<&str> = ScriptedSource::records(vec!["a", "b"]);
/// let polls = src.poll_counter();
/// assert_eq!(src.next_record(), Ok(Some("a")));
/// assert_eq!(polls.load(std::sync::atomic::Ordering::SeqCst), 1);
/// ```
#[derive(Debug)]
pub struct ScriptedSource<R, E = String> {
    script: VecDeque<Result<R, E>>,
    polls: Arc<AtomicUsize>,
    delay: Option<Duration>,
}

impl<R, E> ScriptedSource<R, E> {
    /// A source replaying `script` in order.
    #[must_use]
    pub fn new(script: Vec<Result<R, E>>) -> Self {
        Self {
            script: script.into(),
            polls: Arc::new(AtomicUsize::new(0)),
            delay: None,
        }
    }

    /// A source yielding only successful records.
    #[must_use]
    pub fn records(records: Vec<R>) -> Self {
        Self::new(records.into_iter().map(Ok).collect())
    }

    /// Sleep for `delay` on every poll.
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Shared handle on the number of polls made so far.
    #[must_use]
    pub fn poll_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.polls)
    }
}

impl<R, E> RecordSource for ScriptedSource<R, E>
where
    R: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    type Record = R;
    type Error = E;

    fn next_record(&mut self) -> Result<Option<R>, E> {
        self.polls.fetch_add(1, Ordering::SeqCst);
        if let Some(d) = self.delay {
            std::thread::sleep(d);
        }
        self.script.pop_front().transpose()
    }
}
