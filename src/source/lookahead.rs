//! Peekable, shareable wrapper over a [`RecordSource`].
//!
//! A [`LookaheadSource`] owns a single-record lookahead slot and serializes every
//! operation through one coordinator thread:
//!
//! - `peek` fills the slot from the source when it is empty, and returns a copy of the
//!   slot's contents without consuming it.
//! - `next_record` drains the slot when it is full, or pulls straight from the source.
//!
//! Because the coordinator is the only code that touches the slot or the source, every
//! call is an atomic transaction: concurrent callers never see a record twice, and no
//! record is skipped. End-of-data is latched: once the source reports `Ok(None)` it is
//! not polled again and every later call sees `Ok(None)`. Errors are not latched; they
//! are buffered and drained exactly like records.
//!
//! Replies are handed over on rendezvous channels. If a caller stops waiting (see
//! [`LookaheadSource::next_record_timeout`]) before a consumed record reaches it, the
//! record goes back into the slot for the next caller.

use crate::error::LookaheadError;
use crate::source::RecordSource;
use crossbeam_channel::{Receiver, RecvTimeoutError, SendError, Sender, bounded, unbounded};
use std::fmt;
use std::sync::Mutex;
use std::thread::{self, JoinHandle};
use std::time::Duration;

type Polled<R, E> = Result<Option<R>, E>;

enum Request<R, E> {
    Peek(Sender<Polled<R, E>>),
    Next(Sender<Polled<R, E>>),
    Close(Sender<()>),
}

/// A [`RecordSource`] wrapper supporting `peek` and safe use from many threads.
///
/// The handle is `Send + Sync`; share it by reference (e.g. `std::thread::scope`) or
/// inside an `Arc`. Dropping the handle stops the coordinator once queued calls finish.
///
/// # Example
/// ```
/// use ironshard::LookaheadSource;
/// use ironshard::source::IterSource;
///
/// let src = LookaheadSource::new(IterSource::new(vec![Ok::<_, String>("a"), Ok("b")]));
/// assert_eq!(src.peek().unwrap(), Some("a"));
/// assert_eq!(src.next_record().unwrap(), Some("a"));
/// assert_eq!(src.next_record().unwrap(), Some("b"));
/// assert_eq!(src.next_record().unwrap(), None);
/// ```
pub struct LookaheadSource<S: RecordSource> {
    requests: Sender<Request<S::Record, S::Error>>,
    coordinator: Mutex<Option<JoinHandle<()>>>,
}

impl<S: RecordSource> LookaheadSource<S> {
    /// Wrap `source`, moving it onto a dedicated coordinator thread.
    pub fn new(source: S) -> Self {
        let (requests, inbox) = unbounded();
        let coordinator = Coordinator {
            source,
            slot: None,
            exhausted: false,
        };
        let handle = thread::spawn(move || coordinator.run(&inbox));
        Self {
            requests,
            coordinator: Mutex::new(Some(handle)),
        }
    }

    /// Return the next record without consuming it.
    ///
    /// Repeated calls return the same value until [`next_record`](Self::next_record)
    /// consumes it. A source error is buffered and returned the same way.
    ///
    /// # Errors
    /// - [`LookaheadError::Source`] with the source's error, verbatim.
    /// - [`LookaheadError::Closed`] if the source was closed.
    pub fn peek(&self) -> Result<Option<S::Record>, LookaheadError<S::Error>> {
        self.call(Request::Peek, None)
    }

    /// Consume and return the next record.
    ///
    /// If the previous operation was a `peek`, this returns exactly what it returned.
    ///
    /// # Errors
    /// - [`LookaheadError::Source`] with the source's error, verbatim.
    /// - [`LookaheadError::Closed`] if the source was closed.
    pub fn next_record(&self) -> Result<Option<S::Record>, LookaheadError<S::Error>> {
        self.call(Request::Next, None)
    }

    /// Like [`peek`](Self::peek), giving up after `timeout`.
    ///
    /// A timed-out peek still leaves the pulled record buffered.
    ///
    /// # Errors
    /// As [`peek`](Self::peek), plus [`LookaheadError::Timeout`].
    pub fn peek_timeout(
        &self,
        timeout: Duration,
    ) -> Result<Option<S::Record>, LookaheadError<S::Error>> {
        self.call(Request::Peek, Some(timeout))
    }

    /// Like [`next_record`](Self::next_record), giving up after `timeout`.
    ///
    /// A record that was not handed over before the timeout stays buffered, so the
    /// next call receives it.
    ///
    /// # Errors
    /// As [`next_record`](Self::next_record), plus [`LookaheadError::Timeout`].
    pub fn next_record_timeout(
        &self,
        timeout: Duration,
    ) -> Result<Option<S::Record>, LookaheadError<S::Error>> {
        self.call(Request::Next, Some(timeout))
    }

    /// Stop the coordinator and drop the wrapped source.
    ///
    /// Calls queued before `close` complete normally; later calls fail with
    /// [`LookaheadError::Closed`]. Blocks until the coordinator has exited, which
    /// includes waiting for an in-flight source call. Closing twice is a no-op.
    pub fn close(&self) {
        let (reply, done) = bounded(0);
        if self.requests.send(Request::Close(reply)).is_ok() {
            let _ = done.recv();
        }
        let handle = self
            .coordinator
            .lock()
            .map_or_else(|poisoned| poisoned.into_inner().take(), |mut h| h.take());
        if let Some(handle) = handle {
            let _ = handle.join();
        }
    }

    fn call(
        &self,
        request: fn(Sender<Polled<S::Record, S::Error>>) -> Request<S::Record, S::Error>,
        timeout: Option<Duration>,
    ) -> Result<Option<S::Record>, LookaheadError<S::Error>> {
        let (reply, response) = bounded(0);
        self.requests
            .send(request(reply))
            .map_err(|_| LookaheadError::Closed)?;
        let polled = match timeout {
            None => response.recv().map_err(|_| LookaheadError::Closed)?,
            Some(t) => response.recv_timeout(t).map_err(|e| match e {
                RecvTimeoutError::Timeout => LookaheadError::Timeout,
                RecvTimeoutError::Disconnected => LookaheadError::Closed,
            })?,
        };
        polled.map_err(LookaheadError::Source)
    }
}

impl<S: RecordSource> RecordSource for LookaheadSource<S> {
    type Record = S::Record;
    type Error = LookaheadError<S::Error>;

    fn next_record(&mut self) -> Result<Option<Self::Record>, Self::Error> {
        self.call(Request::Next, None)
    }
}

impl<S: RecordSource> fmt::Debug for LookaheadSource<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LookaheadSource").finish_non_exhaustive()
    }
}

/// Owns the source and the slot. Runs on its own thread.
struct Coordinator<S: RecordSource> {
    source: S,
    slot: Option<Polled<S::Record, S::Error>>,
    exhausted: bool,
}

impl<S: RecordSource> Coordinator<S> {
    fn run(mut self, inbox: &Receiver<Request<S::Record, S::Error>>) {
        tracing::debug!("lookahead coordinator started");
        for request in inbox {
            match request {
                Request::Peek(reply) => {
                    let polled = match &self.slot {
                        Some(cached) => cached.clone(),
                        None => {
                            let polled = self.pull();
                            self.slot = Some(polled.clone());
                            polled
                        }
                    };
                    let _ = reply.send(polled);
                }
                Request::Next(reply) => {
                    let polled = self.slot.take().unwrap_or_else(|| self.pull());
                    if let Err(SendError(undelivered)) = reply.send(polled) {
                        // caller gave up; the slot was empty, keep the record for the next call
                        self.slot = Some(undelivered);
                    }
                }
                Request::Close(reply) => {
                    let _ = reply.send(());
                    break;
                }
            }
        }
        tracing::debug!("lookahead coordinator stopped");
    }

    fn pull(&mut self) -> Polled<S::Record, S::Error> {
        if self.exhausted {
            return Ok(None);
        }
        let polled = self.source.next_record();
        if matches!(polled, Ok(None)) {
            self.exhausted = true;
        }
        polled
    }
}
