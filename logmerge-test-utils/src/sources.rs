// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Instrumented sources over fixed lists of entries.
//!
//! Every source counts its pulls and, in particular, the pulls it receives after
//! it has already reported exhaustion, which a correct driver never issues.

use async_trait::async_trait;
use logmerge_core::{AsyncLogSource, LogSource, Pulled};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::convert::Infallible;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering::SeqCst};
use std::time::Duration;
use tokio::time::sleep;

#[derive(Debug)]
struct Queue<T> {
    entries: VecDeque<T>,
    pulls: usize,
    exhausted: bool,
    pulls_after_exhaustion: usize,
}

impl<T> Queue<T> {
    fn new(entries: Vec<T>) -> Self {
        Self {
            entries: entries.into(),
            pulls: 0,
            exhausted: false,
            pulls_after_exhaustion: 0,
        }
    }

    fn next(&mut self) -> Pulled<T> {
        self.pulls += 1;
        if self.exhausted {
            self.pulls_after_exhaustion += 1;
        }
        let pulled = Pulled::from(self.entries.pop_front());
        if pulled.is_exhausted() {
            self.exhausted = true;
        }
        pulled
    }
}

/// A synchronous source over a list of entries.
#[derive(Debug)]
pub struct VecSource<T> {
    queue: Queue<T>,
}

impl<T> VecSource<T> {
    pub fn new(entries: Vec<T>) -> Self {
        Self {
            queue: Queue::new(entries),
        }
    }

    /// Total pull calls received.
    pub const fn pulls(&self) -> usize {
        self.queue.pulls
    }

    /// Pull calls received after exhaustion was reported.
    pub const fn pulls_after_exhaustion(&self) -> usize {
        self.queue.pulls_after_exhaustion
    }

    pub fn remaining(&self) -> usize {
        self.queue.entries.len()
    }
}

impl<T> LogSource for VecSource<T> {
    type Entry = T;
    type Error = Infallible;

    fn pull(&mut self) -> Result<Pulled<T>, Infallible> {
        Ok(self.queue.next())
    }
}

/// An asynchronous source over a list of entries, with an optional latency per pull.
///
/// The entry a pull returns is taken from the list when the pull is first polled,
/// before the latency elapses, so concurrent pulls are served in the order they
/// were issued. The source also tracks how many pulls were in flight at once.
#[derive(Debug)]
pub struct AsyncVecSource<T> {
    queue: Mutex<Queue<T>>,
    delay: Option<Duration>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl<T> AsyncVecSource<T> {
    pub fn new(entries: Vec<T>) -> Self {
        Self {
            queue: Mutex::new(Queue::new(entries)),
            delay: None,
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    /// Makes every pull suspend for `delay` before resolving.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn pulls(&self) -> usize {
        self.queue.lock().pulls
    }

    pub fn pulls_after_exhaustion(&self) -> usize {
        self.queue.lock().pulls_after_exhaustion
    }

    /// Largest number of pulls that were pending at the same time.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(SeqCst)
    }
}

#[async_trait]
impl<T: Send> AsyncLogSource for AsyncVecSource<T> {
    type Entry = T;
    type Error = Infallible;

    async fn pull_async(&self) -> Result<Pulled<T>, Infallible> {
        let pulled = self.queue.lock().next();

        let in_flight = self.in_flight.fetch_add(1, SeqCst) + 1;
        self.max_in_flight.fetch_max(in_flight, SeqCst);
        if let Some(delay) = self.delay {
            sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, SeqCst);

        Ok(pulled)
    }
}

type Latency = Box<dyn Fn(usize) -> Duration + Send + Sync>;

/// An asynchronous source that takes its entry when a pull resolves rather than
/// when it is issued.
///
/// Each pull first sleeps for a latency computed from its call number, then pops
/// the next entry. With uneven latencies, pulls of one batch race each other and
/// a pull issued later can receive an earlier entry.
pub struct DeferredVecSource<T> {
    queue: Mutex<Queue<T>>,
    calls: AtomicUsize,
    latency: Latency,
}

impl<T> DeferredVecSource<T> {
    /// `latency(call)` is the delay of the pull with the given zero-based call number.
    pub fn new<F>(entries: Vec<T>, latency: F) -> Self
    where
        F: Fn(usize) -> Duration + Send + Sync + 'static,
    {
        Self {
            queue: Mutex::new(Queue::new(entries)),
            calls: AtomicUsize::new(0),
            latency: Box::new(latency),
        }
    }

    /// Every pull sleeps a seeded random number of milliseconds in `0..=max_millis`.
    pub fn with_random_latency(entries: Vec<T>, seed: u64, max_millis: u64) -> Self {
        let rng = Mutex::new(fastrand::Rng::with_seed(seed));
        Self::new(entries, move |_| {
            Duration::from_millis(rng.lock().u64(0..=max_millis))
        })
    }

    pub fn pulls(&self) -> usize {
        self.queue.lock().pulls
    }

    pub fn remaining(&self) -> usize {
        self.queue.lock().entries.len()
    }
}

impl<T: fmt::Debug> fmt::Debug for DeferredVecSource<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeferredVecSource")
            .field("queue", &self.queue)
            .field("calls", &self.calls)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<T: Send> AsyncLogSource for DeferredVecSource<T> {
    type Entry = T;
    type Error = Infallible;

    async fn pull_async(&self) -> Result<Pulled<T>, Infallible> {
        let call = self.calls.fetch_add(1, SeqCst);
        sleep((self.latency)(call)).await;
        Ok(self.queue.lock().next())
    }
}

/// Error returned by a [`FailingSource`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("injected failure after {after} entries")]
pub struct InjectedFailure {
    pub after: usize,
}

/// A source that yields its first `fail_after` entries and then fails every pull.
///
/// Usable both as a [`LogSource`] and as an [`AsyncLogSource`].
#[derive(Debug)]
pub struct FailingSource<T> {
    queue: Mutex<Queue<T>>,
    fail_after: usize,
}

impl<T> FailingSource<T> {
    pub fn new(entries: Vec<T>, fail_after: usize) -> Self {
        Self {
            queue: Mutex::new(Queue::new(entries)),
            fail_after,
        }
    }

    fn next(queue: &mut Queue<T>, fail_after: usize) -> Result<Pulled<T>, InjectedFailure> {
        if queue.pulls >= fail_after {
            queue.pulls += 1;
            return Err(InjectedFailure { after: fail_after });
        }
        Ok(queue.next())
    }
}

impl<T> LogSource for FailingSource<T> {
    type Entry = T;
    type Error = InjectedFailure;

    fn pull(&mut self) -> Result<Pulled<T>, InjectedFailure> {
        Self::next(self.queue.get_mut(), self.fail_after)
    }
}

#[async_trait]
impl<T: Send> AsyncLogSource for FailingSource<T> {
    type Entry = T;
    type Error = InjectedFailure;

    async fn pull_async(&self) -> Result<Pulled<T>, InjectedFailure> {
        let result = Self::next(&mut self.queue.lock(), self.fail_after);
        tokio::task::yield_now().await;
        result
    }
}

/// An asynchronous source that breaks the exhaustion contract: after reporting
/// exhaustion once, it yields `revived` entries.
#[derive(Debug)]
pub struct ResurrectingSource<T> {
    script: Mutex<VecDeque<Pulled<T>>>,
}

impl<T> ResurrectingSource<T> {
    pub fn new(entries: Vec<T>, revived: Vec<T>) -> Self {
        let script = entries
            .into_iter()
            .map(Pulled::Entry)
            .chain(std::iter::once(Pulled::Exhausted))
            .chain(revived.into_iter().map(Pulled::Entry))
            .collect();

        Self {
            script: Mutex::new(script),
        }
    }
}

#[async_trait]
impl<T: Send> AsyncLogSource for ResurrectingSource<T> {
    type Entry = T;
    type Error = Infallible;

    async fn pull_async(&self) -> Result<Pulled<T>, Infallible> {
        Ok(self.script.lock().pop_front().unwrap_or(Pulled::Exhausted))
    }
}
