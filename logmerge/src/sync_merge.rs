// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::config::MergeConfig;
use crate::refill::absorb_batch;
use crate::state::{MergeState, SourceTable};
use crate::summary::MergeSummary;
use logmerge_core::{debug, error, info, warn};
use logmerge_core::{HasTimestamp, LogSource, Printer, Result, SourceIndex};
use logmerge_frontier::Frontier;

/// Merge driver for sources whose pulls return immediately.
///
/// Keeps exactly one pulled entry per live source in the frontier: after an entry
/// is printed, its source is pulled once more.
///
/// # Examples
///
/// ```
/// use logmerge::SyncMerge;
/// use logmerge_core::{IterSource, LogEntry, VecPrinter};
///
/// let mut sources = vec![
///     IterSource::new(vec![LogEntry::new(1_u64, "a1"), LogEntry::new(3, "a3")]),
///     IterSource::new(vec![LogEntry::new(2_u64, "b2")]),
/// ];
/// let mut printer = VecPrinter::new();
///
/// let summary = SyncMerge::new(&mut sources).run(&mut printer)?;
///
/// let payloads: Vec<_> = printer.entries().iter().map(|e| *e.payload()).collect();
/// assert_eq!(payloads, ["a1", "b2", "a3"]);
/// assert_eq!(summary.printed, 3);
/// assert!(printer.is_finished());
/// # Ok::<(), logmerge::MergeError>(())
/// ```
pub struct SyncMerge<'a, S>
where
    S: LogSource,
    S::Entry: HasTimestamp,
{
    sources: &'a mut [S],
    frontier: Frontier<S::Entry>,
    table: SourceTable<<S::Entry as HasTimestamp>::Timestamp>,
    state: MergeState,
    summary: MergeSummary,
}

impl<'a, S> SyncMerge<'a, S>
where
    S: LogSource,
    S::Entry: HasTimestamp,
{
    pub fn new(sources: &'a mut [S]) -> Self {
        Self::with_config(sources, &MergeConfig::default())
    }

    /// Creates a driver honoring `config.strict_order()`; the batch size does not
    /// apply to synchronous sources.
    pub fn with_config(sources: &'a mut [S], config: &MergeConfig) -> Self {
        let count = sources.len();
        Self {
            sources,
            frontier: Frontier::new(count),
            table: SourceTable::new(count, config.strict_order()),
            state: MergeState::Init,
            summary: MergeSummary::new(count),
        }
    }

    /// Runs the merge to completion, delivering every entry to `printer`.
    ///
    /// # Errors
    /// Returns the first retrieval failure (or ordering violation in strict mode).
    /// `printer.done()` is not called in that case.
    pub fn run<P>(mut self, mut printer: P) -> Result<MergeSummary>
    where
        P: Printer<S::Entry>,
    {
        info!("sync merge starting with {} sources", self.sources.len());

        for source in 0..self.sources.len() {
            self.pull_once(source)?;
        }
        self.transition(MergeState::Running);

        while let Some((source, entry)) = self.frontier.extract_min() {
            printer.print(entry);
            self.summary.printed += 1;
            self.pull_once(source)?;
        }

        debug_assert!(self.table.all_exhausted());
        self.transition(MergeState::Done);
        printer.done();

        info!("sync merge complete: {}", self.summary);
        Ok(self.summary)
    }

    fn pull_once(&mut self, source: SourceIndex) -> Result<()> {
        if self.table.is_exhausted(source) {
            return Ok(());
        }

        self.summary.pulls += 1;
        let pulled = self.sources[source].pull();
        if let Err(e) = &pulled {
            error!("sync merge: source {} failed: {}", source, e);
        }

        let outcome = absorb_batch(
            source,
            std::iter::once((0, pulled)),
            &mut self.frontier,
            &mut self.table,
        )?;
        if outcome.exhausted {
            debug!("sync merge: source {} exhausted", source);
        }
        if outcome.discarded > 0 {
            warn!("sync merge: source {} yielded entries after exhaustion", source);
            self.summary.discarded += outcome.discarded;
        }
        self.summary.observe_resident(self.frontier.len());
        Ok(())
    }

    fn transition(&mut self, next: MergeState) {
        debug!("sync merge: {} -> {}", self.state, next);
        self.state = next;
    }
}

/// Merges synchronous `sources` into `printer`.
///
/// # Errors
/// See [`SyncMerge::run`].
pub fn merge_sync<S, P>(sources: &mut [S], printer: P) -> Result<MergeSummary>
where
    S: LogSource,
    S::Entry: HasTimestamp,
    P: Printer<S::Entry>,
{
    SyncMerge::new(sources).run(printer)
}

/// Extension trait for merging a collection of synchronous sources.
pub trait SyncMergeExt {
    type Entry;

    /// Merges all sources into `printer` in timestamp order.
    ///
    /// # Errors
    /// See [`SyncMerge::run`].
    fn merge_into<P>(self, printer: P) -> Result<MergeSummary>
    where
        P: Printer<Self::Entry>;
}

impl<S> SyncMergeExt for Vec<S>
where
    S: LogSource,
    S::Entry: HasTimestamp,
{
    type Entry = S::Entry;

    fn merge_into<P>(mut self, printer: P) -> Result<MergeSummary>
    where
        P: Printer<Self::Entry>,
    {
        merge_sync(&mut self, printer)
    }
}

impl<S> SyncMergeExt for &mut [S]
where
    S: LogSource,
    S::Entry: HasTimestamp,
{
    type Entry = S::Entry;

    fn merge_into<P>(self, printer: P) -> Result<MergeSummary>
    where
        P: Printer<Self::Entry>,
    {
        merge_sync(self, printer)
    }
}
