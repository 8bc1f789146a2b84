// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::config::MergeConfig;
use crate::refill::{absorb_batch, BatchOutcome, RefillPolicy};
use crate::state::{MergeState, SourceTable};
use crate::summary::MergeSummary;
use futures::future::join_all;
use futures::stream::FuturesUnordered;
use futures::{FutureExt, StreamExt};
use logmerge_core::{debug, error, info, warn};
use logmerge_core::{AsyncLogSource, HasTimestamp, Printer, Pulled, Result, SourceIndex};
use logmerge_frontier::Frontier;
use std::future::Future;

/// Merge driver for sources whose pulls suspend.
///
/// The driver only waits at two kinds of points:
/// - during init, on the first pull of every source, all issued at once;
/// - during a refill, on a batch of `batch_size` pulls against one source, all
///   issued at once.
///
/// Between refills it extracts and prints without waiting. A source is refilled
/// when the entry just printed was its last one in the frontier. Print order is
/// decided by the frontier alone, never by the order in which pulls resolve.
///
/// # Examples
///
/// ```
/// use logmerge::{AsyncMerge, MergeConfig};
/// use logmerge_core::{LogEntry, StreamSource, VecPrinter};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), logmerge::MergeError> {
/// let sources = vec![
///     StreamSource::from_entries(vec![LogEntry::new(1_u64, "a1"), LogEntry::new(3, "a3")]),
///     StreamSource::from_entries(vec![LogEntry::new(2_u64, "b2")]),
/// ];
/// let mut printer = VecPrinter::new();
///
/// let config = MergeConfig::default().with_batch_size(4)?;
/// let summary = AsyncMerge::with_config(&sources, &config).run(&mut printer).await?;
///
/// let payloads: Vec<_> = printer.entries().iter().map(|e| *e.payload()).collect();
/// assert_eq!(payloads, ["a1", "b2", "a3"]);
/// assert_eq!(summary.printed, 3);
/// # Ok(())
/// # }
/// ```
pub struct AsyncMerge<'a, S>
where
    S: AsyncLogSource,
    S::Entry: HasTimestamp,
{
    sources: &'a [S],
    policy: RefillPolicy,
    frontier: Frontier<S::Entry>,
    table: SourceTable<<S::Entry as HasTimestamp>::Timestamp>,
    state: MergeState,
    summary: MergeSummary,
}

impl<'a, S> AsyncMerge<'a, S>
where
    S: AsyncLogSource,
    S::Entry: HasTimestamp,
{
    pub fn new(sources: &'a [S]) -> Self {
        Self::with_config(sources, &MergeConfig::default())
    }

    pub fn with_config(sources: &'a [S], config: &MergeConfig) -> Self {
        let count = sources.len();
        let batch_size = config.batch_size();
        Self {
            sources,
            policy: RefillPolicy::new(batch_size),
            frontier: Frontier::with_capacity(count, count.saturating_mul(batch_size.get())),
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
    pub async fn run<P>(mut self, mut printer: P) -> Result<MergeSummary>
    where
        P: Printer<S::Entry>,
    {
        info!(
            "async merge starting with {} sources, batch size {}",
            self.sources.len(),
            self.policy.batch_size()
        );

        self.fan_out().await?;
        self.transition(MergeState::Running);

        while let Some((source, entry)) = self.frontier.extract_min() {
            printer.print(entry);
            self.summary.printed += 1;

            let resident = self.frontier.resident_count(source);
            if self
                .policy
                .needs_refill(resident, self.table.is_exhausted(source))
            {
                self.refill(source).await?;
            }
        }

        debug_assert!(self.table.all_exhausted());
        self.transition(MergeState::Done);
        printer.done();

        info!("async merge complete: {}", self.summary);
        Ok(self.summary)
    }

    /// First pull of every source, awaited together.
    async fn fan_out(&mut self) -> Result<()> {
        if self.sources.is_empty() {
            return Ok(());
        }

        let sources = self.sources;
        let results = join_all(sources.iter().map(|source| source.pull_async())).await;
        self.summary.suspensions += 1;
        self.summary.pulls += results.len();

        for (source, result) in results.into_iter().enumerate() {
            let outcome = self.absorb(source, std::iter::once((0, result)))?;
            if outcome.exhausted {
                debug!("async merge: source {} empty at init", source);
            }
        }
        Ok(())
    }

    /// `batch_size` pulls against one source, awaited together. Results are
    /// collected in the order they resolve, tagged with their issue position.
    async fn refill(&mut self, source: SourceIndex) -> Result<()> {
        let batch_size = self.policy.batch_size().get();
        let target = &self.sources[source];
        let results: Vec<_> = (0..batch_size)
            .map(|issued| target.pull_async().map(move |result| (issued, result)))
            .collect::<FuturesUnordered<_>>()
            .collect()
            .await;
        self.summary.suspensions += 1;
        self.summary.refills += 1;
        self.summary.pulls += batch_size;

        let outcome = self.absorb(source, results)?;
        debug!(
            "async merge: refilled source {} with {} of {} entries{}",
            source,
            outcome.inserted,
            batch_size,
            if outcome.exhausted { ", now exhausted" } else { "" }
        );
        Ok(())
    }

    fn absorb<I>(&mut self, source: SourceIndex, results: I) -> Result<BatchOutcome>
    where
        I: IntoIterator<Item = (usize, std::result::Result<Pulled<S::Entry>, S::Error>)>,
    {
        let outcome = absorb_batch(source, results, &mut self.frontier, &mut self.table)
            .inspect_err(|e| error!("async merge: {}", e))?;
        if outcome.discarded > 0 {
            warn!(
                "async merge: source {} yielded {} entries after exhaustion",
                source, outcome.discarded
            );
            self.summary.discarded += outcome.discarded;
        }
        self.summary.observe_resident(self.frontier.len());
        Ok(outcome)
    }

    fn transition(&mut self, next: MergeState) {
        debug!("async merge: {} -> {}", self.state, next);
        self.state = next;
    }
}

/// Merges asynchronous `sources` into `printer` with the given configuration.
///
/// # Errors
/// See [`AsyncMerge::run`].
pub async fn merge_async<S, P>(
    sources: &[S],
    printer: P,
    config: MergeConfig,
) -> Result<MergeSummary>
where
    S: AsyncLogSource,
    S::Entry: HasTimestamp,
    P: Printer<S::Entry>,
{
    AsyncMerge::with_config(sources, &config).run(printer).await
}

/// Extension trait for merging a collection of asynchronous sources.
pub trait AsyncMergeExt {
    type Entry;

    /// Merges all sources into `printer` in timestamp order.
    fn merge_async_into<P>(
        self,
        printer: P,
        config: MergeConfig,
    ) -> impl Future<Output = Result<MergeSummary>>
    where
        P: Printer<Self::Entry>;
}

impl<S> AsyncMergeExt for Vec<S>
where
    S: AsyncLogSource,
    S::Entry: HasTimestamp,
{
    type Entry = S::Entry;

    fn merge_async_into<P>(
        self,
        printer: P,
        config: MergeConfig,
    ) -> impl Future<Output = Result<MergeSummary>>
    where
        P: Printer<Self::Entry>,
    {
        async move { merge_async(&self, printer, config).await }
    }
}

impl<'a, S> AsyncMergeExt for &'a [S]
where
    S: AsyncLogSource,
    S::Entry: HasTimestamp,
{
    type Entry = S::Entry;

    fn merge_async_into<P>(
        self,
        printer: P,
        config: MergeConfig,
    ) -> impl Future<Output = Result<MergeSummary>>
    where
        P: Printer<Self::Entry>,
    {
        merge_async(self, printer, config)
    }
}
