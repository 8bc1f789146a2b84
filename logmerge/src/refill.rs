// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::state::SourceTable;
use logmerge_core::{HasTimestamp, MergeError, Pulled, Result, SourceIndex};
use logmerge_frontier::Frontier;
use std::num::NonZeroUsize;

/// Decides when an asynchronous source is refilled and by how much.
///
/// A source is refilled only once none of its entries are left in the frontier,
/// and only while it is not exhausted. Each refill issues `batch_size` concurrent
/// pulls, so a source costs one suspension per `batch_size` entries and holds at
/// most `batch_size` entries in the frontier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefillPolicy {
    batch_size: NonZeroUsize,
}

impl RefillPolicy {
    #[must_use]
    pub const fn new(batch_size: NonZeroUsize) -> Self {
        Self { batch_size }
    }

    pub const fn batch_size(&self) -> NonZeroUsize {
        self.batch_size
    }

    /// Whether a source with `resident` entries in the frontier should be pulled now.
    #[must_use]
    pub const fn needs_refill(&self, resident: usize, exhausted: bool) -> bool {
        resident == 0 && !exhausted
    }
}

/// What applying one batch of pull results did to the frontier.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BatchOutcome {
    pub(crate) inserted: usize,
    pub(crate) exhausted: bool,
    pub(crate) discarded: usize,
}

/// Applies pull results from `source`, in the order the pulls resolved.
///
/// Each result carries the position at which its pull was issued within the
/// batch. An `Exhausted` marks the source exhausted. An entry is discarded only
/// when its pull was both issued and resolved after a pull that reported
/// exhaustion; entries from overlapping pulls are kept whichever way they
/// raced. Kept entries enter the frontier by timestamp, then issue position.
/// Any retrieval error fails the whole batch.
pub(crate) fn absorb_batch<T, E, I>(
    source: SourceIndex,
    resolved: I,
    frontier: &mut Frontier<T>,
    table: &mut SourceTable<T::Timestamp>,
) -> Result<BatchOutcome>
where
    T: HasTimestamp,
    E: std::error::Error + Send + Sync + 'static,
    I: IntoIterator<Item = (usize, std::result::Result<Pulled<T>, E>)>,
{
    let mut outcome = BatchOutcome::default();
    let mut kept = Vec::new();
    let mut exhausted_at: Option<usize> = None;
    let already_exhausted = table.is_exhausted(source);

    for (issued, result) in resolved {
        match result.map_err(|error| MergeError::retrieval(source, error))? {
            Pulled::Entry(_) if already_exhausted => outcome.discarded += 1,
            Pulled::Entry(_) if exhausted_at.is_some_and(|at| at < issued) => {
                outcome.discarded += 1;
            }
            Pulled::Entry(entry) => kept.push((issued, entry)),
            Pulled::Exhausted => {
                exhausted_at = Some(exhausted_at.map_or(issued, |at| at.min(issued)));
            }
        }
    }

    kept.sort_by_key(|(issued, entry)| (entry.timestamp(), *issued));
    for (_, entry) in kept {
        table.admit(source, entry.timestamp())?;
        frontier.insert(source, entry);
        outcome.inserted += 1;
    }

    if exhausted_at.is_some() && table.mark_exhausted(source) {
        outcome.exhausted = true;
    }

    Ok(outcome)
}
