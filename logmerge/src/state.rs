// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use logmerge_core::{MergeError, Result, SourceIndex};
use std::fmt;

/// Lifecycle of a merge driver: `Init -> Running -> Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MergeState {
    /// Taking the first pull from every source
    Init,
    /// Extracting, printing and refilling until the frontier is empty
    Running,
    /// All sources exhausted and the printer told so
    Done,
}

impl fmt::Display for MergeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Init => "init",
            Self::Running => "running",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

/// Per-source bookkeeping owned by a driver for the duration of one run.
#[derive(Debug)]
pub(crate) struct SourceTable<Ts> {
    states: Vec<SourceState<Ts>>,
    strict_order: bool,
}

#[derive(Debug)]
struct SourceState<Ts> {
    exhausted: bool,
    last_seen: Option<Ts>,
}

impl<Ts: Ord + Copy + fmt::Debug> SourceTable<Ts> {
    pub(crate) fn new(source_count: usize, strict_order: bool) -> Self {
        let states = (0..source_count)
            .map(|_| SourceState {
                exhausted: false,
                last_seen: None,
            })
            .collect();

        Self {
            states,
            strict_order,
        }
    }

    pub(crate) fn is_exhausted(&self, source: SourceIndex) -> bool {
        self.states[source].exhausted
    }

    /// Records exhaustion; returns `false` if it was already recorded.
    pub(crate) fn mark_exhausted(&mut self, source: SourceIndex) -> bool {
        !std::mem::replace(&mut self.states[source].exhausted, true)
    }

    pub(crate) fn all_exhausted(&self) -> bool {
        self.states.iter().all(|state| state.exhausted)
    }

    /// Accepts the timestamp of an entry pulled from `source`.
    ///
    /// # Errors
    /// In strict mode, fails if `timestamp` is lower than the source's previous one.
    pub(crate) fn admit(&mut self, source: SourceIndex, timestamp: Ts) -> Result<()> {
        let state = &mut self.states[source];
        if let Some(previous) = state.last_seen {
            if self.strict_order && timestamp < previous {
                return Err(MergeError::out_of_order(source, previous, timestamp));
            }
        }
        state.last_seen = Some(timestamp);
        Ok(())
    }
}
