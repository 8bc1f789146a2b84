// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::fmt;

/// Counters describing one completed merge run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeSummary {
    /// Sources handed to the merge
    pub sources: usize,
    /// Entries delivered to the printer
    pub printed: usize,
    /// Pull calls issued across all sources
    pub pulls: usize,
    /// Times the driver waited on pulls (async only; a fan-out counts once)
    pub suspensions: usize,
    /// Refill batches issued after the initial fan-out (async only)
    pub refills: usize,
    /// Entries a source returned after it had reported exhaustion
    pub discarded: usize,
    /// Largest number of entries resident in the frontier at once
    pub peak_resident: usize,
}

impl MergeSummary {
    pub(crate) fn new(sources: usize) -> Self {
        Self {
            sources,
            ..Self::default()
        }
    }

    pub(crate) fn observe_resident(&mut self, resident: usize) {
        self.peak_resident = self.peak_resident.max(resident);
    }
}

impl fmt::Display for MergeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} entries from {} sources, {} pulls, {} suspensions, {} refills, peak frontier {}",
            self.printed,
            self.sources,
            self.pulls,
            self.suspensions,
            self.refills,
            self.peak_resident
        )?;
        if self.discarded > 0 {
            write!(f, ", {} discarded after exhaustion", self.discarded)?;
        }
        Ok(())
    }
}
