// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! Merge independently ordered log sources into one time-ordered output.
//!
//! Every source yields entries in non-decreasing timestamp order; the merge
//! delivers all of them to a [`Printer`] in non-decreasing timestamp order,
//! each exactly once, then calls `done()`.
//!
//! Two drivers share the same [`Frontier`]:
//!
//! - [`SyncMerge`] for [`LogSource`]s, pulling one entry at a time;
//! - [`AsyncMerge`] for [`AsyncLogSource`]s, pulling the first entry of every
//!   source concurrently and then refilling drained sources in concurrent
//!   batches of [`MergeConfig::batch_size`] entries.
//!
//! Entries with equal timestamps are printed by ascending source index, so the
//! printed sequence is the same for both drivers and any batch size.
//!
//! # Examples
//!
//! ```
//! use logmerge::prelude::*;
//!
//! let sources = vec![
//!     IterSource::new(vec![LogEntry::new(1_u64, "t1"), LogEntry::new(3, "t3"), LogEntry::new(5, "t5")]),
//!     IterSource::new(vec![LogEntry::new(2_u64, "t2"), LogEntry::new(4, "t4")]),
//! ];
//! let mut printer = VecPrinter::new();
//!
//! sources.merge_into(&mut printer)?;
//!
//! let payloads: Vec<_> = printer.entries().iter().map(|e| *e.payload()).collect();
//! assert_eq!(payloads, ["t1", "t2", "t3", "t4", "t5"]);
//! # Ok::<(), MergeError>(())
//! ```

pub mod async_merge;
pub mod config;
pub mod prelude;
pub mod refill;
pub mod state;
pub mod summary;
pub mod sync_merge;

pub use self::async_merge::{merge_async, AsyncMerge, AsyncMergeExt};
pub use self::config::{MergeConfig, DEFAULT_BATCH_SIZE};
pub use self::refill::RefillPolicy;
pub use self::state::MergeState;
pub use self::summary::MergeSummary;
pub use self::sync_merge::{merge_sync, SyncMerge, SyncMergeExt};

pub use logmerge_core::{
    AsyncLogSource, HasTimestamp, LogEntry, LogSource, MergeError, Printer, Pulled, Result,
};
pub use logmerge_frontier::{Frontier, SourceId};
