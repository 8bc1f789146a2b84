// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Everything needed to define sources and run a merge.

pub use crate::async_merge::{merge_async, AsyncMerge, AsyncMergeExt};
pub use crate::config::MergeConfig;
pub use crate::summary::MergeSummary;
pub use crate::sync_merge::{merge_sync, SyncMerge, SyncMergeExt};

#[cfg(feature = "runtime-tokio")]
pub use logmerge_core::{DeadlineError, DeadlineSource};
#[cfg(feature = "std")]
pub use logmerge_core::StreamSource;
pub use logmerge_core::{
    AsyncLogSource, HasTimestamp, IterSource, LogEntry, LogSource, MergeError, Printer, Pulled,
    TryIterSource, VecPrinter,
};
