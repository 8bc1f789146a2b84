// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! Core vocabulary for merging independently ordered log sources.
//!
//! A merge consumes sources through a pull interface and delivers entries to a
//! [`Printer`] in non-decreasing timestamp order. This crate defines the pieces
//! every merge implementation agrees on:
//!
//! - [`HasTimestamp`] - anything that can be ordered by a timestamp
//! - [`LogEntry`] - a ready-made timestamp + payload entry
//! - [`Pulled`] - the tagged result of a pull: an entry or exhaustion
//! - [`LogSource`] / [`AsyncLogSource`] - synchronous and suspending sources
//! - [`Printer`] - the output sink
//! - [`MergeError`] - failures that abort a merge run
//!
//! # Examples
//!
//! ```
//! use logmerge_core::{IterSource, LogEntry, LogSource, Pulled};
//!
//! let mut source = IterSource::new(vec![LogEntry::new(1_u64, "boot"), LogEntry::new(4, "ready")]);
//!
//! assert_eq!(source.pull().unwrap(), Pulled::Entry(LogEntry::new(1, "boot")));
//! assert_eq!(source.pull().unwrap(), Pulled::Entry(LogEntry::new(4, "ready")));
//! assert!(source.pull().unwrap().is_exhausted());
//! ```

pub mod logging;

pub mod entry;
pub mod error;
pub mod has_timestamp;
pub mod printer;
pub mod pulled;
pub mod source;
pub mod sources;

pub use self::entry::LogEntry;
pub use self::error::{MergeError, Result, SourceIndex};
pub use self::has_timestamp::HasTimestamp;
pub use self::printer::{Printer, VecPrinter};
pub use self::pulled::Pulled;
pub use self::source::{AsyncLogSource, LogSource};
#[cfg(feature = "runtime-tokio")]
pub use self::sources::{DeadlineError, DeadlineSource};
#[cfg(feature = "std")]
pub use self::sources::StreamSource;
pub use self::sources::{IterSource, TryIterSource};

#[cfg(feature = "tracing")]
#[doc(hidden)]
pub use tracing as __tracing;
