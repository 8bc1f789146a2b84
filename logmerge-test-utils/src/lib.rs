// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities and fixtures for the logmerge workspace.
//!
//! This crate provides in-memory sources, a recording printer and ready-made
//! scenarios for testing merge drivers. It is meant for development and testing
//! only, not for production code.
//!
//! # Key Types
//!
//! - [`VecSource`] / [`AsyncVecSource`] - sources over a fixed list of entries that
//!   record how they were pulled
//! - [`FailingSource`] - fails after a given number of entries
//! - [`ResurrectingSource`] - misbehaves by yielding entries after exhaustion
//! - [`RecordingPrinter`] - records every `print` and `done` call in order
//!
//! # Examples
//!
//! ```rust
//! use logmerge_core::{LogSource, Pulled};
//! use logmerge_test_utils::{entries, VecSource};
//!
//! let mut source = VecSource::new(entries("a", &[1, 3]));
//! assert!(matches!(source.pull(), Ok(Pulled::Entry(_))));
//! assert_eq!(source.pulls(), 1);
//! ```
//!
//! # Module Organization
//!
//! - `sources` - instrumented sync and async sources
//! - `printer` - recording printer
//! - `test_data` - entry builders and canned scenarios
//! - `helpers` - ordering assertions, the reference merge and tracing setup

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod helpers;
pub mod printer;
pub mod sources;
pub mod test_data;

pub use helpers::{assert_non_decreasing, init_tracing, sorted_merge};
pub use printer::{PrinterEvent, RecordingPrinter};
pub use sources::{
    AsyncVecSource, DeferredVecSource, FailingSource, InjectedFailure, ResurrectingSource,
    VecSource,
};
pub use test_data::{entries, entry, TestEntry};
