// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use logmerge_core::HasTimestamp;
use std::sync::Once;

/// Asserts that timestamps never decrease along `entries`.
pub fn assert_non_decreasing<T: HasTimestamp + std::fmt::Debug>(entries: &[T]) {
    for (index, pair) in entries.windows(2).enumerate() {
        assert!(
            pair[0].timestamp() <= pair[1].timestamp(),
            "entry {} ({:?}) is later than entry {} ({:?})",
            index,
            pair[0],
            index + 1,
            pair[1]
        );
    }
}

/// Reference merge: all entries ordered by timestamp, ties by source index, then
/// by position within the source.
pub fn sorted_merge<T: HasTimestamp + Clone>(sources: &[Vec<T>]) -> Vec<T> {
    let mut all: Vec<T> = sources.iter().flatten().cloned().collect();
    all.sort_by_key(HasTimestamp::timestamp);
    all
}

static TRACING: Once = Once::new();

/// Installs a test-friendly `tracing` subscriber once per test binary.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing_subscriber::filter::LevelFilter::DEBUG)
            .try_init();
    });
}
