// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Entry builders and canned merge scenarios.
//!
//! Payloads are `"<label><timestamp>"`, e.g. `"a3"`, so a printed sequence can be
//! compared against expectations at a glance.

use logmerge_core::LogEntry;

pub type TestEntry = LogEntry<String>;

pub fn entry(label: &str, timestamp: u64) -> TestEntry {
    LogEntry::new(timestamp, format!("{label}{timestamp}"))
}

/// Builds one source's entries from its timestamps.
pub fn entries(label: &str, timestamps: &[u64]) -> Vec<TestEntry> {
    timestamps.iter().map(|&ts| entry(label, ts)).collect()
}

/// Source labels used by multi-source scenarios: `a`, `b`, `c`, ...
pub fn label(index: usize) -> String {
    char::from(b'a' + (index % 26) as u8).to_string()
}

/// A = [t1, t3, t5], B = [t2, t4].
pub fn scenario_interleaved() -> Vec<Vec<TestEntry>> {
    vec![entries("a", &[1, 3, 5]), entries("b", &[2, 4])]
}

/// Three sources, the middle one empty.
pub fn scenario_one_empty() -> Vec<Vec<TestEntry>> {
    vec![entries("a", &[1, 4, 6]), Vec::new(), entries("c", &[2, 3, 7])]
}

/// Two sources of length 3 and 5.
pub fn scenario_three_and_five() -> Vec<Vec<TestEntry>> {
    vec![entries("a", &[2, 5, 9]), entries("b", &[1, 3, 4, 8, 10])]
}

/// Timestamps shared across and within sources.
pub fn scenario_ties() -> Vec<Vec<TestEntry>> {
    vec![
        vec![
            LogEntry::new(1, "a-first".to_string()),
            LogEntry::new(2, "a-second".to_string()),
            LogEntry::new(2, "a-third".to_string()),
        ],
        vec![
            LogEntry::new(1, "b-first".to_string()),
            LogEntry::new(2, "b-second".to_string()),
        ],
        vec![LogEntry::new(2, "c-first".to_string())],
    ]
}

/// Deterministic pseudo-random sources: `count` sources of up to `max_len`
/// non-decreasing timestamps each, duplicates included.
pub fn generated_sources(seed: u64, count: usize, max_len: usize) -> Vec<Vec<TestEntry>> {
    let mut rng = fastrand::Rng::with_seed(seed);

    (0..count)
        .map(|index| {
            let len = rng.usize(0..=max_len);
            let mut timestamp = rng.u64(0..10);
            let label = label(index);
            (0..len)
                .map(|_| {
                    timestamp += rng.u64(0..4);
                    entry(&label, timestamp)
                })
                .collect()
        })
        .collect()
}
