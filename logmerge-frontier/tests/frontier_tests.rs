// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use logmerge_core::LogEntry;
use logmerge_frontier::Frontier;

type Entry = LogEntry<&'static str>;

fn drain(frontier: &mut Frontier<Entry>) -> Vec<(usize, &'static str)> {
    std::iter::from_fn(|| frontier.extract_min())
        .map(|(source, entry)| (source, *entry.payload()))
        .collect()
}

#[test]
fn test_extracts_in_timestamp_order() {
    // Arrange
    let mut frontier = Frontier::new(3);
    frontier.insert(0, LogEntry::new(30, "a30"));
    frontier.insert(1, LogEntry::new(10, "b10"));
    frontier.insert(2, LogEntry::new(20, "c20"));

    // Act
    let order = drain(&mut frontier);

    // Assert
    assert_eq!(order, vec![(1, "b10"), (2, "c20"), (0, "a30")]);
    assert!(frontier.is_empty());
}

#[test]
fn test_empty_frontier() {
    let mut frontier = Frontier::<Entry>::new(2);

    assert!(frontier.is_empty());
    assert_eq!(frontier.len(), 0);
    assert_eq!(frontier.peek_timestamp(), None);
    assert_eq!(frontier.extract_min(), None);
}

#[test]
fn test_resident_counts_follow_inserts_and_extractions() {
    // Arrange
    let mut frontier = Frontier::new(2);
    frontier.insert(0, LogEntry::new(1, "a1"));
    frontier.insert(0, LogEntry::new(4, "a4"));
    frontier.insert(1, LogEntry::new(2, "b2"));

    // Act & Assert
    assert_eq!(frontier.resident_count(0), 2);
    assert_eq!(frontier.resident_count(1), 1);
    assert_eq!(frontier.len(), 3);

    assert_eq!(frontier.extract_min().map(|(s, _)| s), Some(0));
    assert_eq!(frontier.resident_count(0), 1);

    assert_eq!(frontier.extract_min().map(|(s, _)| s), Some(1));
    assert_eq!(frontier.resident_count(1), 0);

    assert_eq!(frontier.peek_timestamp(), Some(4));
    assert_eq!(frontier.resident_count(7), 0);
}

#[test]
fn test_equal_timestamps_come_out_by_source_then_insertion() {
    // Arrange
    let mut frontier = Frontier::new(3);
    frontier.insert(2, LogEntry::new(5, "c-first"));
    frontier.insert(0, LogEntry::new(5, "a-first"));
    frontier.insert(1, LogEntry::new(5, "b-first"));
    frontier.insert(0, LogEntry::new(5, "a-second"));

    // Act
    let order = drain(&mut frontier);

    // Assert
    assert_eq!(
        order,
        vec![
            (0, "a-first"),
            (0, "a-second"),
            (1, "b-first"),
            (2, "c-first")
        ]
    );
}

#[test]
fn test_interleaved_insert_and_extract() {
    // Arrange
    let mut frontier = Frontier::new(2);
    frontier.insert(0, LogEntry::new(1, "a1"));
    frontier.insert(1, LogEntry::new(2, "b2"));

    // Act
    let first = frontier.extract_min();
    frontier.insert(0, LogEntry::new(3, "a3"));
    let second = frontier.extract_min();
    frontier.insert(1, LogEntry::new(4, "b4"));
    let rest = drain(&mut frontier);

    // Assert
    assert_eq!(first, Some((0, LogEntry::new(1, "a1"))));
    assert_eq!(second, Some((1, LogEntry::new(2, "b2"))));
    assert_eq!(rest, vec![(0, "a3"), (1, "b4")]);
}

#[test]
fn test_payloads_do_not_affect_order() {
    // Arrange
    let mut frontier = Frontier::new(2);
    frontier.insert(0, LogEntry::new(2, "zzz"));
    frontier.insert(1, LogEntry::new(1, ""));

    // Act
    let order = drain(&mut frontier);

    // Assert
    assert_eq!(order, vec![(1, ""), (0, "zzz")]);
}
