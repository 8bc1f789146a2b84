// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use logmerge::{merge_sync, MergeConfig, MergeError, SyncMerge, SyncMergeExt};
use logmerge_core::{IterSource, LogEntry, TryIterSource, VecPrinter};
use logmerge_test_utils::test_data::{
    entries, scenario_interleaved, scenario_one_empty, scenario_ties, TestEntry,
};
use logmerge_test_utils::{
    assert_non_decreasing, sorted_merge, FailingSource, InjectedFailure, RecordingPrinter,
    VecSource,
};

fn vec_sources(data: &[Vec<TestEntry>]) -> Vec<VecSource<TestEntry>> {
    data.iter().cloned().map(VecSource::new).collect()
}

fn payloads(printer: &RecordingPrinter<TestEntry>) -> Vec<String> {
    printer
        .printed()
        .into_iter()
        .map(|entry| entry.payload().clone())
        .collect()
}

#[test]
fn test_sync_merge_interleaved_sources() -> anyhow::Result<()> {
    // Arrange
    let mut sources = vec_sources(&scenario_interleaved());
    let mut printer = RecordingPrinter::new();

    // Act
    let summary = merge_sync(&mut sources, &mut printer)?;

    // Assert
    assert_eq!(payloads(&printer), ["a1", "b2", "a3", "b4", "a5"]);
    printer.assert_completed();
    assert_eq!(summary.printed, 5);
    assert_eq!(summary.sources, 2);
    Ok(())
}

#[test]
fn test_sync_merge_ignores_empty_source() -> anyhow::Result<()> {
    // Arrange
    let data = scenario_one_empty();
    let mut sources = vec_sources(&data);
    let mut printer = RecordingPrinter::new();

    // Act
    merge_sync(&mut sources, &mut printer)?;

    // Assert
    assert_eq!(printer.into_printed(), sorted_merge(&data));
    assert_eq!(sources[1].pulls(), 1);
    Ok(())
}

#[test]
fn test_sync_merge_single_source_is_unchanged() -> anyhow::Result<()> {
    // Arrange
    let data = entries("only", &[1, 1, 2, 8, 13]);
    let mut sources = vec![VecSource::new(data.clone())];
    let mut printer = RecordingPrinter::new();

    // Act
    merge_sync(&mut sources, &mut printer)?;

    // Assert
    assert_eq!(printer.into_printed(), data);
    Ok(())
}

#[test]
fn test_sync_merge_without_sources_only_calls_done() -> anyhow::Result<()> {
    // Arrange
    let mut sources: Vec<VecSource<TestEntry>> = Vec::new();
    let mut printer = RecordingPrinter::new();

    // Act
    let summary = merge_sync(&mut sources, &mut printer)?;

    // Assert
    assert!(printer.printed().is_empty());
    printer.assert_completed();
    assert_eq!(summary.pulls, 0);
    Ok(())
}

#[test]
fn test_sync_merge_all_sources_empty_only_calls_done() -> anyhow::Result<()> {
    // Arrange
    let mut sources = vec_sources(&[Vec::new(), Vec::new(), Vec::new()]);
    let mut printer = RecordingPrinter::new();

    // Act
    let summary = merge_sync(&mut sources, &mut printer)?;

    // Assert
    assert!(printer.printed().is_empty());
    printer.assert_completed();
    assert_eq!(summary.pulls, 3);
    Ok(())
}

#[test]
fn test_sync_merge_never_pulls_exhausted_sources() -> anyhow::Result<()> {
    // Arrange
    let mut sources = vec_sources(&scenario_one_empty());
    let mut printer = RecordingPrinter::new();

    // Act
    merge_sync(&mut sources, &mut printer)?;

    // Assert
    for source in &sources {
        assert_eq!(source.pulls_after_exhaustion(), 0);
        assert_eq!(source.remaining(), 0);
    }
    Ok(())
}

#[test]
fn test_sync_merge_holds_one_entry_per_source() -> anyhow::Result<()> {
    // Arrange
    let data = vec![
        entries("a", &[1, 2, 3, 4]),
        entries("b", &[5, 6, 7]),
        entries("c", &[0, 9]),
    ];
    let mut sources = vec_sources(&data);
    let mut printer = RecordingPrinter::new();

    // Act
    let summary = merge_sync(&mut sources, &mut printer)?;

    // Assert
    assert_eq!(summary.peak_resident, 3);
    assert_eq!(summary.pulls, 9 + 3);
    assert_eq!(summary.suspensions, 0);
    Ok(())
}

#[test]
fn test_sync_merge_breaks_ties_by_source_order() -> anyhow::Result<()> {
    // Arrange
    let data = scenario_ties();
    let mut sources = vec_sources(&data);
    let mut printer = RecordingPrinter::new();

    // Act
    merge_sync(&mut sources, &mut printer)?;

    // Assert
    assert_eq!(
        payloads(&printer),
        ["a-first", "b-first", "a-second", "a-third", "b-second", "c-first"]
    );
    Ok(())
}

#[test]
fn test_sync_merge_passes_through_misordered_source() -> anyhow::Result<()> {
    // Arrange
    let mut sources = vec![
        VecSource::new(entries("a", &[5, 1])),
        VecSource::new(entries("b", &[3])),
    ];
    let mut printer = RecordingPrinter::new();

    // Act
    merge_sync(&mut sources, &mut printer)?;

    // Assert
    assert_eq!(payloads(&printer), ["b3", "a5", "a1"]);
    printer.assert_completed();
    Ok(())
}

#[test]
fn test_sync_merge_strict_mode_rejects_misordered_source() {
    // Arrange
    let mut sources = vec![
        VecSource::new(entries("a", &[5, 1])),
        VecSource::new(entries("b", &[3])),
    ];
    let mut printer = RecordingPrinter::new();
    let config = MergeConfig::default().with_strict_order(true);

    // Act
    let result = SyncMerge::with_config(&mut sources, &config).run(&mut printer);

    // Assert
    assert!(matches!(
        result,
        Err(MergeError::OutOfOrder { source_index: 0, .. })
    ));
    assert_eq!(printer.done_count(), 0);
}

#[test]
fn test_sync_merge_aborts_on_retrieval_failure() {
    // Arrange
    let mut sources = vec![
        FailingSource::new(entries("a", &[1, 3, 5]), 2),
        FailingSource::new(entries("b", &[2, 4]), 10),
    ];
    let mut printer = RecordingPrinter::new();

    // Act
    let result = merge_sync(&mut sources, &mut printer);

    // Assert
    let error = result.expect_err("expected the injected failure");
    assert_eq!(error.source_index(), Some(0));
    let cause = std::error::Error::source(&error).expect("expected a cause");
    assert_eq!(
        cause.downcast_ref::<InjectedFailure>(),
        Some(&InjectedFailure { after: 2 })
    );
    assert_eq!(payloads(&printer), ["a1", "b2", "a3"]);
    assert_eq!(printer.done_count(), 0);
}

#[test]
fn test_sync_merge_over_fallible_reads() {
    // Arrange
    let reads = vec![
        Ok(LogEntry::new(1_u64, "ok")),
        Err(std::io::Error::other("bad line")),
    ];
    let mut sources = vec![TryIterSource::new(reads)];
    let mut printer = VecPrinter::new();

    // Act
    let result = merge_sync(&mut sources, &mut printer);

    // Assert
    assert!(matches!(
        result,
        Err(MergeError::RetrievalFailure { source_index: 0, .. })
    ));
    assert!(!printer.is_finished());
}

#[test]
fn test_sync_merge_ext_on_vec_and_slice() -> anyhow::Result<()> {
    // Arrange
    let data = scenario_interleaved();
    let owned: Vec<_> = data.iter().cloned().map(IterSource::new).collect();
    let mut borrowed = vec_sources(&data);
    let mut from_vec = VecPrinter::new();
    let mut from_slice = VecPrinter::new();

    // Act
    owned.merge_into(&mut from_vec)?;
    borrowed.as_mut_slice().merge_into(&mut from_slice)?;

    // Assert
    assert_eq!(from_vec.entries(), from_slice.entries());
    assert_non_decreasing(from_vec.entries());
    Ok(())
}
