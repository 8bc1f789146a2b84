// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use logmerge_core::Printer;

/// One call received by a [`RecordingPrinter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrinterEvent<T> {
    Print(T),
    Done,
}

/// A printer that records every call, in order.
#[derive(Debug, Clone)]
pub struct RecordingPrinter<T> {
    events: Vec<PrinterEvent<T>>,
}

impl<T> RecordingPrinter<T> {
    pub const fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn events(&self) -> &[PrinterEvent<T>] {
        &self.events
    }

    /// Entries printed so far, in print order.
    pub fn printed(&self) -> Vec<&T> {
        self.events
            .iter()
            .filter_map(|event| match event {
                PrinterEvent::Print(entry) => Some(entry),
                PrinterEvent::Done => None,
            })
            .collect()
    }

    pub fn into_printed(self) -> Vec<T> {
        self.events
            .into_iter()
            .filter_map(|event| match event {
                PrinterEvent::Print(entry) => Some(entry),
                PrinterEvent::Done => None,
            })
            .collect()
    }

    pub fn done_count(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, PrinterEvent::Done))
            .count()
    }

    /// Asserts `done` was called exactly once, after the last `print`.
    pub fn assert_completed(&self) {
        assert_eq!(self.done_count(), 1, "expected exactly one done() call");
        assert!(
            matches!(self.events.last(), Some(PrinterEvent::Done)),
            "expected done() to be the last call"
        );
    }
}

impl<T> Default for RecordingPrinter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Printer<T> for RecordingPrinter<T> {
    fn print(&mut self, entry: T) {
        self.events.push(PrinterEvent::Print(entry));
    }

    fn done(&mut self) {
        self.events.push(PrinterEvent::Done);
    }
}
