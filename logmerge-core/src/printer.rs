// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

/// The output sink of a merge.
///
/// `print` is called once per delivered entry, in delivery order. `done` is called
/// exactly once after the last `print` of a successful run. A run that fails never
/// calls `done`, leaving the sink in whatever partial state it reached.
pub trait Printer<T> {
    fn print(&mut self, entry: T);

    fn done(&mut self);
}

impl<T, P: Printer<T> + ?Sized> Printer<T> for &mut P {
    fn print(&mut self, entry: T) {
        (**self).print(entry);
    }

    fn done(&mut self) {
        (**self).done();
    }
}

impl<T, P: Printer<T> + ?Sized> Printer<T> for Box<P> {
    fn print(&mut self, entry: T) {
        (**self).print(entry);
    }

    fn done(&mut self) {
        (**self).done();
    }
}

/// A printer that keeps every delivered entry in memory.
#[derive(Debug, Clone)]
pub struct VecPrinter<T> {
    entries: Vec<T>,
    finished: bool,
}

impl<T> VecPrinter<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            finished: false,
        }
    }

    pub fn entries(&self) -> &[T] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<T> {
        self.entries
    }

    /// Whether `done` has been called.
    pub const fn is_finished(&self) -> bool {
        self.finished
    }
}

impl<T> Default for VecPrinter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Printer<T> for VecPrinter<T> {
    fn print(&mut self, entry: T) {
        self.entries.push(entry);
    }

    fn done(&mut self) {
        self.finished = true;
    }
}
