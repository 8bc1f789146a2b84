// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

/// The result of pulling from a source: the next entry, or exhaustion.
///
/// Exhaustion is a normal end-of-source signal, not an error, and never overlaps
/// with any payload value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pulled<T> {
    /// The next entry of the source
    Entry(T),
    /// The source has no further entries, now or later
    Exhausted,
}

impl<T> Pulled<T> {
    #[must_use]
    pub const fn is_entry(&self) -> bool {
        matches!(self, Self::Entry(_))
    }

    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted)
    }

    /// Returns the entry, or `None` for exhaustion.
    pub fn into_entry(self) -> Option<T> {
        match self {
            Self::Entry(entry) => Some(entry),
            Self::Exhausted => None,
        }
    }

    pub const fn as_ref(&self) -> Pulled<&T> {
        match self {
            Self::Entry(entry) => Pulled::Entry(entry),
            Self::Exhausted => Pulled::Exhausted,
        }
    }

    pub fn map<U, F>(self, f: F) -> Pulled<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Entry(entry) => Pulled::Entry(f(entry)),
            Self::Exhausted => Pulled::Exhausted,
        }
    }
}

impl<T> From<Option<T>> for Pulled<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Exhausted, Self::Entry)
    }
}

impl<T> From<Pulled<T>> for Option<T> {
    fn from(value: Pulled<T>) -> Self {
        value.into_entry()
    }
}
