// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

/// A minimal trait for entries that carry a timestamp for merge ordering.
///
/// The merge never inspects anything but the timestamp, so payloads stay opaque.
/// Timestamps must be totally ordered; entries with equal timestamps are allowed.
///
/// # Examples
///
/// ```
/// use logmerge_core::HasTimestamp;
///
/// #[derive(Clone, Debug)]
/// struct AccessLine {
///     line: String,
///     at: u64,
/// }
///
/// impl HasTimestamp for AccessLine {
///     type Timestamp = u64;
///
///     fn timestamp(&self) -> u64 {
///         self.at
///     }
/// }
/// ```
///
/// Wall-clock types work the same way:
///
/// ```rust
/// use logmerge_core::HasTimestamp;
/// use std::time::SystemTime;
///
/// struct Event {
///     time: SystemTime,
/// }
///
/// impl HasTimestamp for Event {
///     type Timestamp = SystemTime;
///     fn timestamp(&self) -> SystemTime { self.time }
/// }
/// ```
pub trait HasTimestamp {
    /// The type representing the timestamp
    type Timestamp: Ord + Copy + Send + Sync + std::fmt::Debug;

    /// Returns the timestamp used to place this entry in the merged output.
    fn timestamp(&self) -> Self::Timestamp;
}

impl<T: HasTimestamp + ?Sized> HasTimestamp for Box<T> {
    type Timestamp = T::Timestamp;

    fn timestamp(&self) -> Self::Timestamp {
        (**self).timestamp()
    }
}

impl<T: HasTimestamp + ?Sized> HasTimestamp for std::sync::Arc<T> {
    type Timestamp = T::Timestamp;

    fn timestamp(&self) -> Self::Timestamp {
        (**self).timestamp()
    }
}
