// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::has_timestamp::HasTimestamp;
use std::fmt;

/// An immutable log entry: a timestamp and an opaque payload.
///
/// The default timestamp type is a `u64` (epoch millis, sequence numbers, ...),
/// but any `Ord + Copy` type can be used.
///
/// Equality compares both fields. There is no `Ord` impl: entries are ordered by
/// timestamp alone, inside a merge.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LogEntry<P, Ts = u64> {
    timestamp: Ts,
    payload: P,
}

impl<P, Ts> LogEntry<P, Ts> {
    pub const fn new(timestamp: Ts, payload: P) -> Self {
        Self { timestamp, payload }
    }

    pub const fn payload(&self) -> &P {
        &self.payload
    }

    pub fn into_payload(self) -> P {
        self.payload
    }

    pub fn into_parts(self) -> (Ts, P) {
        (self.timestamp, self.payload)
    }
}

impl<P, Ts> HasTimestamp for LogEntry<P, Ts>
where
    Ts: Ord + Copy + Send + Sync + fmt::Debug,
{
    type Timestamp = Ts;

    fn timestamp(&self) -> Ts {
        self.timestamp
    }
}

impl<P, Ts> From<(Ts, P)> for LogEntry<P, Ts> {
    fn from((timestamp, payload): (Ts, P)) -> Self {
        Self::new(timestamp, payload)
    }
}

impl<P: fmt::Display, Ts: fmt::Debug> fmt::Display for LogEntry<P, Ts> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.timestamp, self.payload)
    }
}
