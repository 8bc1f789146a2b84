// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::pulled::Pulled;
use crate::source::AsyncLogSource;
use async_trait::async_trait;
use std::fmt;
use std::time::Duration;

/// Bounds every pull of an asynchronous source with a deadline.
///
/// A pull that does not resolve in time fails with [`DeadlineError::Elapsed`],
/// which aborts the merge like any other retrieval failure. Requires a tokio
/// runtime with the timer enabled.
pub struct DeadlineSource<S> {
    inner: S,
    deadline: Duration,
}

impl<S> DeadlineSource<S> {
    pub const fn new(inner: S, deadline: Duration) -> Self {
        Self { inner, deadline }
    }

    pub const fn deadline(&self) -> Duration {
        self.deadline
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

/// Failure of a pull made through a [`DeadlineSource`].
#[derive(Debug)]
pub enum DeadlineError<E> {
    /// The pull was still pending when the deadline passed
    Elapsed(Duration),
    /// The wrapped source failed
    Source(E),
}

impl<E: fmt::Display> fmt::Display for DeadlineError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Elapsed(deadline) => write!(f, "pull did not resolve within {deadline:?}"),
            Self::Source(error) => error.fmt(f),
        }
    }
}

impl<E: std::error::Error + 'static> std::error::Error for DeadlineError<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Elapsed(_) => None,
            Self::Source(error) => Some(error),
        }
    }
}

#[async_trait]
impl<S: AsyncLogSource> AsyncLogSource for DeadlineSource<S> {
    type Entry = S::Entry;
    type Error = DeadlineError<S::Error>;

    async fn pull_async(&self) -> Result<Pulled<Self::Entry>, Self::Error> {
        match tokio::time::timeout(self.deadline, self.inner.pull_async()).await {
            Ok(pulled) => pulled.map_err(DeadlineError::Source),
            Err(_) => Err(DeadlineError::Elapsed(self.deadline)),
        }
    }
}
