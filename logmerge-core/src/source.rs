// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Pull interfaces over log sources.
//!
//! A source yields its entries in non-decreasing timestamp order, one pull at a
//! time, and signals [`Pulled::Exhausted`] once it has nothing left. Once a source
//! reports exhaustion it must keep doing so; merges never pull it again anyway.
//!
//! Failures other than exhaustion are reported through the source's `Error` type
//! and abort the merge run.

use crate::pulled::Pulled;
use async_trait::async_trait;
use std::sync::Arc;

/// A source whose pull returns immediately.
pub trait LogSource {
    /// Entry type produced by this source
    type Entry;

    /// Error raised when retrieval fails for a reason other than exhaustion
    type Error: std::error::Error + Send + Sync + 'static;

    /// Pulls the next entry.
    ///
    /// # Errors
    /// Returns `Err` when the underlying retrieval fails.
    fn pull(&mut self) -> Result<Pulled<Self::Entry>, Self::Error>;
}

impl<S: LogSource + ?Sized> LogSource for &mut S {
    type Entry = S::Entry;
    type Error = S::Error;

    fn pull(&mut self) -> Result<Pulled<Self::Entry>, Self::Error> {
        (**self).pull()
    }
}

impl<S: LogSource + ?Sized> LogSource for Box<S> {
    type Entry = S::Entry;
    type Error = S::Error;

    fn pull(&mut self) -> Result<Pulled<Self::Entry>, Self::Error> {
        (**self).pull()
    }
}

/// A source whose pull may suspend until the next entry is available.
///
/// `pull_async` takes `&self` so that several pulls can be in flight against the
/// same source at once; implementations serialize access internally. Each call
/// must eventually resolve to an entry, exhaustion or an error.
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use logmerge_core::{AsyncLogSource, LogEntry, Pulled};
/// use std::convert::Infallible;
/// use std::sync::Mutex;
///
/// struct Countdown(Mutex<u64>);
///
/// #[async_trait]
/// impl AsyncLogSource for Countdown {
///     type Entry = LogEntry<&'static str>;
///     type Error = Infallible;
///
///     async fn pull_async(&self) -> Result<Pulled<Self::Entry>, Infallible> {
///         let mut left = self.0.lock().unwrap();
///         if *left == 0 {
///             return Ok(Pulled::Exhausted);
///         }
///         *left -= 1;
///         Ok(Pulled::Entry(LogEntry::new(10 - *left, "tick")))
///     }
/// }
/// ```
#[async_trait]
pub trait AsyncLogSource: Send + Sync {
    /// Entry type produced by this source
    type Entry: Send;

    /// Error raised when retrieval fails for a reason other than exhaustion
    type Error: std::error::Error + Send + Sync + 'static;

    /// Pulls the next entry, suspending until it is available.
    ///
    /// # Errors
    /// Returns `Err` when the underlying retrieval fails.
    async fn pull_async(&self) -> Result<Pulled<Self::Entry>, Self::Error>;
}

#[async_trait]
impl<S: AsyncLogSource + ?Sized> AsyncLogSource for &S {
    type Entry = S::Entry;
    type Error = S::Error;

    async fn pull_async(&self) -> Result<Pulled<Self::Entry>, Self::Error> {
        (**self).pull_async().await
    }
}

#[async_trait]
impl<S: AsyncLogSource + ?Sized> AsyncLogSource for Box<S> {
    type Entry = S::Entry;
    type Error = S::Error;

    async fn pull_async(&self) -> Result<Pulled<Self::Entry>, Self::Error> {
        (**self).pull_async().await
    }
}

#[async_trait]
impl<S: AsyncLogSource + ?Sized> AsyncLogSource for Arc<S> {
    type Entry = S::Entry;
    type Error = S::Error;

    async fn pull_async(&self) -> Result<Pulled<Self::Entry>, Self::Error> {
        (**self).pull_async().await
    }
}
