// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::pulled::Pulled;
use crate::source::AsyncLogSource;
use async_trait::async_trait;
use futures::lock::Mutex;
use futures::stream::{Fuse, Map};
use futures::{Stream, StreamExt};
use std::convert::Infallible;

type Infallibly<S, T> = Map<S, fn(T) -> Result<T, Infallible>>;

/// An asynchronous source over a stream of fallible reads.
///
/// Concurrent pulls queue on an async mutex and are served one stream item each.
pub struct StreamSource<S> {
    stream: Mutex<Fuse<S>>,
}

impl<S, T, E> StreamSource<S>
where
    S: Stream<Item = Result<T, E>>,
{
    pub fn new(stream: S) -> Self {
        Self {
            stream: Mutex::new(stream.fuse()),
        }
    }
}

impl<T> StreamSource<Infallibly<futures::stream::Iter<std::vec::IntoIter<T>>, T>> {
    /// Builds a source that yields the given entries and never fails.
    pub fn from_entries(entries: Vec<T>) -> Self {
        Self::infallible(futures::stream::iter(entries))
    }
}

impl<S, T> StreamSource<Infallibly<S, T>>
where
    S: Stream<Item = T>,
{
    /// Builds a source over a stream of plain entries.
    pub fn infallible(stream: S) -> Self {
        Self::new(stream.map(Ok as fn(T) -> Result<T, Infallible>))
    }
}

#[async_trait]
impl<S, T, E> AsyncLogSource for StreamSource<S>
where
    S: Stream<Item = Result<T, E>> + Send + Unpin,
    T: Send,
    E: std::error::Error + Send + Sync + 'static,
{
    type Entry = T;
    type Error = E;

    async fn pull_async(&self) -> Result<Pulled<T>, E> {
        let mut stream = self.stream.lock().await;
        stream.next().await.transpose().map(Pulled::from)
    }
}
