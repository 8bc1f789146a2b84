// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::pulled::Pulled;
use crate::source::LogSource;
use std::convert::Infallible;
use std::iter::Fuse;

/// A synchronous source over any iterator of entries.
///
/// The iterator is fused, so exhaustion is permanent even for iterators that
/// would resume after returning `None`.
#[derive(Debug, Clone)]
pub struct IterSource<I> {
    iter: Fuse<I>,
}

impl<I: Iterator> IterSource<I> {
    pub fn new<C>(entries: C) -> Self
    where
        C: IntoIterator<IntoIter = I>,
    {
        Self {
            iter: entries.into_iter().fuse(),
        }
    }
}

impl<I: Iterator> LogSource for IterSource<I> {
    type Entry = I::Item;
    type Error = Infallible;

    fn pull(&mut self) -> Result<Pulled<Self::Entry>, Self::Error> {
        Ok(self.iter.next().into())
    }
}

/// A synchronous source over an iterator of fallible reads, such as lines
/// parsed from a file.
#[derive(Debug, Clone)]
pub struct TryIterSource<I> {
    iter: Fuse<I>,
}

impl<I, T, E> TryIterSource<I>
where
    I: Iterator<Item = Result<T, E>>,
{
    pub fn new<C>(entries: C) -> Self
    where
        C: IntoIterator<IntoIter = I>,
    {
        Self {
            iter: entries.into_iter().fuse(),
        }
    }
}

impl<I, T, E> LogSource for TryIterSource<I>
where
    I: Iterator<Item = Result<T, E>>,
    E: std::error::Error + Send + Sync + 'static,
{
    type Entry = T;
    type Error = E;

    fn pull(&mut self) -> Result<Pulled<T>, E> {
        self.iter.next().transpose().map(Pulled::from)
    }
}
