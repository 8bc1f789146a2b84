// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Ready-made adapters turning iterators and streams into log sources.

mod iter_source;
#[cfg(feature = "std")]
mod stream_source;

#[cfg(feature = "runtime-tokio")]
mod deadline_source;

pub use iter_source::{IterSource, TryIterSource};
#[cfg(feature = "std")]
pub use stream_source::StreamSource;

#[cfg(feature = "runtime-tokio")]
pub use deadline_source::{DeadlineError, DeadlineSource};
