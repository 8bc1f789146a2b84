// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error types for merge runs.
//!
//! A merge run either completes, or aborts with a [`MergeError`]. Source exhaustion
//! is not an error and never shows up here; see [`Pulled`](crate::Pulled).
//!
//! # Examples
//!
//! ```
//! use logmerge_core::{MergeError, Result};
//!
//! fn check_batch(batch_size: usize) -> Result<()> {
//!     if batch_size == 0 {
//!         return Err(MergeError::invalid_config("batch size must be positive"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_batch(0).is_err());
//! ```

/// Position of a source in the slice handed to a merge.
pub type SourceIndex = usize;

/// Root error type for merge runs
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    /// A source failed for a reason other than exhaustion
    ///
    /// The run is aborted: continuing without the source would silently drop
    /// its remaining entries.
    #[error("Retrieval from source {source_index} failed: {error}")]
    RetrievalFailure {
        /// The failing source
        source_index: SourceIndex,
        /// The error reported by the source
        #[source]
        error: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A source yielded a timestamp lower than one it yielded before
    ///
    /// Only reported when strict ordering is enabled.
    #[error("Source {source_index} went back in time: {current} after {previous}")]
    OutOfOrder {
        /// The misbehaving source
        source_index: SourceIndex,
        /// Debug rendering of the previous timestamp
        previous: String,
        /// Debug rendering of the offending timestamp
        current: String,
    },

    /// The merge configuration is unusable
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// What is wrong with it
        message: String,
    },
}

impl MergeError {
    /// Wrap a source error
    pub fn retrieval(
        source_index: SourceIndex,
        error: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::RetrievalFailure {
            source_index,
            error: Box::new(error),
        }
    }

    /// Create an out-of-order error from the two offending timestamps
    pub fn out_of_order<Ts: std::fmt::Debug>(
        source_index: SourceIndex,
        previous: Ts,
        current: Ts,
    ) -> Self {
        Self::OutOfOrder {
            source_index,
            previous: format!("{previous:?}"),
            current: format!("{current:?}"),
        }
    }

    /// Create an invalid configuration error with the given message
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// The source responsible for this error, if any
    #[must_use]
    pub const fn source_index(&self) -> Option<SourceIndex> {
        match self {
            Self::RetrievalFailure { source_index, .. } | Self::OutOfOrder { source_index, .. } => {
                Some(*source_index)
            }
            Self::InvalidConfig { .. } => None,
        }
    }

    /// Check if this error indicates a permanent failure
    ///
    /// Retrieval failures may be transient on the source side; the run that
    /// observed them is over either way.
    #[must_use]
    pub const fn is_permanent(&self) -> bool {
        matches!(self, Self::OutOfOrder { .. } | Self::InvalidConfig { .. })
    }
}

/// Specialized Result type for merge operations
pub type Result<T> = std::result::Result<T, MergeError>;
