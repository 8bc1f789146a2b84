// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use logmerge_core::{MergeError, Result};
use std::num::NonZeroUsize;

/// Entries requested per refill when nothing else is configured.
pub const DEFAULT_BATCH_SIZE: usize = 2;

/// Environment variable read by [`MergeConfig::from_env`] for the batch size.
pub const BATCH_SIZE_ENV: &str = "LOGMERGE_BATCH_SIZE";

/// Environment variable read by [`MergeConfig::from_env`] for strict ordering.
pub const STRICT_ORDER_ENV: &str = "LOGMERGE_STRICT_ORDER";

const DEFAULT_BATCH: NonZeroUsize = match NonZeroUsize::new(DEFAULT_BATCH_SIZE) {
    Some(batch) => batch,
    None => panic!("default batch size must be positive"),
};

/// Settings of one merge run.
///
/// - `batch_size`: entries pulled concurrently per refill of an asynchronous
///   source. Larger batches mean fewer suspension points and more resident
///   entries (at most `active sources * batch_size`). Synchronous merges ignore it.
/// - `strict_order`: reject sources whose timestamps go backwards with
///   [`MergeError::OutOfOrder`] instead of passing their entries through.
///
/// # Examples
///
/// ```
/// use logmerge::MergeConfig;
///
/// let config = MergeConfig::default().with_batch_size(8)?.with_strict_order(true);
/// assert_eq!(config.batch_size().get(), 8);
/// assert!(MergeConfig::default().with_batch_size(0).is_err());
/// # Ok::<(), logmerge::MergeError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MergeConfig {
    batch_size: NonZeroUsize,
    strict_order: bool,
}

impl MergeConfig {
    /// Sets the refill batch size.
    ///
    /// # Errors
    /// Returns [`MergeError::InvalidConfig`] if `batch_size` is zero.
    pub fn with_batch_size(self, batch_size: usize) -> Result<Self> {
        let batch_size = NonZeroUsize::new(batch_size)
            .ok_or_else(|| MergeError::invalid_config("batch size must be positive"))?;
        Ok(Self { batch_size, ..self })
    }

    #[must_use]
    pub const fn with_strict_order(self, strict_order: bool) -> Self {
        Self {
            strict_order,
            ..self
        }
    }

    pub const fn batch_size(&self) -> NonZeroUsize {
        self.batch_size
    }

    pub const fn strict_order(&self) -> bool {
        self.strict_order
    }

    /// Builds a configuration from `LOGMERGE_BATCH_SIZE` and `LOGMERGE_STRICT_ORDER`.
    ///
    /// Unset variables keep their defaults.
    ///
    /// # Errors
    /// Returns [`MergeError::InvalidConfig`] if a variable is set to an unusable value.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env), reading variables through `lookup`.
    ///
    /// # Errors
    /// Returns [`MergeError::InvalidConfig`] if a variable is set to an unusable value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(BATCH_SIZE_ENV) {
            let batch_size = raw.trim().parse::<usize>().map_err(|e| {
                MergeError::invalid_config(format!("{BATCH_SIZE_ENV}={raw:?}: {e}"))
            })?;
            config = config.with_batch_size(batch_size)?;
        }

        if let Some(raw) = lookup(STRICT_ORDER_ENV) {
            let strict = parse_flag(&raw).ok_or_else(|| {
                MergeError::invalid_config(format!("{STRICT_ORDER_ENV}={raw:?}: expected a boolean"))
            })?;
            config = config.with_strict_order(strict);
        }

        Ok(config)
    }
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH,
            strict_order: false,
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
