//! Simple replication strategy.
//!
//! Places N replicas sequentially around the ring (clockwise from the primary).
//! This is the simplest replication strategy and works well for:
//!
//! - Small clusters
//! - Single data center deployments
//! - When network topology doesn't matter
//!
//! # Algorithm
//!
//! 1. Find the primary entry (first token at or after the key's token)
//! 2. Continue clockwise, collecting hosts not yet seen
//! 3. Stop at N hosts or when the ring is exhausted (primary first)

use std::collections::HashMap;

use crate::error::ReplicationError;
use crate::strategy::ReplicationStrategy;

/// Simple replication strategy: N replicas placed sequentially around the ring.
///
/// Replica selection is the default [`ReplicationStrategy::replicas`] walk; the
/// strategy only contributes the factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimpleStrategy {
    /// Number of replicas to create (including primary).
    replication_factor: usize,
}

impl SimpleStrategy {
    pub const NAME: &'static str = "SimpleStrategy";
    const FACTOR_OPTION: &'static str = "replication_factor";

    /// Create a simple strategy with the given replication factor.
    ///
    /// # Arguments
    /// * `replication_factor` - Number of replicas including the primary
    ///   - 0: no replicas are reported
    ///   - 3: the usual choice (primary + 2 replicas)
    ///
    /// Factors larger than the number of distinct hosts are capped at lookup
    /// time.
    ///
    /// # Example
    /// ```rust
    /// use replication::{ReplicationStrategy, SimpleStrategy};
    ///
    /// let strategy = SimpleStrategy::new(3);
    /// assert_eq!(strategy.replication_factor(), 3);
    /// assert_eq!(strategy.name(), "SimpleStrategy");
    /// ```
    pub fn new(replication_factor: usize) -> Self {
        Self { replication_factor }
    }

    /// Reads the `replication_factor` option.
    pub fn from_options(options: &HashMap<String, String>) -> Result<Self, ReplicationError> {
        let value = options
            .get(Self::FACTOR_OPTION)
            .ok_or(ReplicationError::MissingOption {
                strategy: Self::NAME,
                option: Self::FACTOR_OPTION,
            })?;

        value
            .trim()
            .parse::<usize>()
            .map(Self::new)
            .map_err(|_| ReplicationError::InvalidOption {
                strategy: Self::NAME,
                option: Self::FACTOR_OPTION.to_owned(),
                value: value.clone(),
            })
    }
}

impl ReplicationStrategy for SimpleStrategy {
    fn replication_factor(&self) -> usize {
        self.replication_factor
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }
}
