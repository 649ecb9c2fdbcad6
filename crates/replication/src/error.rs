//! Errors raised while interpreting a keyspace's replication options.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ReplicationError {
    /// A strategy requires an option the keyspace does not define.
    #[error("{strategy} requires the '{option}' option")]
    MissingOption {
        strategy: &'static str,
        option: &'static str,
    },

    /// An option value is not a valid replication factor.
    #[error("{strategy} option '{option}' is not a valid replication factor: {value:?}")]
    InvalidOption {
        strategy: &'static str,
        option: String,
        value: String,
    },
}
