//! Replica resolution on top of the token ring.
//!
//! This crate turns a topology snapshot and the cluster's keyspace metadata
//! into a [`TokenMap`] answering "which hosts hold this token?":
//! - Keyspace replication metadata
//! - Pluggable replication strategies (Simple, NetworkTopology, Local)
//! - Atomic publication of rebuilt maps

pub mod error;
pub mod keyspace;
pub mod snapshot;
pub mod strategy;
pub mod token_map;

#[cfg(test)]
mod test_utils;

pub use error::ReplicationError;
pub use keyspace::KeyspaceMetadata;
pub use snapshot::SharedTokenMap;
pub use strategy::{NetworkTopologyStrategy, ReplicationStrategy, SimpleStrategy, Strategy};
pub use token_map::{KeyspaceEntry, TokenMap};
