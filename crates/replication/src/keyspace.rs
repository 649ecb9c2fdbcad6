//! Keyspace replication metadata.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The part of a keyspace's schema that determines replica placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyspaceMetadata {
    /// Unique keyspace name.
    pub name: String,
    /// Replication strategy class, short or fully qualified.
    pub strategy_class: String,
    /// Strategy options, e.g. `replication_factor` or per-datacenter factors.
    #[serde(default)]
    pub options: HashMap<String, String>,
}

impl KeyspaceMetadata {
    pub fn new(
        name: impl Into<String>,
        strategy_class: impl Into<String>,
        options: HashMap<String, String>,
    ) -> Self {
        Self {
            name: name.into(),
            strategy_class: strategy_class.into(),
            options,
        }
    }

    /// A `SimpleStrategy` keyspace with the given replication factor.
    pub fn simple(name: impl Into<String>, replication_factor: usize) -> Self {
        Self::new(
            name,
            "SimpleStrategy",
            HashMap::from([(
                "replication_factor".to_owned(),
                replication_factor.to_string(),
            )]),
        )
    }

    /// A `NetworkTopologyStrategy` keyspace with per-datacenter factors.
    pub fn network_topology<I, S>(name: impl Into<String>, datacenter_factors: I) -> Self
    where
        I: IntoIterator<Item = (S, usize)>,
        S: Into<String>,
    {
        Self::new(
            name,
            "NetworkTopologyStrategy",
            datacenter_factors
                .into_iter()
                .map(|(dc, rf)| (dc.into(), rf.to_string()))
                .collect(),
        )
    }
}
