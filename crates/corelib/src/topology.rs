//! Topology snapshots.
//!
//! A [`Topology`] is the input a driver's metadata layer hands over whenever
//! cluster membership or token ownership changes: the partitioner class name
//! and every host with the token strings it advertises.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::error::Result;
use crate::host::Host;
use crate::ring::HashRing;

/// One host and the tokens it owns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostTokens {
    #[serde(flatten)]
    pub host: Host,
    pub tokens: Vec<String>,
}

/// Full topology snapshot of a cluster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topology {
    /// Partitioner class name, e.g. `org.apache.cassandra.dht.Murmur3Partitioner`.
    pub partitioner: String,
    #[serde(default)]
    pub hosts: Vec<HostTokens>,
}

impl Topology {
    pub fn new(partitioner: impl Into<String>) -> Self {
        Self {
            partitioner: partitioner.into(),
            hosts: Vec::new(),
        }
    }

    pub fn with_host<I, S>(mut self, host: Host, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hosts.push(HostTokens {
            host,
            tokens: tokens.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Tokens grouped by host. A host listed twice gets the union of its tokens.
    pub fn tokens_by_host(&self) -> HashMap<Arc<Host>, HashSet<String>> {
        let mut map: HashMap<Arc<Host>, HashSet<String>> = HashMap::with_capacity(self.hosts.len());
        for entry in &self.hosts {
            map.entry(Arc::new(entry.host.clone()))
                .or_default()
                .extend(entry.tokens.iter().cloned());
        }
        map
    }

    pub fn ring(&self) -> Result<HashRing> {
        HashRing::build(&self.partitioner, &self.tokens_by_host())
    }
}
