//! Replication strategy abstractions.
//!
//! A replication strategy decides how many replicas a keyspace wants and which
//! hosts hold them, given the index of the primary entry on the ring:
//!
//! - **SimpleStrategy**: N distinct hosts walked clockwise from the primary
//! - **NetworkTopologyStrategy**: per-datacenter factors, spread across racks
//! - **LocalStrategy**: the primary only
//!
//! Strategies are resolved once per keyspace by class name into the closed
//! [`Strategy`] enum.

pub mod network_topology;
pub mod simple;

use std::collections::HashMap;
use std::sync::Arc;

use corelib::ring::HashRing;
use corelib::Host;

use crate::error::ReplicationError;
use crate::keyspace::KeyspaceMetadata;

pub use network_topology::NetworkTopologyStrategy;
pub use simple::SimpleStrategy;

/// Trait for replication strategies.
///
/// Implementations must be thread-safe (Send + Sync) as a built token map is
/// shared across threads.
pub trait ReplicationStrategy: Send + Sync + 'static {
    /// Desired number of replicas, before capping to the number of distinct
    /// hosts on the ring.
    fn replication_factor(&self) -> usize;

    /// Hosts holding replicas of the token owned by the entry at `primary`.
    ///
    /// The default walks the ring clockwise from `primary`, collecting up to
    /// `replication_factor` distinct hosts, primary first.
    fn replicas(&self, ring: &HashRing, primary: usize) -> Vec<Arc<Host>> {
        ring.walk(
            primary,
            self.replication_factor().min(ring.distinct_host_count()),
        )
    }

    /// Strategy name (for logging/debugging).
    fn name(&self) -> &'static str;
}

/// Replication strategy of one keyspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    Simple(SimpleStrategy),
    NetworkTopology(NetworkTopologyStrategy),
    /// Data stays on the owning host.
    Local,
    /// A strategy class this crate does not understand; only the primary
    /// replica is reported.
    Other {
        name: String,
        options: HashMap<String, String>,
    },
}

impl Strategy {
    pub const LOCAL_NAME: &'static str = "LocalStrategy";
    pub const OTHER_NAME: &'static str = "Other";

    /// Resolves a keyspace's strategy from its class name and options.
    ///
    /// Class names may be fully qualified
    /// (`org.apache.cassandra.locator.SimpleStrategy`); only the last segment
    /// is matched. Unknown classes resolve to [`Strategy::Other`].
    pub fn from_keyspace(keyspace: &KeyspaceMetadata) -> Result<Self, ReplicationError> {
        let class = keyspace.strategy_class.trim();
        let short_name = class.rsplit('.').next().unwrap_or(class);

        match short_name {
            SimpleStrategy::NAME => {
                SimpleStrategy::from_options(&keyspace.options).map(Strategy::Simple)
            }
            NetworkTopologyStrategy::NAME => {
                NetworkTopologyStrategy::from_options(&keyspace.options)
                    .map(Strategy::NetworkTopology)
            }
            Self::LOCAL_NAME => Ok(Strategy::Local),
            _ => Ok(Strategy::Other {
                name: class.to_owned(),
                options: keyspace.options.clone(),
            }),
        }
    }
}

impl ReplicationStrategy for Strategy {
    fn replication_factor(&self) -> usize {
        match self {
            Strategy::Simple(simple) => simple.replication_factor(),
            Strategy::NetworkTopology(nts) => nts.replication_factor(),
            Strategy::Local | Strategy::Other { .. } => 1,
        }
    }

    fn replicas(&self, ring: &HashRing, primary: usize) -> Vec<Arc<Host>> {
        match self {
            Strategy::Simple(simple) => simple.replicas(ring, primary),
            Strategy::NetworkTopology(nts) => nts.replicas(ring, primary),
            Strategy::Local | Strategy::Other { .. } => ring.walk(primary, 1),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Strategy::Simple(simple) => simple.name(),
            Strategy::NetworkTopology(nts) => nts.name(),
            Strategy::Local => Self::LOCAL_NAME,
            Strategy::Other { .. } => Self::OTHER_NAME,
        }
    }
}
