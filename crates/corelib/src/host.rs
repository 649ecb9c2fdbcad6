//! Hosts participating in the token ring.
//!
//! A host is identified by its network address. Everything else it carries
//! (datacenter, rack) is placement metadata used by topology-aware
//! replication strategies.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::net::IpAddr;

/// A physical node of the cluster.
///
/// Keep this struct small and cheap to share; heavy mutable state (connections,
/// health, etc.) belongs to the driver, not to the ring.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Host {
    pub address: IpAddr,
    /// Optional data center label for topology‑aware replication.
    #[serde(default)]
    pub datacenter: Option<String>,
    /// Optional rack label for rack‑aware replication.
    #[serde(default)]
    pub rack: Option<String>,
}

impl Host {
    /// Construct a host with no placement labels.
    pub fn new(address: IpAddr) -> Self {
        Self {
            address,
            datacenter: None,
            rack: None,
        }
    }

    pub fn with_topology(
        address: IpAddr,
        datacenter: impl Into<Option<String>>,
        rack: impl Into<Option<String>>,
    ) -> Self {
        Self {
            address,
            datacenter: datacenter.into(),
            rack: rack.into(),
        }
    }
}

// Identity is the address alone.
impl PartialEq for Host {
    fn eq(&self, other: &Self) -> bool {
        self.address == other.address
    }
}

impl Eq for Host {}

impl Hash for Host {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.address.hash(state);
    }
}

impl PartialOrd for Host {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Host {
    fn cmp(&self, other: &Self) -> Ordering {
        self.address.cmp(&other.address)
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.address)
    }
}
