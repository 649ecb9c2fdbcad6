//! Network topology replication strategy.
//!
//! Each datacenter gets its own replication factor. Replicas are chosen by
//! walking the global ring from the primary entry and accepting a host when
//! its datacenter still needs replicas. Inside a datacenter, a host on a rack
//! not used yet is always accepted; a host on an already used rack is accepted
//! greedily, in ring order, while `rf - rack_count` repeats remain.
//!
//! Hosts on used racks are not deferred until every rack has been seen, so
//! the order can differ from Cassandra's placement: with `rf = 3` over
//! `r1:a, r1:b, r2:c` the replicas are `a, b, c`, not `a, c, b`.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use corelib::ring::HashRing;
use corelib::Host;
use itertools::Itertools;

use crate::error::ReplicationError;
use crate::strategy::ReplicationStrategy;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NetworkTopologyStrategy {
    datacenter_factors: BTreeMap<String, usize>,
}

struct DatacenterProgress<'a> {
    replicas_left: usize,
    acceptable_repeats: usize,
    used_racks: HashSet<Option<&'a str>>,
}

impl NetworkTopologyStrategy {
    pub const NAME: &'static str = "NetworkTopologyStrategy";

    pub fn new<I, S>(datacenter_factors: I) -> Self
    where
        I: IntoIterator<Item = (S, usize)>,
        S: Into<String>,
    {
        Self {
            datacenter_factors: datacenter_factors
                .into_iter()
                .map(|(dc, rf)| (dc.into(), rf))
                .collect(),
        }
    }

    /// Every option except `class` names a datacenter and its factor.
    pub fn from_options(options: &HashMap<String, String>) -> Result<Self, ReplicationError> {
        let mut datacenter_factors = BTreeMap::new();
        for (key, value) in options {
            if key == "class" {
                continue;
            }
            let rf = value
                .trim()
                .parse::<usize>()
                .map_err(|_| ReplicationError::InvalidOption {
                    strategy: Self::NAME,
                    option: key.clone(),
                    value: value.clone(),
                })?;
            datacenter_factors.insert(key.clone(), rf);
        }
        Ok(Self { datacenter_factors })
    }

    pub fn datacenter_factor(&self, datacenter: &str) -> Option<usize> {
        self.datacenter_factors.get(datacenter).copied()
    }

    fn progress_per_datacenter<'a>(
        &'a self,
        ring: &'a HashRing,
    ) -> HashMap<&'a str, DatacenterProgress<'a>> {
        let mut progress = HashMap::with_capacity(self.datacenter_factors.len());
        for (dc, &rf) in &self.datacenter_factors {
            let dc_hosts: Vec<&Arc<Host>> = ring
                .hosts()
                .iter()
                .filter(|host| host.datacenter.as_deref() == Some(dc.as_str()))
                .collect();
            let wanted = rf.min(dc_hosts.len());
            if wanted == 0 {
                continue;
            }
            // Hosts without a rack label share one implicit rack.
            let rack_count = dc_hosts.iter().map(|h| h.rack.as_deref()).unique().count();
            progress.insert(
                dc.as_str(),
                DatacenterProgress {
                    replicas_left: wanted,
                    acceptable_repeats: rf.saturating_sub(rack_count),
                    used_racks: HashSet::new(),
                },
            );
        }
        progress
    }
}

impl ReplicationStrategy for NetworkTopologyStrategy {
    /// Sum of all datacenter factors.
    fn replication_factor(&self) -> usize {
        self.datacenter_factors.values().sum()
    }

    fn replicas(&self, ring: &HashRing, primary: usize) -> Vec<Arc<Host>> {
        let mut progress = self.progress_per_datacenter(ring);
        let mut replicas_left: usize = progress.values().map(|p| p.replicas_left).sum();
        let mut replicas = Vec::with_capacity(replicas_left);

        for host in ring.ring_range_from(primary).map(|vnode| &vnode.host).unique() {
            if replicas_left == 0 {
                break;
            }
            let Some(dc) = host.datacenter.as_deref() else {
                continue;
            };
            let Some(dc_progress) = progress.get_mut(dc) else {
                continue;
            };
            if dc_progress.replicas_left == 0 {
                continue;
            }

            if !dc_progress.used_racks.insert(host.rack.as_deref()) {
                if dc_progress.acceptable_repeats == 0 {
                    continue;
                }
                dc_progress.acceptable_repeats -= 1;
            }

            dc_progress.replicas_left -= 1;
            replicas_left -= 1;
            replicas.push(Arc::clone(host));
        }

        replicas
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }
}
