//! Hash ring data structure.
//!
//! The ring is an immutable, ascending vector of [`VirtualNode`]s built from
//! one topology snapshot. Lookups binary-search it; replica walks traverse it
//! in token order and wrap around from the largest token back to the smallest.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::net::IpAddr;
use std::sync::Arc;

use itertools::Itertools;
use tracing::debug;

use crate::error::{Error, Result};
use crate::host::Host;
use crate::partitioner::TokenFactory;
use crate::ring::RingPosition;
use crate::vnode::VirtualNode;

/// Sorted `(token, host)` sequence of a cluster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashRing {
    factory: TokenFactory,
    /// Strictly ascending by token.
    vnodes: Vec<VirtualNode>,
    /// Distinct hosts, in order of their first appearance on the ring.
    hosts: Vec<Arc<Host>>,
}

impl HashRing {
    /// A ring without members.
    pub fn empty(factory: TokenFactory) -> Self {
        Self {
            factory,
            vnodes: Vec::new(),
            hosts: Vec::new(),
        }
    }

    /// Builds a ring from every host's advertised token strings.
    ///
    /// Fails if the partitioner is unknown, a token does not parse, or two
    /// distinct hosts claim the same token.
    pub fn build(
        partitioner: &str,
        tokens_by_host: &HashMap<Arc<Host>, HashSet<String>>,
    ) -> Result<Self> {
        let factory = TokenFactory::from_class_name(partitioner)?;
        tokens_by_host
            .iter()
            .fold(RingBuilder::new(factory), |builder, (host, tokens)| {
                builder.add_host(Arc::clone(host), tokens.iter().cloned())
            })
            .build()
    }

    pub fn factory(&self) -> TokenFactory {
        self.factory
    }

    /// Total number of ring entries (virtual nodes).
    pub fn len(&self) -> usize {
        self.vnodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vnodes.is_empty()
    }

    pub fn distinct_host_count(&self) -> usize {
        self.hosts.len()
    }

    /// Distinct hosts owning at least one token.
    pub fn hosts(&self) -> &[Arc<Host>] {
        &self.hosts
    }

    /// Iterates over all entries starting at the lowest token.
    pub fn iter(&self) -> impl Iterator<Item = &VirtualNode> {
        self.vnodes.iter()
    }

    pub fn entry(&self, index: usize) -> Option<&VirtualNode> {
        self.vnodes.get(index)
    }

    /// Tokens owned by `host`, ascending.
    ///
    /// The iterator borrows only the ring, so `host` may be a temporary.
    pub fn tokens_of<'a>(&'a self, host: &Host) -> impl Iterator<Item = &'a RingPosition> + 'a {
        let address = host.address;
        self.vnodes
            .iter()
            .filter(move |vnode| vnode.host.address == address)
            .map(|vnode| &vnode.token)
    }

    fn check_partitioner(&self, token: &RingPosition) -> Result<()> {
        if token.partitioner() == self.factory {
            Ok(())
        } else {
            Err(Error::TokenMismatch {
                expected: self.factory.name(),
                found: token.partitioner().name(),
            })
        }
    }

    /// Index of the entry owning `token`: the first entry whose token is
    /// greater than or equal to it, wrapping to the smallest token when `token`
    /// is past the last entry.
    ///
    /// # Returns
    /// `Ok(None)` for an empty ring, whatever the token's partitioner.
    /// `Err(Error::TokenMismatch)` if `token` was produced by another
    /// partitioner than the ring's.
    ///
    /// # Performance
    /// O(log n) binary search, n = ring entries.
    pub fn primary_owner(&self, token: &RingPosition) -> Result<Option<usize>> {
        if self.vnodes.is_empty() {
            return Ok(None);
        }
        self.check_partitioner(token)?;

        let index = self.vnodes.partition_point(|vnode| vnode.token < *token);
        Ok(Some(if index == self.vnodes.len() { 0 } else { index }))
    }

    /// Host owning `token`, if the ring has any members.
    pub fn primary_host(&self, token: &RingPosition) -> Result<Option<&Arc<Host>>> {
        Ok(self
            .primary_owner(token)?
            .map(|index| &self.vnodes[index].host))
    }

    /// Every entry exactly once, starting at `start` and wrapping around.
    pub fn ring_range_from(&self, start: usize) -> impl Iterator<Item = &VirtualNode> {
        let start = if self.vnodes.is_empty() {
            0
        } else {
            start % self.vnodes.len()
        };
        self.vnodes[start..].iter().chain(self.vnodes[..start].iter())
    }

    /// Every entry exactly once, starting at the owner of `token`.
    pub fn ring_range(&self, token: &RingPosition) -> Result<impl Iterator<Item = &VirtualNode>> {
        let start = self.primary_owner(token)?.unwrap_or(0);
        Ok(self.ring_range_from(start))
    }

    /// Collects up to `max_distinct_hosts` distinct hosts, walking the ring in
    /// ascending order from `start` and wrapping around once.
    ///
    /// Vnodes of an already collected host are skipped, so the result never
    /// holds more hosts than [`distinct_host_count`](Self::distinct_host_count).
    ///
    /// # Arguments
    /// * `start` - Index of the first entry to visit, taken modulo the ring length
    /// * `max_distinct_hosts` - Upper bound on the number of hosts returned
    ///
    /// # Performance
    /// O(n) in the worst case, when few distinct hosts own many vnodes.
    ///
    /// # Example
    /// ```rust
    /// use std::net::IpAddr;
    /// use std::sync::Arc;
    /// use corelib::{Host, RingBuilder, TokenFactory};
    ///
    /// let a = Arc::new(Host::new(IpAddr::from([10, 0, 0, 1])));
    /// let b = Arc::new(Host::new(IpAddr::from([10, 0, 0, 2])));
    /// let ring = RingBuilder::new(TokenFactory::Murmur3)
    ///     .add_host(Arc::clone(&a), ["0", "20"])
    ///     .add_host(Arc::clone(&b), ["10"])
    ///     .build()?;
    ///
    /// // Entries: 0 -> a, 10 -> b, 20 -> a. From 20 the walk wraps to 0 (a again).
    /// assert_eq!(ring.walk(2, 3), vec![a, b]);
    /// # Ok::<(), corelib::Error>(())
    /// ```
    pub fn walk(&self, start: usize, max_distinct_hosts: usize) -> Vec<Arc<Host>> {
        let mut replicas = Vec::with_capacity(max_distinct_hosts.min(self.hosts.len()));
        let mut seen: HashSet<IpAddr> = HashSet::with_capacity(replicas.capacity());

        for vnode in self.ring_range_from(start) {
            if replicas.len() >= max_distinct_hosts {
                break;
            }
            if seen.insert(vnode.host.address) {
                replicas.push(Arc::clone(&vnode.host));
            }
        }

        replicas
    }
}

/// Collects hosts and their token strings, then builds a [`HashRing`].
///
/// Parsing is deferred to [`build`](Self::build) so the whole snapshot is
/// either accepted or rejected at once.
#[derive(Debug, Clone)]
pub struct RingBuilder {
    factory: TokenFactory,
    hosts: Vec<(Arc<Host>, Vec<String>)>,
}

impl RingBuilder {
    pub fn new(factory: TokenFactory) -> Self {
        Self {
            factory,
            hosts: Vec::new(),
        }
    }

    /// Adds a host with the token strings it advertises.
    pub fn add_host<I, S>(mut self, host: Arc<Host>, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hosts
            .push((host, tokens.into_iter().map(Into::into).collect()));
        self
    }

    /// Parses and sorts all tokens.
    ///
    /// The same token listed twice for one host collapses into one entry. The
    /// same token owned by two distinct hosts is rejected; the error names the
    /// two addresses in ascending order.
    pub fn build(self) -> Result<HashRing> {
        let factory = self.factory;
        let mut vnodes = Vec::with_capacity(self.hosts.iter().map(|(_, t)| t.len()).sum());

        for (host, tokens) in self.hosts {
            for text in tokens {
                let token = factory.parse(&text).map_err(|e| Error::InvalidToken {
                    host: host.address,
                    token: text.clone(),
                    reason: e.to_string(),
                })?;
                vnodes.push(VirtualNode::new(token, Arc::clone(&host)));
            }
        }

        // Every token came from the same factory, so the comparison is total.
        vnodes.sort_by(|a, b| {
            a.token
                .partial_cmp(&b.token)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.host.cmp(&b.host))
        });

        let mut deduped: Vec<VirtualNode> = Vec::with_capacity(vnodes.len());
        for vnode in vnodes {
            if let Some(prev) = deduped.last() {
                if prev.token == vnode.token {
                    if prev.host != vnode.host {
                        return Err(Error::DuplicateToken {
                            token: vnode.token.to_string(),
                            first: prev.host.address,
                            second: vnode.host.address,
                        });
                    }
                    continue;
                }
            }
            deduped.push(vnode);
        }

        let hosts: Vec<Arc<Host>> = deduped
            .iter()
            .map(|vnode| &vnode.host)
            .unique()
            .cloned()
            .collect();

        debug!(
            partitioner = factory.name(),
            entries = deduped.len(),
            hosts = hosts.len(),
            "Built token ring"
        );

        Ok(HashRing {
            factory,
            vnodes: deduped,
            hosts,
        })
    }
}
