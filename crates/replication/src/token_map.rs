//! Token map: the ring of one topology snapshot plus each keyspace's
//! resolved replication strategy.
//!
//! A [`TokenMap`] is built once per topology change and never mutated; it is
//! answered from concurrently by sharing it behind an `Arc` (see
//! [`SharedTokenMap`](crate::snapshot::SharedTokenMap)).

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use corelib::ring::HashRing;
use corelib::{Host, RingPosition, TokenFactory, Topology};
use tracing::{debug, trace, warn};

use crate::keyspace::KeyspaceMetadata;
use crate::strategy::{ReplicationStrategy, Strategy};

/// A keyspace together with the strategy resolved from its metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyspaceEntry {
    pub metadata: KeyspaceMetadata,
    pub strategy: Strategy,
}

/// Immutable token-to-replicas index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenMap {
    ring: HashRing,
    keyspaces: HashMap<String, KeyspaceEntry>,
}

impl TokenMap {
    /// Builds the ring from every host's advertised tokens and resolves the
    /// replication strategy of every keyspace.
    ///
    /// Ring construction errors abort the build. A keyspace with invalid
    /// replication options does not: it is logged and answered with the
    /// primary replica only. A keyspace name listed twice keeps its last
    /// definition.
    pub fn build(
        partitioner: &str,
        tokens_by_host: &HashMap<Arc<Host>, HashSet<String>>,
        keyspaces: impl IntoIterator<Item = KeyspaceMetadata>,
    ) -> corelib::Result<Self> {
        let ring = HashRing::build(partitioner, tokens_by_host)?;
        Ok(Self::with_ring(ring, keyspaces))
    }

    /// Same as [`build`](Self::build), reading hosts and tokens from a
    /// topology snapshot.
    pub fn from_topology(
        topology: &Topology,
        keyspaces: impl IntoIterator<Item = KeyspaceMetadata>,
    ) -> corelib::Result<Self> {
        Ok(Self::with_ring(topology.ring()?, keyspaces))
    }

    /// Indexes keyspaces over an already built ring.
    pub fn with_ring(ring: HashRing, keyspaces: impl IntoIterator<Item = KeyspaceMetadata>) -> Self {
        let keyspaces: HashMap<String, KeyspaceEntry> = keyspaces
            .into_iter()
            .map(|metadata| {
                let strategy = resolve_strategy(&metadata);
                (metadata.name.clone(), KeyspaceEntry { metadata, strategy })
            })
            .collect();

        debug!(
            partitioner = ring.factory().name(),
            entries = ring.len(),
            hosts = ring.distinct_host_count(),
            keyspaces = keyspaces.len(),
            "Built token map"
        );

        Self { ring, keyspaces }
    }

    /// Replicas of `token` in `keyspace`, primary first.
    ///
    /// - an empty ring yields no replicas;
    /// - an absent or unknown keyspace yields the primary replica only;
    /// - a known keyspace yields what its strategy selects.
    ///
    /// # Arguments
    /// * `keyspace` - Keyspace whose strategy applies; `None` for primary only
    /// * `token` - Any token type convertible into a [`RingPosition`]
    ///
    /// # Returns
    /// Distinct hosts, primary first for Simple keyspaces, then in ring order.
    /// Fails with [`corelib::Error::TokenMismatch`] if `token` belongs to a
    /// different partitioner than the ring.
    ///
    /// # Performance
    /// O(log n) to find the primary plus a walk that stops once enough
    /// distinct hosts are collected.
    ///
    /// # Example
    /// ```rust
    /// use std::collections::{HashMap, HashSet};
    /// use std::net::IpAddr;
    /// use std::sync::Arc;
    /// use corelib::token::Murmur3Token;
    /// use corelib::Host;
    /// use replication::{KeyspaceMetadata, TokenMap};
    ///
    /// let tokens_by_host: HashMap<Arc<Host>, HashSet<String>> = [(1, "0"), (2, "10"), (3, "20")]
    ///     .into_iter()
    ///     .map(|(last, token)| {
    ///         let host = Arc::new(Host::new(IpAddr::from([10, 0, 0, last])));
    ///         (host, HashSet::from([token.to_owned()]))
    ///     })
    ///     .collect();
    /// let map = TokenMap::build(
    ///     "Murmur3Partitioner",
    ///     &tokens_by_host,
    ///     [KeyspaceMetadata::simple("ks", 2)],
    /// )?;
    ///
    /// let replicas = map.get_replicas(Some("ks"), Murmur3Token::new(15))?;
    /// let addresses: Vec<String> = replicas.iter().map(|h| h.address.to_string()).collect();
    /// assert_eq!(addresses, ["10.0.0.3", "10.0.0.1"]);
    ///
    /// let primary = map.get_replicas(None, Murmur3Token::new(15))?;
    /// assert_eq!(primary.len(), 1);
    /// # Ok::<(), corelib::Error>(())
    /// ```
    pub fn get_replicas(
        &self,
        keyspace: Option<&str>,
        token: impl Into<RingPosition>,
    ) -> corelib::Result<Vec<Arc<Host>>> {
        let token = token.into();
        let Some(primary) = self.ring.primary_owner(&token)? else {
            trace!(%token, "Token map is empty, no replicas");
            return Ok(Vec::new());
        };

        let replicas = match keyspace.and_then(|name| self.keyspaces.get(name)) {
            Some(entry) => entry.strategy.replicas(&self.ring, primary),
            None => self.ring.walk(primary, 1),
        };

        trace!(
            keyspace = keyspace.unwrap_or("<none>"),
            %token,
            replicas = replicas.len(),
            "Computed replicas"
        );
        Ok(replicas)
    }

    /// Hashes a serialized partition key with the map's partitioner and
    /// returns its replicas.
    pub fn get_replicas_for_key(
        &self,
        keyspace: Option<&str>,
        key: &[u8],
    ) -> corelib::Result<Vec<Arc<Host>>> {
        self.get_replicas(keyspace, self.ring.factory().hash(key))
    }

    /// Owner of `token`, or `None` for an empty ring.
    pub fn primary_replica(
        &self,
        token: impl Into<RingPosition>,
    ) -> corelib::Result<Option<Arc<Host>>> {
        Ok(self.ring.primary_host(&token.into())?.cloned())
    }

    pub fn ring(&self) -> &HashRing {
        &self.ring
    }

    pub fn factory(&self) -> TokenFactory {
        self.ring.factory()
    }

    /// Distinct hosts owning at least one token.
    pub fn hosts(&self) -> &[Arc<Host>] {
        self.ring.hosts()
    }

    pub fn keyspace(&self, name: &str) -> Option<&KeyspaceEntry> {
        self.keyspaces.get(name)
    }

    pub fn keyspace_names(&self) -> impl Iterator<Item = &str> {
        self.keyspaces.keys().map(String::as_str)
    }
}

fn resolve_strategy(metadata: &KeyspaceMetadata) -> Strategy {
    match Strategy::from_keyspace(metadata) {
        Ok(Strategy::Other { name, options }) => {
            debug!(
                keyspace = %metadata.name,
                strategy = %name,
                "Unknown replication strategy, only the primary replica will be used"
            );
            Strategy::Other { name, options }
        }
        Ok(strategy) => strategy,
        Err(error) => {
            warn!(
                keyspace = %metadata.name,
                %error,
                "Invalid replication options, only the primary replica will be used"
            );
            Strategy::Other {
                name: metadata.strategy_class.clone(),
                options: metadata.options.clone(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::Strategy;
    use crate::test_utils::{host, setup_tracing};
    use corelib::token::{ByteOrderedToken, Murmur3Token};
    use proptest::prelude::*;

    fn tokens_by_host(entries: &[(Arc<Host>, &[i64])]) -> HashMap<Arc<Host>, HashSet<String>> {
        entries
            .iter()
            .map(|(host, tokens)| {
                (
                    Arc::clone(host),
                    tokens.iter().map(|t| t.to_string()).collect(),
                )
            })
            .collect()
    }

    // {0 -> h0, 10 -> h1, 20 -> h2}, ks1 rf=2, ks2 rf=10.
    fn three_host_map() -> TokenMap {
        let tokens = tokens_by_host(&[(host(0), &[0]), (host(1), &[10]), (host(2), &[20])]);
        TokenMap::build(
            "org.apache.cassandra.dht.Murmur3Partitioner",
            &tokens,
            [
                KeyspaceMetadata::simple("ks1", 2),
                KeyspaceMetadata::simple("ks2", 10),
            ],
        )
        .unwrap()
    }

    fn replicas(map: &TokenMap, keyspace: Option<&str>, token: i64) -> Vec<Arc<Host>> {
        map.get_replicas(keyspace, Murmur3Token::new(token)).unwrap()
    }

    #[test]
    fn test_simple_strategy_scenarios() {
        setup_tracing();
        let map = three_host_map();
        let (h0, h1, h2) = (host(0), host(1), host(2));

        assert_eq!(replicas(&map, Some("ks1"), 0), vec![h0.clone(), h1.clone()]);
        assert_eq!(replicas(&map, Some("ks1"), 20), vec![h2.clone(), h0.clone()]);
        assert_eq!(replicas(&map, Some("ks1"), 19), vec![h2.clone(), h0.clone()]);
        assert_eq!(
            replicas(&map, Some("ks2"), 5),
            vec![h1.clone(), h2.clone(), h0.clone()]
        );
    }

    #[test]
    fn test_primary_only_without_known_keyspace() {
        setup_tracing();
        let map = three_host_map();

        assert_eq!(replicas(&map, None, 0), vec![host(0)]);
        assert_eq!(replicas(&map, None, 10), vec![host(1)]);
        assert_eq!(replicas(&map, None, 19), vec![host(2)]);
        assert_eq!(replicas(&map, Some("ks_does_not_exist"), 20), vec![host(2)]);
        // Past the largest token wraps to the smallest.
        assert_eq!(replicas(&map, None, 25), vec![host(0)]);
    }

    #[test]
    fn test_empty_ring_has_no_replicas() {
        setup_tracing();
        let map = TokenMap::build(
            "Murmur3Partitioner",
            &HashMap::new(),
            [KeyspaceMetadata::simple("ks1", 3)],
        )
        .unwrap();

        assert!(replicas(&map, Some("ks1"), 0).is_empty());
        assert!(replicas(&map, None, 0).is_empty());
        assert_eq!(map.primary_replica(Murmur3Token::new(0)), Ok(None));
        assert!(map.get_replicas_for_key(None, b"key").unwrap().is_empty());
    }

    #[test]
    fn test_token_of_other_partitioner_is_rejected() {
        let map = three_host_map();
        let err = map
            .get_replicas(Some("ks1"), ByteOrderedToken::from_bytes(b"k".to_vec()))
            .unwrap_err();
        assert_eq!(
            err,
            corelib::Error::TokenMismatch {
                expected: "Murmur3Partitioner",
                found: "ByteOrderedPartitioner",
            }
        );
    }

    #[test]
    fn test_build_errors() {
        let tokens = tokens_by_host(&[(host(0), &[0])]);
        assert!(matches!(
            TokenMap::build("com.example.MyPartitioner", &tokens, []),
            Err(corelib::Error::UnknownPartitioner(_))
        ));

        let tokens = tokens_by_host(&[(host(0), &[7]), (host(1), &[7])]);
        assert_eq!(
            TokenMap::build("Murmur3Partitioner", &tokens, []),
            Err(corelib::Error::DuplicateToken {
                token: "7".to_owned(),
                first: host(0).address,
                second: host(1).address,
            })
        );
    }

    #[test]
    fn test_invalid_options_fall_back_to_primary() {
        setup_tracing();
        let tokens = tokens_by_host(&[(host(0), &[0]), (host(1), &[10]), (host(2), &[20])]);
        let broken = KeyspaceMetadata::new(
            "broken",
            "SimpleStrategy",
            HashMap::from([("replication_factor".to_owned(), "x".to_owned())]),
        );
        let custom = KeyspaceMetadata::new("custom", "com.example.Custom", HashMap::new());
        let map = TokenMap::build("Murmur3Partitioner", &tokens, [broken, custom]).unwrap();

        assert_eq!(replicas(&map, Some("broken"), 5), vec![host(1)]);
        assert_eq!(replicas(&map, Some("custom"), 5), vec![host(1)]);
        assert!(matches!(
            map.keyspace("broken").map(|entry| &entry.strategy),
            Some(Strategy::Other { .. })
        ));
    }

    #[test]
    fn test_replicas_for_key_and_primary() {
        let map = three_host_map();
        let token = map.factory().hash(b"primary_key");
        assert_eq!(token, RingPosition::from(Murmur3Token::new(-1632642444691073360)));

        // Below every token, so owned by the smallest one.
        assert_eq!(
            map.get_replicas_for_key(Some("ks1"), b"primary_key").unwrap(),
            vec![host(0), host(1)]
        );
        assert_eq!(map.primary_replica(token), Ok(Some(host(0))));
    }

    #[test]
    fn test_vnodes_are_deduplicated_by_host() {
        let tokens = tokens_by_host(&[(host(0), &[0, 5]), (host(1), &[10, 15])]);
        let map = TokenMap::build("Murmur3Partitioner", &tokens, [KeyspaceMetadata::simple("ks", 3)])
            .unwrap();

        assert_eq!(map.hosts().len(), 2);
        assert_eq!(replicas(&map, Some("ks"), 1), vec![host(0), host(1)]);
        assert_eq!(replicas(&map, Some("ks"), 11), vec![host(1), host(0)]);
    }

    #[test]
    fn test_network_topology_keyspace() {
        let dc_host = |last: u8, dc: &str| {
            Arc::new(Host::with_topology(
                host(last).address,
                dc.to_owned(),
                "r1".to_owned(),
            ))
        };
        let tokens: HashMap<Arc<Host>, HashSet<String>> = [
            (dc_host(1, "dc1"), "0"),
            (dc_host(2, "dc2"), "10"),
            (dc_host(3, "dc1"), "20"),
            (dc_host(4, "dc2"), "30"),
        ]
        .into_iter()
        .map(|(host, token)| (host, HashSet::from([token.to_owned()])))
        .collect();

        let map = TokenMap::build(
            "Murmur3Partitioner",
            &tokens,
            [KeyspaceMetadata::network_topology("ks", [("dc2", 1)])],
        )
        .unwrap();

        // The primary (host 1) lives in dc1, so it is not a replica.
        assert_eq!(replicas(&map, Some("ks"), 0), vec![host(2)]);
        assert_eq!(replicas(&map, Some("ks"), 25), vec![host(4)]);
    }

    #[test]
    fn test_rebuild_is_idempotent() {
        let first = three_host_map();
        let second = three_host_map();
        assert_eq!(first, second);
        for token in [-100, 0, 5, 10, 19, 20, 25] {
            assert_eq!(
                replicas(&first, Some("ks1"), token),
                replicas(&second, Some("ks1"), token)
            );
        }
    }

    proptest! {
        #[test]
        fn proptest_simple_replicas_follow_ring_order(
            tokens in proptest::collection::btree_set(any::<i64>(), 1..40),
            host_count in 1u8..6,
            rf in 0usize..8,
            query in any::<i64>(),
        ) {
            let sorted: Vec<i64> = tokens.into_iter().collect();
            let owner = |index: usize| host((index % host_count as usize) as u8);

            let mut by_host: HashMap<Arc<Host>, HashSet<String>> = HashMap::new();
            for (index, token) in sorted.iter().enumerate() {
                by_host.entry(owner(index)).or_default().insert(token.to_string());
            }
            let map = TokenMap::build(
                "Murmur3Partitioner",
                &by_host,
                [KeyspaceMetadata::simple("ks", rf)],
            )
            .unwrap();

            let distinct = sorted.len().min(host_count as usize);
            let primary = sorted.iter().position(|t| *t >= query).unwrap_or(0);
            let mut expected: Vec<Arc<Host>> = Vec::new();
            for offset in 0..sorted.len() {
                let candidate = owner((primary + offset) % sorted.len());
                if !expected.contains(&candidate) {
                    expected.push(candidate);
                }
            }
            expected.truncate(rf.min(distinct));

            let got = map.get_replicas(Some("ks"), Murmur3Token::new(query)).unwrap();
            prop_assert_eq!(got.len(), rf.min(distinct));
            prop_assert_eq!(&got, &expected);

            let primary_only = map.get_replicas(None, Murmur3Token::new(query)).unwrap();
            prop_assert_eq!(primary_only, vec![owner(primary)]);
        }
    }
}
